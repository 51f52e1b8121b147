// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Probe group and its validation engine.

A [`ProbeGroup`] owns an ordered collection of probes plus the format
metadata of the document they came from. Every constructor and
deserialization path runs [`ProbeGroup::validate`], which enforces
cross-field consistency and backfills missing optional arrays, so no
partially-validated group is ever observable.
*/

use super::contact::Contact;
use super::probe::{Probe, RawProbe};
use crate::types::{ProbeInterfaceError, ProbeInterfaceResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Device channel value marking a contact that is not wired to any
/// acquisition channel. May repeat freely; every other value must be unique
/// across the whole group.
pub const UNCONNECTED_CHANNEL: i32 = -1;

/// The top-level document: one or more probes used together in a recording
/// session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeGroup {
    specification: String,
    version: String,
    probes: Vec<Probe>,
}

impl ProbeGroup {
    /// Format identifier every document must carry
    pub const SPECIFICATION: &'static str = "probeinterface";

    /// Format version written by this implementation
    pub const FORMAT_VERSION: &'static str = "0.2.21";

    //region constructors

    /// Create a validated probe group.
    ///
    /// Validation runs before the group is returned; on failure the group is
    /// discarded and the error describes the offending probe and field.
    pub fn new(
        specification: String,
        version: String,
        probes: Vec<Probe>,
    ) -> ProbeInterfaceResult<Self> {
        let mut group = ProbeGroup {
            specification,
            version,
            probes,
        };
        group.validate()?;
        Ok(group)
    }

    /// Create a validated probe group with the canonical format metadata
    pub fn from_probes(probes: Vec<Probe>) -> ProbeInterfaceResult<Self> {
        Self::new(
            Self::SPECIFICATION.to_string(),
            Self::FORMAT_VERSION.to_string(),
            probes,
        )
    }

    //endregion

    //region accessors

    pub fn specification(&self) -> &str {
        &self.specification
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn probes(&self) -> &[Probe] {
        &self.probes
    }

    /// Total contact count across all probes
    pub fn number_of_contacts(&self) -> usize {
        self.probes.iter().map(Probe::number_of_contacts).sum()
    }

    /// Contact ids flattened across probes, probe order then within-probe
    /// order
    pub fn contact_ids(&self) -> Vec<String> {
        self.probes
            .iter()
            .flat_map(|probe| probe.contact_ids().unwrap_or(&[]).iter().cloned())
            .collect()
    }

    /// Device channel indices flattened across probes
    pub fn device_channel_indices(&self) -> Vec<i32> {
        self.probes
            .iter()
            .flat_map(|probe| probe.device_channel_indices().unwrap_or(&[]).iter().copied())
            .collect()
    }

    /// All contacts flattened across probes, probe order then index order
    pub fn contacts(&self) -> ProbeInterfaceResult<Vec<Contact>> {
        let mut all = Vec::with_capacity(self.number_of_contacts());
        for probe in &self.probes {
            all.extend(probe.contacts()?);
        }
        Ok(all)
    }

    //endregion

    //region validation engine

    /// Run the full validation pipeline.
    ///
    /// Stages run in order; each stage's postcondition is the next stage's
    /// precondition. Defaults fill only absent arrays and the zero-index
    /// shift cannot re-trigger on an already 0-based id set, so validating
    /// an already-validated group changes nothing.
    pub fn validate(&mut self) -> ProbeInterfaceResult<()> {
        self.check_structure()?;
        self.check_array_lengths()?;
        self.fill_default_contact_ids();
        self.normalize_contact_ids()?;
        self.fill_default_shank_ids();
        self.fill_default_plane_axes();
        self.fill_default_device_channel_indices();
        self.check_device_channel_indices()?;
        Ok(())
    }

    /// Whether every non-unconnected device channel is claimed by exactly
    /// one contact across the group
    pub fn validate_device_channel_indices(&self) -> bool {
        self.check_device_channel_indices().is_ok()
    }

    fn check_structure(&self) -> ProbeInterfaceResult<()> {
        if self.specification != Self::SPECIFICATION {
            return Err(ProbeInterfaceError::InvalidStructure(format!(
                "Field `specification` must be '{}', got '{}'",
                Self::SPECIFICATION,
                self.specification
            )));
        }
        if self.version.trim().is_empty() {
            return Err(ProbeInterfaceError::InvalidStructure(
                "Field `version` cannot be empty".to_string(),
            ));
        }
        if self.probes.is_empty() {
            return Err(ProbeInterfaceError::InvalidStructure(
                "A probe group must contain at least one probe".to_string(),
            ));
        }
        Ok(())
    }

    fn check_array_lengths(&self) -> ProbeInterfaceResult<()> {
        for (probe_index, probe) in self.probes.iter().enumerate() {
            let expected = probe.number_of_contacts();
            let mismatch = |field: &'static str, actual: usize| {
                ProbeInterfaceError::LengthMismatch(format!(
                    "Probe {}: field `{}` has {} elements, expected {}",
                    probe_index, field, actual, expected
                ))
            };

            if probe.contact_shapes().len() != expected {
                return Err(mismatch("contact_shapes", probe.contact_shapes().len()));
            }
            if probe.contact_shape_params().len() != expected {
                return Err(mismatch(
                    "contact_shape_params",
                    probe.contact_shape_params().len(),
                ));
            }
            if let Some(axes) = probe.contact_plane_axes() {
                if axes.len() != expected {
                    return Err(mismatch("contact_plane_axes", axes.len()));
                }
            }
            if let Some(ids) = probe.contact_ids() {
                if ids.len() != expected {
                    return Err(mismatch("contact_ids", ids.len()));
                }
            }
            if let Some(ids) = probe.shank_ids() {
                if ids.len() != expected {
                    return Err(mismatch("shank_ids", ids.len()));
                }
            }
            if let Some(indices) = probe.device_channel_indices() {
                if indices.len() != expected {
                    return Err(mismatch("device_channel_indices", indices.len()));
                }
            }
            if let Some(annotations) = probe.contact_annotations() {
                if annotations.len() != expected {
                    return Err(mismatch("contact_annotations", annotations.len()));
                }
            }
            // probe_planar_contour is exempt: the outline polygon has its
            // own length.
        }
        Ok(())
    }

    fn fill_default_contact_ids(&mut self) {
        for (probe_index, probe) in self.probes.iter_mut().enumerate() {
            if probe.contact_ids.is_none() {
                let n = probe.number_of_contacts();
                debug!(
                    "Probe {} has no contact ids, assigning stringified 0..{}",
                    probe_index, n
                );
                probe.contact_ids = Some(Probe::default_contact_ids(n));
            }
        }
    }

    /// Group-wide zero-index normalization.
    ///
    /// Parses every contact id as an integer. When the full id set forms a
    /// dense 1-based permutation of 1..total, every id is rewritten to
    /// `parsed - 1`. A single duplicate or out-of-range value anywhere
    /// disables the rewrite for all probes; an unparseable id fails the
    /// whole validation.
    fn normalize_contact_ids(&mut self) -> ProbeInterfaceResult<()> {
        let mut parsed: Vec<Vec<i64>> = Vec::with_capacity(self.probes.len());
        for (probe_index, probe) in self.probes.iter().enumerate() {
            let ids = probe.contact_ids().unwrap_or(&[]);
            let mut row = Vec::with_capacity(ids.len());
            for id in ids {
                let value = id.parse::<i64>().map_err(|_| {
                    ProbeInterfaceError::MalformedContactId(format!(
                        "Probe {}: contact id '{}' is not an integer",
                        probe_index, id
                    ))
                })?;
                row.push(value);
            }
            parsed.push(row);
        }

        let total: usize = parsed.iter().map(Vec::len).sum();
        if total == 0 {
            return Ok(());
        }

        let mut seen = HashSet::with_capacity(total);
        let mut min = i64::MAX;
        let mut max = i64::MIN;
        let mut all_distinct = true;
        for &value in parsed.iter().flatten() {
            min = min.min(value);
            max = max.max(value);
            if !seen.insert(value) {
                all_distinct = false;
            }
        }

        if all_distinct && min == 1 && max == total as i64 {
            info!(
                "Contact ids form a 1-based sequence over {} contacts, shifting to 0-based",
                total
            );
            for (probe, row) in self.probes.iter_mut().zip(parsed) {
                probe.contact_ids = Some(row.into_iter().map(|v| (v - 1).to_string()).collect());
            }
        }
        Ok(())
    }

    fn fill_default_shank_ids(&mut self) {
        for (probe_index, probe) in self.probes.iter_mut().enumerate() {
            if probe.shank_ids.is_none() {
                let n = probe.number_of_contacts();
                debug!("Probe {} has no shank ids, assigning {} empty ids", probe_index, n);
                probe.shank_ids = Some(Probe::default_shank_ids(n));
            }
        }
    }

    fn fill_default_plane_axes(&mut self) {
        for (probe_index, probe) in self.probes.iter_mut().enumerate() {
            if probe.contact_plane_axes.is_none() {
                let n = probe.number_of_contacts();
                debug!("Probe {} has no plane axes, assigning canonical axes", probe_index);
                probe.contact_plane_axes = Some(Probe::default_contact_plane_axes(n));
            }
        }
    }

    /// Derive missing device channel indices from the (already normalized)
    /// contact ids, best effort: an unparseable id leaves that channel at 0.
    fn fill_default_device_channel_indices(&mut self) {
        for (probe_index, probe) in self.probes.iter_mut().enumerate() {
            if probe.device_channel_indices.is_some() {
                continue;
            }
            let n = probe.number_of_contacts();
            let ids = probe.contact_ids.as_deref().unwrap_or(&[]);
            let mut indices = vec![0i32; n];
            for (slot, id) in indices.iter_mut().zip(ids) {
                match id.parse::<i32>() {
                    Ok(value) => *slot = value,
                    Err(_) => warn!(
                        "Probe {}: contact id '{}' is not numeric, device channel stays 0",
                        probe_index, id
                    ),
                }
            }
            debug!(
                "Probe {} has no device channel indices, derived {} from contact ids",
                probe_index, n
            );
            probe.device_channel_indices = Some(indices);
        }
    }

    fn check_device_channel_indices(&self) -> ProbeInterfaceResult<()> {
        check_channel_uniqueness(
            self.probes
                .iter()
                .map(|probe| probe.device_channel_indices().unwrap_or(&[])),
        )
    }

    //endregion

    //region controlled mutation

    /// Replace one probe's device channel wiring.
    ///
    /// The replacement must match the existing array's length and keep every
    /// non-unconnected channel globally unique. The candidate view is
    /// checked before anything is committed, so a rejected update leaves the
    /// group in its prior, valid state.
    pub fn update_device_channel_indices(
        &mut self,
        probe_index: usize,
        new_indices: Vec<i32>,
    ) -> ProbeInterfaceResult<()> {
        let probe_count = self.probes.len();
        let probe = self.probes.get(probe_index).ok_or_else(|| {
            ProbeInterfaceError::InvalidInput(format!(
                "Probe index {} out of range for group with {} probes",
                probe_index, probe_count
            ))
        })?;

        let expected = probe
            .device_channel_indices()
            .map_or(probe.number_of_contacts(), |indices| indices.len());
        if new_indices.len() != expected {
            return Err(ProbeInterfaceError::LengthMismatch(format!(
                "Probe {}: field `device_channel_indices` has {} elements, expected {}",
                probe_index,
                new_indices.len(),
                expected
            )));
        }

        check_channel_uniqueness(self.probes.iter().enumerate().map(|(i, p)| {
            if i == probe_index {
                new_indices.as_slice()
            } else {
                p.device_channel_indices().unwrap_or(&[])
            }
        }))?;

        self.probes[probe_index].device_channel_indices = Some(new_indices);
        Ok(())
    }

    /// Append a probe, revalidating the whole group.
    ///
    /// The candidate group is validated before the addition is committed; a
    /// failed add leaves the group unchanged.
    pub fn add_probe(&mut self, probe: Probe) -> ProbeInterfaceResult<()> {
        let mut candidate = self.clone();
        candidate.probes.push(probe);
        candidate.validate()?;
        *self = candidate;
        Ok(())
    }

    //endregion

    /// Convert a raw wire document into a validated group
    pub(crate) fn try_from_raw(raw: RawProbeGroup) -> ProbeInterfaceResult<Self> {
        let missing = |field: &str| {
            ProbeInterfaceError::InvalidStructure(format!("Missing required field `{}`", field))
        };

        let specification = raw.specification.ok_or_else(|| missing("specification"))?;
        let version = raw.version.ok_or_else(|| missing("version"))?;
        let raw_probes = raw.probes.ok_or_else(|| missing("probes"))?;

        let mut probes = Vec::with_capacity(raw_probes.len());
        for (probe_index, raw_probe) in raw_probes.into_iter().enumerate() {
            probes.push(raw_probe.into_probe(probe_index)?);
        }
        Self::new(specification, version, probes)
    }
}

/// Check global uniqueness of device channels over one slice per probe.
/// `UNCONNECTED_CHANNEL` is exempt and may repeat.
fn check_channel_uniqueness<'a, I>(per_probe: I) -> ProbeInterfaceResult<()>
where
    I: IntoIterator<Item = &'a [i32]>,
{
    let mut seen: HashMap<i32, usize> = HashMap::new();
    for (probe_index, indices) in per_probe.into_iter().enumerate() {
        for &value in indices {
            if value == UNCONNECTED_CHANNEL {
                continue;
            }
            if let Some(previous) = seen.insert(value, probe_index) {
                return Err(ProbeInterfaceError::DuplicateChannelIndex(format!(
                    "Device channel {} is claimed by probe {} and probe {}",
                    value, previous, probe_index
                )));
            }
        }
    }
    Ok(())
}

/// Raw top-level document as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawProbeGroup {
    #[serde(default)]
    pub specification: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub probes: Option<Vec<RawProbe>>,
}

// Deserialization parses the raw mirror, then constructs through the
// validating constructor, so serde never yields an unvalidated group.
impl<'de> Deserialize<'de> for ProbeGroup {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProbeGroup::deserialize(deserializer)?;
        ProbeGroup::try_from_raw(raw)
            .map_err(|e| serde::de::Error::custom(format!("Invalid probe group: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_uniqueness_exempts_unconnected() {
        let first: Vec<i32> = vec![0, 1, -1];
        let second: Vec<i32> = vec![2, -1, -1];
        assert!(check_channel_uniqueness([first.as_slice(), second.as_slice()]).is_ok());
    }

    #[test]
    fn test_channel_uniqueness_rejects_collision() {
        let first: Vec<i32> = vec![0, 1, -1];
        let second: Vec<i32> = vec![1, -1, -1];
        let result = check_channel_uniqueness([first.as_slice(), second.as_slice()]);
        assert!(matches!(
            result,
            Err(ProbeInterfaceError::DuplicateChannelIndex(_))
        ));
    }

    #[test]
    fn test_channel_uniqueness_within_one_probe() {
        let only: Vec<i32> = vec![4, 4];
        assert!(check_channel_uniqueness([only.as_slice()]).is_err());
    }
}
