// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Probe data structure.

Owns the per-contact parallel arrays (positions, shapes, shape parameters,
plane axes, channel wiring, contact and shank ids) for one physical probe.
Cross-array consistency and defaulting are enforced by the owning
[`ProbeGroup`](super::ProbeGroup); the setters here only validate what they
can see locally.
*/

use super::annotations::{ContactAnnotations, ProbeAnnotations};
use super::contact::Contact;
use super::descriptors::{
    ContactShape, ContactShapeParams, Dimensionality, PlanarPosition, PlaneAxes, SiUnits,
};
use crate::types::{ProbeInterfaceError, ProbeInterfaceResult};
use serde::{Deserialize, Deserializer, Serialize};

/// One physical probe: per-contact parallel arrays plus scalar metadata.
///
/// The canonical contact count N is the length of `contact_positions`; every
/// other per-contact array is validated against it, never the reverse.
/// Optional arrays (`contact_plane_axes`, `device_channel_indices`,
/// `contact_ids`, `shank_ids`) stay absent until group validation backfills
/// them with computed defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Probe {
    pub(crate) ndim: Dimensionality,
    pub(crate) si_units: SiUnits,
    pub(crate) annotations: ProbeAnnotations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) contact_annotations: Option<ContactAnnotations>,
    pub(crate) contact_positions: Vec<PlanarPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) contact_plane_axes: Option<Vec<PlaneAxes>>,
    pub(crate) contact_shapes: Vec<ContactShape>,
    pub(crate) contact_shape_params: Vec<ContactShapeParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) probe_planar_contour: Option<Vec<PlanarPosition>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) device_channel_indices: Option<Vec<i32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) contact_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) shank_ids: Option<Vec<String>>,
}

impl Probe {
    /// Create an empty probe with the given coordinate space
    pub fn new(ndim: Dimensionality, si_units: SiUnits) -> Self {
        Probe {
            ndim,
            si_units,
            annotations: ProbeAnnotations::default(),
            contact_annotations: None,
            contact_positions: Vec::new(),
            contact_plane_axes: None,
            contact_shapes: Vec::new(),
            contact_shape_params: Vec::new(),
            probe_planar_contour: None,
            device_channel_indices: None,
            contact_ids: None,
            shank_ids: None,
        }
    }

    //region accessors

    pub fn ndim(&self) -> Dimensionality {
        self.ndim
    }

    pub fn si_units(&self) -> SiUnits {
        self.si_units
    }

    pub fn annotations(&self) -> &ProbeAnnotations {
        &self.annotations
    }

    pub fn contact_annotations(&self) -> Option<&ContactAnnotations> {
        self.contact_annotations.as_ref()
    }

    pub fn contact_positions(&self) -> &[PlanarPosition] {
        &self.contact_positions
    }

    pub fn contact_plane_axes(&self) -> Option<&[PlaneAxes]> {
        self.contact_plane_axes.as_deref()
    }

    pub fn contact_shapes(&self) -> &[ContactShape] {
        &self.contact_shapes
    }

    pub fn contact_shape_params(&self) -> &[ContactShapeParams] {
        &self.contact_shape_params
    }

    pub fn probe_planar_contour(&self) -> Option<&[PlanarPosition]> {
        self.probe_planar_contour.as_deref()
    }

    pub fn device_channel_indices(&self) -> Option<&[i32]> {
        self.device_channel_indices.as_deref()
    }

    pub fn contact_ids(&self) -> Option<&[String]> {
        self.contact_ids.as_deref()
    }

    pub fn shank_ids(&self) -> Option<&[String]> {
        self.shank_ids.as_deref()
    }

    /// The canonical contact count N for this probe
    pub fn number_of_contacts(&self) -> usize {
        self.contact_positions.len()
    }

    //endregion

    //region contact materialization

    /// Materialize one contact by reading the same index from each parallel
    /// array.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range, or if the defaulted
    /// arrays have not yet been populated by group validation.
    pub fn contact(&self, index: usize) -> ProbeInterfaceResult<Contact> {
        let count = self.number_of_contacts();
        if index >= count {
            return Err(ProbeInterfaceError::InvalidInput(format!(
                "Contact index {} out of range for probe with {} contacts",
                index, count
            )));
        }

        let unpopulated = |field: &str| {
            ProbeInterfaceError::InvalidInput(format!(
                "Field `{}` has no entry for contact {}; validate the owning probe group first",
                field, index
            ))
        };

        Ok(Contact {
            position: self.contact_positions[index],
            shape: self
                .contact_shapes
                .get(index)
                .copied()
                .ok_or_else(|| unpopulated("contact_shapes"))?,
            shape_params: self
                .contact_shape_params
                .get(index)
                .copied()
                .ok_or_else(|| unpopulated("contact_shape_params"))?,
            device_channel_index: self
                .device_channel_indices
                .as_ref()
                .and_then(|indices| indices.get(index))
                .copied()
                .ok_or_else(|| unpopulated("device_channel_indices"))?,
            contact_id: self
                .contact_ids
                .as_ref()
                .and_then(|ids| ids.get(index))
                .cloned()
                .ok_or_else(|| unpopulated("contact_ids"))?,
            shank_id: self
                .shank_ids
                .as_ref()
                .and_then(|ids| ids.get(index))
                .cloned()
                .ok_or_else(|| unpopulated("shank_ids"))?,
            index,
        })
    }

    /// Materialize every contact in index order
    pub fn contacts(&self) -> ProbeInterfaceResult<Vec<Contact>> {
        (0..self.number_of_contacts())
            .map(|index| self.contact(index))
            .collect()
    }

    //endregion

    //region builder setters

    /// Replace the contact arrays that define this probe's geometry.
    ///
    /// `shapes` and `shape_params` must have one entry per position. Arrays
    /// set earlier (ids, shanks, channel wiring) are validated against the
    /// new contact count when the owning group is validated.
    pub fn set_contacts(
        &mut self,
        positions: Vec<PlanarPosition>,
        shapes: Vec<ContactShape>,
        shape_params: Vec<ContactShapeParams>,
    ) -> ProbeInterfaceResult<()> {
        if shapes.len() != positions.len() {
            return Err(ProbeInterfaceError::LengthMismatch(format!(
                "Field `contact_shapes` has {} elements, expected {} (one per contact position)",
                shapes.len(),
                positions.len()
            )));
        }
        if shape_params.len() != positions.len() {
            return Err(ProbeInterfaceError::LengthMismatch(format!(
                "Field `contact_shape_params` has {} elements, expected {} (one per contact position)",
                shape_params.len(),
                positions.len()
            )));
        }
        self.contact_positions = positions;
        self.contact_shapes = shapes;
        self.contact_shape_params = shape_params;
        Ok(())
    }

    /// Assign per-contact labels
    pub fn set_contact_ids(&mut self, contact_ids: Vec<String>) -> ProbeInterfaceResult<()> {
        self.expect_contact_count("contact_ids", contact_ids.len())?;
        self.contact_ids = Some(contact_ids);
        Ok(())
    }

    /// Wire contacts to hardware acquisition channels (-1 = unconnected)
    pub fn set_device_channel_indices(&mut self, indices: Vec<i32>) -> ProbeInterfaceResult<()> {
        self.expect_contact_count("device_channel_indices", indices.len())?;
        self.device_channel_indices = Some(indices);
        Ok(())
    }

    /// Assign contacts to shanks
    pub fn set_shank_ids(&mut self, shank_ids: Vec<String>) -> ProbeInterfaceResult<()> {
        self.expect_contact_count("shank_ids", shank_ids.len())?;
        self.shank_ids = Some(shank_ids);
        Ok(())
    }

    /// Assign per-contact local axes
    pub fn set_contact_plane_axes(&mut self, axes: Vec<PlaneAxes>) -> ProbeInterfaceResult<()> {
        self.expect_contact_count("contact_plane_axes", axes.len())?;
        self.contact_plane_axes = Some(axes);
        Ok(())
    }

    /// Set the outline polygon of the probe. Free length; the contour is not
    /// a per-contact array.
    pub fn set_planar_contour(&mut self, contour: Vec<PlanarPosition>) {
        self.probe_planar_contour = Some(contour);
    }

    /// Attach free-text annotations to each contact
    pub fn set_contact_annotations(
        &mut self,
        annotations: ContactAnnotations,
    ) -> ProbeInterfaceResult<()> {
        self.expect_contact_count("contact_annotations", annotations.len())?;
        self.contact_annotations = Some(annotations);
        Ok(())
    }

    /// Set probe-level annotations (name, manufacturer)
    pub fn set_annotations(&mut self, annotations: ProbeAnnotations) {
        self.annotations = annotations;
    }

    fn expect_contact_count(&self, field: &'static str, actual: usize) -> ProbeInterfaceResult<()> {
        let expected = self.number_of_contacts();
        if actual != expected {
            return Err(ProbeInterfaceError::LengthMismatch(format!(
                "Field `{}` has {} elements, expected {}",
                field, actual, expected
            )));
        }
        Ok(())
    }

    //endregion

    //region default generators

    /// n copies of the given shape
    pub fn default_contact_shapes(n: usize, shape: ContactShape) -> Vec<ContactShape> {
        vec![shape; n]
    }

    /// n copies of the canonical axis pair `[[1, 0], [0, 1]]`
    pub fn default_contact_plane_axes(n: usize) -> Vec<PlaneAxes> {
        vec![PlaneAxes::canonical(); n]
    }

    /// n copies of circle parameters with the given radius
    pub fn default_circle_params(n: usize, radius: f64) -> Vec<ContactShapeParams> {
        vec![ContactShapeParams::circle(radius); n]
    }

    /// n copies of square parameters with the given width
    pub fn default_square_params(n: usize, width: f64) -> Vec<ContactShapeParams> {
        vec![ContactShapeParams::square(width); n]
    }

    /// n copies of rectangle parameters with the given width and height
    pub fn default_rect_params(n: usize, width: f64, height: f64) -> Vec<ContactShapeParams> {
        vec![ContactShapeParams::rect(width, height); n]
    }

    /// The sequence offset, offset+1, ..., offset+n-1
    pub fn default_device_channel_indices(n: usize, offset: i32) -> Vec<i32> {
        (0..n).map(|i| offset + i as i32).collect()
    }

    /// Stringified 0..n-1
    pub fn default_contact_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| i.to_string()).collect()
    }

    /// n empty strings
    pub fn default_shank_ids(n: usize) -> Vec<String> {
        vec![String::new(); n]
    }

    //endregion
}

/// Raw probe object as it appears on the wire, before structural checks.
///
/// Every field is optional so that missing required fields surface as
/// structured errors instead of serde failures.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawProbe {
    #[serde(default)]
    pub ndim: Option<Dimensionality>,
    #[serde(default)]
    pub si_units: Option<SiUnits>,
    #[serde(default)]
    pub annotations: Option<ProbeAnnotations>,
    #[serde(default)]
    pub contact_annotations: Option<ContactAnnotations>,
    #[serde(default)]
    pub contact_positions: Option<Vec<PlanarPosition>>,
    #[serde(default)]
    pub contact_plane_axes: Option<Vec<PlaneAxes>>,
    #[serde(default)]
    pub contact_shapes: Option<Vec<ContactShape>>,
    #[serde(default)]
    pub contact_shape_params: Option<Vec<ContactShapeParams>>,
    #[serde(default)]
    pub probe_planar_contour: Option<Vec<PlanarPosition>>,
    #[serde(default)]
    pub device_channel_indices: Option<Vec<i32>>,
    #[serde(default)]
    pub contact_ids: Option<Vec<String>>,
    #[serde(default)]
    pub shank_ids: Option<Vec<String>>,
}

impl RawProbe {
    /// Convert into a typed probe, checking that required fields are present.
    ///
    /// `probe_index` is only used for error context.
    pub(crate) fn into_probe(self, probe_index: usize) -> ProbeInterfaceResult<Probe> {
        let missing = |field: &str| {
            ProbeInterfaceError::InvalidStructure(format!(
                "Probe {} is missing required field `{}`",
                probe_index, field
            ))
        };

        Ok(Probe {
            ndim: self.ndim.unwrap_or_default(),
            si_units: self.si_units.unwrap_or_default(),
            annotations: self.annotations.unwrap_or_default(),
            contact_annotations: self.contact_annotations,
            contact_positions: self
                .contact_positions
                .ok_or_else(|| missing("contact_positions"))?,
            contact_plane_axes: self.contact_plane_axes,
            contact_shapes: self.contact_shapes.ok_or_else(|| missing("contact_shapes"))?,
            contact_shape_params: self
                .contact_shape_params
                .ok_or_else(|| missing("contact_shape_params"))?,
            probe_planar_contour: self.probe_planar_contour,
            device_channel_indices: self.device_channel_indices,
            contact_ids: self.contact_ids,
            shank_ids: self.shank_ids,
        })
    }
}

// Deserialization goes through RawProbe so that a standalone probe document
// gets the same structural checks as one nested in a group.
impl<'de> Deserialize<'de> for Probe {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawProbe::deserialize(deserializer)?;
        raw.into_probe(0)
            .map_err(|e| serde::de::Error::custom(format!("Invalid probe: {}", e)))
    }
}
