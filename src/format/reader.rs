// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
High-level probe group loading API.

Parses documents into the raw wire mirror first, then constructs through
the validating constructor, so malformed JSON surfaces as a JSON error
while structural and consistency problems keep their typed kinds.
*/

use crate::probe::{ProbeGroup, RawProbeGroup};
use crate::types::{ProbeInterfaceError, ProbeInterfaceResult};
use std::fs;
use std::path::Path;

/// Load a probe group from a JSON file
pub fn read_probeinterface<P: AsRef<Path>>(path: P) -> ProbeInterfaceResult<ProbeGroup> {
    let json_str = fs::read_to_string(path)?;
    read_probeinterface_str(&json_str)
}

/// Load a probe group from a JSON string
pub fn read_probeinterface_str(json_str: &str) -> ProbeInterfaceResult<ProbeGroup> {
    let raw: RawProbeGroup = serde_json::from_str(json_str)
        .map_err(|e| ProbeInterfaceError::JsonError(format!("Failed to parse JSON: {}", e)))?;
    ProbeGroup::try_from_raw(raw)
}
