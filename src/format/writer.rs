// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Probe group JSON saver.

Serializes a validated probe group back into the wire shape it was read
from; optional probe fields that were never populated are omitted.
*/

use crate::probe::ProbeGroup;
use crate::types::ProbeInterfaceResult;
use std::fs;
use std::path::Path;

/// Serialize a probe group to a pretty-printed JSON string
pub fn write_probeinterface_string(group: &ProbeGroup) -> ProbeInterfaceResult<String> {
    Ok(serde_json::to_string_pretty(group)?)
}

/// Write a probe group to a JSON file
pub fn write_probeinterface<P: AsRef<Path>>(
    path: P,
    group: &ProbeGroup,
) -> ProbeInterfaceResult<()> {
    let json_str = write_probeinterface_string(group)?;
    fs::write(path, json_str)?;
    Ok(())
}
