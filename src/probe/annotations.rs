//! Free-text annotation records attached to probes and contacts.

use serde::{Deserialize, Serialize};

/// Probe-level annotations (name, manufacturer).
///
/// Passive container; both fields are optional and omitted from the
/// serialized form when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeAnnotations {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl ProbeAnnotations {
    pub fn new(name: Option<String>, manufacturer: Option<String>) -> Self {
        Self { name, manufacturer }
    }
}

/// Per-contact free-text annotations.
///
/// The wire form is a nested object, `{"contact_annotations": [...]}`, with
/// one entry per contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactAnnotations {
    pub contact_annotations: Vec<String>,
}

impl ContactAnnotations {
    pub fn new(contact_annotations: Vec<String>) -> Self {
        Self {
            contact_annotations,
        }
    }

    pub fn len(&self) -> usize {
        self.contact_annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contact_annotations.is_empty()
    }
}
