//! Derived per-contact view.

use super::descriptors::{ContactShape, ContactShapeParams, PlanarPosition};
use std::fmt::Display;

/// One electrode contact, materialized on demand from the owning probe's
/// parallel arrays.
///
/// Pure data snapshot with no independent lifecycle; it is recomputed each
/// time it is requested and never written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Position within the probe plane
    pub position: PlanarPosition,

    /// Geometric shape of the contact
    pub shape: ContactShape,

    /// Shape parameters paired with `shape`
    pub shape_params: ContactShapeParams,

    /// Hardware acquisition channel; -1 means unconnected
    pub device_channel_index: i32,

    /// Probe-scoped contact label
    pub contact_id: String,

    /// Shank carrying this contact; empty when the probe has no shank split
    pub shank_id: String,

    /// Position of this contact within its owning probe
    pub index: usize,
}

impl Display for Contact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Contact {} '{}' at {} ({}) on channel {}",
            self.index, self.contact_id, self.position, self.shape, self.device_channel_index
        )
    }
}
