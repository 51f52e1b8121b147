//! The probe data model: descriptors, annotations, contacts, probes and
//! probe groups.

mod annotations;
mod contact;
mod descriptors;
mod group;
#[allow(clippy::module_inception)]
mod probe;

pub use annotations::{ContactAnnotations, ProbeAnnotations};
pub use contact::Contact;
pub use descriptors::{
    ContactShape, ContactShapeParams, Dimensionality, PlanarPosition, PlaneAxes, SiUnits,
};
pub use group::{ProbeGroup, UNCONNECTED_CHANNEL};
pub use probe::Probe;

pub(crate) use group::RawProbeGroup;
