/*!
# Probe geometry description & validation

Models the "probeinterface" JSON format: a description of neural recording
probe geometry (contact positions, shapes, channel mappings) used to
associate physical probe layout with recorded electrophysiology data.

- [`ProbeGroup`] - the top-level document: one or more probes used together
  in a recording session, with format metadata
- [`Probe`] - per-contact parallel arrays (positions, shapes, wiring, ids)
  for one physical probe
- [`Contact`] - an immutable per-contact view, materialized on demand

Every constructor and deserialization path runs the group validation
pipeline, which enforces array-length consistency, normalizes 1-based
contact ids to 0-based, backfills missing optional arrays with computed
defaults, and checks that every connected device channel is claimed by
exactly one contact across the group.

## Example

```
use probeinterface::{ContactShape, Dimensionality, PlanarPosition, Probe, ProbeGroup, SiUnits};

fn build() -> probeinterface::ProbeInterfaceResult<ProbeGroup> {
    let positions: Vec<PlanarPosition> =
        (0..16).map(|i| PlanarPosition::new(i as f64 + 1.0, 3.0)).collect();
    let n = positions.len();

    let mut probe = Probe::new(Dimensionality::Two, SiUnits::Millimeters);
    probe.set_contacts(
        positions,
        Probe::default_contact_shapes(n, ContactShape::Circle),
        Probe::default_circle_params(n, 0.3),
    )?;
    probe.set_device_channel_indices(Probe::default_device_channel_indices(n, 0))?;

    ProbeGroup::from_probes(vec![probe])
}

assert_eq!(build().unwrap().number_of_contacts(), 16);
```

## Modules

- `probe` - the data model and validation engine
- `format` - JSON document reading and writing

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

pub mod format;
pub mod probe;
mod types;

pub use format::{
    read_probeinterface, read_probeinterface_str, write_probeinterface,
    write_probeinterface_string,
};
pub use probe::{
    Contact, ContactAnnotations, ContactShape, ContactShapeParams, Dimensionality, PlanarPosition,
    PlaneAxes, Probe, ProbeAnnotations, ProbeGroup, SiUnits, UNCONNECTED_CHANNEL,
};
pub use types::{ProbeInterfaceError, ProbeInterfaceResult};
