/*!
Document I/O for the probe group wire format.

This module handles:
- Reading probe group JSON from strings and files
- Writing normalized probe groups back to the same shape

Copyright 2025 Neuraville Inc.
Licensed under the Apache License, Version 2.0
*/

mod reader;
mod writer;

pub use reader::{read_probeinterface, read_probeinterface_str};
pub use writer::{write_probeinterface, write_probeinterface_string};
