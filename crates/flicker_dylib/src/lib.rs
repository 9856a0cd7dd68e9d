//! Forces dynamic linking of `flicker_internal` when the `dynamic_linking`
//! feature of `flicker-rs` is enabled. Not meant to be used directly.

#![allow(unused_imports)]
#![allow(clippy::single_component_path_imports)]

use flicker_internal;
