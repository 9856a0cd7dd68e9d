#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `flicker-rs` plays frame-based sprite animations cut from sprite sheets.
//!
//! Several animations can share one render target. A [`PlaybackScheduler`]
//! draws them all at a fixed rate and pools finished sequencers for reuse.
//!
pub use flicker_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use flicker_dylib;
