//! This crate provides the value types and pure logic of the `flicker-rs` project.
//!
//! # Contents
//!
//! - **Geometry**: [`Point`] and [`Rect`] in pixel units
//! - **Playback values**: [`Direction`] and [`LoopCount`]
//! - **Frame layout**: [`FrameGrid`], [`LayoutMode`], [`FrameSlot`] and [`compute_slots`]
//! - **Surface capability**: the [`SourceImage`] and [`RenderTarget`] traits
//!   the host implements, plus the software [`Canvas`] target
//! - **Errors**: [`ConfigError`] for caller misuse, [`DrawError`] for transient
//!   draw failures
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use std::rc::Rc;
//!
//! use flicker_types::prelude::*;
//! use image::RgbaImage;
//!
//! let sheet = Rc::new(RgbaImage::new(450, 72));
//! let grid = FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet);
//! let slots = compute_slots(&grid, false).unwrap();
//!
//! let mut canvas = Canvas::new(200, 200);
//! let frame = &slots[0];
//! let source = grid.source(frame).unwrap();
//! canvas.blit(source, grid.frame_rect(frame), Rect::new(0, 0, 50, 72)).unwrap();
//! ```

mod canvas;
mod error;
mod geometry;
mod playback;
mod surface;

pub mod layout;

/// `use flicker_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub use canvas::Canvas;
pub use error::{ConfigError, DrawError};
pub use geometry::{Point, Rect};
pub use layout::{FrameGrid, FrameSlot, LayoutMode, compute_slots};
pub use playback::{Direction, LoopCount};
pub use surface::{RenderTarget, SharedTarget, SourceImage, share};
