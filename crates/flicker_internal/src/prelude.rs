//! Prelude module for `flicker_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use flicker_internal::prelude::*;
//!
//! let sheet = Rc::new(image::RgbaImage::new(450, 72));
//! let grid = FrameGrid::new(50, 72, 9).with_columns(9).with_source(sheet);
//!
//! let mut sequencer = FrameSequencer::<Canvas>::new(AnimationSpec::new(grid)).unwrap();
//! sequencer.attach_surface(share(Canvas::new(200, 200)));
//! sequencer.draw();
//! assert_eq!(sequencer.current_frame(), 1);
//! ```

// Re-export everything from both preludes
#[doc(inline)]
pub use flicker_player::prelude::*;
#[doc(inline)]
pub use flicker_types::prelude::*;

// Re-export the member crates for advanced usage
#[doc(inline)]
pub use flicker_player;
#[doc(inline)]
pub use flicker_types;
