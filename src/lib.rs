//! Lunette is a headless photo compositor.
//!
//! A photo is loaded, positioned and scaled behind a fixed elliptical frame
//! overlay, and the composited result is exported as a 1080x1080 PNG.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `PhotoFile -> DecodedPhoto` (MIME check + decode to premultiplied RGBA8)
//! 2. **Transform**: [`EditorState`] tracks scale and pan in response to drag/zoom input
//! 3. **Composite**: [`render`] draws background, transformed photo, then the frame overlay
//! 4. **Export**: [`encode_png`] produces the final PNG bytes
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: rendering is a pure function of editor state and assets.
//! - **No IO in the compositor**: file reads and decoding are front-loaded in
//!   [`PhotoFile`] and [`FrameAsset`].
//! - **Premultiplied RGBA8** end-to-end: straight alpha only at PNG export.
#![forbid(unsafe_code)]

pub mod assets;
pub mod command;
pub mod compositor;
pub mod editor;
pub mod error;
pub mod export;
pub mod geometry;
pub mod session;
pub mod surface;

pub use assets::{DecodedPhoto, FrameAsset, PhotoFile, decode_photo};
pub use command::EditorCommand;
pub use compositor::{RenderOptions, render};
pub use editor::{EditorState, MAX_SCALE, MIN_SCALE, default_scale};
pub use error::{LunetteError, LunetteResult};
pub use export::{encode_png, save_png};
pub use geometry::{CANVAS_SIZE, FrameGeometry, photo_draw_rect};
pub use session::EditorSession;
pub use surface::OutputSurface;
