//! Rendering contract
//!
//! The core never touches a GPU. It emits abstract draw commands each frame
//! and a backend (`RenderSink`) turns them into pixels.

pub mod assets;
pub mod commands;
pub mod scene;

pub use assets::{AssetCatalog, SpriteId, SpriteInfo};
pub use commands::{Color, CountingSink, DrawCommand, Frame, Layer, RenderSink};
pub use scene::{Overlay, build_frame};
