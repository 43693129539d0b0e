#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod export;
pub mod input;
pub mod renderer;
pub mod stroke;
pub mod surface;

pub use app::SketchApp;
pub use brush::{Brush, BrushShape, SIDE_PANEL_WIDTH};
pub use export::{surface_to_png_data_url, ExportError};
pub use input::{InputEvent, InputHandler, InputLocation};
pub use stroke::{StrokeController, StrokeState};
pub use surface::Surface;
