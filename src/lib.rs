#![warn(clippy::all, rust_2018_idioms)]

pub mod drawing;
pub mod error;
mod geometry;
pub mod history;
pub mod persistence;
pub mod save;
pub mod settings;
pub mod stroke;
pub mod svg;
pub mod util;

pub use drawing::Drawing;
pub use error::{InvalidStrokeError, MalformedDocumentError};
pub use history::DrawingHistory;
pub use save::{FileSink, FsSink, ImageFormat, RasterEncoder, SaveRequest};
pub use settings::Settings;
pub use stroke::{PaintStyle, Stroke, StrokeBuilder};
