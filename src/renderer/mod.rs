//! Running the external renderer and patching its output
//!
//! [`D2Renderer`] writes a composed document to a temporary file and runs D2
//! on it; [`fix_dimensions`] then gives the resulting SVG explicit pixel size.

pub mod config;
pub mod process;
pub mod svg;

pub use config::RendererConfig;
pub use process::{D2Renderer, DiagramRenderer, InvokeError};
pub use svg::{fix_dimensions, SvgError};
