#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod context;
pub mod drawable;
pub mod error;
pub mod event;
pub mod export;
pub mod glyph;
pub mod input;
pub mod renderer;
pub mod surface;
pub mod tool;

pub use app::SketchApp;
pub use command::CommandLog;
pub use config::SketchConfig;
pub use context::SketchContext;
pub use drawable::{Drawable, Preview, Sticker, Stroke};
pub use error::{ConfigError, ExportError};
pub use input::{Action, InputEvent, InputHandler};
pub use renderer::Renderer;
pub use surface::Surface;
pub use tool::{Tool, ToolKind};
