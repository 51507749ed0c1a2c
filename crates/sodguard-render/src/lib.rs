//! Rendering utilities for human-facing surfaces (Markdown, line listing).

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod text;

pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableQuality, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus, RenderableViolation,
};
pub use text::{render_text, render_violation_line};
