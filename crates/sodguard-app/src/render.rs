//! Render use cases: Markdown and the conflict listing from in-memory reports.

use sodguard_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    sodguard_render::render_markdown(report)
}

pub fn render_text(report: &RenderableReport) -> String {
    sodguard_render::render_text(report)
}
