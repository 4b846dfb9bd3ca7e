//! Rendering seam: handlers name a view and hand over a JSON payload; the
//! renderer owns all markup.

mod html;

pub use html::HtmlRenderer;

use axum::response::Html;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("unknown view '{0}'")]
    UnknownView(String),

    #[error("view '{view}' expects field '{field}'")]
    MissingField { view: String, field: &'static str },
}

/// Turns a view name plus payload into a response body.
pub trait Renderer: Send + Sync {
    fn render(&self, view: &str, data: &Value) -> Result<String, RenderError>;
}

/// Render `view` as an HTML response body
pub fn page(renderer: &dyn Renderer, view: &str, data: &Value) -> Result<Html<String>, RenderError> {
    renderer.render(view, data).map(Html)
}
