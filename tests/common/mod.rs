#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use catalog_app::views::{RenderError, Renderer};
use catalog_app::{Application, Catalog};
use catalog_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Renders every view as `{"view": ..., "data": ...}` so tests can assert on
/// the payload handed to the renderer instead of on markup
pub struct RecordingRenderer;

impl Renderer for RecordingRenderer {
    fn render(&self, view: &str, data: &Value) -> Result<String, RenderError> {
        Ok(json!({ "view": view, "data": data }).to_string())
    }
}

pub struct TestApp {
    pub catalog: Catalog,
    router: Router,
}

impl TestApp {
    /// In-memory catalog rendered through [`RecordingRenderer`]
    pub fn recording() -> Self {
        Self::with_catalog(Catalog::in_memory(Arc::new(RecordingRenderer)))
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        let app = Application::from_catalog(Settings::default(), catalog.clone(), None).unwrap();
        Self {
            catalog,
            router: app.router(),
        }
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(form.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

pub async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Decode a [`RecordingRenderer`] page, checking the status first
pub async fn rendered(response: Response) -> (String, Value) {
    assert_eq!(response.status(), StatusCode::OK);
    let page: Value = serde_json::from_str(&body_text(response).await).unwrap();
    (
        page["view"].as_str().unwrap().to_string(),
        page["data"].clone(),
    )
}

pub fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response.headers()[header::LOCATION].to_str().unwrap()
}
