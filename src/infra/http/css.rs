//! Global stylesheet for component classes.
//!
//! [`CssHandler`] serves the rule bodies of a fixed set of component classes as
//! one stylesheet. [`css_layer`] answers the stylesheet path itself and, for
//! every other request, records those classes in [`PreRenderedClasses`] so that
//! rendered pages skip their `<style>` elements.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{debug, instrument};

use crate::domain::{css::ComponentCssClass, ledger::ResourceLedger};

pub const DEFAULT_STYLESHEET_PATH: &str = "/styles/weft.css";

const CSS_CONTENT_TYPE: &str = "text/css";

/// Serves the concatenated rules of a fixed set of component classes.
#[derive(Debug, Clone, Default)]
pub struct CssHandler {
    classes: Arc<[ComponentCssClass]>,
}

impl CssHandler {
    pub fn new(classes: impl IntoIterator<Item = ComponentCssClass>) -> Self {
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    pub fn classes(&self) -> &[ComponentCssClass] {
        &self.classes
    }

    /// Every class rule, in declaration order.
    pub fn stylesheet(&self) -> String {
        self.classes
            .iter()
            .map(|class| class.class.as_str())
            .collect()
    }

    pub fn response(&self) -> Response {
        let mut response = Response::new(Body::from(Bytes::from(self.stylesheet())));
        *response.status_mut() = StatusCode::OK;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(CSS_CONTENT_TYPE),
        );
        response
    }
}

impl IntoResponse for CssHandler {
    fn into_response(self) -> Response {
        self.response()
    }
}

/// Classes a response can assume are already available to the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreRenderedClasses {
    names: Vec<String>,
}

impl PreRenderedClasses {
    pub fn extend<'n>(&mut self, names: impl IntoIterator<Item = &'n str>) {
        self.names.extend(names.into_iter().map(str::to_string));
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// A fresh ledger with every recorded class marked as emitted.
    pub fn ledger(&self) -> ResourceLedger {
        let mut ledger = ResourceLedger::new();
        ledger.extend_classes(self.names.iter().map(String::as_str));
        ledger
    }
}

/// State for [`css_layer`].
#[derive(Debug, Clone)]
pub struct CssMiddleware {
    pub path: String,
    pub handler: CssHandler,
}

impl CssMiddleware {
    /// Middleware serving `classes` at [`DEFAULT_STYLESHEET_PATH`].
    pub fn new(classes: impl IntoIterator<Item = ComponentCssClass>) -> Self {
        Self {
            path: DEFAULT_STYLESHEET_PATH.to_string(),
            handler: CssHandler::new(classes),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }
}

/// Serve the global stylesheet, or mark its classes as pre-rendered and
/// continue down the stack.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn css_layer(
    State(css): State<CssMiddleware>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() == css.path {
        debug!(classes = css.handler.classes().len(), "serving global stylesheet");
        return css.handler.response();
    }

    let mut pre_rendered = request
        .extensions_mut()
        .remove::<PreRenderedClasses>()
        .unwrap_or_default();
    pre_rendered.extend(css.handler.classes().iter().map(ComponentCssClass::class_name));
    request.extensions_mut().insert(pre_rendered);

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_classes() -> Vec<ComponentCssClass> {
        vec![
            ComponentCssClass::new("card", "padding:1rem;"),
            ComponentCssClass::new("title", "font-weight:bold;"),
        ]
    }

    #[test]
    fn stylesheet_concatenates_rules_in_order() {
        let classes = sample_classes();
        let handler = CssHandler::new(classes.clone());
        assert_eq!(
            handler.stylesheet(),
            format!("{}{}", classes[0].class, classes[1].class)
        );
    }

    #[test]
    fn response_is_text_css() {
        let response = CssHandler::new(sample_classes()).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("text/css"))
        );
    }

    #[test]
    fn pre_rendered_classes_seed_a_ledger() {
        let mut pre_rendered = PreRenderedClasses::default();
        pre_rendered.extend(["card_0000", "title_1111"]);
        let ledger = pre_rendered.ledger();
        assert!(ledger.contains_class("card_0000"));
        assert!(ledger.contains_class("title_1111"));
        assert!(!ledger.contains_script("card_0000"));
    }

    #[test]
    fn middleware_defaults_to_standard_path() {
        let css = CssMiddleware::new(sample_classes());
        assert_eq!(css.path, DEFAULT_STYLESHEET_PATH);
        assert_eq!(css.with_path("/app.css").path, "/app.css");
    }
}
