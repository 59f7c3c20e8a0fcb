//! HTTP adapter exposing a component as a request handler.

use std::fmt;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Request, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
    routing::{MethodRouter, get},
};
use bytes::Bytes;
use tracing::{debug, error};

use crate::application::{error::HttpError, render::render_to_vec};
use crate::domain::{component::Component, error::RenderError, ledger::ResourceLedger};

use super::css::PreRenderedClasses;

pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Body of the default failure response.
pub const RENDER_FAILURE_MESSAGE: &str = "weft: failed to render template";

const SOURCE: &str = "infra::http::handler::ComponentHandler";

/// Builds the response sent when rendering fails.
pub type ErrorHandler = Arc<dyn Fn(&Parts, &RenderError) -> Response + Send + Sync>;

/// Renders a component for every request it receives.
///
/// The body is rendered into a buffer before the response is built, so the
/// status and `Content-Type` always precede the body and a failed render is
/// replaced wholesale by the error handler's response.
#[derive(Clone)]
pub struct ComponentHandler {
    component: Arc<dyn Component>,
    status: Option<StatusCode>,
    content_type: String,
    error_handler: Option<ErrorHandler>,
}

/// Handler for `component` with the default status and content type.
pub fn handler(component: impl Component + 'static) -> ComponentHandler {
    ComponentHandler::new(Arc::new(component))
}

impl ComponentHandler {
    pub fn new(component: Arc<dyn Component>) -> Self {
        Self {
            component,
            status: None,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            error_handler: None,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Numeric form of [`with_status`](Self::with_status); `0` leaves the status unset
    /// and an invalid code is ignored.
    pub fn with_status_code(mut self, code: u16) -> Self {
        self.status = match code {
            0 => None,
            code => StatusCode::from_u16(code).ok(),
        };
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    pub fn with_error_handler<F>(mut self, error_handler: F) -> Self
    where
        F: Fn(&Parts, &RenderError) -> Response + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(error_handler));
        self
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Render the component for `request`.
    ///
    /// Classes recorded in [`PreRenderedClasses`] by an outer middleware seed the
    /// traversal ledger so their `<style>` elements are skipped.
    pub fn handle(&self, request: Request<Body>) -> Response {
        let (parts, _body) = request.into_parts();
        let seed = parts
            .extensions
            .get::<PreRenderedClasses>()
            .map(PreRenderedClasses::ledger)
            .unwrap_or_else(ResourceLedger::new);

        match render_to_vec(self.component.as_ref(), seed) {
            Ok(body) => {
                debug!(path = %parts.uri.path(), bytes = body.len(), "component rendered");
                self.build_response(body)
            }
            Err(err) => {
                error!(path = %parts.uri.path(), error = %err, "component render failed");
                match &self.error_handler {
                    Some(error_handler) => error_handler(&parts, &err),
                    None => HttpError::from_error(
                        SOURCE,
                        StatusCode::INTERNAL_SERVER_ERROR,
                        RENDER_FAILURE_MESSAGE,
                        &err,
                    )
                    .into_response(),
                }
            }
        }
    }

    fn build_response(&self, body: Vec<u8>) -> Response {
        let mut response = Response::new(Body::from(Bytes::from(body)));
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        if let Ok(value) = HeaderValue::from_str(&self.content_type) {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        response
    }

    /// Route answering `GET` with this handler.
    pub fn into_route<S>(self) -> MethodRouter<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        get(move |request: Request<Body>| {
            let handler = self.clone();
            async move { handler.handle(request) }
        })
    }
}

impl fmt::Debug for ComponentHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHandler")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}
