//! Runtime for compiled HTML components.
//!
//! Components stream markup into a byte sink. A [`RenderContext`] threads
//! injected children and a per-traversal [`ResourceLedger`] through the tree so
//! that each component's CSS class and script reach the response exactly once,
//! however many instances of the component the tree contains. Sanitizers guard
//! the URL, CSS and script-parameter boundaries, and an axum adapter serves a
//! component as an HTTP handler.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;

pub use application::{
    render::{render_document, render_document_seeded, render_to_string, render_to_vec},
    resources::{ScriptBlock, StyleBlock, render_css_items, render_script_items},
    templates::Templated,
};
pub use domain::{
    component::{Component, ComponentFn, Fragment, NOP, Nop, Raw, Text, component_fn},
    context::{ChildrenState, RenderContext},
    css::{
        ComponentCssClass, CssClass, CssClasses, FALLBACK_CLASS_NAME, class, classes, css_id,
        safe_class,
    },
    error::RenderError,
    ledger::ResourceLedger,
    sanitize::{
        FAILED_SANITIZATION_URL, SafeCss, SafeUrl, escape_html, sanitize_css, sanitize_url,
    },
    script::{ComponentScript, serialize_script_call},
};
pub use infra::http::{ComponentHandler, CssHandler, CssMiddleware, css_layer, handler};
