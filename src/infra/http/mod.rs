//! HTTP surface: the component handler, the global stylesheet middleware and
//! router assembly.

mod css;
mod handler;
mod middleware;

pub use css::{
    CssHandler, CssMiddleware, DEFAULT_STYLESHEET_PATH, PreRenderedClasses, css_layer,
};
pub use handler::{
    ComponentHandler, DEFAULT_CONTENT_TYPE, ErrorHandler, RENDER_FAILURE_MESSAGE, handler,
};
pub use middleware::log_responses;

use axum::{Router, middleware as axum_middleware, routing::get};

/// Mount `pages` behind response logging and, when given, the stylesheet
/// middleware.
///
/// Each `(path, handler)` pair answers `GET` at `path`; the stylesheet is
/// served at `css.path`.
pub fn build_router<I>(pages: I, css: Option<CssMiddleware>) -> Router
where
    I: IntoIterator<Item = (String, ComponentHandler)>,
{
    let router = pages
        .into_iter()
        .fold(Router::new(), |router, (path, page)| {
            router.route(&path, page.into_route())
        });

    let router = match css {
        Some(css) => {
            let stylesheet = css.handler.clone();
            router
                .route(
                    &css.path,
                    get(move || {
                        let stylesheet = stylesheet.clone();
                        async move { stylesheet }
                    }),
                )
                .layer(axum_middleware::from_fn_with_state(css, css_layer))
        }
        None => router,
    };

    router.layer(axum_middleware::from_fn(log_responses))
}
