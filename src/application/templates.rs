//! Askama templates as components.
//!
//! Compiled templates are the usual leaves of a render tree: [`Templated`] lets
//! any `askama::Template` be mounted wherever a [`Component`] is expected.

use std::io::Write;

use askama::Template;

use crate::domain::{component::Component, context::RenderContext, error::RenderError};

#[derive(Debug, Clone)]
pub struct Templated<T>(pub T);

impl<T> Component for Templated<T>
where
    T: Template + Send + Sync,
{
    fn render(&self, _ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        let html = self
            .0
            .render()
            .map_err(|err| RenderError::template(err.to_string()))?;
        w.write_all(html.as_bytes())?;
        Ok(())
    }
}
