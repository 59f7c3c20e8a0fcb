//! The rendering contract every piece of generated markup composes against.
//!
//! A [`Component`] writes its output straight into a byte sink, in document
//! order, before `render` returns. Components carry no per-render state of their
//! own: anything that changes during a traversal lives in the [`RenderContext`],
//! which is what makes a single component value safe to mount in many trees and
//! to render from many threads at once.
//!
//! Sink providers should be aware that rendering is streaming: when `render`
//! returns an error the sink may already hold a partial prefix of the output.

use std::fmt;
use std::io::Write;
use std::sync::Arc;

use super::context::RenderContext;
use super::error::RenderError;
use super::sanitize::escape_html;

/// A composable unit of streaming output.
pub trait Component: Send + Sync {
    /// Render into `w`. Errors from the sink or from descendants propagate unchanged.
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError>;
}

impl<T: Component + ?Sized> Component for &T {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        (**self).render(ctx, w)
    }
}

impl<T: Component + ?Sized> Component for Box<T> {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        (**self).render(ctx, w)
    }
}

impl<T: Component + ?Sized> Component for Arc<T> {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        (**self).render(ctx, w)
    }
}

/// Adapter turning a plain function or closure into a [`Component`].
#[derive(Clone)]
pub struct ComponentFn<F>(F);

impl<F> Component for ComponentFn<F>
where
    F: Fn(RenderContext<'_>, &mut dyn Write) -> Result<(), RenderError> + Send + Sync,
{
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        (self.0)(ctx, w)
    }
}

impl<F> fmt::Debug for ComponentFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComponentFn(..)")
    }
}

/// Wrap `f` so it can be used wherever a [`Component`] is expected.
pub fn component_fn<F>(f: F) -> ComponentFn<F>
where
    F: Fn(RenderContext<'_>, &mut dyn Write) -> Result<(), RenderError> + Send + Sync,
{
    ComponentFn(f)
}

/// Writes nothing and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nop;

impl Component for Nop {
    fn render(&self, _ctx: RenderContext<'_>, _w: &mut dyn Write) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Shared instance returned when a component asks for children nobody supplied.
pub static NOP: Nop = Nop;

/// HTML text, escaped on output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Component for Text {
    fn render(&self, _ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        w.write_all(escape_html(&self.0).as_bytes())?;
        Ok(())
    }
}

/// Markup written verbatim. Only for trusted, generated fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub String);

impl Raw {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }
}

impl Component for Raw {
    fn render(&self, _ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        w.write_all(self.0.as_bytes())?;
        Ok(())
    }
}

/// Siblings rendered one after another with the same context.
#[derive(Default)]
pub struct Fragment {
    items: Vec<Box<dyn Component>>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, item: impl Component + 'static) -> Self {
        self.items.push(Box::new(item));
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Component for Fragment {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        for item in &self.items {
            item.render(ctx, w)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fragment")
            .field("items", &self.items.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;

    use super::*;
    use crate::domain::ledger::ResourceLedger;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render(component: &dyn Component) -> String {
        let ledger = RefCell::new(ResourceLedger::new());
        let mut out = Vec::new();
        component
            .render(RenderContext::new(&ledger), &mut out)
            .expect("render succeeds");
        String::from_utf8(out).expect("utf-8 output")
    }

    #[test]
    fn function_adapter_renders_like_a_named_component() {
        let hello = component_fn(|_ctx, w| {
            w.write_all(b"<p>hello</p>")?;
            Ok(())
        });
        assert_eq!(render(&hello), "<p>hello</p>");
    }

    #[test]
    fn nop_writes_nothing() {
        assert_eq!(render(&NOP), "");
    }

    #[test]
    fn text_is_escaped_and_raw_is_not() {
        let fragment = Fragment::new()
            .push(Text::new("<b>&</b>"))
            .push(Raw::new("<b>&amp;</b>"));
        assert_eq!(render(&fragment), "&lt;b&gt;&amp;&lt;/b&gt;<b>&amp;</b>");
    }

    #[test]
    fn sink_failure_propagates_unchanged() {
        let fragment = Fragment::new().push(Raw::new("<div>")).push(Raw::new("</div>"));
        let ledger = RefCell::new(ResourceLedger::new());
        let err = fragment
            .render(RenderContext::new(&ledger), &mut FailingSink)
            .expect_err("sink refuses writes");
        assert!(err.is_sink_failure());
        match err {
            RenderError::Io(io_err) => assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn descendant_failure_stops_rendering_after_partial_output() {
        let failing = component_fn(|_ctx, _w| {
            Err(RenderError::component("failing", "boom"))
        });
        let tree = Fragment::new()
            .push(Raw::new("<main>"))
            .push(failing)
            .push(Raw::new("</main>"));
        let ledger = RefCell::new(ResourceLedger::new());
        let mut out = Vec::new();
        let err = tree
            .render(RenderContext::new(&ledger), &mut out)
            .expect_err("component fails");
        assert!(matches!(err, RenderError::Component { component: "failing", .. }));
        assert_eq!(out, b"<main>");
    }

    #[test]
    fn shared_component_renders_through_arc_and_box() {
        let shared: Arc<dyn Component> = Arc::new(Text::new("x"));
        let boxed: Box<dyn Component> = Box::new(Arc::clone(&shared));
        assert_eq!(render(&boxed), "x");
        assert_eq!(render(&shared), "x");
    }
}
