//! Emission of component CSS and scripts, once per traversal.
//!
//! Every instance of a component calls the emitter with the same definitions.
//! The ledger reachable through the context decides which of those calls
//! actually writes: the first one per traversal does, later ones are skipped.

use std::cell::RefCell;
use std::io::Write;

use tracing::trace;

use crate::domain::{
    component::Component, context::RenderContext, css::CssClass, error::RenderError,
    ledger::ResourceLedger, script::ComponentScript,
};

const STYLE_OPEN: &str = r#"<style type="text/css">"#;
const STYLE_CLOSE: &str = "</style>";
const SCRIPT_OPEN: &str = r#"<script type="text/javascript">"#;
const SCRIPT_CLOSE: &str = "</script>";

/// Run `f` against the traversal ledger, or a throwaway one when the context
/// carries none.
fn with_ledger<R>(ctx: RenderContext<'_>, f: impl FnOnce(&mut ResourceLedger) -> R) -> R {
    match ctx.ledger() {
        Some(ledger) => f(&mut ledger.borrow_mut()),
        None => f(&mut ResourceLedger::new()),
    }
}

fn write_block(w: &mut dyn Write, open: &str, body: &str, close: &str) -> Result<(), RenderError> {
    if body.is_empty() {
        return Ok(());
    }
    w.write_all(open.as_bytes())?;
    w.write_all(body.as_bytes())?;
    w.write_all(close.as_bytes())?;
    Ok(())
}

/// Write a single `<style>` element holding the bodies of every class in
/// `classes` not yet emitted in this traversal. Writes nothing when all of them
/// were already present or none carries a body.
pub fn render_css_items(
    ctx: RenderContext<'_>,
    w: &mut dyn Write,
    classes: &[CssClass],
) -> Result<(), RenderError> {
    if classes.is_empty() {
        return Ok(());
    }
    let css = with_ledger(ctx, |ledger| {
        let mut css = String::new();
        for class in classes {
            let Some(body) = class.body() else {
                continue;
            };
            let name = class.class_name();
            if ledger.contains_class(name) {
                trace!(class = %name, "css class already emitted");
                continue;
            }
            css.push_str(body.as_str());
            ledger.add_class(name);
        }
        css
    });
    write_block(w, STYLE_OPEN, &css, STYLE_CLOSE)
}

/// Write a single `<script>` element holding every function in `scripts` not
/// yet emitted in this traversal.
pub fn render_script_items(
    ctx: RenderContext<'_>,
    w: &mut dyn Write,
    scripts: &[ComponentScript],
) -> Result<(), RenderError> {
    if scripts.is_empty() {
        return Ok(());
    }
    let js = with_ledger(ctx, |ledger| {
        let mut js = String::new();
        for script in scripts {
            if ledger.contains_script(&script.name) {
                trace!(script = %script.name, "script already emitted");
                continue;
            }
            js.push_str(&script.function);
            ledger.add_script(&script.name);
        }
        js
    });
    write_block(w, SCRIPT_OPEN, &js, SCRIPT_CLOSE)
}

/// Older entry point for CSS emission, kept for previously generated code.
#[deprecated(note = "use `render_css_items`, which shares one ledger for CSS and scripts")]
pub fn render_css(
    ctx: RenderContext<'_>,
    w: &mut dyn Write,
    classes: &[CssClass],
) -> Result<(), RenderError> {
    render_css_items(ctx, w, classes)
}

/// Older entry point for script emission, kept for previously generated code.
#[deprecated(note = "use `render_script_items`, which shares one ledger for CSS and scripts")]
pub fn render_scripts(
    ctx: RenderContext<'_>,
    w: &mut dyn Write,
    scripts: &[ComponentScript],
) -> Result<(), RenderError> {
    render_script_items(ctx, w, scripts)
}

/// Component form of [`render_css_items`].
#[derive(Debug, Clone, Default)]
pub struct StyleBlock(pub Vec<CssClass>);

impl Component for StyleBlock {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        render_css_items(ctx, w, &self.0)
    }
}

/// Component form of [`render_script_items`].
#[derive(Debug, Clone, Default)]
pub struct ScriptBlock(pub Vec<ComponentScript>);

impl Component for ScriptBlock {
    fn render(&self, ctx: RenderContext<'_>, w: &mut dyn Write) -> Result<(), RenderError> {
        render_script_items(ctx, w, &self.0)
    }
}

/// Ledger pre-marked with the given classes, e.g. those already served from a
/// global stylesheet.
pub fn ledger_with_classes<'n>(
    names: impl IntoIterator<Item = &'n str>,
) -> RefCell<ResourceLedger> {
    let mut ledger = ResourceLedger::new();
    ledger.extend_classes(names);
    RefCell::new(ledger)
}
