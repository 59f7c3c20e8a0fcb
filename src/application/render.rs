//! Top-level render entry points.
//!
//! Each call owns exactly one [`ResourceLedger`] for the traversal it starts.
//! Independent calls may run on different threads at the same time over the same
//! component tree; they never share a ledger.

use std::cell::RefCell;
use std::io::Write;

use tracing::trace;

use crate::domain::{
    component::Component, context::RenderContext, error::RenderError, ledger::ResourceLedger,
};

/// Render `component` as the root of a fresh traversal.
///
/// Returns the ledger as it stood when the traversal finished.
pub fn render_document(
    component: &dyn Component,
    w: &mut dyn Write,
) -> Result<ResourceLedger, RenderError> {
    render_document_seeded(component, ResourceLedger::new(), w)
}

/// Render `component` with a ledger pre-populated by the caller, e.g. with
/// classes a global stylesheet already delivers.
pub fn render_document_seeded(
    component: &dyn Component,
    seed: ResourceLedger,
    w: &mut dyn Write,
) -> Result<ResourceLedger, RenderError> {
    let ledger = RefCell::new(seed);
    component.render(RenderContext::new(&ledger), w)?;
    let ledger = ledger.into_inner();
    trace!(resources = ledger.len(), "traversal finished");
    Ok(ledger)
}

/// Render into a byte buffer.
pub fn render_to_vec(
    component: &dyn Component,
    seed: ResourceLedger,
) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::new();
    render_document_seeded(component, seed, &mut out)?;
    Ok(out)
}

/// Render into a `String`.
pub fn render_to_string(component: &dyn Component) -> Result<String, RenderError> {
    let bytes = render_to_vec(component, ResourceLedger::new())?;
    String::from_utf8(bytes).map_err(|err| RenderError::component("render_to_string", err))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::application::resources::StyleBlock;
    use crate::domain::component::Fragment;
    use crate::domain::css::ComponentCssClass;

    fn styled_tree() -> Fragment {
        let class = ComponentCssClass::new("card", "padding:1rem;");
        Fragment::new()
            .push(StyleBlock(vec![class.clone().into()]))
            .push(StyleBlock(vec![class.into()]))
    }

    #[test]
    fn each_document_gets_its_own_ledger() {
        let tree = styled_tree();
        let first = render_to_string(&tree).expect("first render");
        let second = render_to_string(&tree).expect("second render");
        assert_eq!(first, second);
        assert_eq!(first.matches("<style").count(), 1);
    }

    #[test]
    fn seeded_ledger_suppresses_known_classes() {
        let class = ComponentCssClass::new("card", "padding:1rem;");
        let mut seed = ResourceLedger::new();
        seed.add_class(class.class_name());
        let out = render_to_vec(&styled_tree(), seed).expect("render");
        assert!(out.is_empty());
    }

    #[test]
    fn returned_ledger_lists_emitted_classes() {
        let mut out = Vec::new();
        let ledger = render_document(&styled_tree(), &mut out).expect("render");
        assert_eq!(ledger.len(), 1);
        assert!(ledger.all()[0].starts_with("class_card_"));
    }

    #[test]
    fn concurrent_renders_of_one_tree_are_independent() {
        let tree = Arc::new(styled_tree());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tree = Arc::clone(&tree);
                thread::spawn(move || render_to_string(&*tree).expect("render"))
            })
            .collect();
        for handle in handles {
            let html = handle.join().expect("thread finished");
            assert_eq!(html.matches("<style").count(), 1);
        }
    }
}
