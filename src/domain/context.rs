//! Per-traversal render state: injected children and the resource ledger.
//!
//! A [`RenderContext`] is a small `Copy` value passed down the tree by ordinary
//! parameter. Attaching children returns a new context for the subtree rendered
//! with it; the caller's own context is untouched, so siblings and the parent's
//! continuation never observe a child's override. The ledger is referenced, not
//! copied: every node of one traversal sees the same instance.

use std::cell::RefCell;
use std::fmt;

use super::component::{Component, NOP};
use super::ledger::ResourceLedger;

/// What a parent has told the subtree about children content.
#[derive(Clone, Copy, Default)]
pub enum ChildrenState<'a> {
    /// No children were ever attached.
    #[default]
    Unset,
    /// A parent attached this component.
    Set(&'a dyn Component),
    /// A parent explicitly cleared the children.
    Cleared,
}

impl ChildrenState<'_> {
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }
}

impl fmt::Debug for ChildrenState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("Unset"),
            Self::Set(_) => f.write_str("Set(..)"),
            Self::Cleared => f.write_str("Cleared"),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct RenderContext<'a> {
    children: ChildrenState<'a>,
    ledger: Option<&'a RefCell<ResourceLedger>>,
}

impl<'a> RenderContext<'a> {
    /// Context for a top-level render sharing `ledger` across the whole tree.
    pub fn new(ledger: &'a RefCell<ResourceLedger>) -> Self {
        Self {
            children: ChildrenState::Unset,
            ledger: Some(ledger),
        }
    }

    /// Context with no ledger attached.
    ///
    /// Kept for callers that render without initialising traversal state; the
    /// resource emitters then fall back to a throwaway ledger per call, so nothing
    /// is deduplicated.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Context for a subtree that should render `children` when it asks for them.
    pub fn with_children<'b>(self, children: &'b dyn Component) -> RenderContext<'b>
    where
        'a: 'b,
    {
        RenderContext {
            children: ChildrenState::Set(children),
            ledger: self.ledger,
        }
    }

    /// Context for a subtree that must not see the children attached above it.
    pub fn clear_children(self) -> Self {
        Self {
            children: ChildrenState::Cleared,
            ledger: self.ledger,
        }
    }

    /// The children to render at this point, or [`NOP`] when none were provided.
    pub fn children(&self) -> &'a dyn Component {
        match self.children {
            ChildrenState::Set(children) => children,
            ChildrenState::Unset | ChildrenState::Cleared => &NOP,
        }
    }

    pub fn children_state(&self) -> ChildrenState<'a> {
        self.children
    }

    pub fn ledger(&self) -> Option<&'a RefCell<ResourceLedger>> {
        self.ledger
    }
}

impl fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("children", &self.children)
            .field("ledger", &self.ledger.map(|ledger| ledger.borrow().len()))
            .finish()
    }
}
