//! Core rendering model: components, traversal context, the resource ledger,
//! class naming and output sanitizers.

pub mod component;
pub mod context;
pub mod css;
pub mod error;
pub mod ledger;
pub mod sanitize;
pub mod script;
