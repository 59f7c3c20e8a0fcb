//! Components shipped with the binary.

pub mod demo;
