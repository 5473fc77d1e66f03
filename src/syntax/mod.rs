//! Syntax-tree boundary.
//!
//! Statement text is turned into [`SyntaxNode`] trees by an external grammar service. This crate
//! only depends on the tree contract and ships [`JsonSource`], which reads trees that were
//! serialized by such a service.

pub mod build;
pub(crate) mod node;
pub(crate) mod source;
