//! Built-in constructors, grouped by what they build.

use crate::expression::interpreter::FunctionTable;

pub(crate) mod annotate;
pub(crate) mod control;
pub(crate) mod graph;
pub(crate) mod plane;
pub(crate) mod space;

pub(crate) fn register(table: &mut FunctionTable) {
    plane::register(table);
    space::register(table);
    annotate::register(table);
    graph::register(table);
    control::register(table);
}
