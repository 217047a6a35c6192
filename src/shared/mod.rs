//! Usage: Cross-cutting utilities shared across domains (low-level helpers, pure logic).

pub(crate) mod js;
pub(crate) mod mutex_ext;
