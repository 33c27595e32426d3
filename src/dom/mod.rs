//! In-memory document model the ticker engine mutates.

pub(crate) mod cascade;
pub(crate) mod css;
pub(crate) mod markup;
pub(crate) mod node;
pub(crate) mod selector;
pub(crate) mod source;
