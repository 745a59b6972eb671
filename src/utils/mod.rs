//! Internal utility modules.

pub(crate) mod pack;
