//! Per-step action catalog and legality mask.
//!
//! The simulator exposes a variable-length, context-dependent list of legal
//! actions; agents choose from a fixed-width index space. [`ActionCatalog`]
//! wraps the list for the active context and [`ActionMask`] projects it onto
//! `[0, MAX_ACTIONS)`. Both are derived state, rebuilt every step.
mod catalog;
mod mask;

pub use catalog::{ActionCatalog, ActionHandle};
pub use mask::ActionMask;
