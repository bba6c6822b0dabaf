//! Named shell contexts.
//!
//! A context is a directory under the store root holding optional `enter` and
//! `leave` hooks and a `history` file. The [`ContextManager`] owns the
//! session's active-context state and sequences hooks and history around each
//! transition.

mod manager;
mod store;
mod types;

pub use manager::{ContextError, ContextManager, Transition};
pub use store::ContextStore;
pub use types::{Context, HISTORY_FILE, Session};
