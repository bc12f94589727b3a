//! LLM session bookkeeping.

mod store;

pub use store::SessionStore;
