pub mod cache;
pub mod trigger;

pub use cache::{CacheEntry, CachePolicy, CompletionCache, CompletionLocation};
pub use trigger::{TriggerToken, find_trigger};
