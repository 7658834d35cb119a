pub mod args;
pub mod candidate;
pub mod completion;
pub mod config;
pub mod engine;
pub mod frontend;
pub mod units;

pub use args::{ArgumentManager, Dialect};
pub use candidate::{Candidate, Chunk, ChunkRole};
pub use completion::{
    CachePolicy, CacheEntry, CompletionCache, CompletionLocation, TriggerToken, find_trigger,
};
pub use config::ProjectConfig;
pub use engine::CompletionEngine;
pub use frontend::{ClangFrontend, Frontend, FrontendError, OverlayFile};
pub use units::TranslationUnitStore;
