use std::collections::HashMap;

use crate::candidate::Candidate;

/// Where a cached candidate list was computed.
///
/// `snapshot` keeps the buffer content the entry was last requested with so a
/// refresh cycle can replay the request; it is cleared once a refresh has
/// produced a mature result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionLocation {
    pub file: String,
    pub snapshot: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub location: CompletionLocation,
    pub candidates: Vec<Candidate>,
}

/// Which trigger tokens are worth caching.
///
/// Historically this gating drifted between "everything" and "only scope
/// resolution", so it is an explicit policy instead of an inline conditional.
/// The default caches only `::`-suffixed chains: namespace contents are
/// stable across edits, while member-access results go stale with every
/// receiver change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Cache every non-empty trigger token.
    All,
    /// Cache only tokens longer than two characters ending in `::`.
    #[default]
    ScopeResolutionOnly,
}

impl CachePolicy {
    pub fn should_cache(
        self,
        token: &str,
    ) -> bool {
        match self {
            Self::All => !token.is_empty(),
            Self::ScopeResolutionOnly => token.len() > 2 && token.ends_with("::"),
        }
    }
}

/// Trigger token -> last computed candidate list.
///
/// The key is the token text alone, not qualified by file: two files sharing
/// an identical trailing chain collide and serve each other's candidates.
#[derive(Debug, Default)]
pub struct CompletionCache {
    entries: HashMap<String, CacheEntry>,
    policy: CachePolicy,
}

impl CompletionCache {
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            entries: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn lookup(
        &self,
        token: &str,
    ) -> Option<&CacheEntry> {
        self.entries.get(token)
    }

    pub fn lookup_mut(
        &mut self,
        token: &str,
    ) -> Option<&mut CacheEntry> {
        self.entries.get_mut(token)
    }

    /// Insert or replace the entry for `token`. Admission is the caller's
    /// decision via [`CachePolicy::should_cache`]; insertion itself is
    /// unconditional.
    pub fn insert(
        &mut self,
        token: impl Into<String>,
        location: CompletionLocation,
        candidates: Vec<Candidate>,
    ) {
        self.entries.insert(token.into(), CacheEntry {
            location,
            candidates,
        });
    }

    /// Drop every entry. Runs after any reparse: the previous candidates may
    /// reference symbols that no longer exist or now resolve differently.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drain all entries for a refresh cycle.
    pub fn take_entries(&mut self) -> Vec<(String, CacheEntry)> {
        self.entries.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src/completion/cache_tests.rs"]
mod tests;
