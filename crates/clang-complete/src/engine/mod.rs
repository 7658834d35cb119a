//! Request orchestration: trigger location, cache consultation, and the
//! parse/complete round trip.

use tracing::debug;

use crate::args::ArgumentManager;
use crate::candidate::Candidate;
use crate::completion::{CacheEntry, CachePolicy, CompletionCache, CompletionLocation, find_trigger};
use crate::frontend::Frontend;
use crate::units::TranslationUnitStore;

/// Single-threaded completion engine. One request runs to completion before
/// the next; an embedding host serializes all calls.
pub struct CompletionEngine<F: Frontend> {
    store: TranslationUnitStore<F>,
    cache: CompletionCache,
}

impl<F: Frontend> CompletionEngine<F> {
    pub fn new(frontend: F) -> Self {
        Self::with_policy(frontend, CachePolicy::default())
    }

    pub fn with_policy(
        frontend: F,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store: TranslationUnitStore::new(frontend),
            cache: CompletionCache::new(policy),
        }
    }

    pub fn tracked_file_count(&self) -> usize {
        self.store.file_count()
    }

    pub fn cache(&self) -> &CompletionCache {
        &self.cache
    }

    pub fn store(&self) -> &TranslationUnitStore<F> {
        &self.store
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        self.store.frontend_mut()
    }

    /// Parse or resynchronize one file. Any reparse invalidates the whole
    /// completion cache: previously cached candidates may reference symbols
    /// that no longer exist or now resolve differently.
    pub fn parse(
        &mut self,
        file: &str,
        content: &str,
        args: &ArgumentManager,
    ) {
        self.store.ensure_parsed(file, content, &args.prepare_args());
        self.cache.clear();
    }

    /// Register a file without forcing a completion request. Idempotent;
    /// returns `false` only when no content is available anywhere.
    pub fn ensure_file(
        &mut self,
        file: &str,
        content: Option<&str>,
        args: &ArgumentManager,
    ) -> bool {
        let already_tracked = self.store.is_tracked(file);
        let registered = self.store.ensure_file(file, content, &args.prepare_args());
        if registered && !already_tracked {
            self.cache.clear();
        }
        registered
    }

    /// Completion candidates for a 1-based cursor position.
    ///
    /// The trigger token keys the cache; on a hit the entry's recorded
    /// location is refreshed and the cached candidates are returned without
    /// touching the frontend. Without a trigger the request degrades to a
    /// context-free completion at the raw cursor. Frontend failures yield an
    /// empty list, never an error.
    pub fn code_complete(
        &mut self,
        file: &str,
        content: &str,
        line: u32,
        column: u32,
        args: &ArgumentManager,
    ) -> Vec<Candidate> {
        let Some(trigger) = find_trigger(content, line, column) else {
            debug!("[engine] no trigger at {file}:{line}:{column}, context-free request");
            return self.obtain(file, content, line, column, args);
        };

        if let Some(entry) = self.cache.lookup_mut(&trigger.text) {
            debug!("[engine] cache hit for {:?}", trigger.text);
            entry.location = CompletionLocation {
                file: file.to_string(),
                snapshot: content.to_string(),
                line: trigger.line,
                column: trigger.column,
            };
            return entry.candidates.clone();
        }

        let candidates = self.obtain(file, content, trigger.line, trigger.column, args);
        if self.cache.policy().should_cache(&trigger.text) {
            self.cache.insert(
                trigger.text,
                CompletionLocation {
                    file: file.to_string(),
                    snapshot: content.to_string(),
                    line: trigger.line,
                    column: trigger.column,
                },
                candidates.clone(),
            );
        }
        candidates
    }

    /// Refresh every cached entry that still carries a content snapshot by
    /// replaying its request. The frontend's preamble caching matures over
    /// successive reparses, so a result at least as large as the cached one
    /// replaces it and clears the snapshot; a smaller result is treated as
    /// transient and discarded. Candidate count is a placeholder freshness
    /// heuristic, nothing more.
    pub fn update(
        &mut self,
        args: &ArgumentManager,
    ) {
        let entries = self.cache.take_entries();
        let mut refreshed = Vec::with_capacity(entries.len());

        for (token, entry) in entries {
            if entry.location.snapshot.is_empty() {
                refreshed.push((token, entry));
                continue;
            }

            let fresh = self.obtain(
                &entry.location.file,
                &entry.location.snapshot,
                entry.location.line,
                entry.location.column,
                args,
            );
            if fresh.len() >= entry.candidates.len() {
                debug!("[engine] refreshed {token:?}: {} candidates", fresh.len());
                let mut location = entry.location;
                location.snapshot = String::new();
                refreshed.push((token, CacheEntry {
                    location,
                    candidates: fresh,
                }));
            } else {
                refreshed.push((token, entry));
            }
        }

        // The reparses above cleared the cache; rebuild it in one pass.
        self.cache.clear();
        for (token, entry) in refreshed {
            self.cache.insert(token, entry.location, entry.candidates);
        }
    }

    /// Uncached parse + complete round trip.
    fn obtain(
        &mut self,
        file: &str,
        content: &str,
        line: u32,
        column: u32,
        args: &ArgumentManager,
    ) -> Vec<Candidate> {
        self.store.ensure_parsed(file, content, &args.prepare_args());
        self.cache.clear();
        self.store.complete_at(file, line, column).unwrap_or_default()
    }
}
