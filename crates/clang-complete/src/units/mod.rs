//! Per-file translation unit lifecycle and the unsaved-buffer overlay.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::candidate::Candidate;
use crate::frontend::{Frontend, OverlayFile};

#[derive(Debug)]
struct TrackedFile<U> {
    snapshot: String,
    unit: Option<U>,
}

/// Owns every frontend unit handle, one per tracked file.
///
/// Handles are single-owner: a reparse reuses the existing handle, a failed
/// parse leaves `None`, and dropping the store releases every handle exactly
/// once, followed by the frontend's own index resource.
#[derive(Debug)]
pub struct TranslationUnitStore<F: Frontend> {
    // Declared before `frontend` so units drop before the index resource.
    files: BTreeMap<String, TrackedFile<F::Unit>>,
    frontend: F,
}

impl<F: Frontend> TranslationUnitStore<F> {
    pub fn new(frontend: F) -> Self {
        Self {
            files: BTreeMap::new(),
            frontend,
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn is_tracked(
        &self,
        file: &str,
    ) -> bool {
        self.files.contains_key(file)
    }

    /// Latest known content for a tracked file.
    pub fn snapshot(
        &self,
        file: &str,
    ) -> Option<&str> {
        self.files.get(file).map(|tracked| tracked.snapshot.as_str())
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn frontend_mut(&mut self) -> &mut F {
        &mut self.frontend
    }

    /// The full in-memory overlay: every tracked file's latest content, with
    /// `file` overridden by (or extended with) `content`. Every frontend
    /// call receives this, not just the file under edit, so cross-file
    /// textual consistency holds without touching disk.
    fn overlay_with(
        &self,
        file: &str,
        content: &str,
    ) -> Vec<OverlayFile> {
        let mut overlay = vec![OverlayFile::new(file, content)];
        for (path, tracked) in &self.files {
            if path != file {
                overlay.push(OverlayFile::new(path.clone(), tracked.snapshot.clone()));
            }
        }
        overlay
    }

    fn current_overlay(&self) -> Vec<OverlayFile> {
        self.files
            .iter()
            .map(|(path, tracked)| OverlayFile::new(path.clone(), tracked.snapshot.clone()))
            .collect()
    }

    /// Parse `file` fresh or resynchronize its existing unit, recording
    /// `content` as the latest snapshot either way. Returns whether a usable
    /// unit exists afterwards.
    ///
    /// A frontend refusal records no handle; completion against such a file
    /// yields an empty candidate list instead of an error, since the caller
    /// is typically mid-edit and will retry.
    pub fn ensure_parsed(
        &mut self,
        file: &str,
        content: &str,
        args: &[String],
    ) -> bool {
        let overlay = self.overlay_with(file, content);

        if let Some(tracked) = self.files.get_mut(file) {
            tracked.snapshot = content.to_string();
            if let Some(unit) = tracked.unit.as_mut() {
                return match self.frontend.reparse(unit, &overlay) {
                    Ok(()) => true,
                    Err(err) => {
                        warn!("[units] reparse failed for {file}: {err}");
                        tracked.unit = None;
                        false
                    },
                };
            }
        }

        // Fresh parse: a new file, or a retry after an earlier failure.
        let unit = match self.frontend.parse(file, args, &overlay) {
            Ok(unit) => Some(unit),
            Err(err) => {
                warn!("[units] parse failed for {file}: {err}");
                None
            },
        };
        let usable = unit.is_some();
        match self.files.get_mut(file) {
            Some(tracked) => tracked.unit = unit,
            None => {
                self.files.insert(file.to_string(), TrackedFile {
                    snapshot: content.to_string(),
                    unit,
                });
            },
        }
        usable
    }

    /// Idempotent registration. An already-tracked file is a no-op; with no
    /// content supplied the file is read from disk, and an unreadable file
    /// fails softly, leaving the file untracked.
    pub fn ensure_file(
        &mut self,
        file: &str,
        content: Option<&str>,
        args: &[String],
    ) -> bool {
        if self.is_tracked(file) {
            return true;
        }
        match content {
            Some(content) => {
                self.ensure_parsed(file, content, args);
                true
            },
            None => match std::fs::read_to_string(file) {
                Ok(content) => {
                    self.ensure_parsed(file, &content, args);
                    true
                },
                Err(err) => {
                    warn!("[units] cannot register {file}: {err}");
                    false
                },
            },
        }
    }

    /// Completion at a 1-based (line, column) against the stored snapshots.
    /// `None` when the file has no usable unit.
    pub fn complete_at(
        &mut self,
        file: &str,
        line: u32,
        column: u32,
    ) -> Option<Vec<Candidate>> {
        let overlay = self.current_overlay();
        let tracked = self.files.get_mut(file)?;
        let unit = tracked.unit.as_mut()?;
        let candidates = self.frontend.complete_at(unit, file, line, column, &overlay);
        if candidates.is_none() {
            debug!("[units] frontend returned no completion for {file}:{line}:{column}");
        }
        candidates
    }
}

#[cfg(test)]
#[path = "../../tests/src/units/store_tests.rs"]
mod tests;
