//! Boundary to the external compiler frontend.
//!
//! Everything semantic (lexing, parsing, template instantiation, symbol
//! resolution) happens behind [`Frontend`]; the engine only hands over file
//! paths, flags, cursor positions and the in-memory overlay, and receives
//! candidate lists back.

pub mod clang;

use std::fmt;

pub use clang::ClangFrontend;

use crate::candidate::Candidate;

/// In-memory content of one tracked file, supplied in place of a disk read
/// so unsaved edits are visible to the frontend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayFile {
    pub path: String,
    pub content: String,
}

impl OverlayFile {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Why the frontend refused to produce or refresh a translation unit.
///
/// Every variant is recoverable upstream: the engine degrades to an empty
/// candidate list and the caller, typically mid-edit, retries later.
#[derive(Debug)]
pub enum FrontendError {
    /// The compiler process could not be spawned.
    Spawn(std::io::Error),
    /// The overlay could not be materialized for the compiler to read.
    Overlay(std::io::Error),
    /// The compiler ran but rejected the invocation outright, e.g. an
    /// unknown argument or an unreadable input file.
    Rejected(String),
}

impl fmt::Display for FrontendError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Spawn(err) => write!(f, "failed to spawn compiler: {err}"),
            Self::Overlay(err) => write!(f, "failed to materialize overlay: {err}"),
            Self::Rejected(reason) => write!(f, "compiler rejected translation unit: {reason}"),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Spawn(err) | Self::Overlay(err) => Some(err),
            Self::Rejected(_) => None,
        }
    }
}

/// External compiler service answering completion queries.
///
/// `overlay` always covers every tracked file, including the one being
/// parsed or completed. Dropping a [`Frontend::Unit`] releases its parse
/// state; dropping the frontend releases any index-level resource.
pub trait Frontend {
    /// Opaque per-file parse state, reused across edits via `reparse`.
    type Unit;

    /// Parse `file` fresh, producing a unit handle.
    fn parse(
        &mut self,
        file: &str,
        args: &[String],
        overlay: &[OverlayFile],
    ) -> Result<Self::Unit, FrontendError>;

    /// Resynchronize an existing unit with the current overlay. A full
    /// resync, not an incremental diff.
    fn reparse(
        &mut self,
        unit: &mut Self::Unit,
        overlay: &[OverlayFile],
    ) -> Result<(), FrontendError>;

    /// Completion candidates at a 1-based (line, column). `None` when the
    /// frontend produced no answer at all.
    fn complete_at(
        &mut self,
        unit: &mut Self::Unit,
        file: &str,
        line: u32,
        column: u32,
        overlay: &[OverlayFile],
    ) -> Option<Vec<Candidate>>;
}
