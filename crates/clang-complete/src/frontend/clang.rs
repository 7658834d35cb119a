//! Subprocess-based clang frontend.
//!
//! Drives the clang driver rather than libclang: the overlay is mirrored
//! into a scratch directory, and completion queries go through
//! `-Xclang -code-completion-at=<file>:<line>:<col>`, whose stdout is parsed
//! back into chunked candidates.

use std::path::{Component, Path, PathBuf};
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::{Frontend, FrontendError, OverlayFile};
use crate::candidate::{Candidate, Chunk, ChunkRole};

static NEXT_SCRATCH_ID: AtomicU64 = AtomicU64::new(1);

static COMPLETION_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^COMPLETION: (.+?)(?: : (.*))?$").expect("completion pattern"));

/// Parse state for one file: the flag list it was parsed with, reused for
/// every later reparse and completion against the same unit.
#[derive(Debug)]
pub struct ClangUnit {
    file: String,
    args: Vec<String>,
}

/// Frontend implementation shelling out to the clang driver.
///
/// Owns a scratch directory acting as the index-level resource; it is
/// removed exactly once when the frontend is dropped.
#[derive(Debug)]
pub struct ClangFrontend {
    binary: String,
    scratch_dir: PathBuf,
}

impl ClangFrontend {
    pub fn new() -> Self {
        Self::with_binary("clang")
    }

    pub fn with_binary(binary: impl Into<String>) -> Self {
        let scratch_id = NEXT_SCRATCH_ID.fetch_add(1, Ordering::Relaxed);
        let scratch_dir = std::env::temp_dir()
            .join(format!("clang-complete-{}-{scratch_id}", std::process::id()));
        Self {
            binary: binary.into(),
            scratch_dir,
        }
    }

    /// Mirror the overlay into the scratch directory, preserving relative
    /// layout so `#include "..."` between tracked files keeps resolving.
    fn materialize(
        &self,
        overlay: &[OverlayFile],
    ) -> Result<(), std::io::Error> {
        for file in overlay {
            let mapped = self.mapped_path(&file.path);
            if let Some(parent) = mapped.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&mapped, &file.content)?;
        }
        Ok(())
    }

    fn mapped_path(
        &self,
        file: &str,
    ) -> PathBuf {
        let relative: PathBuf = Path::new(file)
            .components()
            .filter(|component| matches!(component, Component::Normal(_)))
            .collect();
        self.scratch_dir.join(relative)
    }

    fn run_syntax_check(
        &self,
        target: &Path,
        args: &[String],
    ) -> Result<Output, FrontendError> {
        let mut command = Command::new(&self.binary);
        command.args(args).arg(target);
        debug!("[clang] syntax check: {} {}", self.binary, args.join(" "));
        command.output().map_err(FrontendError::Spawn)
    }
}

impl Default for ClangFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for ClangFrontend {
    type Unit = ClangUnit;

    fn parse(
        &mut self,
        file: &str,
        args: &[String],
        overlay: &[OverlayFile],
    ) -> Result<ClangUnit, FrontendError> {
        self.materialize(overlay).map_err(FrontendError::Overlay)?;

        let target = self.mapped_path(file);
        let output = self.run_syntax_check(&target, args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if let Some(reason) = driver_failure(&stderr) {
                return Err(FrontendError::Rejected(reason));
            }
            // Ordinary diagnostics are expected mid-edit.
            debug!("[clang] parse finished with diagnostics for {file}");
        }

        Ok(ClangUnit {
            file: file.to_string(),
            args: args.to_vec(),
        })
    }

    fn reparse(
        &mut self,
        unit: &mut ClangUnit,
        overlay: &[OverlayFile],
    ) -> Result<(), FrontendError> {
        self.materialize(overlay).map_err(FrontendError::Overlay)?;

        let target = self.mapped_path(&unit.file);
        let output = self.run_syntax_check(&target, &unit.args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if let Some(reason) = driver_failure(&stderr) {
                return Err(FrontendError::Rejected(reason));
            }
        }
        Ok(())
    }

    fn complete_at(
        &mut self,
        unit: &mut ClangUnit,
        file: &str,
        line: u32,
        column: u32,
        overlay: &[OverlayFile],
    ) -> Option<Vec<Candidate>> {
        if let Err(err) = self.materialize(overlay) {
            warn!("[clang] failed to materialize overlay: {err}");
            return None;
        }

        let target = self.mapped_path(file);
        let location = format!("{}:{line}:{column}", target.display());

        let mut command = Command::new(&self.binary);
        command
            .args(&unit.args)
            .arg("-Xclang")
            .arg(format!("-code-completion-at={location}"))
            .arg("-Xclang")
            .arg("-code-completion-macros")
            .arg(&target);
        debug!("[clang] complete at {location}");

        let output = match command.output() {
            Ok(output) => output,
            Err(err) => {
                warn!("[clang] failed to run completion: {err}");
                return None;
            },
        };

        // Completion output survives on stdout even when diagnostics make
        // the exit status non-zero.
        let stdout = String::from_utf8_lossy(&output.stdout);
        Some(parse_completions(&stdout))
    }
}

impl Drop for ClangFrontend {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.scratch_dir);
    }
}

/// Distinguish a rejected invocation from ordinary diagnostics.
fn driver_failure(stderr: &str) -> Option<String> {
    for line in stderr.lines() {
        let lower = line.to_ascii_lowercase();
        if lower.contains("unknown argument")
            || lower.contains("unsupported option")
            || lower.contains("no such file or directory")
            || lower.contains("no input files")
        {
            return Some(line.trim().to_string());
        }
    }
    None
}

/// Parse the driver's code-completion stdout into candidates, one per
/// `COMPLETION:` line.
pub(crate) fn parse_completions(stdout: &str) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for line in stdout.lines() {
        let Some(captures) = COMPLETION_LINE.captures(line) else {
            continue;
        };
        let typed = captures.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
        let chunks = match captures.get(2) {
            Some(body) => parse_completion_string(typed, body.as_str()),
            None => vec![Chunk::new(ChunkRole::TypedText, typed)],
        };
        candidates.push(Candidate::new(chunks));
    }
    candidates
}

/// Chunk markers used by the driver's completion string rendering.
const MARKERS: &[(&str, &str, ChunkRole)] = &[
    ("[#", "#]", ChunkRole::ResultType),
    ("<#", "#>", ChunkRole::Placeholder),
    ("{#", "#}", ChunkRole::Optional),
];

fn parse_completion_string(
    typed_text: &str,
    body: &str,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut typed_seen = false;
    let mut rest = body;

    'outer: while !rest.is_empty() {
        for (open, close, role) in MARKERS {
            if let Some(after_open) = rest.strip_prefix(open) {
                match after_open.find(close) {
                    Some(end) => {
                        chunks.push(Chunk::new(*role, &after_open[..end]));
                        rest = &after_open[end + close.len()..];
                    },
                    None => {
                        // Unterminated marker; keep the raw text visible.
                        chunks.push(Chunk::new(ChunkRole::Text, after_open));
                        rest = "";
                    },
                }
                continue 'outer;
            }
        }

        let next_marker = MARKERS
            .iter()
            .filter_map(|(open, _, _)| rest.find(open))
            .min()
            .unwrap_or(rest.len());
        push_plain(&rest[..next_marker], typed_text, &mut typed_seen, &mut chunks);
        rest = &rest[next_marker..];
    }

    chunks
}

/// Split marker-free text into punctuation chunks and identifier runs. The
/// first run equal to the candidate's typed text becomes the TypedText
/// chunk; everything else is plain Text.
fn push_plain(
    text: &str,
    typed_text: &str,
    typed_seen: &mut bool,
    chunks: &mut Vec<Chunk>,
) {
    let mut run = String::new();
    let flush = |run: &mut String, typed_seen: &mut bool, chunks: &mut Vec<Chunk>| {
        if run.is_empty() {
            return;
        }
        let role = if !*typed_seen && run == typed_text {
            *typed_seen = true;
            ChunkRole::TypedText
        } else {
            ChunkRole::Text
        };
        chunks.push(Chunk::new(role, run.as_str()));
        run.clear();
    };

    for ch in text.chars() {
        match punctuation_role(ch) {
            Some(role) => {
                flush(&mut run, typed_seen, chunks);
                chunks.push(Chunk::new(role, ch.to_string()));
            },
            None => run.push(ch),
        }
    }
    flush(&mut run, typed_seen, chunks);
}

fn punctuation_role(ch: char) -> Option<ChunkRole> {
    match ch {
        '(' => Some(ChunkRole::LeftParen),
        ')' => Some(ChunkRole::RightParen),
        '[' => Some(ChunkRole::LeftBracket),
        ']' => Some(ChunkRole::RightBracket),
        '{' => Some(ChunkRole::LeftBrace),
        '}' => Some(ChunkRole::RightBrace),
        '<' => Some(ChunkRole::LeftAngle),
        '>' => Some(ChunkRole::RightAngle),
        ',' => Some(ChunkRole::Comma),
        ':' => Some(ChunkRole::Colon),
        ';' => Some(ChunkRole::SemiColon),
        '=' => Some(ChunkRole::Equal),
        ' ' => Some(ChunkRole::HorizontalSpace),
        '\n' => Some(ChunkRole::VerticalSpace),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/src/frontend/clang_tests.rs"]
mod tests;
