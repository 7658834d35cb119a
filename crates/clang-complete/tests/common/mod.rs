use std::collections::VecDeque;

use clang_complete::{Candidate, Chunk, ChunkRole, Frontend, FrontendError, OverlayFile};

#[derive(Debug)]
pub struct ScriptedUnit {
    pub file: String,
}

/// Frontend double for engine-level tests: records every call and answers
/// completions from a script, falling back to a fixed candidate list.
#[derive(Debug, Default)]
pub struct ScriptedFrontend {
    pub parses: Vec<(String, Vec<String>, Vec<OverlayFile>)>,
    pub reparses: Vec<(String, Vec<OverlayFile>)>,
    pub completions: Vec<(String, u32, u32, Vec<OverlayFile>)>,
    pub scripted: VecDeque<Vec<Candidate>>,
    pub default_candidates: Vec<Candidate>,
}

impl ScriptedFrontend {
    pub fn with_candidates(count: usize) -> Self {
        Self {
            default_candidates: candidates(count),
            ..Default::default()
        }
    }

    pub fn script_response(
        &mut self,
        count: usize,
    ) {
        self.scripted.push_back(candidates(count));
    }
}

pub fn candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| Candidate::new(vec![Chunk::new(ChunkRole::TypedText, format!("item{i}"))]))
        .collect()
}

#[allow(dead_code)]
pub fn overlay_content<'a>(
    overlay: &'a [OverlayFile],
    path: &str,
) -> Option<&'a str> {
    overlay.iter().find(|f| f.path == path).map(|f| f.content.as_str())
}

impl Frontend for ScriptedFrontend {
    type Unit = ScriptedUnit;

    fn parse(
        &mut self,
        file: &str,
        args: &[String],
        overlay: &[OverlayFile],
    ) -> Result<ScriptedUnit, FrontendError> {
        self.parses.push((file.to_string(), args.to_vec(), overlay.to_vec()));
        Ok(ScriptedUnit {
            file: file.to_string(),
        })
    }

    fn reparse(
        &mut self,
        unit: &mut ScriptedUnit,
        overlay: &[OverlayFile],
    ) -> Result<(), FrontendError> {
        self.reparses.push((unit.file.clone(), overlay.to_vec()));
        Ok(())
    }

    fn complete_at(
        &mut self,
        _unit: &mut ScriptedUnit,
        file: &str,
        line: u32,
        column: u32,
        overlay: &[OverlayFile],
    ) -> Option<Vec<Candidate>> {
        self.completions.push((file.to_string(), line, column, overlay.to_vec()));
        Some(self.scripted.pop_front().unwrap_or_else(|| self.default_candidates.clone()))
    }
}
