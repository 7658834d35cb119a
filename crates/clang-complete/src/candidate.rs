use serde::{Deserialize, Serialize};

/// Role of one rendered piece of a completion candidate.
///
/// Mirrors the chunk kinds reported by the clang completion machinery. Any
/// kind outside this set deserializes to [`ChunkRole::Unknown`] rather than
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChunkRole {
    TypedText,
    Text,
    Placeholder,
    Informative,
    CurrentParameter,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftAngle,
    RightAngle,
    Comma,
    ResultType,
    Colon,
    SemiColon,
    Equal,
    HorizontalSpace,
    VerticalSpace,
    Optional,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub role: ChunkRole,
    pub text: String,
}

impl Chunk {
    pub fn new(
        role: ChunkRole,
        text: impl Into<String>,
    ) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// One suggestion, rendered as an ordered sequence of chunks exactly as the
/// frontend reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub chunks: Vec<Chunk>,
}

impl Candidate {
    pub fn new(chunks: Vec<Chunk>) -> Self {
        Self {
            chunks,
        }
    }

    /// The insertable identifier, if the frontend reported one.
    pub fn typed_text(&self) -> Option<&str> {
        self.chunks.iter().find(|c| c.role == ChunkRole::TypedText).map(|c| c.text.as_str())
    }

    /// The result type annotation, shown in the editor's menu column.
    pub fn result_type(&self) -> Option<&str> {
        self.chunks.iter().find(|c| c.role == ChunkRole::ResultType).map(|c| c.text.as_str())
    }

    /// Every chunk except the result type, concatenated. This is the full
    /// signature rendering editors show next to the candidate.
    pub fn signature(&self) -> String {
        let mut rendered = String::new();
        for chunk in &self.chunks {
            if chunk.role != ChunkRole::ResultType {
                rendered.push_str(&chunk.text);
            }
        }
        rendered
    }
}

#[cfg(test)]
#[path = "../tests/src/candidate_tests.rs"]
mod tests;
