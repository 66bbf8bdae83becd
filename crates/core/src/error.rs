use std::fmt;

use serde::{Deserialize, Serialize};

/// Front-end stage that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Lex,
    Parse,
}

/// A front-end error. Lexing and parsing are single-pass and fatal:
/// the first failure aborts with enough context to locate the fault
/// in the source text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceError {
    pub stage: Stage,
    pub file: String,
    pub line: u32,
    pub message: String,
}

impl SourceError {
    pub fn lex(file: &str, line: u32, message: impl Into<String>) -> Self {
        SourceError {
            stage: Stage::Lex,
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }

    pub fn parse(file: &str, line: u32, message: impl Into<String>) -> Self {
        SourceError {
            stage: Stage::Parse,
            file: file.to_owned(),
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self.stage {
            Stage::Lex => "lex",
            Stage::Parse => "parse",
        };
        write!(
            f,
            "{}:{}: {} error: {}",
            self.file, self.line, stage, self.message
        )
    }
}

impl std::error::Error for SourceError {}
