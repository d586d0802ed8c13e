//! Error types for OBJ parsing and vertex buffer assembly.

use std::fmt;
use thiserror::Error;

/// Which index space a face corner referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Position,
    Normal,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Position => f.write_str("position"),
            IndexKind::Normal => f.write_str("normal"),
        }
    }
}

/// Errors produced while turning OBJ text into a vertex buffer.
///
/// Line numbers are 1-based and count the header line.
#[derive(Debug, Error, PartialEq)]
pub enum ObjError {
    /// The first line is not the exact exporter header.
    #[error("header mismatch: expected {expected:?}, found {found:?}")]
    HeaderMismatch {
        expected: &'static str,
        found: String,
    },

    /// The file has no content at all (or only whitespace).
    #[error("file is empty")]
    EmptyFile,

    /// Nothing follows the header line.
    #[error("no content after header")]
    EmptyContent,

    /// Scanning finished without any vertex or without any face.
    #[error("no parseable data: {vertices} vertices, {faces} faces")]
    NoParseableData { vertices: usize, faces: usize },

    /// A face referenced a position or normal that has not been declared yet.
    #[error("line {line}: {kind} index {index} out of range (have {len})")]
    IndexOutOfRange {
        kind: IndexKind,
        index: u32,
        len: usize,
        line: usize,
    },

    /// A numeric token could not be parsed.
    #[error("line {line}: invalid number {token:?}")]
    NumericParseFailure { token: String, line: usize },

    /// A `v` or `vn` record has fewer than three components.
    #[error("line {line}: expected 3 components, found {found}")]
    MissingComponents { found: usize, line: usize },

    /// A face uses an unsupported corner form.
    #[error("line {line}: malformed face: {reason}")]
    MalformedFace { reason: String, line: usize },

    /// Vertices disagree on how many scalars they emit.
    #[error("vertex {vertex} has stride {found}, expected {expected}")]
    InconsistentStride {
        vertex: usize,
        expected: usize,
        found: usize,
    },
}

impl ObjError {
    pub(crate) fn malformed_face(line: usize, reason: impl Into<String>) -> Self {
        ObjError::MalformedFace {
            reason: reason.into(),
            line,
        }
    }
}

/// Result alias for parser and assembler operations.
pub type ObjResult<T> = Result<T, ObjError>;
