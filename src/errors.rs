//! Error types for canvas conversion
//!
//! Every failure in this tool is fatal. The variants map onto the three
//! categories a user can hit:
//!
//! - **Usage**: no input designator was given
//! - **I/O**: a stream could not be opened, read, written or flushed
//! - **Parse**: the input is not a canvas document
//!
//! # Examples
//!
//! ```rust
//! use canvas_tool::errors::{CanvasError, IoPhase};
//!
//! let err = CanvasError::io(
//!     IoPhase::OpenInput,
//!     std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
//! );
//! assert!(err.is_io_error());
//! assert_eq!(err.to_string(), "open input: no such file");
//! ```

use std::fmt;

use thiserror::Error;

/// The stream operation an I/O error happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoPhase {
    OpenInput,
    ReadInput,
    OpenOutput,
    FlushCsv,
    CloseOutput,
}

impl fmt::Display for IoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            IoPhase::OpenInput => "open input",
            IoPhase::ReadInput => "read input",
            IoPhase::OpenOutput => "open output",
            IoPhase::FlushCsv => "flush csv",
            IoPhase::CloseOutput => "close output",
        };
        f.write_str(phase)
    }
}

/// Canvas conversion errors
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Neither `--in` nor a positional input was supplied
    #[error("missing --in (or first arg)")]
    MissingInput,

    /// Opening, reading or flushing a stream failed
    #[error("{phase}: {source}")]
    Io {
        phase: IoPhase,
        #[source]
        source: std::io::Error,
    },

    /// Both decode strategies rejected the input; holds the strict error
    #[error("parse .canvas JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// Writing a row failed
    #[error("write csv: {0}")]
    Csv(#[from] csv::Error),
}

impl CanvasError {
    pub fn io(phase: IoPhase, source: std::io::Error) -> Self {
        CanvasError::Io { phase, source }
    }

    pub fn is_usage_error(&self) -> bool {
        matches!(self, CanvasError::MissingInput)
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, CanvasError::Io { .. } | CanvasError::Csv(_))
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, CanvasError::Parse(_))
    }

    /// The phase an I/O error happened in, if this is one
    pub fn phase(&self) -> Option<IoPhase> {
        match self {
            CanvasError::Io { phase, .. } => Some(*phase),
            _ => None,
        }
    }
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;
