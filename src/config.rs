use std::path::Path;

use crate::errors::{CanvasError, CanvasResult};
use crate::loader::{Source, STDIO_SENTINEL};
use crate::sink::Destination;

/// Settings for a single conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: Source,
    pub output: Destination,
    /// Show file nodes by full path instead of base name
    pub keep_path: bool,
}

impl Config {
    /// Combine the command-line values into a run configuration.
    ///
    /// `input` takes priority over `positional`. Without an explicit
    /// `output` the result goes next to the caller as `<stem>.csv`, or to
    /// stdout when reading stdin.
    pub fn resolve(
        input: Option<String>,
        positional: Option<String>,
        output: Option<String>,
        keep_path: bool,
    ) -> CanvasResult<Self> {
        let input = input
            .filter(|s| !s.is_empty())
            .or_else(|| positional.filter(|s| !s.is_empty()))
            .ok_or(CanvasError::MissingInput)?;

        let output = output
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_output(&input));

        Ok(Config {
            input: Source::from_arg(&input),
            output: Destination::from_arg(&output),
            keep_path,
        })
    }
}

pub fn default_output(input: &str) -> String {
    if input == STDIO_SENTINEL {
        return STDIO_SENTINEL.to_string();
    }
    let stem = Path::new(input)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    format!("{}.csv", stem)
}
