//! Input loading

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::debug;

use crate::errors::{CanvasError, CanvasResult, IoPhase};

/// Designator meaning "standard input" or "standard output"
pub const STDIO_SENTINEL: &str = "-";

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Where the canvas is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Stdin,
    Path(PathBuf),
}

impl Source {
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            Source::Stdin
        } else {
            Source::Path(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("<stdin>"),
            Source::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Read the whole source into memory, without a leading UTF-8 BOM
pub fn read_source(source: &Source) -> CanvasResult<Vec<u8>> {
    debug!("Reading canvas from: {}", source);

    let data = match source {
        Source::Stdin => read_all(io::stdin().lock())?,
        Source::Path(path) => {
            let file = File::open(path).map_err(|e| CanvasError::io(IoPhase::OpenInput, e))?;
            read_all(file)?
        }
    };

    debug!("Read {} bytes", data.len());
    Ok(strip_bom(data))
}

fn read_all<R: Read>(mut reader: R) -> CanvasResult<Vec<u8>> {
    let mut data = Vec::new();
    reader
        .read_to_end(&mut data)
        .map_err(|e| CanvasError::io(IoPhase::ReadInput, e))?;
    Ok(data)
}

pub fn strip_bom(mut data: Vec<u8>) -> Vec<u8> {
    if data.starts_with(&UTF8_BOM) {
        data.drain(..UTF8_BOM.len());
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn bom_is_stripped_once() {
        let data = vec![0xEF, 0xBB, 0xBF, b'{', b'}'];
        assert_eq!(strip_bom(data), b"{}".to_vec());

        let doubled = vec![0xEF, 0xBB, 0xBF, 0xEF, 0xBB, 0xBF];
        assert_eq!(strip_bom(doubled), UTF8_BOM.to_vec());
    }

    #[test]
    fn data_without_bom_is_untouched() {
        assert_eq!(strip_bom(b"{}".to_vec()), b"{}".to_vec());
        assert_eq!(strip_bom(vec![0xEF, 0xBB]), vec![0xEF, 0xBB]);
        assert!(strip_bom(Vec::new()).is_empty());
    }

    #[test]
    fn sentinel_selects_stdin() {
        assert_eq!(Source::from_arg("-"), Source::Stdin);
        assert_eq!(
            Source::from_arg("notes/map.canvas"),
            Source::Path(PathBuf::from("notes/map.canvas"))
        );
    }

    #[test]
    fn reads_file_contents() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        file.write_all(br#"{"nodes":[]}"#).unwrap();

        let data = read_source(&Source::Path(file.path().to_path_buf())).unwrap();
        assert_eq!(data, br#"{"nodes":[]}"#.to_vec());
    }

    #[test]
    fn missing_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(&Source::Path(dir.path().join("absent.canvas"))).unwrap_err();
        assert_eq!(err.phase(), Some(IoPhase::OpenInput));
    }
}
