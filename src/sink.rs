//! CSV output

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use tracing::debug;

use crate::convert::Row;
use crate::errors::{CanvasError, CanvasResult, IoPhase};
use crate::loader::STDIO_SENTINEL;

/// Field separator; note text is full of commas
pub const DELIMITER: u8 = b';';

/// Where the rows are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Path(PathBuf),
}

impl Destination {
    pub fn from_arg(arg: &str) -> Self {
        if arg == STDIO_SENTINEL {
            Destination::Stdout
        } else {
            Destination::Path(PathBuf::from(arg))
        }
    }
}

/// Write `rows` as `from;label;to` lines to any writer, returning the row count
pub fn write_rows<W: Write>(rows: &[Row], writer: W) -> CanvasResult<usize> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .has_headers(false)
        .from_writer(writer);

    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()
        .map_err(|e| CanvasError::io(IoPhase::FlushCsv, e))?;
    Ok(rows.len())
}

pub fn write_to(rows: &[Row], destination: &Destination) -> CanvasResult<usize> {
    match destination {
        Destination::Stdout => {
            debug!("Writing {} rows to stdout", rows.len());
            write_rows(rows, io::stdout().lock())
        }
        Destination::Path(path) => {
            debug!("Writing {} rows to: {}", rows.len(), path.display());
            let mut file =
                File::create(path).map_err(|e| CanvasError::io(IoPhase::OpenOutput, e))?;
            let written = write_rows(rows, &mut file)?;
            file.sync_all()
                .map_err(|e| CanvasError::io(IoPhase::CloseOutput, e))?;
            Ok(written)
        }
    }
}
