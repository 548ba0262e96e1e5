//! Error type shared by the loading and aggregation stages.

use thiserror::Error;

/// Failures raised while loading rental logs or summarising them.
///
/// Line numbers are 1-based and count the header row, so they match what an
/// editor shows for the offending CSV line.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("line {line}: cannot parse date {value:?} (expected YYYY-MM-DD)")]
    Parse { line: u64, value: String },

    #[error("required column `{0}` is missing")]
    MissingColumn(&'static str),

    #[error("line {line}: {message}")]
    Schema { line: u64, message: String },

    #[error("cannot summarise an empty record set")]
    EmptyInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Maps a CSV reader failure onto the schema/io split.
    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(io) => PipelineError::Io(io),
                other => PipelineError::Schema {
                    line,
                    message: format!("{other:?}"),
                },
            }
        } else {
            PipelineError::Schema {
                line,
                message: err.to_string(),
            }
        }
    }
}
