use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}
