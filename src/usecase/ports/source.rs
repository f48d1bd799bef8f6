use thiserror::Error;

use crate::domain::entities::row::Row;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("unsupported dataset format: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Message(String),
}

/// Where the diagnostic table comes from. Loaded once per session.
pub trait DatasetSource: Send + Sync {
    fn describe(&self) -> String;

    fn load_rows(&self) -> Result<Vec<Row>, SourceError>;
}
