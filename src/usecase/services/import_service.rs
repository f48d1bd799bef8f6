use std::sync::Arc;

use tracing::{info, warn};

use crate::usecase::ports::source::{DatasetSource, SourceError};
use crate::usecase::services::dataset_index::DatasetIndex;
use crate::usecase::services::session::Session;

pub struct ImportService {
    source: Arc<dyn DatasetSource>,
}

impl ImportService {
    pub fn new(source: Arc<dyn DatasetSource>) -> Self {
        Self { source }
    }

    /// Loads the table and starts a fresh session over it. Load failures are
    /// returned as-is; there is no retry.
    pub fn open_session(&self) -> Result<Session, SourceError> {
        let rows = self.source.load_rows()?;
        let index = DatasetIndex::from_rows(rows);

        if index.is_empty() {
            warn!(source = %self.source.describe(), "dataset has no rows");
        }
        let missing = index.schema().missing_roles();
        if !missing.is_empty() {
            warn!(source = %self.source.describe(), ?missing, "some columns were not detected");
        }
        info!(
            source = %self.source.describe(),
            rows = index.len(),
            "dataset loaded"
        );

        Ok(Session::new(index))
    }
}
