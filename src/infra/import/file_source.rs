use std::path::{Path, PathBuf};

use crate::domain::entities::row::Row;
use crate::infra::import::csv::read_csv_rows;
use crate::infra::import::json::read_json_rows;
use crate::infra::import::xlsx::read_xlsx_rows;
use crate::usecase::ports::source::{DatasetSource, SourceError};

pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["json", "csv", "xlsx", "xls", "ods"];

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl FileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase())
            .unwrap_or_default()
    }
}

impl DatasetSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load_rows(&self) -> Result<Vec<Row>, SourceError> {
        let loaded = match self.extension().as_str() {
            "json" => read_json_rows(&self.path),
            "csv" => read_csv_rows(&self.path),
            "xlsx" | "xls" | "ods" => read_xlsx_rows(&self.path),
            _ => return Err(SourceError::Unsupported(self.describe())),
        };
        loaded.map_err(|err| SourceError::Message(format!("{err:#}")))
    }
}
