pub mod csv;
pub mod file_source;
pub mod json;
pub mod xlsx;
