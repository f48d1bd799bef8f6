use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::row::Row;

pub fn rows_from_csv_reader<R: Read>(input: R) -> Result<Vec<Row>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader
        .headers()
        .context("failed to read csv headers")?
        .clone();

    if headers.is_empty() {
        anyhow::bail!("csv header is required")
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("failed to parse csv record")?;
        rows.push(Row::from_pairs(headers.iter().enumerate().map(
            |(col_idx, column)| (column, record.get(col_idx).unwrap_or("")),
        )));
    }

    Ok(rows)
}

pub fn read_csv_rows(csv_path: &Path) -> Result<Vec<Row>> {
    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("failed to open csv: {}", csv_path.display()))?;
    rows_from_csv_reader(file).with_context(|| format!("invalid csv: {}", csv_path.display()))
}
