use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::domain::entities::row::Row;

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => v.to_string(),
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

/// Turns a grid whose first line is the header into rows. Blank lines are
/// dropped; short lines get empty trailing cells.
pub fn rows_from_grid(grid: &[Vec<String>]) -> Vec<Row> {
    let Some((headers, body)) = grid.split_first() else {
        return Vec::new();
    };

    body.iter()
        .filter(|line| line.iter().any(|cell| !cell.trim().is_empty()))
        .map(|line| {
            Row::from_pairs(headers.iter().enumerate().map(|(col_idx, column)| {
                (
                    column.clone(),
                    line.get(col_idx).cloned().unwrap_or_default(),
                )
            }))
        })
        .collect()
}

/// Reads the first worksheet of a spreadsheet.
pub fn read_xlsx_rows(xlsx_path: &Path) -> Result<Vec<Row>> {
    let mut workbook = open_workbook_auto(xlsx_path)
        .with_context(|| format!("failed to open xlsx: {}", xlsx_path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("workbook has no sheets: {}", xlsx_path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(cell_to_string).collect())
        .collect();

    Ok(rows_from_grid(&grid))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn stringifies_cells_like_the_sheet_shows_them() {
        assert_eq!(cell_to_string(&Data::Float(2.0)), "2");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn grid_uses_first_line_as_header_and_skips_blank_lines() {
        let grid = vec![
            line(&["Symptom", "Category", "SOP"]),
            line(&["S-1", "HVAC"]),
            line(&["", " ", ""]),
            line(&["S-2", "Plumbing", "I"]),
        ];

        let rows = rows_from_grid(&grid);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("SOP"), Some(""));
        assert_eq!(rows[1].get("Category"), Some("Plumbing"));
    }

    #[test]
    fn empty_grid_has_no_rows() {
        assert!(rows_from_grid(&[]).is_empty());
    }
}
