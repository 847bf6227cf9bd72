//! Pipe tables that should render as two side-by-side columns.

use super::COLUMN_MARKERS;

/// A pipe table followed by a column marker.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct ColumnTable<'a> {
    header: &'a str,
    rows: Vec<&'a str>,
    /// Index of the first line after the table and its marker.
    pub(super) end: usize,
}

impl ColumnTable<'_> {
    /// Render the table as a columns container.
    ///
    /// A header with fewer than two non-empty cells is dropped. Fails when any
    /// data row has fewer than two.
    pub(super) fn to_columns(&self) -> Result<String, String> {
        let mut left = Vec::with_capacity(self.rows.len() + 1);
        let mut right = Vec::with_capacity(self.rows.len() + 1);

        if let [first, second, ..] = split_cells(self.header)[..] {
            left.push(first);
            right.push(second);
        }

        for (n, row) in self.rows.iter().enumerate() {
            let cells = split_cells(row);
            if cells.len() < 2 {
                return Err(format!("row {} has {} non-empty cell(s)", n + 1, cells.len()));
            }
            left.push(cells[0]);
            right.push(cells[1]);
        }

        Ok(format!(
            "<div class=\"columns\">\n\n{}\n\n{}\n\n</div>",
            column(&left),
            column(&right)
        ))
    }
}

fn column(cells: &[&str]) -> String {
    format!("<div class=\"column\">\n\n{}\n\n</div>", cells.join("\n\n"))
}

/// Match a marked table starting at `start`.
pub(super) fn find_table<'a>(lines: &[&'a str], start: usize) -> Option<ColumnTable<'a>> {
    let header = *lines.get(start)?;
    if !is_row(header) || !lines.get(start + 1).is_some_and(|l| is_separator(l)) {
        return None;
    }

    let mut rows = Vec::new();
    let mut idx = start + 2;
    while let Some(line) = lines.get(idx) {
        if is_row(line) {
            rows.push(*line);
            idx += 1;
        } else if let Some(row) = strip_trailing_marker(line).filter(|r| is_row(r)) {
            rows.push(row);
            return Some(ColumnTable {
                header,
                rows,
                end: idx + 1,
            });
        } else {
            break;
        }
    }

    if rows.is_empty() {
        return None;
    }

    while lines.get(idx).is_some_and(|l| l.trim().is_empty()) {
        idx += 1;
    }
    let marker = lines.get(idx)?;
    COLUMN_MARKERS.contains(&marker.trim()).then_some(ColumnTable {
        header,
        rows,
        end: idx + 1,
    })
}

fn is_row(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() > 2
        && trimmed.starts_with('|')
        && trimmed.ends_with('|')
        && trimmed.matches('|').count() >= 3
}

fn is_separator(line: &str) -> bool {
    is_row(line)
        && line.contains('-')
        && line.trim().chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'))
}

/// `| a | b | {columns}` → `| a | b |`
fn strip_trailing_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    COLUMN_MARKERS
        .iter()
        .find_map(|marker| trimmed.strip_suffix(marker))
        .map(str::trim_end)
}

/// Split a pipe row into trimmed, non-empty cells.
///
/// Escaped pipes (`\|`) stay inside the cell.
fn split_cells(row: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in row.char_indices() {
        match c {
            '\\' if !escaped => escaped = true,
            '|' if !escaped => {
                cells.push(&row[start..i]);
                start = i + 1;
            }
            _ => escaped = false,
        }
    }
    cells.push(&row[start..]);

    cells
        .into_iter()
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}
