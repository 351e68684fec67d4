// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Left-aligned text tables with multi-line cells.

use crate::color;

pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self { headers: headers.iter().map(|h| h.to_string()).collect(), rows: Vec::new() }
    }

    /// Add a row; missing trailing cells render empty.
    pub fn row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().take(columns).enumerate() {
                let widest = cell.lines().map(color::visible_width).max().unwrap_or(0);
                widths[i] = widths[i].max(widest);
            }
        }

        let mut out = String::new();
        let header: Vec<String> = self.headers.iter().map(|h| color::header(h)).collect();
        push_line(&mut out, &header, &self.headers, &widths);
        for row in &self.rows {
            let cells: Vec<Vec<&str>> = (0..columns)
                .map(|i| row.get(i).map(|c| c.lines().collect()).unwrap_or_default())
                .collect();
            let height = cells.iter().map(Vec::len).max().unwrap_or(0).max(1);
            for line in 0..height {
                let texts: Vec<&str> =
                    cells.iter().map(|c| c.get(line).copied().unwrap_or("")).collect();
                push_line(&mut out, &texts, &texts, &widths);
            }
        }
        out
    }
}

/// Append one padded line. `plain` gives the width of each `shown` cell.
fn push_line<S: AsRef<str>, P: AsRef<str>>(out: &mut String, shown: &[S], plain: &[P], widths: &[usize]) {
    let mut line = String::new();
    for (i, (cell, raw)) in shown.iter().zip(plain).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell.as_ref());
        if i + 1 < widths.len() {
            let pad = widths[i].saturating_sub(color::visible_width(raw.as_ref()));
            line.extend(std::iter::repeat(' ').take(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
#[path = "table_tests.rs"]
mod tests;
