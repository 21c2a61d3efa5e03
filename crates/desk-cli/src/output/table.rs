//! Aligned text tables for `--format table`.

use std::borrow::Cow;

use desk_core::responses::UNKNOWN_CATEGORY;

const GAP: &str = "  ";

/// Narrowest a column gets when the terminal is too small for the table.
const MIN_COLUMN: usize = 8;

/// Rows of ticket or category fields under named columns.
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            headers: headers.into_iter().map(str::to_string).collect(),
            rows: Vec::new(),
        }
    }

    /// Missing trailing cells render as `-`.
    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    /// Pad every column to its widest cell. With `max_width`, the widest
    /// column gives up space first and cut cells end in `…`.
    ///
    /// With `color`, the `status` column and the unknown-category label are
    /// highlighted.
    #[must_use]
    pub fn render(&self, color: bool, max_width: Option<usize>) -> String {
        if self.rows.is_empty() {
            return String::from("(no rows)");
        }

        let mut widths = self.widths();
        if let Some(max_width) = max_width {
            narrow(&mut widths, max_width);
        }
        let rule = widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1);

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(self.line(&self.headers, &widths, false));
        lines.push("-".repeat(rule));
        for row in &self.rows {
            lines.push(self.line(row, &widths, color));
        }
        lines.join("\n")
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(index))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }

    fn line(&self, cells: &[String], widths: &[usize], color: bool) -> String {
        let rendered = widths
            .iter()
            .enumerate()
            .map(|(index, &width)| {
                let text = clip(cells.get(index).map_or("-", String::as_str), width);
                let pad = " ".repeat(width.saturating_sub(text.chars().count()));
                let code = if color {
                    highlight(&self.headers[index], &text)
                } else {
                    None
                };
                match code {
                    Some(code) => format!("\u{1b}[{code}m{text}\u{1b}[0m{pad}"),
                    None => format!("{text}{pad}"),
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        rendered.trim_end().to_string()
    }
}

fn narrow(widths: &mut [usize], max_width: usize) {
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > MIN_COLUMN)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn clip(value: &str, width: usize) -> Cow<'_, str> {
    if value.chars().count() <= width {
        return Cow::Borrowed(value);
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    Cow::Owned(cut)
}

/// ANSI color code for a cell, keyed on its column.
fn highlight(column: &str, value: &str) -> Option<&'static str> {
    match (column, value) {
        ("status", "open") => Some("33"),
        ("status", "pending") => Some("36"),
        ("status", "closed") => Some("32"),
        ("category", UNKNOWN_CATEGORY) => Some("31"),
        _ => None,
    }
}
