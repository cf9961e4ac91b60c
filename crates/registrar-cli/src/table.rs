//! Plain-text table rendering for report rows.

use colored::Colorize;
use registrar::TableRow;

/// A grid of string cells under a header line.
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from report rows.
    pub fn from_rows<T: TableRow>(rows: &[T]) -> Self {
        let mut table = Self::new(T::columns());
        for row in rows {
            table.add_row(row.cells());
        }
        table
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }
        widths
    }

    fn separator(widths: &[usize]) -> String {
        let mut line = String::from("+");
        for w in widths {
            line.push_str(&"-".repeat(w + 2));
            line.push('+');
        }
        line
    }

    fn line(cells: &[String], widths: &[usize], paint: &impl Fn(&str) -> String) -> String {
        let mut line = String::from("|");
        for (i, w) in widths.iter().enumerate() {
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let pad = w.saturating_sub(cell.chars().count());
            line.push_str(&format!(" {}{} |", paint(cell), " ".repeat(pad)));
        }
        line
    }

    /// Render without color codes.
    pub fn render(&self) -> String {
        self.render_with(|s| s.to_string())
    }

    /// Render with bold header cells.
    pub fn render_colored(&self) -> String {
        self.render_with(|s| s.bold().to_string())
    }

    fn render_with(&self, header: impl Fn(&str) -> String) -> String {
        let widths = self.widths();
        let sep = Self::separator(&widths);
        let plain = |s: &str| s.to_string();

        let mut out = Vec::with_capacity(self.rows.len() + 4);
        out.push(sep.clone());
        out.push(Self::line(&self.headers, &widths, &header));
        out.push(sep.clone());
        for row in &self.rows {
            out.push(Self::line(row, &widths, &plain));
        }
        out.push(sep);
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar::InstructorRow;

    #[test]
    fn test_render_aligns_columns() {
        let mut table = Table::new(&["CWID", "Name"]);
        table.add_row(vec!["98765".to_string(), "Einstein, A".to_string()]);
        table.add_row(vec!["1".to_string(), "B".to_string()]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "+-------+-------------+");
        assert_eq!(lines[1], "| CWID  | Name        |");
        assert_eq!(lines[3], "| 98765 | Einstein, A |");
        assert_eq!(lines[4], "| 1     | B           |");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_short_row_is_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["x".to_string()]);

        assert!(table.render().contains("| x |   |"));
    }

    #[test]
    fn test_from_rows_uses_row_columns() {
        let rows = vec![InstructorRow {
            cwid: "98764".to_string(),
            name: "Feynman, R".to_string(),
            dept: "SFEN".to_string(),
            course: "CS 501".to_string(),
            students: 1,
        }];

        let rendered = Table::from_rows(&rows).render();
        assert!(rendered.contains("| CWID  | Name       | Dept | Course | Students |"));
        assert!(rendered.contains("| 98764 | Feynman, R | SFEN | CS 501 | 1        |"));
    }
}
