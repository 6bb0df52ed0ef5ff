use colored::Colorize;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// A borderless text table with rounded unicode dividers.
///
/// ```text
///  PR  │ Stars │ Title
/// ─────┼───────┼───────
///  ... │ 10    │ ...
/// ```
#[derive(Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    color: bool,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Bold headers and blue dividers.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell.width());
                }
            }
        }
        widths
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let widths = self.column_widths();

        self.write_line(out, &self.headers, &widths, true)?;

        let rule = widths
            .iter()
            .map(|w| "─".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("┼");
        writeln!(out, "{}", self.paint_line(&rule))?;

        for row in &self.rows {
            self.write_line(out, row, &widths, false)?;
        }
        Ok(())
    }

    fn write_line<W: Write>(
        &self,
        out: &mut W,
        cells: &[String],
        widths: &[usize],
        header: bool,
    ) -> io::Result<()> {
        let divider = self.paint_line("│");
        let mut line = String::new();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                line.push_str(&divider);
            }
            let cell = cells.get(i).map(String::as_str).unwrap_or("");
            let padding = " ".repeat(width - cell.width());
            let cell = if header && self.color {
                cell.bold().to_string()
            } else {
                cell.to_string()
            };
            line.push(' ');
            line.push_str(&cell);
            line.push_str(&padding);
            line.push(' ');
        }
        writeln!(out, "{}", line.trim_end())
    }

    fn paint_line(&self, text: &str) -> String {
        if self.color {
            text.blue().to_string()
        } else {
            text.to_string()
        }
    }
}
