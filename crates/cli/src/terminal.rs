use anyhow::Result;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{self, Write};

use crate::report::render_table;

/// Color scheme for terminal output.
struct Colors;

impl Colors {
    const HEADER: Color = Color::Magenta;
    const YES: Color = Color::Green;
    const NO: Color = Color::Yellow;
    const ERROR: Color = Color::Red;
    const DIM: Color = Color::DarkGrey;
}

/// Writes tables and messages to stdout.
pub struct Terminal {
    color: bool,
}

impl Terminal {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn write_colored(&self, color: Color, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        if self.color {
            execute!(stdout, SetForegroundColor(color), Print(text), ResetColor)?;
        } else {
            execute!(stdout, Print(text))?;
        }
        stdout.flush()?;
        Ok(())
    }

    /// Print a table, highlighting rows whose `highlight_col` is Yes/No.
    pub fn print_table<S: AsRef<str>>(
        &self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<S>],
        highlight_col: Option<usize>,
    ) -> Result<()> {
        self.write_colored(Colors::HEADER, &format!("{title}\n"))?;

        let lines = render_table(headers, rows);
        let mut lines = lines.iter();
        for header in lines.by_ref().take(2) {
            self.write_colored(Colors::DIM, &format!("{header}\n"))?;
        }

        for (line, row) in lines.zip(rows) {
            let color = highlight_col
                .and_then(|col| row.get(col))
                .and_then(|cell| match cell.as_ref() {
                    "Yes" => Some(Colors::YES),
                    "No" => Some(Colors::NO),
                    _ => None,
                });
            match color {
                Some(color) => self.write_colored(color, &format!("{line}\n"))?,
                None => {
                    let mut stdout = io::stdout();
                    execute!(stdout, Print(format!("{line}\n")))?;
                }
            }
        }

        io::stdout().flush()?;
        Ok(())
    }

    /// Print an error message.
    pub fn print_error(&self, msg: &str) -> Result<()> {
        self.write_colored(Colors::ERROR, &format!("Error: {msg}\n"))
    }

    /// Print an info message.
    pub fn print_info(&self, msg: &str) -> Result<()> {
        self.write_colored(Colors::DIM, &format!("{msg}\n"))
    }

    /// Print a plain line.
    pub fn print_line(&self, msg: &str) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Print(format!("{msg}\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
