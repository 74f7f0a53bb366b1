//! Markdown output for the terminal.
//!
//! Rich mode styles inline markdown with termimad and colors headers and
//! status lines; plain mode writes the markdown untouched, which is what the
//! integration tests read.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

const HEADER: &str = "\x1b[34m";
const SUCCESS: &str = "\x1b[32m";
const FAILURE: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match line_color(line) {
                // Headers keep their hashes so section depth stays visible.
                Some(color) => println!("{color}{line}{RESET}"),
                None => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

fn line_color(line: &str) -> Option<&'static str> {
    if line.starts_with('#') {
        Some(HEADER)
    } else if line.starts_with("Success:") {
        Some(SUCCESS)
    } else if line.starts_with("Error:") {
        Some(FAILURE)
    } else {
        None
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
