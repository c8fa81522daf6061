//! Terminal rendering module for rich markdown output
//!
//! This module provides terminal rendering capabilities using termimad
//! for rich markdown display with optional fallback to plain text. It also
//! hosts the terminal side of the calendar widget.

use std::fmt::Write;

use anyhow::Result;
use plann_core::{models::MarkKind, CalendarView, CalendarWidget};
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[34m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Calendar widget drawing through this renderer.
    pub fn calendar(&self) -> TerminalCalendar<'_> {
        TerminalCalendar { renderer: self }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Lists the marked days of a calendar view, one per line.
pub struct TerminalCalendar<'a> {
    renderer: &'a TerminalRenderer,
}

impl CalendarWidget for TerminalCalendar<'_> {
    fn show(&mut self, view: &CalendarView) {
        if let Err(e) = self.renderer.render(&calendar_markdown(view)) {
            log::warn!("Calendar could not be rendered: {e}");
        }
    }
}

fn mark_label(kind: MarkKind) -> &'static str {
    match kind {
        MarkKind::Single => "single day",
        MarkKind::Start => "start",
        MarkKind::InRange => "in range",
        MarkKind::End => "end",
    }
}

/// Markdown listing of a calendar view.
pub fn calendar_markdown(view: &CalendarView) -> String {
    let mut out = format!("## Calendar (from {})\n\n", view.min_date);
    if view.marked_dates.is_empty() {
        out.push_str("No days selected.\n");
        return out;
    }
    for (date, mark) in &view.marked_dates {
        let _ = writeln!(out, "- `{date}` {}", mark_label(mark.kind()));
    }
    out
}

#[cfg(test)]
mod tests {
    use plann_core::{CalendarDay, DateRange};

    use super::*;

    fn day(s: &str) -> CalendarDay {
        s.parse().unwrap()
    }

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_calendar_markdown_lists_marks_in_order() {
        let range = DateRange::between(day("2026-11-29"), day("2026-12-01"));
        let view = CalendarView::new(&range, day("2026-10-19"));

        assert_eq!(
            calendar_markdown(&view),
            "## Calendar (from 2026-10-19)\n\n\
             - `2026-11-29` start\n\
             - `2026-11-30` in range\n\
             - `2026-12-01` end\n"
        );
    }

    #[test]
    fn test_calendar_markdown_single_day() {
        let range = DateRange::empty().select(day("2026-11-05"));
        let view = CalendarView::new(&range, day("2026-11-01"));
        assert!(calendar_markdown(&view).contains("- `2026-11-05` single day"));
    }

    #[test]
    fn test_calendar_markdown_empty() {
        let view = CalendarView::new(&DateRange::empty(), day("2026-11-01"));
        assert!(calendar_markdown(&view).ends_with("No days selected.\n"));
    }
}
