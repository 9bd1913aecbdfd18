//! Terminal rendering of session listings

mod format;

pub use format::{accent_color, describe_shares, format_percentage, muted_color, tag_color};

use crate::config::Settings;
use crate::pipeline::{FilterConfig, SessionCatalog};
use crate::session::SessionSummary;
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};

/// Writes session listings, coloured according to the display settings
pub struct Renderer<'a> {
    settings: &'a Settings,
}

impl<'a> Renderer<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    fn put<W: Write>(&self, out: &mut W, text: &str, color: Option<Color>) -> io::Result<()> {
        match color {
            Some(color) if self.settings.colors() => {
                queue!(out, SetForegroundColor(color), Print(text), ResetColor)
            }
            _ => queue!(out, Print(text)),
        }
    }

    fn put_bold<W: Write>(&self, out: &mut W, text: &str) -> io::Result<()> {
        if self.settings.colors() {
            queue!(
                out,
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::Reset)
            )
        } else {
            queue!(out, Print(text))
        }
    }

    /// Heading line: `Uploaded Sessions (3 filtered)`
    pub fn heading<W: Write>(&self, out: &mut W, visible: usize, filters: &FilterConfig) -> io::Result<()> {
        let suffix = if filters.is_filtering() { " filtered" } else { "" };
        let text = format!("Uploaded Sessions ({}{})", visible, suffix);
        self.put(out, &text, Some(accent_color(self.settings.theme())))?;
        queue!(
            out,
            Print(format!(
                "  sorted by {} {}\n",
                filters.sort_by, filters.sort_order
            ))
        )
    }

    /// One session block: name line, then dates, stats and players
    pub fn session<W: Write>(&self, out: &mut W, session: &SessionSummary) -> io::Result<()> {
        let muted = muted_color(self.settings.theme());
        let body_color = if session.is_active { None } else { Some(muted) };

        self.put(out, &format!("[{}] ", session.id), Some(muted))?;
        if session.is_active {
            self.put_bold(out, &session.display_name)?;
        } else {
            self.put(out, &session.display_name, Some(muted))?;
            self.put(out, " (hidden)", Some(muted))?;
        }
        if let Some(file_id) = &session.file_id {
            self.put(out, &format!(" ({})", file_id), Some(muted))?;
        }
        for tag in &session.tags {
            queue!(out, Print(" "))?;
            self.put(out, &format!("#{}", tag), Some(tag_color(tag)))?;
        }
        queue!(out, Print("\n"))?;

        let upload = session.upload_date.as_deref().unwrap_or("unknown");
        self.put(out, &format!("    Uploaded: {}\n", upload), body_color)?;

        let stats = &session.game_stats;
        self.put(
            out,
            &format!("    Game Type: {}\n", describe_shares(&stats.game_types, "")),
            body_color,
        )?;
        self.put(
            out,
            &format!(
                "    Table Size: {}\n",
                describe_shares(&stats.table_sizes, "-handed")
            ),
            body_color,
        )?;

        let players = if session.players.is_empty() {
            "No players".to_string()
        } else {
            session.players.join(", ")
        };
        self.put(out, &format!("    Players: {}\n", players), body_color)
    }

    /// Full listing of the filtered view
    pub fn session_list<W: Write>(
        &self,
        out: &mut W,
        visible: &[SessionSummary],
        filters: &FilterConfig,
    ) -> io::Result<()> {
        self.heading(out, visible.len(), filters)?;
        if visible.is_empty() {
            self.put(
                out,
                "No sessions match the current filters\n",
                Some(muted_color(self.settings.theme())),
            )?;
        }
        for session in visible {
            self.session(out, session)?;
        }
        out.flush()
    }

    /// Tag list, each tag in its own colour
    pub fn tags<W: Write>(&self, out: &mut W, catalog: &SessionCatalog) -> io::Result<()> {
        if catalog.tags.is_empty() {
            return self.put(out, "No tags found\n", Some(muted_color(self.settings.theme())));
        }
        for tag in &catalog.tags {
            self.put(out, tag, Some(tag_color(tag)))?;
            queue!(out, Print("\n"))?;
        }
        out.flush()
    }

    pub fn players<W: Write>(&self, out: &mut W, catalog: &SessionCatalog) -> io::Result<()> {
        if catalog.players.is_empty() {
            return self.put(out, "No players found\n", Some(muted_color(self.settings.theme())));
        }
        for player in &catalog.players {
            queue!(out, Print(player), Print("\n"))?;
        }
        out.flush()
    }
}
