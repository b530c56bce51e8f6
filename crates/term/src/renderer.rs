//! TerminalRenderer: flushes a canvas to a real terminal.
//!
//! Frames are encoded into a byte buffer first and written with one syscall.
//! Between frames of the same size only the changed span of each row is
//! redrawn.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::canvas::{Canvas, Glyph, Rgb, Style};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Canvas>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf().context("enter alternate screen")?;
        Ok(())
    }

    /// Undo everything `enter` did. Safe to call more than once.
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf().context("leave alternate screen")?;
        terminal::disable_raw_mode().context("disable raw mode")?;
        self.last = None;
        Ok(())
    }

    /// Force the next draw to be a full redraw, e.g. after a resize.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a canvas and keep a copy to diff the next frame against.
    pub fn draw(&mut self, canvas: &Canvas) -> Result<()> {
        self.buf.clear();
        let same_size = self
            .last
            .as_ref()
            .is_some_and(|prev| prev.width() == canvas.width() && prev.height() == canvas.height());
        match self.last.as_mut() {
            Some(prev) if same_size => {
                encode_diff_into(prev, canvas, &mut self.buf)?;
                prev.clone_from(canvas);
            }
            _ => {
                encode_full_into(canvas, &mut self.buf)?;
                self.last = Some(canvas.clone());
            }
        }
        if !self.buf.is_empty() {
            self.flush_buf()?;
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(canvas: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..canvas.height() {
        out.queue(cursor::MoveTo(0, y))?;
        print_glyphs(out, canvas.row(y), &mut style)?;
    }
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Encode only the changed span of every row into `out`.
///
/// Leaves `out` untouched when nothing changed.
pub fn encode_diff_into(prev: &Canvas, next: &Canvas, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    let mut wrote = false;
    for y in 0..next.height() {
        let Some((start, end)) = changed_span(prev.row(y), next.row(y)) else {
            continue;
        };
        out.queue(cursor::MoveTo(start as u16, y))?;
        print_glyphs(out, &next.row(y)[start..end], &mut style)?;
        wrote = true;
    }
    if wrote {
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
    }
    Ok(())
}

/// First and one-past-last differing index of two rows.
///
/// A row that only exists in `next` counts as fully changed.
fn changed_span(prev: &[Glyph], next: &[Glyph]) -> Option<(usize, usize)> {
    if prev.len() != next.len() {
        return (!next.is_empty()).then_some((0, next.len()));
    }
    let start = prev.iter().zip(next).position(|(a, b)| a != b)?;
    let end = next.len()
        - prev
            .iter()
            .rev()
            .zip(next.iter().rev())
            .position(|(a, b)| a != b)
            .unwrap_or(0);
    Some((start, end))
}

fn print_glyphs(out: &mut Vec<u8>, glyphs: &[Glyph], current: &mut Option<Style>) -> Result<()> {
    for glyph in glyphs {
        if *current != Some(glyph.style) {
            apply_style_into(out, glyph.style)?;
            *current = Some(glyph.style);
        }
        out.queue(Print(glyph.ch))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: Style) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.reverse {
        out.queue(SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(s: &str) -> Vec<Glyph> {
        s.chars().map(|ch| Glyph::new(ch, Style::default())).collect()
    }

    #[test]
    fn changed_span_covers_first_to_last_difference() {
        let a = row_of("abcdef");
        let b = row_of("aXcdYf");
        assert_eq!(changed_span(&a, &b), Some((1, 5)));
        assert_eq!(changed_span(&a, &a), None);
        assert_eq!(changed_span(&row_of("abc"), &row_of("abZ")), Some((2, 3)));
    }

    #[test]
    fn diff_of_identical_frames_is_empty() {
        let mut canvas = Canvas::new(8, 3);
        canvas.text(0, 1, "Score", Style::default());
        let mut out = Vec::new();
        encode_diff_into(&canvas, &canvas.clone(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn diff_prints_only_changed_glyphs() {
        let prev = Canvas::new(10, 2);
        let mut next = prev.clone();
        next.text(3, 1, "Q", Style::default());

        let mut out = Vec::new();
        encode_diff_into(&prev, &next, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains('Q'));

        let mut full = Vec::new();
        encode_full_into(&next, &mut full).unwrap();
        assert!(out.len() < full.len());
    }

    #[test]
    fn style_conversion_is_lossless() {
        let style = Style::default();
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: style.fg.r,
                g: style.fg.g,
                b: style.fg.b
            }
        );
    }
}
