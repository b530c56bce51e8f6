//! Views: pure functions from snapshots and screen state to a canvas.
//!
//! Nothing here performs I/O, so every view is unit-testable against a
//! `Canvas`.

use crate::canvas::{Canvas, Glyph, Rgb, Style};
use crate::core::{get_shape, GameSnapshot};
use crate::types::{Cell, ColorId, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BACKGROUND: Rgb = Rgb::new(0, 0, 0);
const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const DIM: Rgb = Rgb::new(90, 90, 100);
const WARN: Rgb = Rgb::new(240, 120, 80);

/// Side panel width in columns, including the gap to the field.
const PANEL_W: u16 = 18;

/// Display color of a piece color id.
pub fn piece_rgb(color: ColorId) -> Rgb {
    match color.index() {
        0 => Rgb::new(80, 220, 220),
        1 => Rgb::new(80, 120, 220),
        2 => Rgb::new(255, 165, 0),
        3 => Rgb::new(240, 220, 80),
        4 => Rgb::new(100, 220, 120),
        5 => Rgb::new(200, 120, 220),
        _ => Rgb::new(220, 80, 80),
    }
}

fn draw_box(canvas: &mut Canvas, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    canvas.put(x, y, '┌', style);
    canvas.put(x + w - 1, y, '┐', style);
    canvas.put(x, y + h - 1, '└', style);
    canvas.put(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        canvas.put(x + dx, y, '─', style);
        canvas.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        canvas.put(x, y + dy, '│', style);
        canvas.put(x + w - 1, y + dy, '│', style);
    }
}

fn centered(outer: u16, inner: u16) -> u16 {
    outer.saturating_sub(inner) / 2
}

fn text_width(s: &str) -> u16 {
    s.chars().count() as u16
}

fn clear(canvas: &mut Canvas, viewport: Viewport) {
    canvas.resize(viewport.width, viewport.height);
    canvas.fill(Glyph::new(' ', Style::fg(TEXT).on(BACKGROUND)));
}

/// The playing screen: bordered field plus the side panel.
#[derive(Debug, Clone, Copy)]
pub struct PlayView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for PlayView {
    fn default() -> Self {
        // 2 columns per cell keeps cells roughly square.
        Self { cell_w: 2 }
    }
}

impl PlayView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Field frame size in terminal cells, border included.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            BOARD_WIDTH as u16 * self.cell_w + 2,
            BOARD_HEIGHT as u16 + 2,
        )
    }

    /// Top-left corner of the field frame for a viewport.
    pub fn frame_origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            centered(viewport.width, frame_w + PANEL_W),
            centered(viewport.height, frame_h),
        )
    }

    /// Render a snapshot into a reusable canvas.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, canvas: &mut Canvas) {
        clear(canvas, viewport);

        let (frame_w, frame_h) = self.frame_size();
        let (x0, y0) = self.frame_origin(viewport);
        draw_box(canvas, x0, y0, frame_w, frame_h, Style::fg(BORDER));

        let empty = Style::fg(DIM).on(FIELD_BG);
        for row in 0..BOARD_HEIGHT as usize {
            for col in 0..BOARD_WIDTH as usize {
                let px = x0 + 1 + col as u16 * self.cell_w;
                let py = y0 + 1 + row as u16;
                match snap.cell_at(row, col) {
                    Cell::Locked(color) => {
                        let style = Style::fg(piece_rgb(color)).on(FIELD_BG).bold();
                        canvas.fill_rect(px, py, self.cell_w, 1, '█', style);
                    }
                    _ => {
                        canvas.fill_rect(px, py, self.cell_w, 1, ' ', empty);
                        canvas.put(px, py, '·', empty);
                    }
                }
            }
        }

        self.draw_panel(canvas, snap, x0 + frame_w + 2, y0);
    }

    /// Convenience helper that allocates a new canvas.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> Canvas {
        let mut canvas = Canvas::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut canvas);
        canvas
    }

    fn draw_panel(&self, canvas: &mut Canvas, snap: &GameSnapshot, x: u16, y: u16) {
        let label = Style::fg(TEXT).bold();
        let value = Style::fg(TEXT);

        canvas.text_fmt(x, y + 1, format_args!("Time: {}s", snap.elapsed_secs()), value);
        canvas.text_fmt(x, y + 3, format_args!("Score: {}", snap.score), value);
        canvas.text_fmt(x, y + 5, format_args!("Speed: {} BPM", snap.bpm), value);

        canvas.text(x, y + 7, "Next:", label);
        let color = snap.next.color();
        let matrix = get_shape(snap.next, Rotation::North).matrix();
        for (r, line) in matrix.iter().enumerate() {
            for (c, &filled) in line.iter().enumerate() {
                let px = x + c as u16 * self.cell_w;
                let py = y + 8 + r as u16;
                if filled {
                    let style = Style::fg(piece_rgb(color)).bold();
                    canvas.fill_rect(px, py, self.cell_w, 1, '█', style);
                }
            }
        }

        if !snap.can_swap {
            canvas.text(x, y + 13, "Cannot swap!", Style::fg(WARN).bold());
        }
    }
}

/// Main menu entries, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    StartGame,
    Controls,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 3] = [MenuItem::StartGame, MenuItem::Controls, MenuItem::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::StartGame => "Start Game",
            MenuItem::Controls => "Controls",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Options offered once the game is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Restart,
    MainMenu,
    Quit,
}

impl DialogChoice {
    pub const ALL: [DialogChoice; 3] = [
        DialogChoice::Restart,
        DialogChoice::MainMenu,
        DialogChoice::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DialogChoice::Restart => "Restart",
            DialogChoice::MainMenu => "Main Menu",
            DialogChoice::Quit => "Quit",
        }
    }
}

/// Step a selection index through `len` entries, wrapping at both ends.
fn step(index: usize, len: usize, down: bool) -> usize {
    if down {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}

fn draw_options(canvas: &mut Canvas, viewport: Viewport, y: u16, labels: &[&str], selected: usize) {
    for (i, label) in labels.iter().enumerate() {
        let row = y + i as u16 * 2;
        let x = centered(viewport.width, text_width(label) + 2);
        if i == selected {
            canvas.put(x, row, '>', Style::fg(TEXT).bold());
            canvas.text(x + 2, row, label, Style::fg(TEXT).bold().reversed());
        } else {
            canvas.text(x + 2, row, label, Style::fg(TEXT));
        }
    }
}

/// Main menu screen with a selection cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuView {
    selected: usize,
}

impl MenuView {
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }

    pub fn up(&mut self) {
        self.selected = step(self.selected, MenuItem::ALL.len(), false);
    }

    pub fn down(&mut self) {
        self.selected = step(self.selected, MenuItem::ALL.len(), true);
    }

    pub fn render_into(&self, viewport: Viewport, canvas: &mut Canvas) {
        clear(canvas, viewport);
        let top = centered(viewport.height, 9);
        let title = "Tetris";
        canvas.text(
            centered(viewport.width, text_width(title)),
            top,
            title,
            Style::fg(TEXT).bold(),
        );
        let labels = MenuItem::ALL.map(MenuItem::label);
        draw_options(canvas, viewport, top + 3, &labels, self.selected);
    }
}

/// Key help screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControlsView;

impl ControlsView {
    pub const LINES: [(&'static str, &'static str); 7] = [
        ("Left / A / H", "Move left"),
        ("Right / D / L", "Move right"),
        ("Down / S / J", "Soft drop"),
        ("Up / W / K", "Rotate"),
        ("Space", "Swap with next"),
        ("R", "Restart"),
        ("Q / Ctrl-C", "Quit"),
    ];

    pub fn render_into(&self, viewport: Viewport, canvas: &mut Canvas) {
        clear(canvas, viewport);
        let block_w = 32;
        let block_h = Self::LINES.len() as u16 + 4;
        let x = centered(viewport.width, block_w);
        let y = centered(viewport.height, block_h);

        canvas.text(x, y, "Controls", Style::fg(TEXT).bold());
        for (i, (keys, action)) in Self::LINES.iter().enumerate() {
            let row = y + 2 + i as u16;
            canvas.text(x, row, keys, Style::fg(TEXT).bold());
            canvas.text(x + 16, row, action, Style::fg(TEXT));
        }
        canvas.text(x, y + block_h, "Esc: back", Style::fg(DIM));
    }
}

/// Modal drawn over the final playfield.
#[derive(Debug, Clone, Copy)]
pub struct GameOverDialog {
    score: u32,
    selected: usize,
}

impl GameOverDialog {
    const W: u16 = 24;
    const H: u16 = 11;

    pub fn new(score: u32) -> Self {
        Self { score, selected: 0 }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected(&self) -> DialogChoice {
        DialogChoice::ALL[self.selected]
    }

    pub fn up(&mut self) {
        self.selected = step(self.selected, DialogChoice::ALL.len(), false);
    }

    pub fn down(&mut self) {
        self.selected = step(self.selected, DialogChoice::ALL.len(), true);
    }

    /// Draw on top of whatever the canvas already shows.
    pub fn render_into(&self, viewport: Viewport, canvas: &mut Canvas) {
        canvas.resize(viewport.width, viewport.height);
        let x = centered(viewport.width, Self::W);
        let y = centered(viewport.height, Self::H);
        let panel = Style::fg(TEXT).on(BACKGROUND);

        canvas.fill_rect(x, y, Self::W, Self::H, ' ', panel);
        draw_box(canvas, x, y, Self::W, Self::H, Style::fg(BORDER));

        let title = "GAME OVER";
        canvas.text(x + centered(Self::W, text_width(title)), y + 1, title, panel.bold());
        let score_x = x + centered(Self::W, 7 + digits(self.score));
        canvas.text_fmt(score_x, y + 3, format_args!("Score: {}", self.score), panel);

        let labels = DialogChoice::ALL.map(DialogChoice::label);
        draw_options(canvas, viewport, y + 5, &labels, self.selected);
    }
}

fn digits(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ActiveSnapshot;
    use crate::types::PieceKind;

    fn view() -> Viewport {
        Viewport::new(80, 24)
    }

    #[test]
    fn test_play_view_draws_border_and_panel() {
        let snap = GameSnapshot::default();
        let canvas = PlayView::default().render(&snap, view());
        let (x0, y0) = PlayView::default().frame_origin(view());

        assert_eq!(canvas.get(x0, y0).unwrap().ch, '┌');
        assert_eq!(canvas.get(x0 + 21, y0 + 21).unwrap().ch, '┘');
        assert!(canvas.contains_text("Time: 0s"));
        assert!(canvas.contains_text("Score: 0"));
        assert!(canvas.contains_text("Speed: 120 BPM"));
        assert!(canvas.contains_text("Next:"));
        assert!(!canvas.contains_text("Cannot swap!"));
    }

    #[test]
    fn test_active_piece_uses_two_columns_per_cell() {
        let mut snap = GameSnapshot::default();
        snap.active = Some(ActiveSnapshot {
            kind: PieceKind::O,
            rotation: Rotation::North,
            row: 0,
            col: 0,
        });
        let canvas = PlayView::default().render(&snap, view());
        let (x0, y0) = PlayView::default().frame_origin(view());

        for dx in 1..=4 {
            let glyph = canvas.get(x0 + dx, y0 + 1).unwrap();
            assert_eq!(glyph.ch, '█');
            assert_eq!(glyph.style.fg, piece_rgb(PieceKind::O.color()));
        }
        assert_ne!(canvas.get(x0 + 5, y0 + 1).unwrap().ch, '█');
    }

    #[test]
    fn test_cannot_swap_notice() {
        let snap = GameSnapshot {
            can_swap: false,
            ..GameSnapshot::default()
        };
        let canvas = PlayView::default().render(&snap, view());
        assert!(canvas.contains_text("Cannot swap!"));
    }

    #[test]
    fn test_menu_selection_wraps() {
        let mut menu = MenuView::default();
        assert_eq!(menu.selected(), MenuItem::StartGame);
        menu.up();
        assert_eq!(menu.selected(), MenuItem::Quit);
        menu.down();
        menu.down();
        assert_eq!(menu.selected(), MenuItem::Controls);

        let mut canvas = Canvas::new(1, 1);
        menu.render_into(view(), &mut canvas);
        assert!(canvas.contains_text("Tetris"));
        assert!(canvas.contains_text("Start Game"));
        assert!(canvas.contains_text("> Controls"));
    }

    #[test]
    fn test_game_over_dialog() {
        let mut dialog = GameOverDialog::new(1200);
        dialog.down();
        assert_eq!(dialog.selected(), DialogChoice::MainMenu);

        let mut canvas = Canvas::new(80, 24);
        dialog.render_into(view(), &mut canvas);
        assert!(canvas.contains_text("GAME OVER"));
        assert!(canvas.contains_text("Score: 1200"));
        assert!(canvas.contains_text("Restart"));
        assert!(canvas.contains_text("> Main Menu"));
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(100), 3);
    }
}
