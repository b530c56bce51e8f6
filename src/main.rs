//! Terminal runner (default binary).
//!
//! Owns the screen flow (menu, controls, play, game-over dialog), feeds real
//! elapsed time into the engine and fires descent ticks at the engine's
//! current speed. Input comes from crossterm, output goes through the canvas
//! renderer.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};

use tui_mino::core::{GameConfig, GameState, PieceSource, UniformSource};
use tui_mino::input::{handle_key_event, menu_key, should_quit, MenuKey};
use tui_mino::term::{
    Canvas, ControlsView, DialogChoice, GameOverDialog, MenuItem, MenuView, PlayView,
    TerminalRenderer, Viewport,
};
use tui_mino::types::{
    GameAction, CLOCK_TICK_MS, INITIAL_SPEED_MS, MIN_SPEED_MS, POINTS_PER_LINE, SPEED_STEP_MS,
    SPEED_UP_EVERY_MS,
};

#[derive(Debug, Parser)]
#[command(name = "tui-mino", version, about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Seed for the piece generator; random when omitted
    #[arg(long, env = "MINO_SEED")]
    seed: Option<u64>,

    /// Descent interval of a fresh game, in milliseconds
    #[arg(long, env = "MINO_INITIAL_SPEED_MS", default_value_t = INITIAL_SPEED_MS)]
    initial_speed: u32,

    /// Fastest descent interval, in milliseconds
    #[arg(long, env = "MINO_MIN_SPEED_MS", default_value_t = MIN_SPEED_MS)]
    min_speed: u32,

    /// Interval decrease applied every ten seconds of play, in milliseconds
    #[arg(long, env = "MINO_SPEED_STEP_MS", default_value_t = SPEED_STEP_MS)]
    speed_step: u32,
}

impl Args {
    fn config(&self) -> GameConfig {
        GameConfig {
            initial_speed_ms: self.initial_speed,
            min_speed_ms: self.min_speed,
            speed_step_ms: self.speed_step,
            speed_up_every_ms: SPEED_UP_EVERY_MS,
            points_per_line: POINTS_PER_LINE,
        }
    }

    fn source(&self) -> Box<dyn PieceSource> {
        match self.seed {
            Some(seed) => Box::new(UniformSource::seeded(seed)),
            None => Box::new(UniformSource::from_entropy()),
        }
    }
}

#[derive(Debug)]
enum Screen {
    Menu(MenuView),
    Controls,
    Playing,
    GameOver(GameOverDialog),
}

/// What the loop should do after handling an event.
enum Flow {
    Continue,
    Quit,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = args.config();
    let game = GameState::new(config, args.source()).context("invalid game configuration")?;
    info!("config: {:?}, seed: {:?}", config, args.seed);

    let mut term = TerminalRenderer::new();
    term.enter().context("terminal setup failed")?;

    let result = run(&mut term, game);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct App {
    game: GameState,
    screen: Screen,
    /// Wall-clock instant of the last descent tick.
    last_drop: Instant,
    /// Wall-clock instant time was last fed to the engine.
    last_clock: Instant,
}

impl App {
    fn new(game: GameState) -> Self {
        let now = Instant::now();
        Self {
            game,
            screen: Screen::Menu(MenuView::default()),
            last_drop: now,
            last_clock: now,
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        debug!("screen {:?} -> {:?}", self.screen, screen);
        self.screen = screen;
    }

    fn new_game(&mut self) {
        self.game.reset();
        let now = Instant::now();
        self.last_drop = now;
        self.last_clock = now;
        self.set_screen(Screen::Playing);
    }

    fn drop_interval(&self) -> Duration {
        Duration::from_millis(self.game.speed_ms() as u64)
    }

    /// Poll timeout: the next descent tick while playing, otherwise idle.
    fn timeout(&self) -> Duration {
        let idle = Duration::from_millis(CLOCK_TICK_MS as u64 / 4);
        match self.screen {
            Screen::Playing => self
                .drop_interval()
                .saturating_sub(self.last_drop.elapsed())
                .min(idle),
            _ => idle,
        }
    }

    /// Feed elapsed time and fire a descent tick when it is due.
    fn update(&mut self) {
        if !matches!(self.screen, Screen::Playing) {
            return;
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_clock);
        let whole_ms = elapsed.as_millis() as u64;
        if whole_ms > 0 {
            self.game.advance_time(whole_ms);
            self.last_clock += Duration::from_millis(whole_ms);
        }

        if now.duration_since(self.last_drop) >= self.drop_interval() {
            self.last_drop = now;
            self.game.tick();
            self.check_game_over();
        }
    }

    fn check_game_over(&mut self) {
        if let Some(event) = self.game.take_last_event() {
            debug!("lock event: {:?}", event);
        }
        if let Some(score) = self.game.final_score() {
            info!("final score {}", score);
            self.set_screen(Screen::GameOver(GameOverDialog::new(score)));
        }
    }

    fn on_key(&mut self, key: event::KeyEvent) -> Flow {
        if should_quit(key) {
            return Flow::Quit;
        }

        match &mut self.screen {
            Screen::Menu(menu) => match menu_key(key) {
                Some(MenuKey::Up) => menu.up(),
                Some(MenuKey::Down) => menu.down(),
                Some(MenuKey::Select) => match menu.selected() {
                    MenuItem::StartGame => self.new_game(),
                    MenuItem::Controls => self.set_screen(Screen::Controls),
                    MenuItem::Quit => return Flow::Quit,
                },
                Some(MenuKey::Back) | None => {}
            },
            Screen::Controls => {
                if matches!(menu_key(key), Some(MenuKey::Back | MenuKey::Select)) {
                    self.set_screen(Screen::Menu(MenuView::default()));
                }
            }
            Screen::Playing => {
                if let Some(action) = handle_key_event(key) {
                    match action {
                        GameAction::Restart => self.new_game(),
                        _ => {
                            self.game.apply_action(action);
                            self.check_game_over();
                        }
                    }
                }
            }
            Screen::GameOver(dialog) => {
                if handle_key_event(key) == Some(GameAction::Restart) {
                    self.new_game();
                    return Flow::Continue;
                }
                match menu_key(key) {
                    Some(MenuKey::Up) => dialog.up(),
                    Some(MenuKey::Down) => dialog.down(),
                    Some(MenuKey::Select) => match dialog.selected() {
                        DialogChoice::Restart => self.new_game(),
                        DialogChoice::MainMenu => {
                            self.set_screen(Screen::Menu(MenuView::default()))
                        }
                        DialogChoice::Quit => return Flow::Quit,
                    },
                    Some(MenuKey::Back) | None => {}
                }
            }
        }
        Flow::Continue
    }

    fn render(&self, play: &PlayView, viewport: Viewport, canvas: &mut Canvas) {
        match &self.screen {
            Screen::Menu(menu) => menu.render_into(viewport, canvas),
            Screen::Controls => ControlsView.render_into(viewport, canvas),
            Screen::Playing => play.render_into(&self.game.snapshot(), viewport, canvas),
            Screen::GameOver(dialog) => {
                play.render_into(&self.game.snapshot(), viewport, canvas);
                dialog.render_into(viewport, canvas);
            }
        }
    }
}

fn run(term: &mut TerminalRenderer, game: GameState) -> Result<()> {
    let mut app = App::new(game);
    let play = PlayView::default();
    let mut canvas = Canvas::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.render(&play, Viewport::new(w, h), &mut canvas);
        term.draw(&canvas)?;

        if event::poll(app.timeout())? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Flow::Quit = app.on_key(key) {
                        return Ok(());
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        app.update();
    }
}
