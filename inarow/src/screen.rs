use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::{BoardEngine, Clock, GameConfig, MonotonicClock, MoveResult};

/// The top-level mode of the application. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    About,
    Game,
    /// Terminal: the application should shut down.
    Exit,
}

/// The entries of the main menu, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    About,
    Exit,
}

impl MenuAction {
    pub const ALL: [MenuAction; 3] = [MenuAction::Start, MenuAction::About, MenuAction::Exit];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::Start => "Start",
            MenuAction::About => "About",
            MenuAction::Exit => "Exit",
        }
    }
}

/// The keys the game reacts to. Everything else arrives as [`Key::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
    Other,
}

/// A discrete, already decoded input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    KeyPressed(Key),
    /// A primary button press at a position in pointer coordinates (see [`Layout`](crate::Layout)).
    PointerClicked { x: i32, y: i32 },
    /// The window or terminal is going away.
    Closed,
}

/// Routes input to the menu or the board, depending on the current screen,
/// and restarts finished games after a delay.
///
/// The controller never acts on its own: screens only change in response to
/// [`Self::dispatch()`], and the automatic restart only happens when
/// [`Self::tick()`] is polled.
pub struct ScreenController<C: Clock = MonotonicClock> {
    config: GameConfig,
    screen: Screen,
    selected_index: usize,
    engine: BoardEngine,
    // When the current game was won, if it was.
    won_at: Option<Instant>,
    clock: C,
}

impl ScreenController {
    pub fn new(config: GameConfig) -> Self {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C: Clock> ScreenController<C> {
    pub fn with_clock(config: GameConfig, clock: C) -> Self {
        let engine = BoardEngine::new(&config);
        Self {
            config,
            screen: Screen::Menu,
            selected_index: 0,
            engine,
            won_at: None,
            clock,
        }
    }

    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::KeyPressed(key) => self.on_key(key),
            Event::PointerClicked { x, y } => self.on_pointer_click(x, y),
            Event::Closed => self.transition(Screen::Exit),
        }
    }

    pub fn on_key(&mut self, key: Key) {
        match (self.screen, key) {
            (Screen::Menu, Key::Up) => {
                self.selected_index =
                    (self.selected_index + MenuAction::ALL.len() - 1) % MenuAction::ALL.len();
            }
            (Screen::Menu, Key::Down) => {
                self.selected_index = (self.selected_index + 1) % MenuAction::ALL.len();
            }
            (Screen::Menu, Key::Enter) => self.activate_selection(),
            (Screen::About | Screen::Game, Key::Escape) => self.transition(Screen::Menu),
            _ => {}
        }
    }

    pub fn on_pointer_click(&mut self, x: i32, y: i32) {
        match self.screen {
            Screen::Menu => {
                if let Some(index) = self.config.layout.menu_item_at(x, y, MenuAction::ALL.len()) {
                    self.selected_index = index;
                    self.activate_selection();
                }
            }
            Screen::Game if !self.engine.is_finished() => {
                if let Some((row, col)) = self.config.layout.cell_at(x, y) {
                    if let MoveResult::Won(_) = self.engine.attempt_move(row, col) {
                        self.won_at = Some(self.clock.now());
                    }
                }
            }
            _ => {}
        }
    }

    /// Performs the menu action at the selected index.
    pub fn activate_selection(&mut self) {
        let action = self.selected_action();
        debug!(?action, "Menu item activated");
        match action {
            MenuAction::Start => {
                self.engine.reset(self.config.width, self.config.height);
                self.won_at = None;
                self.transition(Screen::Game);
            }
            MenuAction::About => self.transition(Screen::About),
            MenuAction::Exit => self.transition(Screen::Exit),
        }
    }

    /// Restarts a won game once the auto-reset delay has passed since the
    /// winning move. Meant to be called once per frame.
    pub fn tick(&mut self) {
        if self.screen != Screen::Game || !self.engine.is_finished() {
            return;
        }
        if let Some(elapsed) = self.elapsed_since_win() {
            if elapsed >= self.config.auto_reset_delay {
                debug!(?elapsed, "Restarting finished game");
                self.engine.reset(self.config.width, self.config.height);
                self.won_at = None;
            }
        }
    }

    /// Time since the winning move of the current game, if it has been won.
    pub fn elapsed_since_win(&self) -> Option<Duration> {
        self.won_at
            .map(|won_at| self.clock.now().saturating_duration_since(won_at))
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_action(&self) -> MenuAction {
        MenuAction::ALL[self.selected_index]
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn should_exit(&self) -> bool {
        self.screen == Screen::Exit
    }

    fn transition(&mut self, to: Screen) {
        if self.screen == Screen::Exit || self.screen == to {
            return;
        }
        debug!(from = ?self.screen, ?to, "Screen transition");
        if to == Screen::Exit {
            info!("Exiting");
        }
        self.screen = to;
    }
}
