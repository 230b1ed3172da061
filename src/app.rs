//! Front-end state around a [`Game`]: cursor, selection, hints, layout cycling
//! and the delayed jump the renderer animates.
//!
//! `App` never touches the terminal. The binary feeds it [`Command`]s and fixed
//! ticks and renders whatever [`App::view_state`] and [`App::snapshot_into`]
//! report.

use tracing::{debug, info, warn};

use crate::config::{AppConfig, ConfigError};
use crate::core::{legal_moves_from, Catalog, DestinationList, Game, GameSnapshot};
use crate::term::ViewState;
use crate::types::{Command, GameStatus, Jump, Position, BOARD_SIZE};

/// Cursor position after every deal.
const CENTER: Position = Position::new(3, 3);

/// A jump accepted by the player but not yet applied to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingJump {
    pub jump: Jump,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone)]
pub struct App {
    catalog: Catalog,
    layout_index: usize,
    game: Game,
    cursor: Position,
    selected: Option<Position>,
    hints: bool,
    jump_delay_ms: u32,
    pending: Option<PendingJump>,
    elapsed_ms: u64,
}

impl App {
    /// Create an app and deal the layout at `layout_index` (clamped to the
    /// catalog).
    pub fn new(catalog: Catalog, layout_index: usize, hints: bool, jump_delay_ms: u32) -> Self {
        let layout_index = layout_index.min(catalog.len().saturating_sub(1));
        let mut app = Self {
            catalog,
            layout_index,
            game: Game::new(),
            cursor: CENTER,
            selected: None,
            hints,
            jump_delay_ms,
            pending: None,
            elapsed_ms: 0,
        };
        app.start_current();
        app
    }

    /// Build the catalog and starting layout from `config`.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let catalog = config.catalog()?;
        let index = config.layout_index(&catalog)?;
        Ok(Self::new(catalog, index, config.hints, config.jump_delay_ms))
    }

    fn start_current(&mut self) {
        if let Some(layout) = self.catalog.at(self.layout_index) {
            self.game.start(layout);
        }
        self.cursor = CENTER;
        self.selected = None;
        self.pending = None;
        self.elapsed_ms = 0;
    }

    fn switch_layout(&mut self, index: usize) {
        self.layout_index = index;
        self.start_current();
        info!(layout = self.layout_name(), "switched layout");
    }

    /// Apply a single player command.
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::CursorUp => self.move_cursor(-1, 0),
            Command::CursorDown => self.move_cursor(1, 0),
            Command::CursorLeft => self.move_cursor(0, -1),
            Command::CursorRight => self.move_cursor(0, 1),
            Command::Select => self.select(),
            Command::Cancel => {
                if self.pending.is_none() {
                    self.selected = None;
                }
            }
            Command::Restart => self.start_current(),
            Command::NextLayout => self.switch_layout(self.catalog.next_index(self.layout_index)),
            Command::PrevLayout => self.switch_layout(self.catalog.prev_index(self.layout_index)),
            Command::ToggleHints => self.hints = !self.hints,
        }
    }

    fn move_cursor(&mut self, dr: i8, dc: i8) {
        let max = BOARD_SIZE as i8 - 1;
        self.cursor = Position::new(
            (self.cursor.row + dr).clamp(0, max),
            (self.cursor.col + dc).clamp(0, max),
        );
    }

    fn select(&mut self) {
        if self.pending.is_some() || self.game.status() != GameStatus::Playing {
            return;
        }
        let Some(board) = self.game.board() else {
            return;
        };
        let pos = self.cursor;

        match self.selected {
            Some(from) if from == pos => self.selected = None,
            _ if board.is_occupied(pos) => self.selected = Some(pos),
            Some(from) if legal_moves_from(board, from).contains(&pos) => {
                self.begin_jump(Jump::new(from, pos));
            }
            Some(from) => debug!(%from, to = %pos, "ignored selection: not a legal destination"),
            None => {}
        }
    }

    fn begin_jump(&mut self, jump: Jump) {
        if self.jump_delay_ms == 0 {
            self.commit(jump);
        } else {
            self.pending = Some(PendingJump {
                jump,
                remaining_ms: self.jump_delay_ms,
            });
        }
    }

    fn commit(&mut self, jump: Jump) {
        self.pending = None;
        self.selected = None;
        match self.game.apply_jump(jump.from, jump.to) {
            Ok(()) => {
                self.game.settle();
            }
            Err(err) => warn!(%jump, %err, "pending jump rejected"),
        }
    }

    /// Advance front-end time by `dt_ms`.
    ///
    /// The clock only runs while `Playing`. A pending jump whose delay has run
    /// out is applied and the board reclassified.
    pub fn tick(&mut self, dt_ms: u32) {
        if self.game.status() == GameStatus::Playing {
            self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms as u64);
        }

        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.remaining_ms = pending.remaining_ms.saturating_sub(dt_ms);
        if pending.remaining_ms == 0 {
            let jump = pending.jump;
            self.commit(jump);
        }
    }

    /// Legal destinations of the selected peg; empty with no selection.
    pub fn targets(&self) -> DestinationList {
        match (self.selected, self.game.board()) {
            (Some(from), Some(board)) if self.game.status() == GameStatus::Playing => {
                legal_moves_from(board, from)
            }
            _ => DestinationList::new(),
        }
    }

    /// Everything the view draws besides the board itself.
    pub fn view_state(&self) -> ViewState<'_> {
        ViewState {
            layout_name: self.layout_name(),
            layout_index: self.layout_index,
            layout_count: self.catalog.len(),
            cursor: self.cursor,
            selected: self.selected,
            targets: self.targets(),
            pending: self.pending.map(|p| p.jump),
            hints: self.hints,
            elapsed_secs: self.elapsed_ms / 1000,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.game.snapshot_into(out);
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn layout_name(&self) -> &str {
        self.catalog.at(self.layout_index).map_or("", |l| l.name())
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn hints(&self) -> bool {
        self.hints
    }

    pub fn pending(&self) -> Option<PendingJump> {
        self.pending
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    fn app(delay: u32) -> App {
        App::new(Catalog::builtin().unwrap(), 0, true, delay)
    }

    fn go_to(app: &mut App, target: Position) {
        while app.cursor().row > target.row {
            app.handle(Command::CursorUp);
        }
        while app.cursor().row < target.row {
            app.handle(Command::CursorDown);
        }
        while app.cursor().col > target.col {
            app.handle(Command::CursorLeft);
        }
        while app.cursor().col < target.col {
            app.handle(Command::CursorRight);
        }
    }

    fn click(app: &mut App, pos: Position) {
        go_to(app, pos);
        app.handle(Command::Select);
    }

    #[test]
    fn test_new_app_deals_first_layout() {
        let app = app(0);
        assert_eq!(app.layout_name(), "Classic Cross");
        assert_eq!(app.game().status(), GameStatus::Playing);
        assert_eq!(app.cursor(), CENTER);
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut app = app(0);
        for _ in 0..10 {
            app.handle(Command::CursorUp);
            app.handle(Command::CursorLeft);
        }
        assert_eq!(app.cursor(), p(0, 0));
        for _ in 0..10 {
            app.handle(Command::CursorDown);
            app.handle(Command::CursorRight);
        }
        assert_eq!(app.cursor(), p(6, 6));
    }

    #[test]
    fn test_select_peg_shows_targets() {
        let mut app = app(0);
        click(&mut app, p(3, 1));
        assert_eq!(app.selected(), Some(p(3, 1)));
        assert_eq!(app.targets().as_slice(), &[p(3, 3)]);

        // same peg again deselects
        app.handle(Command::Select);
        assert_eq!(app.selected(), None);
        assert!(app.targets().is_empty());
    }

    #[test]
    fn test_selecting_another_peg_moves_selection() {
        let mut app = app(0);
        click(&mut app, p(3, 1));
        click(&mut app, p(1, 3));
        assert_eq!(app.selected(), Some(p(1, 3)));
    }

    #[test]
    fn test_immediate_jump_without_delay() {
        let mut app = app(0);
        click(&mut app, p(3, 1));
        click(&mut app, p(3, 3));
        assert_eq!(app.game().pegs_left(), 31);
        assert_eq!(app.game().last_jump(), Some(Jump::new(p(3, 1), p(3, 3))));
        assert_eq!(app.selected(), None);
        assert!(app.pending().is_none());
    }

    #[test]
    fn test_delayed_jump_applies_on_tick() {
        let mut app = app(120);
        click(&mut app, p(3, 1));
        click(&mut app, p(3, 3));
        assert_eq!(app.game().pegs_left(), 32);
        assert_eq!(
            app.view_state().pending,
            Some(Jump::new(p(3, 1), p(3, 3)))
        );

        // selection is frozen while the jump is in flight
        app.handle(Command::Cancel);
        assert_eq!(app.selected(), Some(p(3, 1)));

        app.tick(100);
        assert_eq!(app.game().pegs_left(), 32);
        app.tick(20);
        assert_eq!(app.game().pegs_left(), 31);
        assert!(app.pending().is_none());
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_non_destination_empty_hole_is_ignored() {
        let mut app = app(0);
        // (0,3) cannot reach the centre: (2,3) is not empty
        click(&mut app, p(0, 3));
        click(&mut app, p(3, 3));
        assert_eq!(app.game().pegs_left(), 32);
        assert_eq!(app.selected(), Some(p(0, 3)));
    }

    #[test]
    fn test_cancel_clears_selection() {
        let mut app = app(0);
        click(&mut app, p(3, 1));
        app.handle(Command::Cancel);
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_restart_resets_clock() {
        let mut app = app(0);
        app.tick(1500);
        assert_eq!(app.view_state().elapsed_secs, 1);
        app.handle(Command::Restart);
        assert_eq!(app.elapsed_ms(), 0);
        assert_eq!(app.game().deal_id(), 2);
    }

    #[test]
    fn test_clock_freezes_when_game_ends() {
        let mut app = app(0);
        while app.game().status() == GameStatus::Playing {
            let first = app.game().legal_moves()[0];
            click(&mut app, first.from);
            click(&mut app, first.to);
            app.tick(10);
        }
        assert!(app.game().status().is_terminal());
        let frozen = app.elapsed_ms();
        app.tick(5000);
        assert_eq!(app.elapsed_ms(), frozen);

        // no selection on a finished board
        let here = app.cursor();
        click(&mut app, here);
        assert_eq!(app.selected(), None);
    }

    #[test]
    fn test_layout_cycling_wraps() {
        let mut app = app(0);
        app.handle(Command::PrevLayout);
        assert_eq!(app.layout_index(), app.catalog().len() - 1);
        app.handle(Command::NextLayout);
        assert_eq!(app.layout_index(), 0);
        app.handle(Command::NextLayout);
        assert_eq!(app.layout_name(), "European");
        assert_eq!(app.game().pegs_left(), 36);
    }

    #[test]
    fn test_toggle_hints() {
        let mut app = app(0);
        app.handle(Command::ToggleHints);
        assert!(!app.hints());
        assert!(!app.view_state().hints);
    }

    #[test]
    fn test_from_config_unknown_layout() {
        let config = AppConfig {
            layout: "Nowhere".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            App::from_config(&config),
            Err(ConfigError::UnknownLayout(_))
        ));
    }
}
