//! Game controller - the top-level state machine
//!
//! Owns the grid, the active piece, the score board and the pause flag. Two
//! independent clocks drive it:
//!
//! - the **drop step** ([`GameController::drop_step`]), on a fixed interval,
//!   which the pause flag gates;
//! - the **resolution tick** ([`GameController::resolve_tick`]), once per
//!   rendered frame, which runs regardless of pause.
//!
//! Player commands arrive through [`GameController::apply_action`] or the
//! individual command methods. Blocked moves return `false`; nothing here fails.

use tracing::{debug, info};

use crate::grid::Grid;
use crate::piece::Piece;
use crate::resolver::{resolve_step, Resolution};
use crate::rng::SimpleRng;
use crate::scoring::ScoreBoard;
use crate::snapshot::GameSnapshot;
use crate::types::{GameAction, ViewAngle, GAME_OVER_ROW, GRID_ROWS};

/// Rule switches that change observable game behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rules {
    /// Also zero the running score/lines totals on game over.
    ///
    /// Off by default: game over clears the board and zeroes the displayed
    /// values only, and the totals keep counting into the next game.
    pub reset_counters_on_game_over: bool,
}

/// What one drop step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Timer step skipped while paused.
    Paused,
    /// The piece advanced one row.
    Moved,
    /// The piece locked and a fresh piece was released.
    Locked,
    /// The piece locked too high: board cleared, no active piece.
    GameOver,
    /// There was no active piece; a fresh one was released.
    Released,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameController {
    grid: Grid,
    active: Option<Piece>,
    rng: SimpleRng,
    scores: ScoreBoard,
    rules: Rules,
    view: ViewAngle,
    paused: bool,
    game_over: bool,
    started: bool,
    /// Monotonic id for released pieces.
    piece_id: u32,
    /// Increments on restart.
    episode_id: u32,
    /// Resolution ticks run so far.
    tick: u64,
}

impl GameController {
    /// Create a new game with the given RNG seed and default rules
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, Rules::default())
    }

    pub fn with_rules(seed: u32, rules: Rules) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            rng: SimpleRng::new(seed),
            scores: ScoreBoard::new(),
            rules,
            view: ViewAngle::default(),
            paused: false,
            game_over: false,
            started: false,
            piece_id: 0,
            episode_id: 0,
            tick: 0,
        }
    }

    /// Start the game and release the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.release_piece();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.scores.score()
    }

    pub fn lines(&self) -> u32 {
        self.scores.lines()
    }

    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn view_angle(&self) -> ViewAngle {
        self.view
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scenario setup in tests and tools.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.grid);
        out.active = self.active.map(|p| p.cells());
        out.score = self.scores.score();
        out.lines = self.scores.lines();
        out.display_score = self.scores.display_score();
        out.display_lines = self.scores.display_lines();
        out.speed = self.scores.speed();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.view = self.view;
        out.piece_id = self.piece_id;
        out.episode_id = self.episode_id;
        out.tick = self.tick;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Release a fresh piece at the spawn position
    fn release_piece(&mut self) {
        let piece = Piece::spawn(&mut self.rng);
        self.piece_id = self.piece_id.wrapping_add(1);
        self.active = Some(piece);
        self.game_over = false;
        debug!(piece_id = self.piece_id, colors = ?piece.colors(), "released piece");
    }

    /// Check if the active piece could shift by the given delta
    ///
    /// Every destination cell must be on the grid and empty.
    pub fn can_move(&self, d_col: i8, d_row: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        active.cells().iter().all(|cell| {
            self.grid
                .is_empty(cell.row + d_row, cell.col + d_col)
                .unwrap_or(false)
        })
    }

    /// Try to move the active piece; no-op when blocked
    pub(crate) fn try_move(&mut self, d_col: i8, d_row: i8) -> bool {
        if !self.can_move(d_col, d_row) {
            return false;
        }
        if let Some(active) = self.active.as_mut() {
            active.translate(d_col, d_row);
            return true;
        }
        false
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    pub fn rotate_colors(&mut self) -> bool {
        match self.active.as_mut() {
            Some(piece) => {
                piece.rotate_colors_forward();
                true
            }
            None => false,
        }
    }

    /// Backward color cycle. No key is bound to it.
    pub fn rotate_colors_backward(&mut self) -> bool {
        match self.active.as_mut() {
            Some(piece) => {
                piece.rotate_colors_backward();
                true
            }
            None => false,
        }
    }

    /// Flip the pause flag; returns the new value.
    ///
    /// Only the drop timer is affected. Resolution ticks keep running.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        self.paused
    }

    pub fn set_view_angle(&mut self, view: ViewAngle) {
        self.view = view;
    }

    /// Timer-driven drop step; skipped while paused.
    pub fn drop_step(&mut self) -> DropOutcome {
        if self.paused {
            return DropOutcome::Paused;
        }
        self.step_down()
    }

    /// Player-forced drop step.
    ///
    /// Like the other movement commands it is not gated by pause; only the
    /// timer is.
    pub fn soft_drop(&mut self) -> DropOutcome {
        self.step_down()
    }

    fn step_down(&mut self) -> DropOutcome {
        if self.active.is_none() {
            self.started = true;
            self.release_piece();
            return DropOutcome::Released;
        }

        if self.try_move(0, 1) {
            return DropOutcome::Moved;
        }

        self.lock_piece()
    }

    /// Copy the active piece into the grid, then either end the game or release the next piece
    fn lock_piece(&mut self) -> DropOutcome {
        let Some(piece) = self.active.take() else {
            return DropOutcome::Released;
        };

        for cell in piece.cells() {
            let placed = self.grid.set(cell.row, cell.col, cell.color);
            debug_assert!(placed.is_ok(), "locked cell off the grid: {:?}", cell);
        }
        debug!(
            piece_id = self.piece_id,
            col = piece.col(),
            bottom_row = piece.bottom_row(),
            "locked piece"
        );

        if piece.bottom_row() < GAME_OVER_ROW {
            self.end_game();
            return DropOutcome::GameOver;
        }

        self.release_piece();
        DropOutcome::Locked
    }

    fn end_game(&mut self) {
        info!(
            score = self.scores.score(),
            lines = self.scores.lines(),
            "game over"
        );
        self.grid.reset();
        if self.rules.reset_counters_on_game_over {
            self.scores = ScoreBoard::new();
        } else {
            self.scores.reset_display();
        }
        self.active = None;
        self.game_over = true;
    }

    /// One resolution tick: at most one clear or one gravity step.
    ///
    /// Runs whether or not the game is paused, started or over.
    pub fn resolve_tick(&mut self) -> Resolution {
        self.tick = self.tick.wrapping_add(1);
        let resolution = resolve_step(&mut self.grid);
        if let Some(line_type) = resolution.line_type() {
            let result = self.scores.record_clear(line_type);
            debug!(
                points = result.points,
                score = self.scores.score(),
                lines = result.lines,
                "scored clear"
            );
        }
        resolution
    }

    /// Throw away the current game and start a fresh one.
    pub fn restart(&mut self) {
        let seed = self.rng.next_u32();
        let next_episode = self.episode_id.wrapping_add(1);
        let view = self.view;
        *self = Self::with_rules(seed, self.rules);
        self.episode_id = next_episode;
        self.view = view;
        info!(episode_id = next_episode, "restarted");
        self.start();
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop() == DropOutcome::Moved,
            GameAction::RotateColors => self.rotate_colors(),
            GameAction::RotateColorsBack => self.rotate_colors_backward(),
            GameAction::Pause => {
                self.toggle_pause();
                true
            }
            GameAction::View(view) => {
                self.set_view_angle(view);
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Resolution ticks needed, at most, for floating tiles to land.
    pub fn max_fall_ticks() -> u32 {
        GRID_ROWS as u32
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, LineType};

    fn started(seed: u32) -> GameController {
        let mut game = GameController::new(seed);
        game.start();
        game
    }

    #[test]
    fn test_new_game_state() {
        let game = GameController::new(12345);

        assert!(!game.started);
        assert!(!game.game_over);
        assert!(!game.paused);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
        assert!(game.active.is_none());
        assert_eq!(game.view, ViewAngle::Tilted);
    }

    #[test]
    fn test_start_releases_piece() {
        let game = started(12345);
        let piece = game.active.unwrap();

        assert_eq!(game.piece_id, 1);
        assert_eq!(piece.col(), 3);
        assert_eq!(piece.cells().map(|c| c.row), [0, 1, 2]);
    }

    #[test]
    fn test_drop_step_moves_down() {
        let mut game = started(1);
        assert_eq!(game.drop_step(), DropOutcome::Moved);
        assert_eq!(game.active.unwrap().cells().map(|c| c.row), [1, 2, 3]);
    }

    #[test]
    fn test_pause_gates_timer_but_not_soft_drop() {
        let mut game = started(1);
        game.toggle_pause();

        assert_eq!(game.drop_step(), DropOutcome::Paused);
        assert_eq!(game.active.unwrap().bottom_row(), 2);

        assert_eq!(game.soft_drop(), DropOutcome::Moved);
        assert_eq!(game.active.unwrap().bottom_row(), 3);
    }

    #[test]
    fn test_move_blocked_by_tile() {
        let mut game = started(1);
        game.grid.set(1, 2, Color::Red).unwrap();
        let before = game.active;

        assert!(!game.move_left());
        assert_eq!(game.active, before);
        assert!(game.move_right());
        assert_eq!(game.active.unwrap().col(), 4);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut game = started(1);
        for _ in 0..3 {
            assert!(game.move_left());
        }
        assert_eq!(game.active.unwrap().col(), 0);
        assert!(!game.move_left());
    }

    #[test]
    fn test_lock_and_release() {
        let mut game = started(1);
        for _ in 0..14 {
            assert_eq!(game.drop_step(), DropOutcome::Moved);
        }
        let colors = game.active.unwrap().colors();

        assert_eq!(game.drop_step(), DropOutcome::Locked);
        assert_eq!(game.grid.get(14, 3), Ok(colors[0]));
        assert_eq!(game.grid.get(15, 3), Ok(colors[1]));
        assert_eq!(game.grid.get(16, 3), Ok(colors[2]));
        assert_eq!(game.piece_id, 2);
    }

    #[test]
    fn test_game_over_keeps_totals_by_default() {
        let mut game = started(1);
        game.grid.set(16, 0, Color::Red).unwrap();
        game.grid.set(16, 1, Color::Red).unwrap();
        game.grid.set(16, 2, Color::Red).unwrap();
        game.resolve_tick();
        assert_eq!(game.score(), 5);

        game.grid.set(3, 3, Color::Gray).unwrap();
        assert_eq!(game.drop_step(), DropOutcome::GameOver);

        assert!(game.game_over);
        assert!(game.active.is_none());
        assert_eq!(game.grid.occupied_count(), 0);
        assert_eq!(game.score(), 5);
        assert_eq!(game.scores.display_score(), 0);
        assert_eq!(game.scores.display_lines(), 0);
    }

    #[test]
    fn test_game_over_can_reset_totals() {
        let rules = Rules {
            reset_counters_on_game_over: true,
        };
        let mut game = GameController::with_rules(1, rules);
        game.start();
        game.scores.record_clear(LineType::Diagonal);
        game.grid.set(3, 3, Color::Gray).unwrap();

        assert_eq!(game.drop_step(), DropOutcome::GameOver);
        assert_eq!(game.score(), 0);
        assert_eq!(game.lines(), 0);
    }

    #[test]
    fn test_drop_after_game_over_releases_new_piece() {
        let mut game = started(1);
        game.grid.set(3, 3, Color::Gray).unwrap();
        game.drop_step();

        assert_eq!(game.drop_step(), DropOutcome::Released);
        assert!(!game.game_over);
        assert_eq!(game.active.unwrap().bottom_row(), 2);
    }

    #[test]
    fn test_resolve_tick_runs_while_paused() {
        let mut game = started(1);
        game.toggle_pause();
        game.grid.set(10, 0, Color::Blue).unwrap();

        assert_eq!(game.resolve_tick(), Resolution::Fell { moved: 1 });
        assert_eq!(game.grid.get(11, 0), Ok(Color::Blue));
    }

    #[test]
    fn test_apply_action_pause_and_view() {
        let mut game = started(1);
        assert!(game.apply_action(GameAction::Pause));
        assert!(game.paused);
        assert!(game.apply_action(GameAction::View(ViewAngle::Side)));
        assert_eq!(game.snapshot().view, ViewAngle::Side);
    }

    #[test]
    fn test_restart_increments_episode_and_clears() {
        let mut game = started(1);
        game.grid.set(16, 0, Color::Red).unwrap();
        game.scores.record_clear(LineType::Basic);

        assert!(game.apply_action(GameAction::Restart));
        assert_eq!(game.episode_id, 1);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid.occupied_count(), 0);
        assert!(game.active.is_some());
    }

    #[test]
    fn test_snapshot_reflects_active_piece() {
        let game = started(5);
        let snap = game.snapshot();
        let active = snap.active.unwrap();

        assert_eq!(active.map(|c| (c.row, c.col)), [(0, 3), (1, 3), (2, 3)]);
        assert_eq!(active.map(|c| c.color), game.active.unwrap().colors());
        assert_eq!(snap.piece_id, 1);
    }
}
