use std::{iter, time::Duration};

use rand::Rng as _;
use tracing::{debug, info};

use crate::{
    InvalidTransition,
    core::{Cell, Grid, Position, Shape},
};

use super::{
    config::{ConfigError, EngineConfig},
    phase::{DropOutcome, GamePhase, Placement},
    piece_source::PieceSource,
    scoring::{GameSummary, INITIAL_FALL_INTERVAL, ScoreState, speed_for},
};

/// The piece currently falling, with its cells resolved against the grid.
///
/// The reference point is signed because shapes whose leftmost cell sits at
/// a non-zero offset may hang their reference point past the left wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallingPiece {
    row: isize,
    col: isize,
    shape: Shape,
    cells: [Position; 4],
}

impl FallingPiece {
    /// Returns the `(row, col)` reference point.
    #[must_use]
    pub const fn origin(&self) -> (isize, isize) {
        (self.row, self.col)
    }

    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns the absolute cells covered by the piece.
    #[must_use]
    pub const fn cells(&self) -> [Position; 4] {
        self.cells
    }
}

/// Tetris board engine.
///
/// Owns the grid, the falling piece, the next-piece preview, the score and
/// the game phase. Every change goes through the operations below; callers
/// such as a timer or a key handler keep no game state of their own and only
/// react to the returned values.
///
/// Moves and rotations are all-or-nothing: a rejected request leaves the
/// engine untouched. Outside [`GamePhase::Running`] every move, rotation and
/// drop is rejected.
///
/// # Example
///
/// ```
/// use stackfall_engine::{BoardEngine, DropOutcome, EngineConfig, GamePhase};
///
/// let mut engine = BoardEngine::new(&EngineConfig::default()).unwrap();
/// engine.start().unwrap();
/// assert_eq!(engine.phase(), GamePhase::Running);
///
/// _ = engine.move_left();
/// _ = engine.try_rotate();
/// let outcome = engine.hard_drop();
/// assert!(matches!(outcome, DropOutcome::Locked { .. }));
/// assert_eq!(engine.stats().locked_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BoardEngine {
    grid: Grid,
    falling: Option<FallingPiece>,
    next: Option<Shape>,
    stats: ScoreState,
    phase: GamePhase,
    fall_interval: Duration,
    source: PieceSource,
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default()).expect("default config is valid")
    }
}

impl BoardEngine {
    /// Creates an engine in [`GamePhase::NotStarted`] with an empty grid.
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        debug!(width = config.width, height = config.height, %seed, "creating board engine");
        Ok(Self {
            grid: Grid::new(config.width, config.height),
            falling: None,
            next: None,
            stats: ScoreState::new(),
            phase: GamePhase::NotStarted,
            fall_interval: INITIAL_FALL_INTERVAL,
            source: PieceSource::with_seed(seed),
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn falling_piece(&self) -> Option<&FallingPiece> {
        self.falling.as_ref()
    }

    /// Returns the absolute cells of the falling piece, if any.
    pub fn falling_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.falling.iter().flat_map(|piece| piece.cells)
    }

    /// Returns the shape shown in the next-piece preview.
    #[must_use]
    pub fn next_shape(&self) -> Option<Shape> {
        self.next
    }

    #[must_use]
    pub fn stats(&self) -> &ScoreState {
        &self.stats
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the interval at which the host should call [`Self::tick`].
    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    /// Starts a game: spawns the first piece and draws the next one.
    ///
    /// Only valid from [`GamePhase::NotStarted`].
    pub fn start(&mut self) -> Result<Placement, InvalidTransition> {
        if !self.phase.is_not_started() {
            return Err(InvalidTransition::AlreadyStarted);
        }
        self.phase = GamePhase::Running;
        info!("game started");
        let first = self.source.draw_shape();
        Ok(self.spawn_and_draw_next(first))
    }

    /// Switches between running and paused. Other phases are unaffected.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            phase @ (GamePhase::NotStarted | GamePhase::GameOver) => phase,
        };
        debug!(phase = ?self.phase, "pause toggled");
    }

    /// Discards the current game and returns to [`GamePhase::NotStarted`].
    ///
    /// Returns the summary of the discarded game, or `None` if no game had
    /// been started.
    pub fn reset(&mut self) -> Option<GameSummary> {
        if self.phase.is_not_started() {
            return None;
        }
        let summary = self.stats.summary();
        info!(
            score = summary.score(),
            lines = summary.cleared_lines(),
            "game reset"
        );
        self.grid.clear();
        self.falling = None;
        self.next = None;
        self.stats = ScoreState::new();
        self.phase = GamePhase::NotStarted;
        self.fall_interval = INITIAL_FALL_INTERVAL;
        Some(summary)
    }

    /// Resets and immediately starts a new game.
    pub fn restart(&mut self) -> Option<GameSummary> {
        let summary = self.reset();
        _ = self.start();
        summary
    }

    /// Timer entry point: accounts one fall interval of play time and drops
    /// the piece by one row.
    ///
    /// Does nothing unless a game is running, so a paused game keeps its
    /// elapsed time.
    pub fn tick(&mut self) -> DropOutcome {
        if !self.phase.is_running() {
            return DropOutcome::Ignored;
        }
        self.stats.add_elapsed(self.fall_interval);
        self.soft_drop()
    }

    /// Moves the falling piece by `d_row` rows and `d_col` columns.
    ///
    /// Fails without changing anything if a target cell lies outside the
    /// grid or on a settled cell.
    pub fn try_move(&mut self, d_row: isize, d_col: isize) -> Result<(), InvalidTransition> {
        let current = self.running_piece()?;
        let piece = self.resolve(current.row + d_row, current.col + d_col, current.shape)?;
        self.commit(piece);
        Ok(())
    }

    pub fn move_left(&mut self) -> Result<(), InvalidTransition> {
        self.try_move(0, -1)
    }

    pub fn move_right(&mut self) -> Result<(), InvalidTransition> {
        self.try_move(0, 1)
    }

    /// Rotates the falling piece to its next rotation state in place.
    ///
    /// The rotated cells are checked before anything changes; a blocked
    /// rotation keeps both the cells and the rotation state.
    pub fn try_rotate(&mut self) -> Result<(), InvalidTransition> {
        let current = self.running_piece()?;
        let piece = self.resolve(current.row, current.col, current.shape.rotated())?;
        self.commit(piece);
        Ok(())
    }

    /// Moves the falling piece down one row, locking it if it cannot move.
    ///
    /// Locking settles the piece, clears full rows, updates the score and
    /// spawns the previewed piece.
    pub fn soft_drop(&mut self) -> DropOutcome {
        match self.try_move(1, 0) {
            Ok(()) => DropOutcome::Moved,
            Err(InvalidTransition::NotRunning | InvalidTransition::AlreadyStarted) => {
                DropOutcome::Ignored
            }
            Err(InvalidTransition::OutOfBounds | InvalidTransition::Collision) => self.lock(),
        }
    }

    /// Drops the falling piece until it locks.
    pub fn hard_drop(&mut self) -> DropOutcome {
        loop {
            match self.soft_drop() {
                DropOutcome::Moved => {}
                outcome => return outcome,
            }
        }
    }

    /// Removes rows made entirely of settled cells and returns how many were
    /// removed.
    ///
    /// Cells of the falling piece never count, so the piece and the settled
    /// stack stay consistent. Every lock runs this, which leaves no full row
    /// behind during play.
    pub fn clear_lines(&mut self) -> usize {
        self.grid.clear_lines()
    }

    fn running_piece(&self) -> Result<FallingPiece, InvalidTransition> {
        match (self.phase, self.falling) {
            (GamePhase::Running, Some(piece)) => Ok(piece),
            _ => Err(InvalidTransition::NotRunning),
        }
    }

    /// Resolves `shape` at reference point `(row, col)` into grid cells.
    fn resolve(&self, row: isize, col: isize, shape: Shape) -> Result<FallingPiece, InvalidTransition> {
        let mut cells = [Position::new(0, 0); 4];
        for (slot, (d_row, d_col)) in iter::zip(&mut cells, shape.offsets()) {
            let pos = self
                .grid
                .checked_position(row + signed(d_row), col + signed(d_col))
                .ok_or(InvalidTransition::OutOfBounds)?;
            if self.grid.get(pos).is_some_and(|cell| cell.is_settled()) {
                return Err(InvalidTransition::Collision);
            }
            *slot = pos;
        }
        Ok(FallingPiece {
            row,
            col,
            shape,
            cells,
        })
    }

    fn commit(&mut self, piece: FallingPiece) {
        if let Some(old) = self.falling.take() {
            for pos in old.cells {
                self.grid.set(pos, Cell::Empty);
            }
        }
        for pos in piece.cells {
            self.grid.set(pos, Cell::Falling);
        }
        self.falling = Some(piece);
    }

    fn lock(&mut self) -> DropOutcome {
        let Some(piece) = self.falling.take() else {
            return DropOutcome::Ignored;
        };
        for pos in piece.cells {
            self.grid.set(pos, Cell::Settled);
        }
        let cleared_lines = self.grid.clear_lines();
        self.stats.record_lock(cleared_lines, self.grid.width());
        self.fall_interval = speed_for(self.stats.score());
        debug!(
            kind = %piece.shape.kind().as_char(),
            rotation = piece.shape.rotation().index(),
            cleared_lines,
            score = self.stats.score(),
            "piece locked"
        );

        let shape = self
            .next
            .take()
            .unwrap_or_else(|| self.source.draw_shape());
        match self.spawn_and_draw_next(shape) {
            Placement::Spawned => DropOutcome::Locked { cleared_lines },
            Placement::ToppedOut => DropOutcome::GameOver,
        }
    }

    fn spawn_and_draw_next(&mut self, shape: Shape) -> Placement {
        let placement = self.spawn(shape);
        if placement.is_spawned() {
            self.next = Some(self.source.draw_shape());
        }
        placement
    }

    /// Places `shape` on the top row at a random column that keeps it inside
    /// the grid. Overlapping settled cells ends the game.
    fn spawn(&mut self, shape: Shape) -> Placement {
        let max_col = self.grid.width() - shape.col_extent();
        let col = self.source.draw_column(max_col);
        match self.resolve(0, signed(col), shape) {
            Ok(piece) => {
                self.commit(piece);
                Placement::Spawned
            }
            Err(_) => {
                self.phase = GamePhase::GameOver;
                info!(score = self.stats.score(), "game over");
                Placement::ToppedOut
            }
        }
    }
}

#[expect(clippy::cast_possible_wrap)]
const fn signed(n: usize) -> isize {
    n as isize
}

#[cfg(test)]
mod tests {
    use crate::{PieceSeed, Rotation, ShapeKind, core::grid::grid_from_ascii};

    use super::*;

    fn seeded(width: usize, height: usize) -> BoardEngine {
        let config = EngineConfig {
            width,
            height,
            seed: Some("00000000000000000000000000c0ffee".parse::<PieceSeed>().unwrap()),
        };
        BoardEngine::new(&config).unwrap()
    }

    /// Running engine with a chosen shape at a chosen reference point.
    fn with_piece(grid: Grid, shape: Shape, row: isize, col: isize) -> BoardEngine {
        let mut engine = seeded(grid.width(), grid.height());
        engine.grid = grid;
        engine.phase = GamePhase::Running;
        engine.next = Some(Shape::new(ShapeKind::O, Rotation::default()));
        let piece = engine.resolve(row, col, shape).unwrap();
        engine.commit(piece);
        engine
    }

    fn shape(kind: ShapeKind, rotation: u8) -> Shape {
        Shape::new(kind, Rotation::new(rotation))
    }

    fn sorted_cells(engine: &BoardEngine) -> Vec<Position> {
        let mut cells: Vec<_> = engine.falling_cells().collect();
        cells.sort();
        cells
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = seeded(10, 20);
        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert!(engine.grid().is_empty());
        assert!(engine.falling_piece().is_none());
        assert!(engine.next_shape().is_none());
        assert_eq!(engine.fall_interval(), INITIAL_FALL_INTERVAL);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EngineConfig {
            width: 2,
            ..EngineConfig::default()
        };
        assert!(BoardEngine::new(&config).is_err());
    }

    #[test]
    fn test_start_spawns_piece_on_top_row() {
        let mut engine = seeded(20, 34);
        assert_eq!(engine.start(), Ok(Placement::Spawned));
        assert_eq!(engine.phase(), GamePhase::Running);
        assert!(engine.next_shape().is_some());

        let piece = *engine.falling_piece().unwrap();
        assert_eq!(piece.origin().0, 0);
        assert_eq!(engine.grid().count(Cell::Falling), 4);
        for pos in piece.cells() {
            assert_eq!(engine.grid().get(pos), Some(Cell::Falling));
        }

        assert_eq!(engine.start(), Err(InvalidTransition::AlreadyStarted));
    }

    #[test]
    fn test_spawn_column_keeps_piece_inside_grid() {
        let mut engine = seeded(4, 40);
        engine.phase = GamePhase::Running;
        for _ in 0..100 {
            let i_flat = shape(ShapeKind::I, 0);
            assert_eq!(engine.spawn(i_flat), Placement::Spawned);
            assert_eq!(engine.falling_piece().unwrap().origin(), (0, 0));
            engine.falling = None;
            engine.grid.clear();
        }
    }

    #[test]
    fn test_operations_rejected_before_start() {
        let mut engine = seeded(10, 20);
        assert_eq!(engine.move_left(), Err(InvalidTransition::NotRunning));
        assert_eq!(engine.try_rotate(), Err(InvalidTransition::NotRunning));
        assert_eq!(engine.soft_drop(), DropOutcome::Ignored);
        assert_eq!(engine.hard_drop(), DropOutcome::Ignored);
        assert_eq!(engine.tick(), DropOutcome::Ignored);
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn test_move_updates_cells_and_origin() {
        let mut engine = with_piece(Grid::new(10, 20), shape(ShapeKind::O, 0), 5, 4);
        engine.move_right().unwrap();
        engine.try_move(1, 0).unwrap();

        assert_eq!(engine.falling_piece().unwrap().origin(), (6, 5));
        assert_eq!(
            sorted_cells(&engine),
            [
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(7, 5),
                Position::new(7, 6)
            ]
        );
        assert_eq!(engine.grid().count(Cell::Falling), 4);
    }

    #[test]
    fn test_failed_move_does_not_mutate() {
        let grid = grid_from_ascii(&[
            "......", //
            "......",
            "......",
            "...#..",
        ]);
        let mut engine = with_piece(grid, shape(ShapeKind::O, 0), 1, 2);
        let grid_before = engine.grid().clone();
        let piece_before = *engine.falling_piece().unwrap();

        assert_eq!(engine.try_move(1, 0), Err(InvalidTransition::Collision));
        assert_eq!(engine.try_move(-2, 0), Err(InvalidTransition::OutOfBounds));
        assert_eq!(engine.grid(), &grid_before);
        assert_eq!(engine.falling_piece(), Some(&piece_before));
    }

    #[test]
    fn test_move_left_until_blocked() {
        let mut engine = with_piece(Grid::new(10, 20), shape(ShapeKind::T, 0), 3, 6);
        let mut moves = 0;
        while engine.move_left().is_ok() {
            moves += 1;
        }
        assert_eq!(moves, 6);
        let blocked = *engine.falling_piece().unwrap();
        assert_eq!(blocked.origin(), (3, 0));

        assert_eq!(engine.move_left(), Err(InvalidTransition::OutOfBounds));
        assert_eq!(engine.falling_piece(), Some(&blocked));
    }

    #[test]
    fn test_move_left_stops_at_settled_cells() {
        let grid = grid_from_ascii(&[
            "........", //
            "#.......",
            "#.......",
            "........",
        ]);
        let mut engine = with_piece(grid, shape(ShapeKind::O, 0), 1, 4);
        while engine.move_left().is_ok() {}
        assert_eq!(engine.falling_piece().unwrap().origin(), (1, 1));
        assert_eq!(engine.move_left(), Err(InvalidTransition::Collision));
    }

    #[test]
    fn test_reference_point_may_pass_left_wall() {
        // Rotation 1 of the S-piece has no cell in its first column.
        let mut engine = with_piece(Grid::new(8, 10), shape(ShapeKind::S, 1), 2, 2);
        while engine.move_left().is_ok() {}
        assert_eq!(engine.falling_piece().unwrap().origin(), (2, -1));
        assert!(engine.falling_cells().any(|pos| pos.col == 0));
    }

    #[test]
    fn test_four_rotations_restore_cells() {
        for kind in ShapeKind::ALL {
            let mut engine = with_piece(Grid::new(10, 20), shape(kind, 0), 5, 3);
            let original = sorted_cells(&engine);
            for _ in 0..4 {
                engine.try_rotate().unwrap();
                assert_eq!(engine.grid().count(Cell::Falling), 4);
            }
            assert_eq!(sorted_cells(&engine), original, "{kind:?}");
            assert_eq!(
                engine.falling_piece().unwrap().shape().rotation(),
                Rotation::default()
            );
        }
    }

    #[test]
    fn test_blocked_rotation_keeps_rotation_state() {
        // The flat I-piece on the bottom rows needs three more rows to stand up.
        let mut engine = with_piece(Grid::new(10, 6), shape(ShapeKind::I, 0), 4, 3);
        let before = *engine.falling_piece().unwrap();

        assert_eq!(engine.try_rotate(), Err(InvalidTransition::OutOfBounds));
        assert_eq!(engine.falling_piece(), Some(&before));
        assert_eq!(before.shape().rotation(), Rotation::new(0));

        engine.try_move(-2, 0).unwrap();
        engine.try_rotate().unwrap();
        assert_eq!(
            engine.falling_piece().unwrap().shape().rotation(),
            Rotation::new(1)
        );
    }

    #[test]
    fn test_rotation_blocked_by_settled_cell() {
        let grid = grid_from_ascii(&[
            "..#...", //
            "......",
            "......",
            "......",
        ]);
        // Rotation 1 of the T-piece needs (0, 2).
        let mut engine = with_piece(grid, shape(ShapeKind::T, 0), 0, 1);
        let before = *engine.falling_piece().unwrap();

        assert_eq!(engine.try_rotate(), Err(InvalidTransition::Collision));
        assert_eq!(engine.falling_piece(), Some(&before));

        engine.move_right().unwrap();
        engine.try_rotate().unwrap();
        assert_eq!(
            engine.falling_piece().unwrap().shape().rotation(),
            Rotation::new(1)
        );
    }

    #[test]
    fn test_soft_drop_locks_on_floor() {
        let mut engine = with_piece(Grid::new(6, 6), shape(ShapeKind::O, 0), 3, 0);
        assert_eq!(engine.soft_drop(), DropOutcome::Moved);
        assert_eq!(engine.soft_drop(), DropOutcome::Locked { cleared_lines: 0 });

        assert_eq!(engine.grid().count(Cell::Settled), 4);
        assert_eq!(engine.grid().get(Position::new(5, 0)), Some(Cell::Settled));
        assert_eq!(engine.stats().locked_pieces(), 1);

        // The previewed O-piece is now falling and a fresh preview was drawn.
        let falling = engine.falling_piece().unwrap();
        assert_eq!(falling.shape().kind(), ShapeKind::O);
        assert_eq!(falling.origin().0, 0);
        assert!(engine.next_shape().is_some());
    }

    #[test]
    fn test_hard_drop_clears_lines_and_scores() {
        let grid = grid_from_ascii(&[
            "......", //
            "......",
            "......",
            "......",
            "##..##",
            "##..##",
        ]);
        let mut engine = with_piece(grid, shape(ShapeKind::O, 0), 0, 2);
        assert_eq!(engine.hard_drop(), DropOutcome::Locked { cleared_lines: 2 });

        assert_eq!(engine.stats().cleared_lines(), 2);
        assert_eq!(engine.stats().score(), 3 * 6);
        assert_eq!(engine.grid().count(Cell::Settled), 0);
        assert_eq!(engine.grid().count(Cell::Falling), 4);
    }

    #[test]
    fn test_fall_interval_follows_score() {
        let grid = grid_from_ascii(&[
            "....", //
            "....",
            "....",
            "....",
            "##..",
        ]);
        let mut engine = with_piece(grid, shape(ShapeKind::O, 0), 0, 2);
        engine.stats.record_lock(4, 250);
        assert_eq!(engine.stats().score(), 2500);

        engine.hard_drop();
        assert_eq!(engine.fall_interval(), Duration::from_millis(750));
    }

    #[test]
    fn test_spawn_overlap_ends_game() {
        // Blocks the O-piece at every spawn column without filling the row.
        let grid = grid_from_ascii(&[
            "###.", //
            "....",
            "....",
            "....",
        ]);
        let mut engine = with_piece(grid, shape(ShapeKind::O, 0), 2, 0);

        assert_eq!(engine.hard_drop(), DropOutcome::GameOver);
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert!(engine.falling_piece().is_none());

        let grid_before = engine.grid().clone();
        assert_eq!(engine.move_left(), Err(InvalidTransition::NotRunning));
        assert_eq!(engine.try_rotate(), Err(InvalidTransition::NotRunning));
        assert_eq!(engine.soft_drop(), DropOutcome::Ignored);
        assert_eq!(engine.hard_drop(), DropOutcome::Ignored);
        assert_eq!(engine.tick(), DropOutcome::Ignored);
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_eq!(engine.start(), Err(InvalidTransition::AlreadyStarted));
        assert_eq!(engine.grid(), &grid_before);

        assert!(engine.reset().is_some());
        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert_eq!(engine.start(), Ok(Placement::Spawned));
    }

    #[test]
    fn test_spawn_into_occupied_cell_is_topped_out() {
        let mut engine = seeded(4, 6);
        engine.phase = GamePhase::Running;
        for col in 0..4 {
            engine.grid.set(Position::new(0, col), Cell::Settled);
            engine.grid.set(Position::new(1, col), Cell::Settled);
        }
        assert_eq!(
            engine.spawn(shape(ShapeKind::O, 0)),
            Placement::ToppedOut
        );
        assert_eq!(engine.phase(), GamePhase::GameOver);
        assert_eq!(engine.grid().count(Cell::Falling), 0);
    }

    #[test]
    fn test_pause_rejects_commands_and_stops_clock() {
        let mut engine = seeded(10, 20);
        engine.start().unwrap();
        assert_eq!(engine.tick(), DropOutcome::Moved);
        assert_eq!(engine.stats().elapsed(), INITIAL_FALL_INTERVAL);

        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Paused);
        let before = *engine.falling_piece().unwrap();
        assert_eq!(engine.move_right(), Err(InvalidTransition::NotRunning));
        assert_eq!(engine.try_rotate(), Err(InvalidTransition::NotRunning));
        assert_eq!(engine.hard_drop(), DropOutcome::Ignored);
        assert_eq!(engine.tick(), DropOutcome::Ignored);
        assert_eq!(engine.falling_piece(), Some(&before));
        assert_eq!(engine.stats().elapsed(), INITIAL_FALL_INTERVAL);

        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.tick(), DropOutcome::Moved);
        assert_eq!(engine.stats().elapsed(), 2 * INITIAL_FALL_INTERVAL);
    }

    #[test]
    fn test_toggle_pause_before_start_is_noop() {
        let mut engine = seeded(10, 20);
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::NotStarted);
    }

    #[test]
    fn test_reset_returns_summary_and_clears_state() {
        let mut engine = seeded(10, 20);
        assert_eq!(engine.reset(), None);

        engine.start().unwrap();
        engine.tick();
        engine.hard_drop();
        let summary = engine.reset().unwrap();
        assert_eq!(summary.elapsed(), INITIAL_FALL_INTERVAL);

        assert_eq!(engine.phase(), GamePhase::NotStarted);
        assert!(engine.grid().is_empty());
        assert!(engine.falling_piece().is_none());
        assert!(engine.next_shape().is_none());
        assert_eq!(engine.stats(), &ScoreState::new());
        assert_eq!(engine.fall_interval(), INITIAL_FALL_INTERVAL);
    }

    #[test]
    fn test_restart_starts_fresh_game() {
        let mut engine = seeded(10, 20);
        engine.start().unwrap();
        engine.hard_drop();
        assert!(engine.restart().is_some());
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.stats().locked_pieces(), 0);
        assert_eq!(engine.grid().count(Cell::Settled), 0);
        assert_eq!(engine.grid().count(Cell::Falling), 4);
    }

    #[test]
    fn test_same_seed_plays_identically() {
        let mut a = seeded(10, 20);
        let mut b = seeded(10, 20);
        a.start().unwrap();
        b.start().unwrap();
        for _ in 0..30 {
            assert_eq!(a.hard_drop(), b.hard_drop());
            assert_eq!(a.grid(), b.grid());
            assert_eq!(a.next_shape(), b.next_shape());
        }
    }

    #[test]
    fn test_hard_drops_eventually_top_out() {
        let mut engine = seeded(4, 8);
        engine.start().unwrap();
        let mut outcome = DropOutcome::Moved;
        for _ in 0..100 {
            outcome = engine.hard_drop();
            if outcome.is_game_over() {
                break;
            }
            // A lock never leaves a full row behind.
            assert!((0..8).all(|row| !engine.grid().is_row_full(row)));
        }
        assert_eq!(outcome, DropOutcome::GameOver);
        assert_eq!(engine.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_clear_lines_ignores_row_completed_by_falling_piece() {
        let grid = grid_from_ascii(&[
            "....", //
            "....",
            "..#.",
            "....",
            "##..",
            "....",
        ]);
        let mut engine = with_piece(grid, shape(ShapeKind::O, 0), 3, 2);
        let before = engine.grid().clone();

        assert_eq!(engine.clear_lines(), 0);
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.grid().count(Cell::Falling), 4);
        assert_eq!(engine.grid().count(Cell::Settled), 3);

        // Locking settles the piece, and only then the row clears.
        assert_eq!(engine.soft_drop(), DropOutcome::Moved);
        assert_eq!(engine.soft_drop(), DropOutcome::Locked { cleared_lines: 1 });
        assert_eq!(engine.stats().score(), 4);
        assert_eq!(engine.grid().get(Position::new(3, 2)), Some(Cell::Settled));
    }

    #[test]
    fn test_clear_lines_removes_full_rows() {
        let mut engine = seeded(4, 6);
        assert_eq!(engine.clear_lines(), 0);
        for col in 0..4 {
            engine.grid.set(Position::new(5, col), Cell::Settled);
        }
        engine.grid.set(Position::new(4, 1), Cell::Settled);
        assert_eq!(engine.clear_lines(), 1);
        assert_eq!(engine.grid().get(Position::new(5, 1)), Some(Cell::Settled));
        assert_eq!(engine.grid().count(Cell::Settled), 1);
    }
}
