//! Match module - the round controller
//!
//! [`Match`] is the only owner of mutable match state: the grid, both pieces,
//! scores, the advance interval and the lifecycle phase. Pieces are moved by
//! handing them an [`Arena`] built from the grid and the rival piece for the
//! duration of one call.
//!
//! The controller owns no timer. A host either calls [`Match::step`] on its
//! own schedule (reading [`Match::advance_interval`] after every step) or
//! feeds wall-clock deltas to [`Match::tick`].

use tracing::{debug, info};

use crate::config::{ConfigError, MatchConfig};
use crate::grid::Grid;
use crate::piece::{Arena, Piece};
use crate::rng::{derive_seed, ShapeQueue};
use crate::scoring::{add_points, line_clear_award, next_interval};
use crate::snapshot::{MatchSnapshot, PieceSnapshot};
use crate::types::{Cell, Command, MatchEvent, MatchPhase, PlayerId, ShapeKind};

/// Two-player match state
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    grid: Grid,
    /// Current piece per player, indexed by [`PlayerId::index`].
    ///
    /// `None` only before the first spawn; a locked piece stays here, inactive,
    /// until its replacement spawns.
    pieces: [Option<Piece>; 2],
    next: [ShapeKind; 2],
    queues: [ShapeQueue; 2],
    scores: [u32; 2],
    interval_ms: u32,
    /// Time accumulated toward the next forced step (tick-driven hosts only).
    accumulator_ms: u32,
    phase: MatchPhase,
    winner: Option<PlayerId>,
    /// Increments on reset.
    round: u32,
    events: Vec<MatchEvent>,
}

/// Borrow one player's piece mutably and the rival's piece immutably.
fn split_pieces(
    pieces: &mut [Option<Piece>; 2],
    player: PlayerId,
) -> (&mut Option<Piece>, Option<&Piece>) {
    let [one, two] = pieces;
    match player {
        PlayerId::One => (one, two.as_ref()),
        PlayerId::Two => (two, one.as_ref()),
    }
}

impl Match {
    /// Validate the configuration and start round 0.
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let queues = [
            ShapeQueue::new(config.seed, config.randomizer),
            ShapeQueue::new(derive_seed(config.seed), config.randomizer),
        ];

        let mut state = Self {
            config,
            grid: Grid::new(config.width, config.height),
            pieces: [None, None],
            next: [ShapeKind::I; 2],
            queues,
            scores: [0; 2],
            interval_ms: config.initial_interval_ms,
            accumulator_ms: 0,
            phase: MatchPhase::Playing,
            winner: None,
            round: 0,
            events: Vec::with_capacity(16),
        };
        state.start_round();
        Ok(state)
    }

    /// Roll both next shapes and spawn player one, then player two.
    fn start_round(&mut self) {
        for player in PlayerId::ALL {
            self.next[player.index()] = self.queues[player.index()].draw();
        }
        for player in PlayerId::ALL {
            if !self.spawn(player) {
                break;
            }
        }
        info!(
            round = self.round,
            width = self.grid.width(),
            height = self.grid.height(),
            "round started"
        );
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Locked cell at (x, y); empty outside the grid.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        self.grid.get(x, y)
    }

    pub fn score(&self, player: PlayerId) -> u32 {
        self.scores[player.index()]
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn next_shape(&self, player: PlayerId) -> ShapeKind {
        self.next[player.index()]
    }

    /// The player's piece while it is still moving.
    pub fn active_piece(&self, player: PlayerId) -> Option<&Piece> {
        self.pieces[player.index()]
            .as_ref()
            .filter(|p| p.is_active())
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == MatchPhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Milliseconds between forced steps.
    pub fn advance_interval(&self) -> u32 {
        self.interval_ms
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// Events recorded since the last drain, oldest first.
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, MatchEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut MatchSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        out.cells.extend(
            self.grid
                .cells()
                .iter()
                .map(|cell| cell.map_or(0, |p| p.token())),
        );
        out.pieces = PlayerId::ALL.map(|p| self.active_piece(p).map(PieceSnapshot::from));
        out.next = self.next;
        out.scores = self.scores;
        out.interval_ms = self.interval_ms;
        out.phase = self.phase;
        out.winner = self.winner;
        out.round = self.round;
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        let mut s = MatchSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player command to that player's active piece.
    ///
    /// Returns false while paused or over, without an active piece, or when
    /// the move is blocked.
    pub fn move_player(&mut self, player: PlayerId, command: Command) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        let (own, rival) = split_pieces(&mut self.pieces, player);
        let arena = Arena::new(&self.grid, rival);
        match own {
            Some(piece) if piece.is_active() => piece.apply(command, &arena),
            _ => false,
        }
    }

    /// Toggle between playing and paused. No-op once the match is over.
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            MatchPhase::Playing => MatchPhase::Paused,
            MatchPhase::Paused => MatchPhase::Playing,
            MatchPhase::GameOver => return false,
        };
        let paused = self.is_paused();
        debug!(paused, "pause toggled");
        self.events.push(MatchEvent::PauseChanged { paused });
        true
    }

    /// Accumulate elapsed time and perform at most one step when due.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        if self.accumulator_ms < self.interval_ms {
            return false;
        }
        self.accumulator_ms = 0;
        self.step()
    }

    /// One forced advance for player one, then player two.
    ///
    /// A player whose piece was already locked and respawned earlier in the
    /// same step is not advanced again.
    pub fn step(&mut self) -> bool {
        if self.phase != MatchPhase::Playing {
            return false;
        }
        let mut settled = [false; 2];
        for player in PlayerId::ALL {
            if settled[player.index()] {
                continue;
            }
            if let Some(displaced) = self.advance(player) {
                settled[displaced.index()] = true;
            }
            if self.phase == MatchPhase::GameOver {
                break;
            }
        }
        true
    }

    /// Returns the rival if its piece had to be settled along the way.
    fn advance(&mut self, player: PlayerId) -> Option<PlayerId> {
        let mut displaced = None;
        if self.active_piece(player).is_some() {
            if self.move_player(player, Command::Forward) {
                return None;
            }
            displaced = self.settle(player);
        }
        if self.phase == MatchPhase::Playing {
            self.spawn(player);
        }
        displaced
    }

    /// Lock `player`'s piece and clear columns.
    ///
    /// A clear may shift locked cells under the rival's active piece. That
    /// piece then locks where it stands, its own clear runs, and it respawns
    /// before `player` does.
    fn settle(&mut self, player: PlayerId) -> Option<PlayerId> {
        self.lock(player);
        self.clear_columns();

        let rival = player.other();
        if !self.is_buried(rival) {
            return None;
        }
        debug!(player = rival.as_str(), "piece buried by column shift");
        self.lock(rival);
        self.clear_columns();
        self.spawn(rival);
        Some(rival)
    }

    /// Active piece overlapping locked cells.
    fn is_buried(&self, player: PlayerId) -> bool {
        self.active_piece(player).is_some_and(|piece| {
            piece
                .cells()
                .iter()
                .any(|&(x, y)| self.grid.is_occupied(x, y))
        })
    }

    fn lock(&mut self, player: PlayerId) {
        let idx = player.index();
        let Some(piece) = self.pieces[idx].as_mut() else {
            return;
        };
        piece.deactivate();
        let cells = piece.cells();
        let shape = piece.shape();

        if !self.grid.lock_cells(&cells, player) {
            debug!(player = player.as_str(), "some cells already occupied, kept");
        }

        let points = self.config.points_per_piece;
        self.scores[idx] = add_points(self.scores[idx], points);
        debug!(
            player = player.as_str(),
            shape = shape.as_str(),
            score = self.scores[idx],
            "piece locked"
        );
        self.events.push(MatchEvent::PieceLocked { player, points });
        self.events.push(MatchEvent::ScoreChanged {
            player,
            score: self.scores[idx],
        });
    }

    fn clear_columns(&mut self) {
        let report = self.grid.clear_full_columns();
        if report.is_empty() {
            return;
        }

        let award = line_clear_award(report.count, self.config.points_per_line);
        self.events.push(MatchEvent::ColumnsCleared {
            count: report.count,
            points_each: award,
        });
        for player in PlayerId::ALL {
            let idx = player.index();
            self.scores[idx] = add_points(self.scores[idx], award);
            self.events.push(MatchEvent::ScoreChanged {
                player,
                score: self.scores[idx],
            });
        }

        let interval = next_interval(
            self.interval_ms,
            self.config.speed_step_ms,
            self.config.min_interval_ms,
        );
        if interval != self.interval_ms {
            self.interval_ms = interval;
            self.events.push(MatchEvent::IntervalChanged {
                interval_ms: interval,
            });
        }

        info!(
            count = report.count,
            columns = ?report.columns.as_slice(),
            award,
            interval_ms = self.interval_ms,
            "columns cleared"
        );
    }

    /// Spawn the pending shape for `player`; a blocked spawn ends the match.
    fn spawn(&mut self, player: PlayerId) -> bool {
        let idx = player.index();
        let shape = self.next[idx];
        let piece = Piece::spawn(shape, player, self.grid.width());

        let next = self.queues[idx].draw();
        self.next[idx] = next;
        self.events.push(MatchEvent::NextShapeChanged {
            player,
            shape: next,
        });

        let rival = self.pieces[player.other().index()].as_ref();
        if !piece.is_valid_position(&Arena::new(&self.grid, rival)) {
            self.finish(player.other());
            return false;
        }

        debug!(
            player = player.as_str(),
            shape = shape.as_str(),
            x = piece.x(),
            y = piece.y(),
            "piece spawned"
        );
        self.pieces[idx] = Some(piece);
        true
    }

    fn finish(&mut self, winner: PlayerId) {
        self.phase = MatchPhase::GameOver;
        self.winner = Some(winner);
        self.accumulator_ms = 0;
        info!(
            winner = winner.as_str(),
            p1 = self.scores[0],
            p2 = self.scores[1],
            "game over"
        );
        self.events.push(MatchEvent::GameOver {
            winner,
            scores: self.scores,
        });
    }

    /// Start a new round with the same configuration.
    ///
    /// Shape queues continue from their current RNG state, so the next round
    /// plays a different sequence.
    pub fn reset(&mut self) {
        let mode = self.config.randomizer;
        self.queues = self
            .queues
            .clone()
            .map(|q| ShapeQueue::new(q.seed(), mode));

        self.grid.clear();
        self.pieces = [None, None];
        self.scores = [0; 2];
        self.interval_ms = self.config.initial_interval_ms;
        self.accumulator_ms = 0;
        self.phase = MatchPhase::Playing;
        self.winner = None;
        self.round = self.round.wrapping_add(1);
        self.events.clear();
        self.events.push(MatchEvent::Reset { round: self.round });

        self.start_round();
    }
}
