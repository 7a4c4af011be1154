//! Freehand trail drawn by the player, checked against the maze walls.
//!
//! The engine receives pointer positions in board pixels. A drag starts on an open cell, and
//! every further position is accepted only if the straight segment from the last accepted
//! position reaches it without entering a wall or leaving the board. The segment is walked in
//! steps of `cell_size / samples_per_cell`, so a wall thinner than one step can be missed.

use log::debug;

use crate::constants::SAMPLES_PER_CELL;
use crate::game::board::{Board, CellPos, Point};
use crate::game::level::Level;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrailState {
    Idle,
    Drawing,
}

/// Outcome of [`TrailEngine::extend_trail`] that the UI reacts to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TrailSignal {
    /// The segment crossed a wall. The drag is over and the point was dropped.
    Collision,
    /// The point entered the goal cell. The drag is over and the trail is complete.
    ReachedGoal,
}

#[derive(Clone, Debug)]
pub struct TrailEngine {
    board: Board,
    goal: CellPos,
    cell_size: f64,
    samples_per_cell: u32,
    state: TrailState,
    points: Vec<Point>,
}

impl TrailEngine {
    pub fn new(level: &Level) -> Self {
        Self {
            board: level.board.clone(),
            goal: level.goal,
            cell_size: level.cell_size,
            samples_per_cell: SAMPLES_PER_CELL,
            state: TrailState::Idle,
            points: Vec::new(),
        }
    }

    /// Number of collision samples per cell edge length. Values below 1 are raised to 1.
    pub fn with_samples_per_cell(mut self, samples: u32) -> Self {
        self.samples_per_cell = samples.max(1);
        self
    }

    /// Switch to another maze. Any trail from the previous one is discarded.
    pub fn set_level(&mut self, level: &Level) {
        self.board = level.board.clone();
        self.goal = level.goal;
        self.cell_size = level.cell_size;
        self.reset();
    }

    pub fn state(&self) -> TrailState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.state() == TrailState::Drawing
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Start a new drag at `point`. Returns false, and changes nothing, when the point is not
    /// on an open cell. An active drag is replaced: its trail is dropped and drawing restarts
    /// at `point`.
    pub fn begin_trail(&mut self, point: Point) -> bool {
        if !self.board.is_open_at(point, self.cell_size) {
            debug!("Ignoring drag start on a wall or off the board at {point:?}");
            return false;
        }

        self.points.clear();
        self.points.push(point);
        self.state = TrailState::Drawing;
        debug!("Trail started at {point:?}");
        true
    }

    /// Continue the current drag to `point`.
    ///
    /// Does nothing when no drag is active. On a collision the drag ends and the point is
    /// dropped; on reaching the goal the point is kept and the drag ends.
    pub fn extend_trail(&mut self, point: Point) -> Option<TrailSignal> {
        if self.state != TrailState::Drawing {
            return None;
        }
        let last = *self.points.last()?;

        if segment_hits_wall(&self.board, self.cell_size, self.samples_per_cell, last, point) {
            self.state = TrailState::Idle;
            debug!("Collision between {last:?} and {point:?}");
            return Some(TrailSignal::Collision);
        }

        self.points.push(point);

        if self.board.cell_at(point, self.cell_size) == Some(self.goal) {
            self.state = TrailState::Idle;
            debug!("Goal reached after {} points", self.points.len());
            return Some(TrailSignal::ReachedGoal);
        }
        None
    }

    /// Stop drawing but keep the partial trail on screen.
    pub fn end_trail(&mut self) {
        if self.state == TrailState::Drawing {
            debug!("Trail ended with {} points", self.points.len());
        }
        self.state = TrailState::Idle;
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.state = TrailState::Idle;
    }
}

/// Whether the straight segment `from -> to` touches a wall or leaves the board.
///
/// The segment is sampled every `cell_size / samples_per_cell` pixels, end point included.
pub fn segment_hits_wall(
    board: &Board,
    cell_size: f64,
    samples_per_cell: u32,
    from: Point,
    to: Point,
) -> bool {
    let step = cell_size / samples_per_cell.max(1) as f64;
    let steps = (from.distance(&to) / step).ceil();
    if !steps.is_finite() {
        return true;
    }
    let steps = (steps as u64).max(1);

    (1..=steps).any(|i| {
        let sample = from.lerp(&to, i as f64 / steps as f64);
        !board.is_open_at(sample, cell_size)
    })
}
