use std::time::{Duration, Instant};

use log::{debug, info};

use crate::constants::{CELEBRATION_TIME, COLLISION_FLASH, POINTS_PER_LEVEL};
use crate::game::board::Point;
use crate::game::level::Level;
use crate::game::trail::{TrailEngine, TrailSignal};

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum GameState {
    Playing,
    Celebrating(Instant), // Treasure found, next level loads after CELEBRATION_TIME
}

pub struct Game {
    pub levels: Vec<Level>,
    pub level_index: usize,
    pub score: u32,
    pub trail: TrailEngine,
    pub game_state: GameState,
    pub collision_flash: Option<Instant>,
}

impl Game {
    /// Start a game on the given level (wrapped into range). `levels` must not be empty.
    pub fn new(levels: Vec<Level>, first_level: usize, samples_per_cell: u32) -> Self {
        let level_index = first_level % levels.len();
        let trail = TrailEngine::new(&levels[level_index]).with_samples_per_cell(samples_per_cell);
        info!("Starting on level {} of {}", level_index + 1, levels.len());

        Self {
            levels,
            level_index,
            score: 0,
            trail,
            game_state: GameState::Playing,
            collision_flash: None,
        }
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    /// Level number as shown to the player, starting at 1.
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }

    pub fn is_celebrating(&self) -> bool {
        matches!(self.game_state, GameState::Celebrating(_))
    }

    pub fn is_flashing(&self) -> bool {
        self.collision_flash.is_some()
    }

    pub fn pointer_down(&mut self, point: Point) {
        if self.is_celebrating() {
            return;
        }
        self.trail.begin_trail(point);
    }

    pub fn pointer_move(&mut self, point: Point) {
        if self.is_celebrating() {
            return;
        }

        match self.trail.extend_trail(point) {
            Some(TrailSignal::Collision) => {
                self.collision_flash = Some(Instant::now());
            }
            Some(TrailSignal::ReachedGoal) => {
                self.score += POINTS_PER_LEVEL;
                self.game_state = GameState::Celebrating(Instant::now());
                info!("Level {} complete, score {}", self.level_number(), self.score);
            }
            None => {}
        }
    }

    /// Pointer released, left the board, or the terminal lost focus.
    pub fn pointer_up(&mut self) {
        self.trail.end_trail();
    }

    /// "Try again": clear the trail and stay on the same level. A running celebration is not
    /// cancelled, the next level still loads when it ends.
    pub fn reset(&mut self) {
        self.trail.reset();
        self.collision_flash = None;
    }

    pub fn next_level(&mut self) {
        self.level_index = (self.level_index + 1) % self.levels.len();
        self.trail.set_level(&self.levels[self.level_index]);
        self.game_state = GameState::Playing;
        self.collision_flash = None;
        info!("Now on level {} ({})", self.level_number(), self.level().name);
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    fn update_at(&mut self, now: Instant) {
        if let Some(flash) = self.collision_flash {
            if now.duration_since(flash) >= Duration::from_millis(COLLISION_FLASH) {
                self.collision_flash = None;
            }
        }

        if let GameState::Celebrating(since) = self.game_state {
            if now.duration_since(since) >= Duration::from_millis(CELEBRATION_TIME) {
                debug!("Celebration over");
                self.next_level();
            }
        }
    }
}
