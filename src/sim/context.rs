//! Session context
//!
//! Owns every piece of mutable game data. Passed explicitly by `&mut` to the
//! tick and to presentation code; there is no global instance.

use rand::Rng;
use rand_pcg::Pcg32;

use super::controller::MotionController;
use super::input::PhaseRequest;
use super::state::GameState;
use crate::combat::{CombatEffects, TargetRegistry};
use crate::levels::LevelDescriptor;
use crate::tuning::Tuning;
use crate::world::{WorldGenerator, WorldLayout};

/// Stream offset so world generation and drone spawns don't share a sequence
const WORLD_STREAM: u64 = 0x5eed_0f_3a7d;

pub struct GameContext {
    pub state: GameState,
    pub controller: MotionController,
    pub effects: CombatEffects,
    pub targets: TargetRegistry,
    pub layout: WorldLayout,
    pub tuning: Tuning,
    generator: WorldGenerator<Pcg32>,
}

impl GameContext {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    /// Reproducible session: the same seed builds the same world and drones
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let state = GameState::with_tuning(seed, &tuning);
        Self::assemble(state, WorldGenerator::seeded(seed ^ WORLD_STREAM), tuning)
    }

    /// Fresh random session (a new city every run)
    pub fn from_entropy(tuning: Tuning) -> Self {
        let state = GameState::with_tuning(rand::rng().random::<u64>(), &tuning);
        Self::assemble(state, WorldGenerator::from_entropy(), tuning)
    }

    fn assemble(state: GameState, mut generator: WorldGenerator<Pcg32>, tuning: Tuning) -> Self {
        let layout = generator.generate(state.level(), state.is_scanning);
        let targets = TargetRegistry::from_layout(&layout, tuning.combat.enemy_radius);
        Self {
            state,
            controller: MotionController::new(),
            effects: CombatEffects::default(),
            targets,
            layout,
            tuning,
            generator,
        }
    }

    pub fn level(&self) -> &'static LevelDescriptor {
        self.state.level()
    }

    /// Regenerate the world for the current level
    pub fn enter_level(&mut self) {
        self.layout = self
            .generator
            .generate(self.state.level(), self.state.is_scanning);
        self.targets.set_structures(&self.layout);
        self.effects.clear();
    }

    /// Apply a phase request; a level change regenerates the world.
    /// Returns whether the request was accepted.
    pub fn apply_request(&mut self, request: PhaseRequest) -> bool {
        let level_before = self.state.current_level_index;
        let accepted = self
            .controller
            .handle_request(&mut self.state, request, &self.tuning);
        if self.state.current_level_index != level_before {
            self.enter_level();
        } else if accepted && request == PhaseRequest::Reset {
            self.effects.clear();
        }
        accepted
    }
}
