//! Game state store
//!
//! Session-wide gameplay state. Every action is a total function of the
//! current state: invalid requests are no-ops, never panics. The motion
//! controller and the combat module are the only writers.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{DROP_ALTITUDE, ENEMY_COUNT, RING_COUNT};
use crate::levels::{self, LevelDescriptor};
use crate::tuning::{CombatTuning, SessionTuning, Tuning};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Hovering above the level, waiting for the drop
    Menu,
    /// Falling fast, rings give a speed kick
    Freefall,
    /// Canopy open, slow descent
    Parachute,
    /// On foot, shooting drones
    GroundCombat,
    /// Reserved for presentation; nothing enters it automatically
    Landed,
    /// Touched down too fast
    Crashed,
}

impl GamePhase {
    pub fn is_skydiving(self) -> bool {
        matches!(self, GamePhase::Freefall | GamePhase::Parachute)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Menu => "MENU",
            GamePhase::Freefall => "FREEFALL",
            GamePhase::Parachute => "PARACHUTE",
            GamePhase::GroundCombat => "GROUND_COMBAT",
            GamePhase::Landed => "LANDED",
            GamePhase::Crashed => "CRASHED",
        }
    }
}

/// A hovering drone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// World-space position
    pub position: Vec3,
    pub alive: bool,
}

/// Things that happened this tick (for audio/UI)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    RingCollected { total: u8 },
    ScanStarted,
    EnemyKilled { id: u32 },
    WeaponFired { ammo_left: u32 },
    DryFire,
    Reloaded,
    LevelChanged { index: usize },
}

/// Read-only copy of the HUD-facing fields
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub altitude: u32,
    pub speed: u32,
    pub distance_to_target: u32,
    pub score: u64,
    pub rings_collected: u8,
    pub is_scanning: bool,
    pub is_shooting: bool,
    pub current_level_index: usize,
    pub health: u32,
    pub ammo: u32,
    pub enemies_defeated: u32,
    pub is_sliding: bool,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Rounded height above ground, never negative
    pub altitude: u32,
    /// Rounded vertical speed magnitude
    pub speed: u32,
    /// Rounded horizontal distance to the drop zone centre
    pub distance_to_target: u32,
    pub score: u64,
    pub rings_collected: u8,
    /// Session time of the last ring pass (seconds)
    pub last_ring_time: Option<f64>,
    pub is_scanning: bool,
    pub is_shooting: bool,
    pub current_level_index: usize,
    pub health: u32,
    pub ammo: u32,
    pub enemies_defeated: u32,
    pub is_sliding: bool,
    pub enemies: Vec<Enemy>,
    /// Session clock (seconds), advanced by the tick
    pub time_secs: f64,

    scan_ends_at: Option<f64>,
    shoot_flash_ends_at: Option<f64>,
    events: Vec<GameEvent>,
    rng: Pcg32,
    session: SessionTuning,
    combat: CombatTuning,
}

impl GameState {
    /// Fresh session on level 0 with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, &Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            altitude: DROP_ALTITUDE as u32,
            speed: 0,
            distance_to_target: 0,
            score: 0,
            rings_collected: 0,
            last_ring_time: None,
            is_scanning: false,
            is_shooting: false,
            current_level_index: 0,
            health: tuning.session.start_health,
            ammo: tuning.combat.magazine,
            enemies_defeated: 0,
            is_sliding: false,
            enemies: Vec::new(),
            time_secs: 0.0,
            scan_ends_at: None,
            shoot_flash_ends_at: None,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            session: tuning.session.clone(),
            combat: tuning.combat.clone(),
        }
    }

    /// Descriptor of the current level
    pub fn level(&self) -> &'static LevelDescriptor {
        levels::get(self.current_level_index)
    }

    /// Commit a phase. Entering ground combat repopulates the drones first,
    /// so observers of the new phase always see them.
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase == GamePhase::GroundCombat {
            self.spawn_enemies();
        }
        if phase != self.phase {
            log::info!("Phase {} -> {}", self.phase.as_str(), phase.as_str());
            self.events.push(GameEvent::PhaseChanged {
                from: self.phase,
                to: phase,
            });
        }
        self.phase = phase;
    }

    fn spawn_enemies(&mut self) {
        let half = self.session.enemy_field * 0.5;
        let (lo, hi) = (self.session.enemy_min_height, self.session.enemy_max_height);
        self.enemies = (0..ENEMY_COUNT as u32)
            .map(|id| {
                let x = (self.rng.random::<f32>() - 0.5) * 2.0 * half;
                let y = lo + self.rng.random::<f32>() * (hi - lo);
                let z = (self.rng.random::<f32>() - 0.5) * 2.0 * half;
                Enemy {
                    id,
                    position: Vec3::new(x, y, z),
                    alive: true,
                }
            })
            .collect();
        log::debug!("Spawned {} drones", self.enemies.len());
    }

    pub fn increment_rings(&mut self) {
        debug_assert!((self.rings_collected as usize) < RING_COUNT);
        self.rings_collected = self.rings_collected.saturating_add(1);
        self.score += self.session.ring_score;
        self.last_ring_time = Some(self.time_secs);
        self.events.push(GameEvent::RingCollected {
            total: self.rings_collected,
        });
    }

    /// Start (or extend) the scan pulse
    pub fn trigger_scan(&mut self) {
        self.is_scanning = true;
        self.scan_ends_at = Some(self.time_secs + self.session.scan_duration);
        self.events.push(GameEvent::ScanStarted);
    }

    /// Mark a living drone dead. Returns false for dead or unknown ids.
    pub fn kill_enemy(&mut self, id: u32) -> bool {
        let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id && e.alive) else {
            return false;
        };
        enemy.alive = false;
        self.enemies_defeated += 1;
        self.score += self.session.kill_score;
        self.events.push(GameEvent::EnemyKilled { id });
        true
    }

    /// Spend one round. Returns false (dry fire) with an empty magazine.
    pub fn fire_weapon(&mut self) -> bool {
        if self.ammo == 0 {
            self.events.push(GameEvent::DryFire);
            return false;
        }
        self.ammo -= 1;
        self.is_shooting = true;
        self.shoot_flash_ends_at = Some(self.time_secs + self.combat.shoot_flash as f64);
        self.events.push(GameEvent::WeaponFired { ammo_left: self.ammo });
        true
    }

    pub fn reload_weapon(&mut self) {
        self.ammo = self.combat.magazine;
        self.events.push(GameEvent::Reloaded);
    }

    pub fn set_sliding(&mut self, sliding: bool) {
        self.is_sliding = sliding;
    }

    /// Back to the menu on the same level
    pub fn reset(&mut self) {
        self.reset_attempt();
        self.set_phase(GamePhase::Menu);
    }

    /// Back to the menu on the following level (wraps after the last one)
    pub fn next_level(&mut self) {
        self.reset_attempt();
        self.current_level_index = levels::next_index(self.current_level_index);
        log::info!(
            "Level {} ({})",
            self.current_level_index,
            self.level().name
        );
        self.events.push(GameEvent::LevelChanged {
            index: self.current_level_index,
        });
        self.set_phase(GamePhase::Menu);
    }

    fn reset_attempt(&mut self) {
        self.altitude = DROP_ALTITUDE as u32;
        self.speed = 0;
        self.distance_to_target = 0;
        self.score = 0;
        self.rings_collected = 0;
        self.last_ring_time = None;
        self.is_scanning = false;
        self.is_shooting = false;
        self.scan_ends_at = None;
        self.shoot_flash_ends_at = None;
        self.health = self.session.start_health;
        self.ammo = self.combat.magazine;
        self.enemies_defeated = 0;
        self.is_sliding = false;
        self.enemies.clear();
    }

    /// Advance the session clock and expire timed flags
    pub fn advance_clock(&mut self, dt: f64) {
        self.time_secs += dt.max(0.0);
        self.expire_timers();
    }

    pub fn expire_timers(&mut self) {
        if self.scan_ends_at.is_some_and(|end| self.time_secs >= end) {
            self.scan_ends_at = None;
            self.is_scanning = false;
        }
        if self.shoot_flash_ends_at.is_some_and(|end| self.time_secs >= end) {
            self.shoot_flash_ends_at = None;
            self.is_shooting = false;
        }
    }

    /// Publish the skydiver's flight readouts
    pub fn publish_flight(&mut self, position: Vec3, velocity: Vec3) {
        self.altitude = position.y.max(0.0).round() as u32;
        self.speed = velocity.y.abs().round() as u32;
        self.distance_to_target = position.x.hypot(position.z).round() as u32;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            altitude: self.altitude,
            speed: self.speed,
            distance_to_target: self.distance_to_target,
            score: self.score,
            rings_collected: self.rings_collected,
            is_scanning: self.is_scanning,
            is_shooting: self.is_shooting,
            current_level_index: self.current_level_index,
            health: self.health,
            ammo: self.ammo,
            enemies_defeated: self.enemies_defeated,
            is_sliding: self.is_sliding,
        }
    }

    /// Take the events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_initial_state() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.altitude, 3000);
        assert_eq!(state.health, 100);
        assert_eq!(state.ammo, 30);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_ground_combat_spawns_enemies_before_commit() {
        let mut state = GameState::new(7);
        state.set_phase(GamePhase::GroundCombat);
        assert_eq!(state.living_enemies().count(), ENEMY_COUNT);
        for e in &state.enemies {
            assert!(e.position.x.abs() <= 200.0 && e.position.z.abs() <= 200.0);
            assert!((5.0..20.0).contains(&e.position.y));
        }
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PhaseChanged {
                from: GamePhase::Menu,
                to: GamePhase::GroundCombat
            }]
        );
    }

    #[test]
    fn test_kill_enemy_once() {
        let mut state = GameState::new(3);
        state.set_phase(GamePhase::GroundCombat);
        assert!(state.kill_enemy(4));
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.score, 500);
        assert!(!state.enemies[4].alive);

        assert!(!state.kill_enemy(4));
        assert!(!state.kill_enemy(999));
        assert_eq!(state.enemies_defeated, 1);
        assert_eq!(state.score, 500);
    }

    #[test]
    fn test_fire_until_empty_then_reload() {
        let mut state = GameState::new(0);
        for _ in 0..30 {
            assert!(state.fire_weapon());
        }
        assert_eq!(state.ammo, 0);
        assert!(!state.fire_weapon());
        assert_eq!(state.ammo, 0);
        assert_eq!(state.drain_events().last(), Some(&GameEvent::DryFire));

        state.reload_weapon();
        assert_eq!(state.ammo, 30);
    }

    #[test]
    fn test_shoot_flash_expires() {
        let mut state = GameState::new(0);
        state.fire_weapon();
        assert!(state.is_shooting);
        state.advance_clock(0.05);
        assert!(state.is_shooting);
        state.advance_clock(0.06);
        assert!(!state.is_shooting);
    }

    #[test]
    fn test_scan_window() {
        let mut state = GameState::new(0);
        state.trigger_scan();
        assert!(state.is_scanning);
        state.advance_clock(1.99);
        assert!(state.is_scanning);
        state.advance_clock(0.02);
        assert!(!state.is_scanning);
    }

    #[test]
    fn test_scan_retrigger_extends_window() {
        let mut state = GameState::new(0);
        state.trigger_scan();
        state.advance_clock(1.5);
        state.trigger_scan();
        // Past the first window, inside the second
        state.advance_clock(1.0);
        assert!(state.is_scanning);
        state.advance_clock(1.0);
        assert!(!state.is_scanning);
    }

    #[test]
    fn test_ring_increment() {
        let mut state = GameState::new(0);
        state.advance_clock(12.5);
        state.increment_rings();
        assert_eq!(state.rings_collected, 1);
        assert_eq!(state.score, 500);
        assert_eq!(state.last_ring_time, Some(12.5));
    }

    #[test]
    fn test_reset_keeps_level_next_level_wraps() {
        let mut state = GameState::new(0);
        state.current_level_index = levels::count() - 1;
        state.set_phase(GamePhase::GroundCombat);
        state.kill_enemy(0);
        state.fire_weapon();
        state.set_sliding(true);

        state.reset();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.current_level_index, levels::count() - 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.ammo, 30);
        assert!(!state.is_sliding);
        assert!(state.enemies.is_empty());

        state.next_level();
        assert_eq!(state.current_level_index, 0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_publish_flight_rounds_and_clamps() {
        let mut state = GameState::new(0);
        state.publish_flight(Vec3::new(3.0, -4.2, 4.0), Vec3::new(0.0, -12.6, 0.0));
        assert_eq!(state.altitude, 0);
        assert_eq!(state.speed, 13);
        assert_eq!(state.distance_to_target, 5);
    }

    #[derive(Debug, Clone)]
    enum Action {
        Ring,
        Scan,
        Kill(u32),
        Fire,
        Reload,
        Slide(bool),
        Phase(u8),
        Clock(f64),
    }

    fn action() -> impl Strategy<Value = Action> {
        prop_oneof![
            Just(Action::Ring),
            Just(Action::Scan),
            (0u32..16).prop_map(Action::Kill),
            Just(Action::Fire),
            Just(Action::Reload),
            any::<bool>().prop_map(Action::Slide),
            (0u8..6).prop_map(Action::Phase),
            (0.0f64..3.0).prop_map(Action::Clock),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_never_decreases_within_attempt(
            seed in any::<u64>(),
            actions in prop::collection::vec(action(), 0..64),
        ) {
            let mut state = GameState::new(seed);
            let mut rings = 0;
            let mut last_score = 0;
            for a in actions {
                match a {
                    Action::Ring if rings < RING_COUNT => {
                        rings += 1;
                        state.increment_rings();
                    }
                    Action::Ring => {}
                    Action::Scan => state.trigger_scan(),
                    Action::Kill(id) => { state.kill_enemy(id); }
                    Action::Fire => { state.fire_weapon(); }
                    Action::Reload => state.reload_weapon(),
                    Action::Slide(s) => state.set_sliding(s),
                    Action::Phase(p) => state.set_phase(match p {
                        0 => GamePhase::Freefall,
                        1 => GamePhase::Parachute,
                        2 => GamePhase::GroundCombat,
                        3 => GamePhase::Landed,
                        4 => GamePhase::Crashed,
                        _ => GamePhase::Menu,
                    }),
                    Action::Clock(dt) => state.advance_clock(dt),
                }
                prop_assert!(state.score >= last_score);
                prop_assert!(state.ammo <= 30);
                prop_assert!(state.living_enemies().count() <= ENEMY_COUNT);
                last_score = state.score;
            }
        }
    }
}
