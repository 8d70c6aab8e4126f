//! Skydrop headless driver
//!
//! Flies one scripted attempt through the simulation and logs what happens.
//! Usage: `skydrop [seed|-] [level] [tuning.json]`
//!
//! Without a seed (or with `-`) every run builds a new random world.

use skydrop::consts::*;
use skydrop::sim::{GameContext, GameEvent, GamePhase, MovementKeys, PhaseRequest, TickInput, tick};
use skydrop::world::instance;
use skydrop::{Tuning, levels};

/// Wall-clock frame the scripted "display" runs at
const FRAME_DT: f32 = 1.0 / 30.0;
/// Give up after this much simulated time
const MAX_SECONDS: f32 = 600.0;

/// Drives the fixed-timestep loop the way a windowed frontend would
struct Driver {
    ctx: GameContext,
    input: TickInput,
    accumulator: f32,
}

impl Driver {
    fn new(ctx: GameContext) -> Self {
        Self {
            ctx,
            input: TickInput::default(),
            accumulator: 0.0,
        }
    }

    /// Run simulation ticks for one frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.ctx, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.clear_one_shots();
        }

        for event in self.ctx.state.drain_events() {
            log_event(&event);
        }
    }

    /// Scripted pilot: drop, scan, steer for the rings, open the canopy low,
    /// then clear the drones after landing
    fn script(&mut self) {
        let phase = self.ctx.state.phase;
        let position = self.ctx.controller.position();
        match phase {
            GamePhase::Menu => self.input.request = Some(PhaseRequest::InitiateDrop),
            GamePhase::Freefall | GamePhase::Parachute => {
                let next_ring = (0..RING_COUNT)
                    .find(|&i| !self.ctx.controller.rings().is_visited(i) && self.ctx.layout.rings[i].y < position.y);
                if let Some(i) = next_ring {
                    let to_ring = self.ctx.layout.rings[i] - position;
                    self.input.pointer.x = (to_ring.x * 0.05).clamp(-1.0, 1.0);
                    self.input.pointer.y = (-to_ring.z * 0.05).clamp(-1.0, 1.0);
                } else {
                    self.input.pointer = glam::Vec2::ZERO;
                }
                if !self.ctx.state.is_scanning && position.y > 2000.0 {
                    self.input.scan = true;
                }
                if phase == GamePhase::Freefall && position.y < 600.0 {
                    self.input.request = Some(PhaseRequest::DeployParachute);
                }
            }
            GamePhase::GroundCombat => {
                self.input.pointer = glam::Vec2::ZERO;
                self.input.keys = MovementKeys::default();
                self.aim_at_nearest_drone();
                if self.ctx.state.ammo == 0 {
                    self.input.reload = true;
                } else {
                    self.input.fire = true;
                }
            }
            GamePhase::Landed | GamePhase::Crashed => {}
        }
    }

    /// Turn the view toward the closest living drone
    fn aim_at_nearest_drone(&mut self) {
        let camera = self.ctx.controller.camera();
        let eye = camera.position;
        let Some(target) = self
            .ctx
            .state
            .living_enemies()
            .min_by(|a, b| a.position.distance_squared(eye).total_cmp(&b.position.distance_squared(eye)))
        else {
            return;
        };
        let dir = target.position - eye;
        let yaw = (-dir.x).atan2(-dir.z);
        let pitch = (dir.y / dir.length().max(f32::EPSILON)).asin();
        // look_delta is subtracted from the current yaw/pitch
        self.input.look_delta = glam::Vec2::new(
            skydrop::normalize_angle(camera.yaw - yaw),
            camera.pitch - pitch,
        );
    }

    fn finished(&self) -> bool {
        match self.ctx.state.phase {
            GamePhase::Crashed | GamePhase::Landed => true,
            GamePhase::GroundCombat => self.ctx.state.living_enemies().next().is_none(),
            _ => false,
        }
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PhaseChanged { from, to } => {
            log::info!("{} -> {}", from.as_str(), to.as_str())
        }
        GameEvent::RingCollected { total } => log::info!("Ring {}/{}", total, RING_COUNT),
        GameEvent::EnemyKilled { id } => log::info!("Drone {} destroyed", id),
        GameEvent::ScanStarted => log::debug!("Scan pulse"),
        GameEvent::WeaponFired { ammo_left } => log::trace!("Bang ({} left)", ammo_left),
        GameEvent::DryFire => log::debug!("Dry fire"),
        GameEvent::Reloaded => log::debug!("Reloaded"),
        GameEvent::LevelChanged { index } => log::info!("Level {}", index),
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());
    let level = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);
    let tuning = args
        .next()
        .map(|path| Tuning::load(std::path::Path::new(&path)))
        .unwrap_or_default();

    let Some(descriptor) = levels::try_get(level) else {
        log::error!("No level {} (catalog has {})", level, levels::count());
        std::process::exit(2);
    };
    log::info!(
        "Skydrop (headless) starting: seed {}, level {} {} ({})",
        seed.map_or_else(|| "random".to_string(), |s| s.to_string()),
        level,
        descriptor.name,
        descriptor.country
    );

    let mut ctx = match seed {
        Some(seed) => GameContext::with_tuning(seed, tuning),
        None => GameContext::from_entropy(tuning),
    };
    if level != 0 {
        ctx.state.current_level_index = level;
        ctx.enter_level();
    }
    let towers = instance::instances(&ctx.layout.structures.towers);
    log::debug!(
        "Tower instance buffer: {} instances, {} bytes",
        towers.len(),
        instance::as_bytes(&towers).len()
    );

    let mut driver = Driver::new(ctx);
    let mut elapsed = 0.0;
    while elapsed < MAX_SECONDS && !driver.finished() {
        driver.script();
        driver.update(FRAME_DT);
        elapsed += FRAME_DT;
    }

    let snap = driver.ctx.state.snapshot();
    log::info!(
        "Finished after {:.1}s: {} | score {} | rings {}/{} | drones {}/{} | ammo {}",
        elapsed,
        snap.phase.as_str(),
        snap.score,
        snap.rings_collected,
        RING_COUNT,
        snap.enemies_defeated,
        ENEMY_COUNT,
        snap.ammo
    );
}
