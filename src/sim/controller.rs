//! Motion & phase controller
//!
//! Sole owner of the player's position and velocity. Integrates skydive and
//! first-person ground physics, tests rings, and drives phase transitions
//! through the state store.

use glam::Vec3;

use super::camera::CameraRig;
use super::input::{PhaseRequest, TickInput};
use super::rings::RingTracker;
use super::state::{GamePhase, GameState};
use crate::consts::{DROP_ALTITUDE, MENU_ALTITUDE, RING_COUNT};
use crate::ease_factor;
use crate::tuning::{GroundTuning, SkydiveTuning, Tuning};

/// How a skydive ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touchdown {
    Soft,
    Crash,
}

#[derive(Debug, Clone)]
pub struct MotionController {
    position: Vec3,
    velocity: Vec3,
    rings: RingTracker,
    camera: CameraRig,
    /// Sliding (crouched) in ground combat
    crouching: bool,
    /// Slide key state last tick, for edge detection
    slide_held: bool,
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionController {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, MENU_ALTITUDE, 0.0),
            velocity: Vec3::ZERO,
            rings: RingTracker::default(),
            camera: CameraRig::default(),
            crouching: false,
            slide_held: false,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn rings(&self) -> &RingTracker {
        &self.rings
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    /// Teleport the player (scripted starts, replays)
    pub fn place(&mut self, position: Vec3, velocity: Vec3) {
        self.position = position;
        self.velocity = velocity;
    }

    /// Apply a UI phase request. Returns whether it was accepted.
    pub fn handle_request(
        &mut self,
        state: &mut GameState,
        request: PhaseRequest,
        tuning: &Tuning,
    ) -> bool {
        match request {
            PhaseRequest::InitiateDrop => {
                if state.phase != GamePhase::Menu {
                    log::warn!("Drop requested outside the menu ({})", state.phase.as_str());
                    return false;
                }
                self.position = Vec3::new(0.0, DROP_ALTITUDE, 0.0);
                self.velocity = Vec3::ZERO;
                self.rings.clear();
                self.camera.snap_to_skydiver(self.position, false);
                state.publish_flight(self.position, self.velocity);
                state.set_phase(GamePhase::Freefall);
                true
            }
            PhaseRequest::DeployParachute => {
                if state.phase != GamePhase::Freefall {
                    log::warn!("Parachute requested in {}", state.phase.as_str());
                    return false;
                }
                // Same rounding as the published altitude
                let altitude = self.position.y.max(0.0).round();
                if altitude >= tuning.skydive.parachute_ceiling {
                    log::warn!(
                        "Parachute requested too high ({:.0} >= {:.0})",
                        altitude,
                        tuning.skydive.parachute_ceiling
                    );
                    return false;
                }
                state.set_phase(GamePhase::Parachute);
                true
            }
            PhaseRequest::Reset => {
                state.reset();
                self.reset_attempt();
                true
            }
            PhaseRequest::NextLevel => {
                state.next_level();
                self.reset_attempt();
                true
            }
        }
    }

    fn reset_attempt(&mut self) {
        self.position = Vec3::new(0.0, MENU_ALTITUDE, 0.0);
        self.velocity = Vec3::ZERO;
        self.rings.clear();
        self.crouching = false;
        self.slide_held = false;
    }

    /// Advance one frame in the current phase
    pub fn update(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        rings: &[Vec3; RING_COUNT],
        tuning: &Tuning,
        dt: f32,
    ) {
        match state.phase {
            GamePhase::Menu => self.update_menu(state),
            GamePhase::Freefall | GamePhase::Parachute => {
                if input.scan {
                    state.trigger_scan();
                }
                self.update_skydive(state, input, rings, &tuning.skydive, dt);
            }
            GamePhase::GroundCombat => self.update_ground(state, input, &tuning.ground, dt),
            GamePhase::Landed | GamePhase::Crashed => {}
        }
    }

    fn update_menu(&mut self, state: &GameState) {
        let t = state.time_secs as f32;
        self.position = Vec3::new(0.0, MENU_ALTITUDE + (t * 0.5).sin() * 0.5, 0.0);
        self.velocity = Vec3::ZERO;
        self.camera.snap_to_skydiver(self.position, false);
    }

    fn update_skydive(
        &mut self,
        state: &mut GameState,
        input: &TickInput,
        rings: &[Vec3; RING_COUNT],
        tuning: &SkydiveTuning,
        dt: f32,
    ) {
        let parachute = state.phase == GamePhase::Parachute;
        let (drag, authority) = if parachute {
            (tuning.parachute_drag, tuning.parachute_authority)
        } else {
            (tuning.freefall_drag, tuning.freefall_authority)
        };

        self.velocity.y += tuning.gravity * dt;
        self.velocity.y -= self.velocity.y * drag * dt;

        // Pointer up (negative y) steers away from the camera
        let steer = input.steering();
        let k = ease_factor(tuning.steering_rate, dt);
        self.velocity.x += (steer.x * authority - self.velocity.x) * k;
        self.velocity.z += (-steer.y * authority - self.velocity.z) * k;

        self.position += self.velocity * dt;
        state.publish_flight(self.position, self.velocity);

        for index in self.rings.collect(self.position, rings) {
            log::debug!("Ring {} passed at {:.0}", index, self.position.y);
            state.increment_rings();
            if !parachute {
                self.velocity.y -= tuning.ring_kick;
            }
        }

        if let Some(touchdown) = self.check_touchdown(state, tuning) {
            log::info!("Touchdown: {:?}", touchdown);
            return;
        }

        self.camera
            .follow_skydiver(self.position, self.velocity, parachute, tuning, dt);
    }

    /// Landing test, only while descending
    fn check_touchdown(&mut self, state: &mut GameState, tuning: &SkydiveTuning) -> Option<Touchdown> {
        if self.position.y > tuning.landing_height || self.velocity.y >= 0.0 {
            return None;
        }
        if self.velocity.y.abs() > tuning.crash_speed {
            state.set_phase(GamePhase::Crashed);
            return Some(Touchdown::Crash);
        }
        self.position.y = tuning.ground_snap;
        self.velocity = Vec3::ZERO;
        self.crouching = false;
        self.slide_held = false;
        state.set_sliding(false);
        state.set_phase(GamePhase::GroundCombat);
        self.camera.pitch = 0.0;
        Some(Touchdown::Soft)
    }

    fn update_ground(&mut self, state: &mut GameState, input: &TickInput, tuning: &GroundTuning, dt: f32) {
        let keys = input.keys;

        // Slide starts on the press, and only while moving
        if keys.slide && !self.slide_held && !self.crouching && keys.any_direction() {
            self.crouching = true;
            state.set_sliding(true);
            self.velocity *= tuning.slide_boost;
        } else if !keys.slide && self.crouching {
            self.crouching = false;
            state.set_sliding(false);
        }
        self.slide_held = keys.slide;

        self.camera
            .apply_look(input.look_delta.x, input.look_delta.y, tuning.max_pitch);

        let damping = if self.crouching {
            tuning.slide_damping
        } else {
            tuning.damping
        };
        let decay = ease_factor(damping, dt);
        self.velocity.x -= self.velocity.x * decay;
        self.velocity.z -= self.velocity.z * decay;
        self.velocity.y = 0.0;

        if keys.any_direction() && !self.crouching {
            let (fwd, side) = keys.axes();
            let wish = self.camera.flat_forward() * fwd + self.camera.flat_right() * side;
            let speed = if keys.sprint {
                tuning.sprint_speed
            } else {
                tuning.walk_speed
            };
            self.velocity += wish.normalize_or_zero() * speed * dt;
        }

        self.position += self.velocity * dt;
        if self.position.y < tuning.floor_height {
            self.position.y = tuning.floor_height;
        }

        self.camera
            .follow_ground(self.position, self.crouching, tuning, dt);
    }
}
