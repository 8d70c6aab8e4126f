//! Per-frame simulation tick
//!
//! One call per frame (or per fixed substep). Order matters: timers expire
//! before input is applied, the camera settles before a shot is traced.

use super::context::GameContext;
use super::input::TickInput;
use super::state::GamePhase;
use crate::combat;

/// Advance the whole session by `dt` seconds
pub fn tick(ctx: &mut GameContext, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);
    ctx.state.advance_clock(dt as f64);

    if let Some(request) = input.request {
        ctx.apply_request(request);
    }

    ctx.controller.update(
        &mut ctx.state,
        input,
        &ctx.layout.rings,
        &ctx.tuning,
        dt,
    );

    if ctx.state.phase == GamePhase::GroundCombat {
        if input.reload {
            ctx.state.reload_weapon();
        }
        if input.fire {
            combat::fire(
                &mut ctx.state,
                ctx.controller.camera(),
                &mut ctx.targets,
                &mut ctx.effects,
                &ctx.tuning.combat,
            );
        }
    }

    ctx.effects.update(
        ctx.controller.camera().position,
        ctx.state.time_secs,
        dt,
        ctx.tuning.combat.projectile_range,
    );

    ctx.layout.wireframe = ctx.state.is_scanning;
    ctx.layout.advance(dt);
}
