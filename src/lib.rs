//! Pet Guardians - a single-screen shapeshifter arcade shooter
//!
//! Core modules:
//! - `sim`: Headless simulation (movement, combat, waves, form-select menu)
//! - `renderer`: WebGPU presentation pass (procedural vector sprites)
//! - `platform`: Browser input folding into per-frame intents
//! - `audio`: Procedural sound cues over Web Audio
//! - `hud`: Whole-number HUD values and the end-of-run summary

pub mod audio;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod viewport;

pub use hud::{HudSnapshot, RunSummary};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Largest frame delta the simulation accepts (ms)
    pub const MAX_FRAME_DT_MS: f32 = 50.0;

    /// Default logical surface size (desktop cap)
    pub const DEFAULT_FIELD_WIDTH: f32 = 1024.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 768.0;
    /// Player keeps this far from the surface edges
    pub const FIELD_MARGIN: f32 = 25.0;

    /// Pool caps (oldest entries are trimmed first)
    pub const MAX_PROJECTILES: usize = 100;
    pub const MAX_PARTICLES: usize = 500;

    /// Invulnerability granted after taking a hit (ms)
    pub const INVULNERABILITY_MS: f32 = 1000.0;
    /// Enemy contact-damage distance
    pub const CONTACT_DISTANCE: f32 = 30.0;
    /// Enemy projectile vs player hit distance
    pub const PLAYER_HIT_DISTANCE: f32 = 20.0;
    /// Enemy contact cooldown after it lands a hit (ms)
    pub const ENEMY_HIT_COOLDOWN_MS: f32 = 1000.0;

    /// Player attack cooldown (ms); the fastest form reloads in half
    pub const ATTACK_COOLDOWN_MS: f32 = 300.0;
    pub const FAST_ATTACK_COOLDOWN_MS: f32 = 150.0;

    /// Pets orbit the player at this radius
    pub const PET_ORBIT_RADIUS: f32 = 60.0;
    /// Orbit angle advances one radian per this many ms of wall-clock time
    pub const PET_ORBIT_PERIOD_MS: f64 = 500.0;
    pub const PET_FIRE_RANGE: f32 = 150.0;
    pub const PET_SHOT_SPEED: f32 = 6.0;
    pub const PET_SHOT_LIFE: f32 = 20.0;
    pub const PET_SHOT_DAMAGE: u32 = 5;
    pub const PET_COOLDOWN_MS: f32 = 1000.0;

    /// Ranged enemies stop closing in once this near
    pub const RANGED_HOLD_DISTANCE: f32 = 200.0;
    pub const RANGED_SHOT_SPEED: f32 = 5.0;
    pub const RANGED_SHOT_LIFE: f32 = 30.0;
    pub const RANGED_SHOT_SIZE: f32 = 4.0;
    pub const RANGED_COOLDOWN_MS: f32 = 2000.0;

    /// Default projectile size when a shot does not set one
    pub const DEFAULT_SHOT_SIZE: f32 = 6.0;

    /// Wave spawner
    pub const MAX_WAVE_ENEMIES: u32 = 20;
    pub const SPAWN_EDGE_OFFSET: f32 = 30.0;
    pub const HP_PER_WAVE: u32 = 2;

    /// Pickups
    pub const PICKUP_CHANCE: f32 = 0.15;
    pub const PICKUP_HEAL: u32 = 20;
    pub const PICKUP_LIFE: u32 = 300;
    pub const PICKUP_RADIUS: f32 = 30.0;

    /// Particles
    pub const PARTICLE_LIFE: u32 = 30;
    pub const TEXT_PARTICLE_LIFE: u32 = 60;
    pub const PARTICLE_GRAVITY: f32 = 0.2;

    /// Form-select menu
    pub const MENU_DURATION_MS: f32 = 5000.0;
    pub const MENU_DEAD_ZONE: f32 = 20.0;
    pub const MENU_OUTSIDE_MARGIN: f32 = 20.0;
    pub const MENU_RADIUS_DESKTOP: f32 = 80.0;
    pub const MENU_RADIUS_TOUCH: f32 = 100.0;
    /// Desktop ring floats this far above the player
    pub const MENU_OFFSET_Y: f32 = 100.0;
    /// Countdown arc sits outside the ring by this much
    pub const MENU_TIMER_GAP: f32 = 15.0;
}

/// Angle (radians) of the direction from `from` to `to`
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Clamp a position into `[margin, size - margin]` on both axes
#[inline]
pub fn clamp_to_field(pos: Vec2, size: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        pos.x.min(size.x - margin).max(margin),
        pos.y.min(size.y - margin).max(margin),
    )
}
