//! Targeting, attack patterns and radius collision
//!
//! All collision is centre-to-centre distance against a threshold; there is
//! no shape precision beyond that.

use glam::Vec2;

use super::registry::Form;
use super::state::{Enemy, Owner, Projectile};
use crate::consts::*;
use crate::unit_from_angle;

/// Heatblast fan spread between adjacent shots (radians)
const SPREAD_STEP: f32 = 0.2;

/// True when `a` and `b` are strictly closer than `threshold`
#[inline]
pub fn within(a: Vec2, b: Vec2, threshold: f32) -> bool {
    a.distance(b) < threshold
}

/// Index of the enemy closest to `from`, optionally limited to `max_range`
pub fn nearest_enemy(enemies: &[Enemy], from: Vec2, max_range: Option<f32>) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .map(|(i, e)| (i, e.pos.distance(from)))
        .filter(|&(_, d)| max_range.is_none_or(|r| d < r))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

/// Reload time after an attack by `form`
pub fn attack_cooldown(form: Form) -> f32 {
    match form {
        Form::Xlr8 => FAST_ATTACK_COOLDOWN_MS,
        _ => ATTACK_COOLDOWN_MS,
    }
}

/// Projectiles produced by one attack from `origin` aimed along `angle`.
/// Lifetime is range / speed so every shot travels about the form's range.
pub fn attack_pattern(form: Form, origin: Vec2, angle: f32) -> Vec<Projectile> {
    let stats = form.stats();
    let shot = |angle: f32, speed: f32, size: f32, color: u32| Projectile {
        pos: origin,
        vel: unit_from_angle(angle) * speed,
        life: stats.range / speed,
        damage: stats.attack,
        color,
        size,
        owner: Owner::Player,
    };

    match form {
        Form::Heatblast => [-1.0, 0.0, 1.0]
            .iter()
            .map(|k| shot(angle + k * SPREAD_STEP, 8.0, 8.0, 0xff5500))
            .collect(),
        Form::Cannonbolt => vec![shot(angle, 6.0, 15.0, stats.color)],
        _ => vec![shot(angle, 10.0, DEFAULT_SHOT_SIZE, stats.color)],
    }
}

/// Straight shot fired by a pet
pub fn pet_shot(origin: Vec2, angle: f32, color: u32) -> Projectile {
    Projectile {
        pos: origin,
        vel: unit_from_angle(angle) * PET_SHOT_SPEED,
        life: PET_SHOT_LIFE,
        damage: PET_SHOT_DAMAGE,
        color,
        size: DEFAULT_SHOT_SIZE,
        owner: Owner::Pet,
    }
}

/// Shot fired by a ranged enemy at the player
pub fn enemy_shot(origin: Vec2, angle: f32, damage: u32) -> Projectile {
    Projectile {
        pos: origin,
        vel: unit_from_angle(angle) * RANGED_SHOT_SPEED,
        life: RANGED_SHOT_LIFE,
        damage,
        color: 0xff8888,
        size: RANGED_SHOT_SIZE,
        owner: Owner::Enemy,
    }
}
