//! Wave spawner
//!
//! Fires whenever the enemy list is empty: a batch of `min(wave + 2, 20)`
//! enemies enters from just outside the four surface edges.

use glam::Vec2;

use super::registry::EnemyKind;
use super::state::{Enemy, GameEvent, GameState};
use crate::consts::*;

/// Number of enemies in the batch spawned for `wave`
pub fn wave_size(wave: u32) -> u32 {
    (wave + 2).min(MAX_WAVE_ENEMIES)
}

/// Archetype for one spawn roll. Later thresholds override earlier ones, so
/// rarer kinds win when the roll is low enough and the wave has unlocked them.
pub fn pick_kind(wave: u32, roll: f32) -> EnemyKind {
    let mut kind = EnemyKind::Basic;
    if wave > 2 && roll < 0.3 {
        kind = EnemyKind::Fast;
    }
    if wave > 4 && roll < 0.2 {
        kind = EnemyKind::Tank;
    }
    if wave > 6 && roll < 0.15 {
        kind = EnemyKind::Ranged;
    }
    kind
}

/// Random point on one of the four edges, `SPAWN_EDGE_OFFSET` outside the field
fn edge_position(state: &mut GameState) -> Vec2 {
    let field = state.field;
    match state.roll_index(4) {
        0 => Vec2::new(state.roll() * field.x, -SPAWN_EDGE_OFFSET),
        1 => Vec2::new(field.x + SPAWN_EDGE_OFFSET, state.roll() * field.y),
        2 => Vec2::new(state.roll() * field.x, field.y + SPAWN_EDGE_OFFSET),
        _ => Vec2::new(-SPAWN_EDGE_OFFSET, state.roll() * field.y),
    }
}

/// Spawn the next wave and advance the wave counter
pub fn generate_wave(state: &mut GameState) {
    let wave = state.wave;
    let count = wave_size(wave);

    for _ in 0..count {
        let roll = state.roll();
        let kind = pick_kind(wave, roll);
        let pos = edge_position(state);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, kind, pos, wave));
    }

    log::info!("Wave {} spawned: {} enemies", wave, count);
    state.events.push(GameEvent::WaveSpawned { wave, count });
    state.wave += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Layout;

    fn state() -> GameState {
        GameState::new(42, Vec2::new(800.0, 600.0), Layout::Desktop)
    }

    #[test]
    fn test_wave_size_caps_at_twenty() {
        assert_eq!(wave_size(1), 3);
        assert_eq!(wave_size(10), 12);
        assert_eq!(wave_size(18), 20);
        assert_eq!(wave_size(500), 20);
    }

    #[test]
    fn test_kind_unlocks() {
        assert_eq!(pick_kind(2, 0.0), EnemyKind::Basic);
        assert_eq!(pick_kind(3, 0.25), EnemyKind::Fast);
        assert_eq!(pick_kind(4, 0.1), EnemyKind::Fast);
        assert_eq!(pick_kind(5, 0.1), EnemyKind::Tank);
        assert_eq!(pick_kind(6, 0.1), EnemyKind::Tank);
        assert_eq!(pick_kind(7, 0.1), EnemyKind::Ranged);
        assert_eq!(pick_kind(7, 0.18), EnemyKind::Tank);
        assert_eq!(pick_kind(7, 0.5), EnemyKind::Basic);
    }

    #[test]
    fn test_generate_wave_spawns_outside_and_increments() {
        let mut s = state();
        generate_wave(&mut s);
        assert_eq!(s.wave, 2);
        assert_eq!(s.enemies.len(), 3);
        for e in &s.enemies {
            let outside = e.pos.x < 0.0 || e.pos.y < 0.0 || e.pos.x > 800.0 || e.pos.y > 600.0;
            assert!(outside, "enemy spawned inside at {:?}", e.pos);
            assert_eq!(e.hp, e.kind.stats().hp + 2);
        }
        assert_eq!(
            s.events,
            vec![GameEvent::WaveSpawned { wave: 1, count: 3 }]
        );
    }

    #[test]
    fn test_unique_enemy_ids() {
        let mut s = state();
        s.wave = 30;
        generate_wave(&mut s);
        let mut ids: Vec<u32> = s.enemies.iter().map(|e| e.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }
}
