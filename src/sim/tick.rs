//! Per-frame simulation step
//!
//! One `tick` per display frame. Movement and lifetimes are per-frame;
//! cooldowns and timers count down by the (clamped) elapsed milliseconds.

use std::f64::consts::TAU;

use glam::Vec2;

use super::combat::{attack_cooldown, attack_pattern, enemy_shot, nearest_enemy, pet_shot, within};
use super::menu::{Ring, RingRegion};
use super::registry::{EnemyKind, Form};
use super::spawner::generate_wave;
use super::state::{GameEvent, GamePhase, GameState, Layout, PickupKind};
use crate::consts::*;
use crate::{angle_between, clamp_to_field, unit_from_angle};

/// Input intents for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Wall-clock timestamp of the frame (ms); drives the pet orbit
    pub time_ms: f64,
    /// Directional keys (WASD / arrows)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Virtual joystick vector, overrides the directional keys when present
    pub joystick: Option<Vec2>,
    /// Pointer position in surface coordinates
    pub pointer: Vec2,
    /// Primary pointer button held
    pub pointer_down: bool,
    /// Primary pointer pressed (click/tap) since the previous frame
    pub pointer_pressed: bool,
    /// Spacebar or the on-screen attack control
    pub attack: bool,
    /// Toggle the form-select menu
    pub toggle_menu: bool,
    /// Digit shortcut (0-based) while the menu is open
    pub quick_select: Option<usize>,
}

impl TickInput {
    /// Unit-or-shorter movement direction for this frame
    pub fn movement(&self) -> Vec2 {
        if let Some(stick) = self.joystick {
            return stick.clamp_length_max(1.0);
        }
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }

    fn wants_attack(&self) -> bool {
        self.pointer_down || self.attack
    }
}

/// Clamp a raw frame delta into the accepted range
pub fn clamp_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_FRAME_DT_MS)
    } else {
        0.0
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f32) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let dt = clamp_dt(dt_ms);
    state.steps += 1;

    update_timers(state, input, dt);
    move_player(state, input);
    update_pets(state, input, dt);
    player_attack(state, input, dt);
    menu_selection(state, input);
    advance_transients(state);

    if state.enemies.is_empty() {
        generate_wave(state);
    }

    for i in 0..state.enemies.len() {
        update_enemy(state, i, dt);
    }

    resolve_projectile_hits(state);
    state.enemies.retain(|e| !e.is_dead());
    state.enforce_pool_caps();

    if state.player.hp == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} at wave {}",
            state.player.score,
            state.wave
        );
        state.events.push(GameEvent::GameOver {
            score: state.player.score,
            wave: state.wave,
        });
    }
}

fn update_timers(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    player.invulnerable_ms = (player.invulnerable_ms - dt).max(0.0);

    if input.toggle_menu {
        let open = state.menu.toggle();
        state.events.push(if open {
            GameEvent::MenuOpened
        } else {
            GameEvent::MenuClosed
        });
    }
    if state.menu.update(dt) {
        log::debug!("Form menu timed out");
        state.events.push(GameEvent::MenuClosed);
    }
}

fn move_player(state: &mut GameState, input: &TickInput) {
    let dir = input.movement();
    let player = &mut state.player;
    let step = dir * player.speed();
    player.pos = clamp_to_field(player.pos + step, state.field, FIELD_MARGIN);
    player.moving = dir != Vec2::ZERO;
    if dir.x != 0.0 {
        player.facing = dir.x.signum();
    }
}

fn update_pets(state: &mut GameState, input: &TickInput, dt: f32) {
    let count = state.player.pets.len();
    let center = state.player.pos;

    for i in 0..count {
        let angle = (input.time_ms / PET_ORBIT_PERIOD_MS + i as f64 * TAU / count as f64)
            .rem_euclid(TAU) as f32;
        let pet = &mut state.player.pets[i];
        pet.pos = center + unit_from_angle(angle) * PET_ORBIT_RADIUS;
        pet.cooldown_ms = (pet.cooldown_ms - dt).max(0.0);

        if pet.cooldown_ms > 0.0 {
            continue;
        }
        let Some(target) = nearest_enemy(&state.enemies, pet.pos, Some(PET_FIRE_RANGE)) else {
            continue;
        };
        let aim = angle_between(pet.pos, state.enemies[target].pos);
        state.projectiles.push(pet_shot(pet.pos, aim, pet.kind.color()));
        pet.cooldown_ms = PET_COOLDOWN_MS;
        log::trace!("{:?} fired at enemy {}", pet.kind, state.enemies[target].id);
    }
}

fn player_attack(state: &mut GameState, input: &TickInput, dt: f32) {
    let player = &mut state.player;
    player.attack_cooldown_ms = (player.attack_cooldown_ms - dt).max(0.0);

    if !input.wants_attack() || state.menu.open || player.attack_cooldown_ms > 0.0 {
        return;
    }

    // Touch layouts have no free pointer to aim with
    let target = match state.layout {
        Layout::Touch => nearest_enemy(&state.enemies, player.pos, None)
            .map(|i| state.enemies[i].pos)
            .unwrap_or(input.pointer),
        Layout::Desktop => input.pointer,
    };
    let aim = angle_between(player.pos, target);

    state
        .projectiles
        .extend(attack_pattern(player.form, player.pos, aim));
    player.attack_cooldown_ms = attack_cooldown(player.form);
    state.events.push(GameEvent::AttackFired { form: player.form });
}

fn menu_selection(state: &mut GameState, input: &TickInput) {
    if !state.menu.open {
        return;
    }

    let choice = if let Some(index) = input.quick_select {
        Some(index)
    } else if input.pointer_down || input.pointer_pressed {
        let ring = Ring::for_layout(state.layout, state.player.pos, state.field);
        match ring.region(input.pointer, Form::ALL.len()) {
            RingRegion::Wedge(index) => Some(index),
            RingRegion::Outside if input.pointer_pressed => {
                state.menu.close();
                state.events.push(GameEvent::MenuClosed);
                None
            }
            _ => None,
        }
    } else {
        None
    };

    if let Some(form) = choice.and_then(Form::from_index) {
        select_form(state, form);
    }
}

/// Switch the player into `form` and close the menu
pub fn select_form(state: &mut GameState, form: Form) {
    if form != state.player.form {
        state.player.transform(form);
        let pos = state.player.pos;
        state.burst(pos, form.stats().color, 20);
        state.events.push(GameEvent::Transformed { form });
        log::info!("Transformed into {}", form.as_str());
    }
    state.menu.close();
    state.events.push(GameEvent::MenuClosed);
}

fn advance_transients(state: &mut GameState) {
    let field = state.field;
    state.projectiles.retain_mut(|p| {
        p.pos += p.vel;
        p.life -= 1.0;
        !p.is_spent() && p.pos.x > 0.0 && p.pos.x < field.x && p.pos.y > 0.0 && p.pos.y < field.y
    });

    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life = p.life.saturating_sub(1);
        p.life > 0
    });

    state.enforce_pool_caps();

    let player_pos = state.player.pos;
    let mut collected = Vec::new();
    state.pickups.retain_mut(|p| {
        p.life = p.life.saturating_sub(1);
        if within(p.pos, player_pos, PICKUP_RADIUS) {
            collected.push(p.clone());
            return false;
        }
        p.life > 0
    });

    for pickup in collected {
        match pickup.kind {
            PickupKind::Health => {
                state.player.heal(pickup.value);
                state.burst(pickup.pos, 0x00ff00, 15);
            }
        }
        log::debug!("Picked up {:?} (+{})", pickup.kind, pickup.value);
        state.events.push(GameEvent::PickupCollected {
            kind: pickup.kind,
            value: pickup.value,
        });
    }
}

fn update_enemy(state: &mut GameState, index: usize, dt: f32) {
    let player_pos = state.player.pos;
    let enemy = &mut state.enemies[index];
    let stats = enemy.kind.stats();

    enemy.hit_cooldown_ms = (enemy.hit_cooldown_ms - dt).max(0.0);
    enemy.shot_cooldown_ms = (enemy.shot_cooldown_ms - dt).max(0.0);

    // Ranged enemies hold their distance once close enough
    let holds = enemy.kind == EnemyKind::Ranged && enemy.pos.distance(player_pos) <= RANGED_HOLD_DISTANCE;
    if !holds {
        enemy.pos += unit_from_angle(angle_between(enemy.pos, player_pos)) * stats.speed;
    }

    let pos = enemy.pos;
    if let Some(range) = stats.range {
        if enemy.shot_cooldown_ms <= 0.0 && within(pos, player_pos, range) {
            enemy.shot_cooldown_ms = RANGED_COOLDOWN_MS;
            let aim = angle_between(pos, player_pos);
            state.projectiles.push(enemy_shot(pos, aim, stats.attack));
        }
    }

    let enemy = &mut state.enemies[index];
    if within(pos, player_pos, CONTACT_DISTANCE)
        && enemy.hit_cooldown_ms <= 0.0
        && !state.player.is_invulnerable()
    {
        enemy.hit_cooldown_ms = ENEMY_HIT_COOLDOWN_MS;
        state.player.take_hit(stats.attack);
        state.burst(player_pos, 0xff0000, 10);
        state.events.push(GameEvent::PlayerHurt {
            damage: stats.attack,
        });
    }
}

fn resolve_projectile_hits(state: &mut GameState) {
    for pi in 0..state.projectiles.len() {
        let shot = state.projectiles[pi];
        if shot.is_spent() {
            continue;
        }

        if shot.owner.is_hostile() {
            let player_pos = state.player.pos;
            if within(shot.pos, player_pos, PLAYER_HIT_DISTANCE) && !state.player.is_invulnerable() {
                state.projectiles[pi].life = 0.0;
                state.player.take_hit(shot.damage);
                state.burst(player_pos, 0xff0000, 10);
                state.events.push(GameEvent::PlayerHurt {
                    damage: shot.damage,
                });
            }
            continue;
        }

        let Some(ei) = state
            .enemies
            .iter()
            .position(|e| within(shot.pos, e.pos, e.radius() + shot.size / 2.0))
        else {
            continue;
        };

        state.projectiles[pi].life = 0.0;
        let enemy = &mut state.enemies[ei];
        let was_alive = !enemy.is_dead();
        enemy.hp = enemy.hp.saturating_sub(shot.damage);
        let killed = was_alive && enemy.is_dead();
        let (pos, kind) = (enemy.pos, enemy.kind);
        let stats = kind.stats();

        state.burst(pos, stats.color, 5);
        state.events.push(GameEvent::EnemyHit { pos });

        if killed {
            let points = stats.score * u64::from(state.wave);
            state.player.score += points;
            state.burst(pos, stats.color, 15);
            if state.maybe_spawn_pickup(pos) {
                log::debug!("Health pickup dropped at ({:.0}, {:.0})", pos.x, pos.y);
            }
            state.score_popup(pos, points);
            state.events.push(GameEvent::EnemyKilled { kind, points });
        }
    }

    state.projectiles.retain(|p| !p.is_spent());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::menu::wedge_center_angle;
    use crate::sim::state::{Enemy, Owner, Projectile};
    use proptest::prelude::*;

    const FRAME: f32 = 16.0;

    fn state() -> GameState {
        GameState::new(12345, Vec2::new(800.0, 600.0), Layout::Desktop)
    }

    /// Keep pets quiet so damage numbers stay exact
    fn silence_pets(state: &mut GameState) {
        for pet in &mut state.player.pets {
            pet.cooldown_ms = f32::MAX;
        }
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut s = state();
        s.player.invulnerable_ms = 500.0;
        tick(&mut s, &TickInput::default(), 1000.0);
        assert_eq!(s.player.invulnerable_ms, 450.0);
        tick(&mut s, &TickInput::default(), -20.0);
        assert_eq!(s.player.invulnerable_ms, 450.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
    }

    #[test]
    fn test_first_tick_spawns_wave() {
        let mut s = state();
        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.wave, 2);
        assert_eq!(s.enemies.len(), 3);
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut s = state();
        let input = TickInput {
            up: true,
            right: true,
            ..Default::default()
        };
        let before = s.player.pos;
        tick(&mut s, &input, FRAME);
        let moved = s.player.pos - before;
        assert!((moved.length() - 4.0).abs() < 1e-4);
        assert_eq!(s.player.facing, 1.0);
        assert!(s.player.moving);
    }

    #[test]
    fn test_joystick_overrides_keys() {
        let mut s = state();
        let input = TickInput {
            right: true,
            joystick: Some(Vec2::new(-0.5, 0.0)),
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        assert!((s.player.pos.x - 398.0).abs() < 1e-4);
        assert_eq!(s.player.facing, -1.0);
    }

    #[test]
    fn test_three_hits_kill_basic() {
        let mut s = state();
        silence_pets(&mut s);
        let id = s.next_entity_id();
        let mut enemy = Enemy::new(id, EnemyKind::Basic, Vec2::new(500.0, 300.0), 0);
        enemy.hp = 30;
        enemy.max_hp = 30;
        s.enemies.push(enemy);

        let mut hits = Vec::new();
        for frame in 0..200 {
            let target = s.enemies.first().map(|e| e.pos).unwrap_or(Vec2::ZERO);
            let input = TickInput {
                time_ms: frame as f64 * 16.0,
                pointer: target,
                pointer_down: true,
                ..Default::default()
            };
            let before = s.enemies.first().map(|e| e.hp);
            tick(&mut s, &input, FRAME);
            let after = s.enemies.iter().find(|e| e.id == id).map(|e| e.hp);
            if before != after {
                hits.push(after);
            }
            if after.is_none() {
                break;
            }
        }

        assert_eq!(hits, vec![Some(20), Some(10), None]);
        assert_eq!(s.player.score, 10);
        assert!(s.events.contains(&GameEvent::EnemyKilled {
            kind: EnemyKind::Basic,
            points: 10
        }));
        assert!(s.particles.iter().any(|p| p.text.as_deref() == Some("+10")));
    }

    #[test]
    fn test_menu_times_out() {
        let mut s = state();
        let open = TickInput {
            toggle_menu: true,
            ..Default::default()
        };
        tick(&mut s, &open, 0.0);
        assert!(s.menu.open);
        assert_eq!(s.menu.timer_ms, MENU_DURATION_MS);

        for _ in 0..100 {
            tick(&mut s, &TickInput::default(), 50.0);
        }
        assert!(!s.menu.open);
        assert_eq!(s.menu.timer_ms, 0.0);
    }

    #[test]
    fn test_lethal_contact_ends_run() {
        let mut s = state();
        s.player.hp = 5;
        let id = s.next_entity_id();
        let pos = s.player.pos;
        s.enemies.push(Enemy::new(id, EnemyKind::Basic, pos, 1));

        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.player.hp, 0);
        assert_eq!(s.player.invulnerable_ms, INVULNERABILITY_MS);
        assert!(s.is_game_over());
        assert!(matches!(s.events.last(), Some(GameEvent::GameOver { .. })));

        // Terminal: later ticks change nothing
        let steps = s.steps;
        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.steps, steps);
    }

    #[test]
    fn test_contact_damage_waits_for_both_cooldowns() {
        let mut s = state();
        silence_pets(&mut s);
        let pos = s.player.pos;
        for _ in 0..2 {
            let id = s.next_entity_id();
            s.enemies.push(Enemy::new(id, EnemyKind::Basic, pos, 1));
        }

        let mut hit_frames = Vec::new();
        let mut hp = s.player.hp;
        for frame in 0..71u32 {
            tick(&mut s, &TickInput::default(), FRAME);
            if s.player.hp < hp {
                hit_frames.push(frame);
                hp = s.player.hp;
            }
        }

        // Two overlapping enemies, yet one hit per invulnerability window
        assert_eq!(s.player.hp, 80);
        assert_eq!(hit_frames.len(), 2);
        assert_eq!(hit_frames[0], 0);
        let gap_ms = (hit_frames[1] - hit_frames[0]) as f32 * FRAME;
        assert!(gap_ms >= INVULNERABILITY_MS);
        assert!(gap_ms >= ENEMY_HIT_COOLDOWN_MS);
        assert_eq!(s.enemies.len(), 2);
    }

    #[test]
    fn test_wedge_click_selects_form() {
        let mut s = state();
        s.menu.open();
        let ring = Ring::for_layout(Layout::Desktop, s.player.pos, s.field);
        let pointer = ring.center + unit_from_angle(wedge_center_angle(2, 5)) * 50.0;
        let input = TickInput {
            pointer,
            pointer_pressed: true,
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        assert_eq!(s.player.form, Form::ALL[2]);
        assert_eq!(s.player.max_hp, 180);
        assert_eq!(s.player.hp, 100);
        assert!(!s.menu.open);
        assert!(s.events.contains(&GameEvent::Transformed { form: Form::FourArms }));
    }

    #[test]
    fn test_quick_select_clamps_hp() {
        let mut s = state();
        s.menu.open();
        let input = TickInput {
            quick_select: Some(3),
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        assert_eq!(s.player.form, Form::Xlr8);
        assert_eq!((s.player.hp, s.player.max_hp), (80, 80));
        assert!(!s.menu.open);
    }

    #[test]
    fn test_quick_select_ignored_when_closed() {
        let mut s = state();
        let input = TickInput {
            quick_select: Some(1),
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        assert_eq!(s.player.form, Form::Ben);
    }

    #[test]
    fn test_click_outside_ring_closes_menu() {
        let mut s = state();
        s.menu.open();
        let input = TickInput {
            pointer: Vec2::new(790.0, 590.0),
            pointer_pressed: true,
            pointer_down: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        assert!(!s.menu.open);
        assert_eq!(s.player.form, Form::Ben);
        // Menu swallowed the click
        assert!(s.projectiles.iter().all(|p| p.owner != Owner::Player));
    }

    #[test]
    fn test_dead_zone_click_keeps_menu_open() {
        let mut s = state();
        s.menu.open();
        let ring = Ring::for_layout(Layout::Desktop, s.player.pos, s.field);
        let input = TickInput {
            pointer: ring.center + Vec2::new(5.0, 0.0),
            pointer_pressed: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        assert!(s.menu.open);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut s = state();
        silence_pets(&mut s);
        let input = TickInput {
            pointer: Vec2::new(700.0, 300.0),
            attack: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        let fired = s.projectiles.iter().filter(|p| p.owner == Owner::Player).count();
        assert_eq!(fired, 1);
        assert_eq!(s.player.attack_cooldown_ms, ATTACK_COOLDOWN_MS);
        tick(&mut s, &input, FRAME);
        let fired = s.projectiles.iter().filter(|p| p.owner == Owner::Player).count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_touch_layout_auto_aims() {
        let mut s = GameState::new(1, Vec2::new(800.0, 600.0), Layout::Touch);
        silence_pets(&mut s);
        let id = s.next_entity_id();
        s.enemies.push(Enemy::new(id, EnemyKind::Tank, Vec2::new(400.0, 500.0), 1));
        let input = TickInput {
            pointer: Vec2::new(0.0, 0.0),
            attack: true,
            ..Default::default()
        };
        tick(&mut s, &input, FRAME);
        let shot = s
            .projectiles
            .iter()
            .find(|p| p.owner == Owner::Player)
            .copied();
        let shot = shot.map(|p| p.vel);
        assert!(matches!(shot, Some(v) if v.y > 9.9 && v.x.abs() < 1e-3));
    }

    #[test]
    fn test_pets_fire_at_enemy_in_range() {
        let mut s = state();
        let id = s.next_entity_id();
        s.enemies.push(Enemy::new(id, EnemyKind::Tank, Vec2::new(400.0, 340.0), 1));
        tick(&mut s, &TickInput::default(), FRAME);
        let pet_shots = s.projectiles.iter().filter(|p| p.owner == Owner::Pet).count();
        assert_eq!(pet_shots, 3);
        assert!(s.player.pets.iter().all(|p| p.cooldown_ms == PET_COOLDOWN_MS));
        for pet in &s.player.pets {
            assert!((pet.pos.distance(s.player.pos) - PET_ORBIT_RADIUS).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ranged_enemy_holds_and_fires() {
        let mut s = state();
        silence_pets(&mut s);
        let id = s.next_entity_id();
        let start = Vec2::new(400.0, 180.0);
        s.enemies.push(Enemy::new(id, EnemyKind::Ranged, start, 1));
        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.enemies[0].pos, start);
        assert_eq!(s.enemies[0].shot_cooldown_ms, RANGED_COOLDOWN_MS);
        let hostile = s.projectiles.iter().filter(|p| p.owner.is_hostile()).count();
        assert_eq!(hostile, 1);
    }

    #[test]
    fn test_enemy_shot_hits_player_once_per_window() {
        let mut s = state();
        silence_pets(&mut s);
        let id = s.next_entity_id();
        s.enemies.push(Enemy::new(id, EnemyKind::Tank, Vec2::new(50.0, 50.0), 1));
        let pos = s.player.pos;
        for _ in 0..2 {
            s.projectiles.push(Projectile {
                pos: pos - Vec2::new(5.0, 0.0),
                vel: Vec2::new(1.0, 0.0),
                life: 10.0,
                damage: 12,
                color: 0xff8888,
                size: 4.0,
                owner: Owner::Enemy,
            });
        }
        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.player.hp, 88);
        assert!(s.player.is_invulnerable());
        // Second shot arrived during invulnerability and flies on
        assert_eq!(s.projectiles.iter().filter(|p| p.owner.is_hostile()).count(), 1);
    }

    #[test]
    fn test_overkill_awards_once() {
        let mut s = state();
        silence_pets(&mut s);
        let id = s.next_entity_id();
        let at = Vec2::new(600.0, 300.0);
        s.enemies.push(Enemy::new(id, EnemyKind::Fast, at, 0));
        for _ in 0..3 {
            s.projectiles.push(Projectile {
                pos: at - Vec2::new(1.0, 0.0),
                vel: Vec2::new(1.0, 0.0),
                life: 5.0,
                damage: 30,
                color: 0,
                size: 6.0,
                owner: Owner::Player,
            });
        }
        tick(&mut s, &TickInput::default(), FRAME);
        let hits = s.events.iter().filter(|e| matches!(e, GameEvent::EnemyHit { .. })).count();
        let kills = s.events.iter().filter(|e| matches!(e, GameEvent::EnemyKilled { .. })).count();
        assert_eq!((hits, kills), (3, 1));
        assert_eq!(s.player.score, 15);
        assert!(s.enemies.is_empty());
    }

    #[test]
    fn test_pickup_heals_to_max() {
        let mut s = state();
        s.player.hp = 90;
        let pos = s.player.pos;
        s.pickups.push(crate::sim::state::Pickup {
            pos,
            kind: PickupKind::Health,
            value: PICKUP_HEAL,
            life: PICKUP_LIFE,
        });
        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.player.hp, 100);
        assert!(s.pickups.is_empty());
        assert!(s.events.contains(&GameEvent::PickupCollected {
            kind: PickupKind::Health,
            value: PICKUP_HEAL
        }));
    }

    #[test]
    fn test_pickup_expires() {
        let mut s = state();
        s.pickups.push(crate::sim::state::Pickup {
            pos: Vec2::new(50.0, 50.0),
            kind: PickupKind::Health,
            value: PICKUP_HEAL,
            life: 2,
        });
        tick(&mut s, &TickInput::default(), FRAME);
        assert_eq!(s.pickups.len(), 1);
        tick(&mut s, &TickInput::default(), FRAME);
        assert!(s.pickups.is_empty());
    }

    #[test]
    fn test_projectiles_leave_field() {
        let mut s = state();
        s.projectiles.push(Projectile {
            pos: Vec2::new(795.0, 10.0),
            vel: Vec2::new(10.0, 0.0),
            life: 50.0,
            damage: 1,
            color: 0,
            size: 6.0,
            owner: Owner::Player,
        });
        tick(&mut s, &TickInput::default(), FRAME);
        assert!(s.projectiles.iter().all(|p| p.pos.x < 800.0));
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (
            any::<[bool; 4]>(),
            proptest::option::of((-1.5f32..1.5, -1.5f32..1.5)),
            any::<bool>(),
            (0f32..800.0, 0f32..600.0),
        )
            .prop_map(|(dirs, stick, attack, (px, py))| TickInput {
                up: dirs[0],
                down: dirs[1],
                left: dirs[2],
                right: dirs[3],
                joystick: stick.map(|(x, y)| Vec2::new(x, y)),
                attack,
                pointer: Vec2::new(px, py),
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_field(
            x in 0f32..800.0,
            y in 0f32..600.0,
            input in arb_input(),
            dt in 0f32..50.0,
        ) {
            let mut s = state();
            s.player.pos = clamp_to_field(Vec2::new(x, y), s.field, FIELD_MARGIN);
            let before = s.player.pos;
            tick(&mut s, &input, dt);
            let p = s.player.pos;
            prop_assert!(p.x >= FIELD_MARGIN && p.x <= 800.0 - FIELD_MARGIN);
            prop_assert!(p.y >= FIELD_MARGIN && p.y <= 600.0 - FIELD_MARGIN);
            prop_assert!(p.distance(before) <= s.player.speed() + 1e-3);
        }

        #[test]
        fn prop_timers_count_down_exactly(
            inv in 0f32..3000.0,
            n in 1usize..20,
            dt in 0f32..50.0,
        ) {
            let mut s = state();
            s.player.invulnerable_ms = inv;
            s.menu.open();
            for _ in 0..n {
                tick(&mut s, &TickInput::default(), dt);
            }
            let elapsed = n as f32 * dt;
            prop_assert!((s.player.invulnerable_ms - (inv - elapsed).max(0.0)).abs() < 0.05);
            let menu_left = (MENU_DURATION_MS - elapsed).max(0.0);
            prop_assert!((s.menu.timer_ms - menu_left).abs() < 0.05);
            prop_assert_eq!(s.menu.open, s.menu.timer_ms > 0.0);
        }

        #[test]
        fn prop_invariants_hold_over_runs(
            seed in any::<u64>(),
            inputs in proptest::collection::vec(arb_input(), 1..120),
        ) {
            let mut s = GameState::new(seed, Vec2::new(640.0, 480.0), Layout::Desktop);
            let mut last_wave = s.wave;
            for (frame, input) in inputs.iter().enumerate() {
                let input = TickInput { time_ms: frame as f64 * 16.0, ..input.clone() };
                tick(&mut s, &input, FRAME);
                prop_assert!(s.player.hp <= s.player.max_hp);
                prop_assert!(s.enemies.iter().all(|e| e.hp <= e.max_hp && e.hp > 0));
                prop_assert!(s.projectiles.len() <= MAX_PROJECTILES);
                prop_assert!(s.particles.len() <= MAX_PARTICLES);
                prop_assert!(s.wave >= last_wave);
                last_wave = s.wave;
            }
        }

        #[test]
        fn prop_pools_capped_after_flood(extra in 0usize..400) {
            let mut s = state();
            s.burst(Vec2::new(400.0, 300.0), 0xffffff, MAX_PARTICLES + extra);
            for i in 0..(MAX_PROJECTILES + extra) {
                s.projectiles.push(Projectile {
                    pos: Vec2::new(100.0 + (i % 500) as f32, 100.0),
                    vel: Vec2::ZERO,
                    life: 100.0,
                    damage: 0,
                    color: 0,
                    size: 1.0,
                    owner: Owner::Enemy,
                });
            }
            tick(&mut s, &TickInput::default(), FRAME);
            prop_assert!(s.projectiles.len() <= MAX_PROJECTILES);
            prop_assert!(s.particles.len() <= MAX_PARTICLES);
        }
    }
}
