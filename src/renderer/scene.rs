//! Frame composition
//!
//! `build_scene` turns a read-only `GameState` into one triangle list, drawn
//! back to front in a fixed layer order.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use super::glyphs;
use super::shapes;
use super::sprites;
use super::vertex::{Vertex, colors, fade, hex_to_rgba};
use crate::consts::{MENU_DEAD_ZONE, MENU_TIMER_GAP, PARTICLE_LIFE, PICKUP_LIFE, TEXT_PARTICLE_LIFE};
use crate::sim::{Enemy, Form, GameState, Player, Ring, RingRegion, wedge_center_angle, wedge_width};

/// Background grid pitch (px)
pub const GRID_STEP: f32 = 50.0;
const HEALTH_BAR_WIDTH: f32 = 40.0;
const PET_SCALE: f32 = 0.5;
const WHEEL_ICON_SCALE: f32 = 0.8;
const CIRCLE_SEGMENTS: u32 = 24;

/// Presentation-only inputs
#[derive(Debug, Clone, Copy)]
pub struct SceneOptions {
    /// Pointer in surface pixels; drives the wheel highlight
    pub pointer: Vec2,
    /// Draw particle bursts and score popups
    pub particles: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            pointer: Vec2::ZERO,
            particles: true,
        }
    }
}

/// Player alpha: half while the invulnerability blink is in its "off" phase
pub fn player_alpha(invulnerable_ms: f32) -> f32 {
    if invulnerable_ms > 0.0 && (invulnerable_ms / 100.0).floor() as i64 % 2 == 1 {
        0.5
    } else {
        1.0
    }
}

/// Filled share of a health bar
pub fn health_fraction(hp: u32, max_hp: u32) -> f32 {
    if max_hp == 0 {
        0.0
    } else {
        (hp as f32 / max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Build every vertex for one frame
pub fn build_scene(state: &GameState, options: &SceneOptions) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(16 * 1024);

    draw_grid(&mut out, state.field);
    draw_pickups(&mut out, state);
    if options.particles {
        draw_particles(&mut out, state);
    }
    for pet in &state.player.pets {
        sprites::draw_pet(&mut out, pet.kind, pet.pos, PET_SCALE);
    }
    draw_player(&mut out, &state.player);
    for enemy in &state.enemies {
        draw_enemy(&mut out, enemy);
    }
    for shot in &state.projectiles {
        out.extend(shapes::circle(
            shot.pos,
            shot.size,
            hex_to_rgba(shot.color, 1.0),
            CIRCLE_SEGMENTS / 2,
        ));
    }
    if state.menu.open {
        draw_wheel(&mut out, state, options.pointer);
    }

    out
}

fn draw_grid(out: &mut Vec<Vertex>, field: Vec2) {
    let mut x = 0.0;
    while x < field.x {
        out.extend(shapes::rect(Vec2::new(x, 0.0), Vec2::new(1.0, field.y), colors::GRID));
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y < field.y {
        out.extend(shapes::rect(Vec2::new(0.0, y), Vec2::new(field.x, 1.0), colors::GRID));
        y += GRID_STEP;
    }
}

fn draw_pickups(out: &mut Vec<Vertex>, state: &GameState) {
    for pickup in &state.pickups {
        let alpha = pickup.life as f32 / PICKUP_LIFE as f32;
        out.extend(shapes::rect_centered(
            pickup.pos,
            Vec2::splat(20.0),
            fade(colors::PICKUP, alpha),
        ));
        glyphs::text_centered(out, "+", pickup.pos, 12.0, fade(colors::WHITE, alpha));
    }
}

fn draw_particles(out: &mut Vec<Vertex>, state: &GameState) {
    for p in &state.particles {
        match &p.text {
            Some(text) => {
                let alpha = p.life as f32 / TEXT_PARTICLE_LIFE as f32;
                glyphs::text_centered(out, text, p.pos, 14.0, hex_to_rgba(p.color, alpha));
            }
            None => {
                let alpha = p.life as f32 / PARTICLE_LIFE as f32;
                out.extend(shapes::rect_centered(
                    p.pos,
                    Vec2::splat(p.size),
                    hex_to_rgba(p.color, alpha.min(1.0)),
                ));
            }
        }
    }
}

fn draw_player(out: &mut Vec<Vertex>, player: &Player) {
    let alpha = player_alpha(player.invulnerable_ms);
    sprites::draw_form(out, player.form, player.pos, 1.0, player.facing, alpha);

    let origin = Vec2::new(player.pos.x - HEALTH_BAR_WIDTH / 2.0, player.pos.y - 35.0);
    health_bar(
        out,
        origin,
        Vec2::new(HEALTH_BAR_WIDTH, 4.0),
        health_fraction(player.hp, player.max_hp),
        colors::PLAYER_HEALTH,
    );
}

fn draw_enemy(out: &mut Vec<Vertex>, enemy: &Enemy) {
    sprites::draw_enemy(out, enemy.kind, enemy.pos);

    if enemy.hp < enemy.max_hp {
        let size = enemy.kind.stats().size;
        let origin = Vec2::new(
            enemy.pos.x - HEALTH_BAR_WIDTH / 2.0,
            enemy.pos.y - size / 2.0 - 10.0,
        );
        health_bar(
            out,
            origin,
            Vec2::new(HEALTH_BAR_WIDTH, 3.0),
            health_fraction(enemy.hp, enemy.max_hp),
            colors::ENEMY_HEALTH,
        );
    }
}

fn health_bar(out: &mut Vec<Vertex>, origin: Vec2, size: Vec2, fraction: f32, fill: [f32; 4]) {
    out.extend(shapes::rect(origin, size, colors::BAR_BACK));
    if fraction > 0.0 {
        out.extend(shapes::rect(origin, Vec2::new(size.x * fraction, size.y), fill));
    }
}

fn draw_wheel(out: &mut Vec<Vertex>, state: &GameState, pointer: Vec2) {
    let ring = Ring::for_layout(state.layout, state.player.pos, state.field);
    let forms = Form::ALL.len();
    let slice = wedge_width(forms);
    let (c, r) = (ring.center, ring.radius);

    out.extend(shapes::circle(c, r, colors::WHEEL_BACK, CIRCLE_SEGMENTS * 2));
    out.extend(shapes::arc_stroke(c, r, 3.0, 0.0, TAU, colors::WHEEL_GREEN, CIRCLE_SEGMENTS * 2));

    let selected = match ring.region(pointer, forms) {
        RingRegion::Wedge(i) => Some(i),
        _ => None,
    };

    for (i, form) in Form::ALL.iter().enumerate() {
        let angle = wedge_center_angle(i, forms);
        let icon = c + Vec2::new(angle.cos(), angle.sin()) * (r * 0.6);

        if selected == Some(i) {
            out.extend(shapes::wedge(
                c,
                r,
                angle - slice / 2.0,
                angle + slice / 2.0,
                colors::WHEEL_HIGHLIGHT,
                12,
            ));
        }

        sprites::draw_form(out, *form, icon, WHEEL_ICON_SCALE, 1.0, 1.0);
        let label = (i + 1).to_string();
        glyphs::text_centered(out, &label, icon - Vec2::new(0.0, 30.0), 14.0, colors::WHEEL_GREEN);
    }

    out.extend(shapes::circle(c, MENU_DEAD_ZONE * 0.75, colors::WHEEL_GREEN, CIRCLE_SEGMENTS));

    let remaining = state.menu.remaining_fraction();
    if remaining > 0.0 {
        out.extend(shapes::arc_stroke(
            c,
            r + MENU_TIMER_GAP,
            3.0,
            -FRAC_PI_2,
            -FRAC_PI_2 + TAU * remaining,
            colors::WHEEL_TIMER,
            CIRCLE_SEGMENTS * 2,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyKind, Layout};

    fn state() -> GameState {
        GameState::new(5, Vec2::new(800.0, 600.0), Layout::Desktop)
    }

    fn count_color(verts: &[Vertex], color: [f32; 4]) -> usize {
        verts.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_blink_alternates_every_100ms() {
        assert_eq!(player_alpha(0.0), 1.0);
        assert_eq!(player_alpha(950.0), 0.5);
        assert_eq!(player_alpha(850.0), 1.0);
        assert_eq!(player_alpha(150.0), 0.5);
        assert_eq!(player_alpha(50.0), 1.0);
    }

    #[test]
    fn test_health_fraction() {
        assert_eq!(health_fraction(50, 100), 0.5);
        assert_eq!(health_fraction(0, 100), 0.0);
        assert_eq!(health_fraction(5, 0), 0.0);
    }

    #[test]
    fn test_grid_lines() {
        let s = state();
        let verts = build_scene(&s, &SceneOptions::default());
        // 16 columns + 12 rows, one quad each
        assert_eq!(count_color(&verts, colors::GRID), (16 + 12) * 6);
    }

    #[test]
    fn test_enemy_health_bar_only_when_damaged() {
        let mut s = state();
        s.enemies.push(Enemy::new(1, EnemyKind::Basic, Vec2::new(100.0, 100.0), 1));
        let healthy = build_scene(&s, &SceneOptions::default());
        assert_eq!(count_color(&healthy, colors::BAR_BACK), 6);

        s.enemies[0].hp -= 10;
        let hurt = build_scene(&s, &SceneOptions::default());
        // Background and fill quads
        assert_eq!(hurt.len() - healthy.len(), 12);
        assert_eq!(count_color(&hurt, colors::BAR_BACK), 12);
    }

    #[test]
    fn test_wheel_drawn_only_when_open() {
        let mut s = state();
        let closed = build_scene(&s, &SceneOptions::default());
        assert_eq!(count_color(&closed, colors::WHEEL_TIMER), 0);

        s.menu.open();
        let open = build_scene(&s, &SceneOptions::default());
        assert!(count_color(&open, colors::WHEEL_TIMER) > 0);
        assert!(open.len() > closed.len());
    }

    #[test]
    fn test_wheel_highlight_follows_pointer() {
        let mut s = state();
        s.menu.open();
        let ring = Ring::for_layout(s.layout, s.player.pos, s.field);
        let over = ring.center + Vec2::new(0.0, -50.0);
        let verts = build_scene(&s, &SceneOptions { pointer: over, particles: true });
        assert_eq!(count_color(&verts, colors::WHEEL_HIGHLIGHT), 12 * 3);

        let dead = ring.center + Vec2::new(5.0, 0.0);
        let verts = build_scene(&s, &SceneOptions { pointer: dead, particles: true });
        assert_eq!(count_color(&verts, colors::WHEEL_HIGHLIGHT), 0);
    }

    #[test]
    fn test_particles_can_be_hidden() {
        let mut s = state();
        s.burst(Vec2::new(300.0, 300.0), 0x123456, 10);
        let shown = build_scene(&s, &SceneOptions::default());
        let hidden = build_scene(&s, &SceneOptions { particles: false, ..Default::default() });
        assert_eq!(shown.len() - hidden.len(), 10 * 6);
    }

    #[test]
    fn test_pickup_fades_with_life() {
        let mut s = state();
        s.pickups.push(crate::sim::Pickup {
            pos: Vec2::new(200.0, 200.0),
            kind: crate::sim::PickupKind::Health,
            value: 20,
            life: 150,
        });
        let verts = build_scene(&s, &SceneOptions::default());
        assert_eq!(count_color(&verts, fade(colors::PICKUP, 0.5)), 6);
    }
}
