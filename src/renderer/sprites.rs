//! Procedural vector sprites for forms, enemies and pets
//!
//! Sprites are authored in local pixels around the origin and placed with a
//! `Brush` (translate, scale, horizontal flip, alpha).

use std::f32::consts::{FRAC_PI_3, FRAC_PI_4};

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, fade, hex_to_rgba};
use crate::sim::{EnemyKind, Form, PetKind};

const SEGMENTS: u32 = 20;

/// Places local-space shapes into the scene
pub struct Brush<'a> {
    out: &'a mut Vec<Vertex>,
    origin: Vec2,
    /// Negative x mirrors the sprite
    scale: Vec2,
    alpha: f32,
}

impl<'a> Brush<'a> {
    pub fn new(out: &'a mut Vec<Vertex>, origin: Vec2, scale: f32) -> Self {
        Self {
            out,
            origin,
            scale: Vec2::splat(scale),
            alpha: 1.0,
        }
    }

    /// Mirror horizontally when `facing` is negative
    pub fn facing(mut self, facing: f32) -> Self {
        if facing < 0.0 {
            self.scale.x = -self.scale.x.abs();
        }
        self
    }

    pub fn alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    fn color(&self, hex: u32, alpha: f32) -> [f32; 4] {
        fade(hex_to_rgba(hex, 1.0), alpha * self.alpha)
    }

    fn place(&mut self, local: Vec<Vertex>) {
        let (origin, scale) = (self.origin, self.scale);
        self.out.extend(local.into_iter().map(|mut v| {
            let p = origin + Vec2::from(v.position) * scale;
            v.position = p.into();
            v
        }));
    }

    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, hex: u32) {
        let color = self.color(hex, 1.0);
        self.place(shapes::rect(Vec2::new(x, y), Vec2::new(w, h), color));
    }

    pub fn circle(&mut self, x: f32, y: f32, r: f32, hex: u32) {
        let color = self.color(hex, 1.0);
        self.place(shapes::circle(Vec2::new(x, y), r, color, SEGMENTS));
    }

    pub fn ellipse(&mut self, x: f32, y: f32, rx: f32, ry: f32, rotation: f32, hex: u32, alpha: f32) {
        let color = self.color(hex, alpha);
        self.place(shapes::ellipse(Vec2::new(x, y), Vec2::new(rx, ry), rotation, color, SEGMENTS));
    }

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, hex: u32) {
        let color = self.color(hex, 1.0);
        self.place(shapes::triangle(a, b, c, color));
    }

    pub fn line(&mut self, a: Vec2, b: Vec2, width: f32, hex: u32, alpha: f32) {
        let color = self.color(hex, alpha);
        self.place(shapes::line(a, b, width, color));
    }

    pub fn ring(&mut self, r: f32, width: f32, hex: u32) {
        let color = self.color(hex, 1.0);
        self.place(shapes::ring(Vec2::ZERO, r - width / 2.0, r + width / 2.0, color, SEGMENTS * 2));
    }

    pub fn polygon(&mut self, points: &[Vec2], hex: u32) {
        let color = self.color(hex, 1.0);
        self.place(shapes::polygon(Vec2::ZERO, points, color));
    }
}

/// Draw a player form centred on `pos`
pub fn draw_form(out: &mut Vec<Vertex>, form: Form, pos: Vec2, scale: f32, facing: f32, alpha: f32) {
    let mut b = Brush::new(out, pos, scale).facing(facing).alpha(alpha);
    match form {
        Form::Ben => ben(&mut b),
        Form::Heatblast => heatblast(&mut b, 30.0),
        Form::FourArms => {
            b.rect(-20.0, -20.0, 40.0, 40.0, 0xcc5555);
            for (x, y) in [(-35.0, -15.0), (20.0, -15.0), (-35.0, 5.0), (20.0, 5.0)] {
                b.rect(x, y, 15.0, 10.0, 0xcc5555);
            }
            b.rect(-15.0, -15.0, 30.0, 20.0, 0x883333);
            b.rect(-10.0, -10.0, 6.0, 6.0, 0x00ff00);
            b.rect(4.0, -10.0, 6.0, 6.0, 0x00ff00);
        }
        Form::Xlr8 => {
            b.ellipse(0.0, 0.0, 15.0, 25.0, 0.0, 0x00ccff, 1.0);
            for i in 0..3 {
                let k = i as f32 * 5.0;
                let y = -10.0 + k;
                b.line(Vec2::new(-20.0 - k, y), Vec2::new(-30.0 - k, y), 2.0, 0x00ccff, 0.5);
            }
            b.rect(-12.0, -10.0, 24.0, 8.0, 0x00ff00);
        }
        Form::Cannonbolt => {
            b.circle(0.0, 0.0, 25.0, 0xffbb00);
            b.ring(25.0, 3.0, 0xaa8800);
            for i in 0..6 {
                let a = i as f32 * FRAC_PI_3;
                b.line(Vec2::ZERO, Vec2::new(a.cos(), a.sin()) * 25.0, 3.0, 0xaa8800, 1.0);
            }
            b.rect(-8.0, -5.0, 5.0, 5.0, 0x000000);
            b.rect(3.0, -5.0, 5.0, 5.0, 0x000000);
        }
    }
}

fn ben(b: &mut Brush) {
    // Hair
    b.rect(-12.0, -28.0, 24.0, 12.0, 0x3d2314);
    b.rect(-10.0, -30.0, 20.0, 4.0, 0x3d2314);
    // Head
    b.rect(-10.0, -20.0, 20.0, 20.0, 0xfdbcb4);
    b.rect(-12.0, -18.0, 24.0, 16.0, 0xfdbcb4);
    // Eyes
    b.rect(-7.0, -15.0, 4.0, 4.0, 0x000000);
    b.rect(3.0, -15.0, 4.0, 4.0, 0x000000);
    b.rect(-6.0, -14.0, 1.0, 1.0, 0xffffff);
    b.rect(4.0, -14.0, 1.0, 1.0, 0xffffff);
    // Mouth
    b.rect(-2.0, -7.0, 4.0, 1.0, 0x000000);
    // Shirt with stripe
    b.rect(-12.0, 0.0, 24.0, 20.0, 0x228b22);
    b.rect(-14.0, 2.0, 28.0, 16.0, 0x228b22);
    b.rect(-2.0, 2.0, 4.0, 16.0, 0xffffff);
    // Arms
    b.rect(-16.0, 4.0, 4.0, 12.0, 0xfdbcb4);
    b.rect(12.0, 4.0, 4.0, 12.0, 0xfdbcb4);
    b.rect(-17.0, 16.0, 6.0, 4.0, 0xfdbcb4);
    b.rect(11.0, 16.0, 6.0, 4.0, 0xfdbcb4);
    // Omnitrix
    b.rect(-16.0, 14.0, 4.0, 3.0, 0x000000);
    b.rect(-15.0, 15.0, 2.0, 1.0, 0x00ff00);
    // Legs and shoes
    b.rect(-8.0, 20.0, 6.0, 8.0, 0x4a5d23);
    b.rect(2.0, 20.0, 6.0, 8.0, 0x4a5d23);
    b.rect(-9.0, 28.0, 8.0, 4.0, 0x000000);
    b.rect(1.0, 28.0, 8.0, 4.0, 0x000000);
    b.rect(-8.0, 29.0, 6.0, 1.0, 0xffffff);
    b.rect(2.0, 29.0, 6.0, 1.0, 0xffffff);
}

/// Flame silhouette, layered hot to cool instead of a radial gradient
fn heatblast(b: &mut Brush, height: f32) {
    for (k, hex) in [(1.0, 0xaa0000), (0.75, 0xff5500), (0.4, 0xffff00)] {
        b.polygon(&flame_outline(height * k), hex);
    }
    b.rect(-8.0, -15.0, 5.0, 8.0, 0xffff00);
    b.rect(3.0, -15.0, 5.0, 8.0, 0xffff00);
}

/// Teardrop outline about the origin; `size` is the tip height
pub fn flame_outline(size: f32) -> Vec<Vec2> {
    let s = size / 30.0;
    let p = |x: f32, y: f32| Vec2::new(x, y) * s;
    let mut points = vec![p(0.0, -30.0)];
    points.extend(shapes::quadratic_curve(p(0.0, -30.0), p(-20.0, -20.0), p(-15.0, 0.0), 4));
    points.extend(shapes::quadratic_curve(p(-15.0, 0.0), p(-10.0, 20.0), p(0.0, 25.0), 4));
    points.extend(shapes::quadratic_curve(p(0.0, 25.0), p(10.0, 20.0), p(15.0, 0.0), 4));
    points.extend(shapes::quadratic_curve(p(15.0, 0.0), p(20.0, -20.0), p(0.0, -30.0), 4));
    // Last sample repeats the tip
    points.pop();
    points
}

/// Draw an enemy centred on `pos`
pub fn draw_enemy(out: &mut Vec<Vertex>, kind: EnemyKind, pos: Vec2) {
    let mut b = Brush::new(out, pos, 1.0);
    match kind {
        EnemyKind::Basic => {
            b.rect(-15.0, -15.0, 30.0, 30.0, 0x880088);
            b.rect(-12.0, -12.0, 24.0, 8.0, 0xaa00aa);
            b.rect(-5.0, 5.0, 10.0, 10.0, 0xaa00aa);
            b.rect(-8.0, -8.0, 4.0, 4.0, 0xff0000);
            b.rect(4.0, -8.0, 4.0, 4.0, 0xff0000);
            // Antenna
            b.line(Vec2::new(0.0, -15.0), Vec2::new(0.0, -20.0), 2.0, 0xaa00aa, 1.0);
            b.circle(0.0, -20.0, 3.0, 0xff00ff);
        }
        EnemyKind::Fast => {
            b.triangle(Vec2::new(0.0, -15.0), Vec2::new(-12.0, 10.0), Vec2::new(12.0, 10.0), 0xdd00dd);
            b.rect(-8.0, -5.0, 16.0, 2.0, 0xff00ff);
            b.rect(-6.0, 0.0, 12.0, 2.0, 0xff00ff);
            b.rect(-8.0, -10.0, 16.0, 4.0, 0xffff00);
        }
        EnemyKind::Tank => {
            b.rect(-20.0, -20.0, 40.0, 40.0, 0x555555);
            b.rect(-20.0, -20.0, 40.0, 8.0, 0x333333);
            b.rect(-20.0, 12.0, 40.0, 8.0, 0x333333);
            b.rect(-10.0, -10.0, 20.0, 20.0, 0x880088);
            b.rect(-12.0, -5.0, 6.0, 6.0, 0xff0000);
            b.rect(6.0, -5.0, 6.0, 6.0, 0xff0000);
            for i in 0..4 {
                b.circle(-15.0 + i as f32 * 10.0, 0.0, 3.0, 0x999999);
            }
        }
        EnemyKind::Ranged => {
            b.circle(0.0, 0.0, 14.0, 0xaa6666);
            b.rect(10.0, -4.0, 15.0, 8.0, 0x664444);
            b.circle(0.0, 0.0, 8.0, 0xff88aa);
            b.circle(0.0, -3.0, 4.0, 0xffff00);
            b.circle(0.0, -3.0, 2.0, 0xff0000);
        }
    }
}

/// Draw a pet centred on `pos`
pub fn draw_pet(out: &mut Vec<Vertex>, kind: PetKind, pos: Vec2, scale: f32) {
    let mut b = Brush::new(out, pos, scale);
    let hex = kind.color();
    match kind {
        PetKind::Stinkfly => {
            b.ellipse(0.0, 0.0, 15.0, 10.0, 0.0, hex, 1.0);
            b.ellipse(-15.0, 0.0, 10.0, 20.0, -FRAC_PI_4, hex, 0.6);
            b.ellipse(15.0, 0.0, 10.0, 20.0, FRAC_PI_4, hex, 0.6);
        }
        PetKind::MiniHeatblast => {
            b.circle(0.0, 0.0, 12.0, hex);
            b.circle(0.0, 0.0, 7.0, 0xffff00);
        }
        PetKind::GreyMatter => {
            b.ellipse(0.0, -5.0, 12.0, 15.0, 0.0, hex, 1.0);
            b.rect(-6.0, -5.0, 5.0, 6.0, 0x000000);
            b.rect(1.0, -5.0, 5.0, 6.0, 0x000000);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(out: &[Vertex]) -> (Vec2, Vec2) {
        out.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(lo, hi), v| {
                let p = Vec2::from(v.position);
                (lo.min(p), hi.max(p))
            },
        )
    }

    #[test]
    fn test_every_form_draws_around_position() {
        for form in Form::ALL {
            let mut out = Vec::new();
            let pos = Vec2::new(200.0, 150.0);
            draw_form(&mut out, form, pos, 1.0, 1.0, 1.0);
            assert!(!out.is_empty(), "{form:?}");
            let (lo, hi) = bounds(&out);
            assert!(lo.x >= pos.x - 40.0 && hi.x <= pos.x + 40.0, "{form:?}");
            assert!(lo.y >= pos.y - 40.0 && hi.y <= pos.y + 40.0, "{form:?}");
        }
    }

    #[test]
    fn test_facing_mirrors() {
        let mut right = Vec::new();
        let mut left = Vec::new();
        draw_form(&mut right, Form::Ben, Vec2::ZERO, 1.0, 1.0, 1.0);
        draw_form(&mut left, Form::Ben, Vec2::ZERO, 1.0, -1.0, 1.0);
        assert_eq!(right.len(), left.len());
        for (r, l) in right.iter().zip(&left) {
            assert_eq!(r.position[0], -l.position[0]);
            assert_eq!(r.position[1], l.position[1]);
        }
    }

    #[test]
    fn test_alpha_applies() {
        let mut out = Vec::new();
        draw_form(&mut out, Form::FourArms, Vec2::ZERO, 1.0, 1.0, 0.5);
        assert!(out.iter().all(|v| v.color[3] <= 0.5));
    }

    #[test]
    fn test_pet_scale() {
        let mut out = Vec::new();
        draw_pet(&mut out, PetKind::MiniHeatblast, Vec2::ZERO, 0.5);
        let (lo, hi) = bounds(&out);
        assert!((hi.x - 6.0).abs() < 1e-3 && (lo.x + 6.0).abs() < 1e-3);
    }

    #[test]
    fn test_enemies_draw() {
        for kind in EnemyKind::ALL {
            let mut out = Vec::new();
            draw_enemy(&mut out, kind, Vec2::new(50.0, 50.0));
            assert!(!out.is_empty(), "{kind:?}");
        }
    }

    #[test]
    fn test_flame_outline_closed_loop() {
        let pts = flame_outline(30.0);
        assert_eq!(pts.len(), 16);
        assert_eq!(pts[0], Vec2::new(0.0, -30.0));
        assert!(pts.iter().all(|p| p.length() <= 30.0 + 1e-3));
    }
}
