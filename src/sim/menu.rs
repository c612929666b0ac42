//! Omnitrix form-select menu
//!
//! A timed radial menu. `RingRegion` classification is shared by the
//! simulation (selection/close) and the renderer (highlight), so both always
//! agree on which wedge the pointer is over.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;

use super::state::Layout;
use crate::consts::*;

/// Open/closed state plus the auto-close countdown
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OmnitrixMenu {
    pub open: bool,
    pub timer_ms: f32,
}

impl OmnitrixMenu {
    /// Open with a fresh countdown
    pub fn open(&mut self) {
        self.open = true;
        self.timer_ms = MENU_DURATION_MS;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.timer_ms = 0.0;
    }

    /// Flip open/closed; returns the new open flag
    pub fn toggle(&mut self) -> bool {
        if self.open {
            self.close();
        } else {
            self.open();
        }
        self.open
    }

    /// Count down by `dt_ms`; returns true if the menu closed on expiry
    pub fn update(&mut self, dt_ms: f32) -> bool {
        if self.open && self.timer_ms > 0.0 {
            self.timer_ms = (self.timer_ms - dt_ms).max(0.0);
            if self.timer_ms <= 0.0 {
                self.close();
                return true;
            }
        }
        false
    }

    /// Remaining share of the countdown (0-1), drives the timer arc
    pub fn remaining_fraction(&self) -> f32 {
        (self.timer_ms / MENU_DURATION_MS).clamp(0.0, 1.0)
    }
}

/// Where a pointer sits relative to the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingRegion {
    /// Dead zone, or the rim band between the ring and the outside margin
    None,
    /// Over wedge `i` (registry order, clockwise from "up")
    Wedge(usize),
    /// Beyond the ring plus its outside margin
    Outside,
}

/// Placement of the menu ring on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Vec2,
    pub radius: f32,
}

impl Ring {
    /// Desktop floats the ring above the player; touch centres it on the surface
    pub fn for_layout(layout: Layout, player_pos: Vec2, field: Vec2) -> Self {
        match layout {
            Layout::Desktop => Self {
                center: player_pos - Vec2::new(0.0, MENU_OFFSET_Y),
                radius: MENU_RADIUS_DESKTOP,
            },
            Layout::Touch => Self {
                center: field / 2.0,
                radius: MENU_RADIUS_TOUCH,
            },
        }
    }

    pub fn region(&self, point: Vec2, wedges: usize) -> RingRegion {
        ring_region(point, self.center, self.radius, wedges)
    }
}

/// Angular width of one wedge
#[inline]
pub fn wedge_width(wedges: usize) -> f32 {
    TAU / wedges.max(1) as f32
}

/// Screen angle of the middle of wedge `index` (wedge 0 points up)
#[inline]
pub fn wedge_center_angle(index: usize, wedges: usize) -> f32 {
    wedge_width(wedges) * index as f32 - FRAC_PI_2
}

/// Classify `point` against a ring of `wedges` equal slices
pub fn ring_region(point: Vec2, center: Vec2, radius: f32, wedges: usize) -> RingRegion {
    let d = point - center;
    let dist = d.length();

    if dist > radius + MENU_OUTSIDE_MARGIN {
        return RingRegion::Outside;
    }
    if wedges == 0 || dist >= radius || dist <= MENU_DEAD_ZONE {
        return RingRegion::None;
    }

    let slice = wedge_width(wedges);
    // Rotate so "up" is zero, then shift half a slice so wedges are centred
    let angle = (d.y.atan2(d.x) + FRAC_PI_2 + slice / 2.0).rem_euclid(TAU);
    RingRegion::Wedge((angle / slice).floor() as usize % wedges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_at(center: Vec2, angle: f32, dist: f32) -> Vec2 {
        center + Vec2::new(angle.cos(), angle.sin()) * dist
    }

    #[test]
    fn test_toggle_sets_timer() {
        let mut menu = OmnitrixMenu::default();
        assert!(menu.toggle());
        assert_eq!(menu.timer_ms, MENU_DURATION_MS);
        assert!(!menu.toggle());
        assert_eq!(menu.timer_ms, 0.0);
    }

    #[test]
    fn test_auto_close_after_full_duration() {
        let mut menu = OmnitrixMenu::default();
        menu.open();
        let mut closed = false;
        for _ in 0..100 {
            closed |= menu.update(50.0);
        }
        assert!(closed);
        assert!(!menu.open);
        assert_eq!(menu.timer_ms, 0.0);
    }

    #[test]
    fn test_still_open_just_before_expiry() {
        let mut menu = OmnitrixMenu::default();
        menu.open();
        assert!(!menu.update(4999.0));
        assert!(menu.open);
        assert!((menu.timer_ms - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_wedge_centres_map_to_their_index() {
        let c = Vec2::new(300.0, 200.0);
        for i in 0..5 {
            let p = point_at(c, wedge_center_angle(i, 5), 50.0);
            assert_eq!(ring_region(p, c, 80.0, 5), RingRegion::Wedge(i));
        }
    }

    #[test]
    fn test_straight_up_is_wedge_zero() {
        let c = Vec2::new(100.0, 100.0);
        assert_eq!(ring_region(Vec2::new(100.0, 50.0), c, 80.0, 5), RingRegion::Wedge(0));
        // Just left of up still belongs to wedge 0 because wedges are centred
        let p = point_at(c, -FRAC_PI_2 - 0.3, 50.0);
        assert_eq!(ring_region(p, c, 80.0, 5), RingRegion::Wedge(0));
    }

    #[test]
    fn test_dead_zone_rim_and_outside() {
        let c = Vec2::ZERO;
        assert_eq!(ring_region(Vec2::new(10.0, 0.0), c, 80.0, 5), RingRegion::None);
        assert_eq!(ring_region(Vec2::new(20.0, 0.0), c, 80.0, 5), RingRegion::None);
        assert_eq!(ring_region(Vec2::new(90.0, 0.0), c, 80.0, 5), RingRegion::None);
        assert_eq!(ring_region(Vec2::new(100.0, 0.0), c, 80.0, 5), RingRegion::None);
        assert_eq!(ring_region(Vec2::new(101.0, 0.0), c, 80.0, 5), RingRegion::Outside);
    }

    #[test]
    fn test_ring_placement_by_layout() {
        let player = Vec2::new(400.0, 300.0);
        let field = Vec2::new(800.0, 600.0);
        let desk = Ring::for_layout(Layout::Desktop, player, field);
        assert_eq!(desk.center, Vec2::new(400.0, 200.0));
        assert_eq!(desk.radius, MENU_RADIUS_DESKTOP);
        let touch = Ring::for_layout(Layout::Touch, player, field);
        assert_eq!(touch.center, Vec2::new(400.0, 300.0));
        assert_eq!(touch.radius, MENU_RADIUS_TOUCH);
    }
}
