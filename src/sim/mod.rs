//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering
//! and platform dependencies:
//! - One step per display frame, elapsed time clamped
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod combat;
pub mod menu;
pub mod registry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use menu::{OmnitrixMenu, Ring, RingRegion, ring_region, wedge_center_angle, wedge_width};
pub use registry::{EnemyKind, EnemyStats, Form, FormStats, PetKind};
pub use spawner::{generate_wave, wave_size};
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, Layout, Owner, Particle, Pet, Pickup, PickupKind,
    Player, Projectile,
};
pub use tick::{TickInput, clamp_dt, select_form, tick};
