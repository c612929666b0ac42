//! Game state and core simulation types
//!
//! Everything one `tick` reads or mutates lives in `GameState`; presentation
//! only reads it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::menu::OmnitrixMenu;
use super::registry::{EnemyKind, Form, PetKind};
use crate::consts::*;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player hp hit zero; terminal until a full reset
    GameOver,
}

/// Input/layout family of the host device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Keyboard + mouse; menu ring floats above the player
    #[default]
    Desktop,
    /// Virtual joystick + buttons; auto-aim, menu ring centred on screen
    Touch,
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Pet,
    Enemy,
}

impl Owner {
    pub fn is_hostile(self) -> bool {
        self == Owner::Enemy
    }
}

/// A companion orbiting the player
#[derive(Debug, Clone)]
pub struct Pet {
    pub kind: PetKind,
    pub pos: Vec2,
    pub cooldown_ms: f32,
}

impl Pet {
    pub fn new(kind: PetKind) -> Self {
        Self {
            kind,
            pos: Vec2::ZERO,
            cooldown_ms: 0.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub form: Form,
    pub attack_cooldown_ms: f32,
    pub invulnerable_ms: f32,
    pub score: u64,
    /// 1.0 facing right, -1.0 facing left
    pub facing: f32,
    pub moving: bool,
    pub pets: [Pet; 3],
}

impl Default for Player {
    fn default() -> Self {
        let form = Form::default();
        let [a, b, c] = PetKind::ESCORT;
        Self {
            pos: Vec2::new(400.0, 300.0),
            hp: form.stats().hp,
            max_hp: form.stats().hp,
            form,
            attack_cooldown_ms: 0.0,
            invulnerable_ms: 0.0,
            score: 0,
            facing: 1.0,
            moving: false,
            pets: [Pet::new(a), Pet::new(b), Pet::new(c)],
        }
    }
}

impl Player {
    /// Movement per frame for the current form
    pub fn speed(&self) -> f32 {
        self.form.stats().speed
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0.0
    }

    /// Apply damage (clamped at zero) and open the invulnerability window
    pub fn take_hit(&mut self, damage: u32) {
        self.hp = self.hp.saturating_sub(damage);
        self.invulnerable_ms = INVULNERABILITY_MS;
    }

    /// Heal up to max hp
    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    /// Switch form: max hp follows the new form, current hp is clamped to it
    pub fn transform(&mut self, form: Form) {
        let max_hp = form.stats().hp;
        self.form = form;
        self.hp = self.hp.min(max_hp);
        self.max_hp = max_hp;
    }
}

/// An enemy instance
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub hp: u32,
    pub max_hp: u32,
    pub hit_cooldown_ms: f32,
    pub shot_cooldown_ms: f32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, wave: u32) -> Self {
        let hp = kind.stats().hp + wave * HP_PER_WAVE;
        Self {
            id,
            kind,
            pos,
            hp,
            max_hp: hp,
            hit_cooldown_ms: 0.0,
            shot_cooldown_ms: 0.0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    /// Collision radius
    pub fn radius(&self) -> f32 {
        self.kind.stats().size / 2.0
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Copy)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining frames (fractional lifetimes come from range / speed)
    pub life: f32,
    pub damage: u32,
    pub color: u32,
    pub size: f32,
    pub owner: Owner,
}

impl Projectile {
    pub fn is_spent(&self) -> bool {
        self.life <= 0.0
    }
}

/// A cosmetic particle; `text` turns it into a floating label
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub color: u32,
    pub size: f32,
    pub text: Option<String>,
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupKind {
    Health,
}

/// A collectible dropped by a defeated enemy
#[derive(Debug, Clone)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: PickupKind,
    pub value: u32,
    pub life: u32,
}

/// Things that happened during a tick, drained by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Player fired (one event per attack, however many projectiles)
    AttackFired { form: Form },
    /// A player/pet projectile struck an enemy
    EnemyHit { pos: Vec2 },
    EnemyKilled { kind: EnemyKind, points: u64 },
    PickupCollected { kind: PickupKind, value: u32 },
    Transformed { form: Form },
    PlayerHurt { damage: u32 },
    WaveSpawned { wave: u32, count: u32 },
    MenuOpened,
    MenuClosed,
    GameOver { score: u64, wave: u32 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Logical surface size
    pub field: Vec2,
    pub layout: Layout,
    pub phase: GamePhase,
    /// Wave counter, starts at 1 and only grows
    pub wave: u32,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub pickups: Vec<Pickup>,
    pub menu: OmnitrixMenu,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    /// Simulation steps taken
    pub steps: u64,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed and surface size
    pub fn new(seed: u64, field: Vec2, layout: Layout) -> Self {
        Self {
            field,
            layout,
            phase: GamePhase::Playing,
            wave: 1,
            player: Player::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            pickups: Vec::new(),
            menu: OmnitrixMenu::default(),
            events: Vec::new(),
            steps: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform roll in [0, 1)
    pub fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform value in [lo, hi)
    pub fn roll_range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.roll() * (hi - lo)
    }

    /// Uniform index in [0, n)
    pub fn roll_index(&mut self, n: usize) -> usize {
        self.rng.random_range(0..n)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Adopt a new logical surface size (entities are left where they are)
    pub fn resize(&mut self, field: Vec2) {
        self.field = field;
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Spray `count` square particles from `pos`
    pub fn burst(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(self.roll_range(-2.0, 2.0), self.roll_range(-2.0, 2.0));
            let size = self.roll_range(2.0, 5.0);
            self.particles.push(Particle {
                pos,
                vel,
                life: PARTICLE_LIFE,
                color,
                size,
                text: None,
            });
        }
    }

    /// Floating `+N` label above a kill
    pub fn score_popup(&mut self, pos: Vec2, points: u64) {
        self.particles.push(Particle {
            pos: pos - Vec2::new(0.0, 20.0),
            vel: Vec2::new(0.0, -1.0),
            life: TEXT_PARTICLE_LIFE,
            color: 0xffff00,
            size: 0.0,
            text: Some(format!("+{points}")),
        });
    }

    /// Roll the drop chance; returns true when a health pickup was placed
    pub fn maybe_spawn_pickup(&mut self, pos: Vec2) -> bool {
        if self.roll() < PICKUP_CHANCE {
            self.pickups.push(Pickup {
                pos,
                kind: PickupKind::Health,
                value: PICKUP_HEAL,
                life: PICKUP_LIFE,
            });
            true
        } else {
            false
        }
    }

    /// Trim pooled arrays to their caps, dropping the oldest entries
    pub fn enforce_pool_caps(&mut self) {
        trim_oldest(&mut self.projectiles, MAX_PROJECTILES);
        trim_oldest(&mut self.particles, MAX_PARTICLES);
    }
}

fn trim_oldest<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        let excess = items.len() - cap;
        *items = items.split_off(excess);
    }
}
