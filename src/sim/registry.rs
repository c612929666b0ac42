//! Static stat tables for player forms, enemy archetypes and pets
//!
//! Colours are packed `0xRRGGBB`; the renderer expands them.

use serde::{Deserialize, Serialize};

/// Stats shared by every instance of a player form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormStats {
    pub hp: u32,
    /// Movement per frame (px)
    pub speed: f32,
    pub attack: u32,
    pub color: u32,
    /// Engagement range (px); projectile lifetime is derived from it
    pub range: f32,
}

/// A selectable player form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Form {
    #[default]
    Ben,
    Heatblast,
    FourArms,
    Xlr8,
    Cannonbolt,
}

impl Form {
    /// Registry order; menu wedges and digit shortcuts follow it
    pub const ALL: [Form; 5] = [
        Form::Ben,
        Form::Heatblast,
        Form::FourArms,
        Form::Xlr8,
        Form::Cannonbolt,
    ];

    pub const fn stats(self) -> FormStats {
        match self {
            Form::Ben => FormStats {
                hp: 100,
                speed: 4.0,
                attack: 10,
                color: 0x22aa55,
                range: 150.0,
            },
            Form::Heatblast => FormStats {
                hp: 120,
                speed: 3.5,
                attack: 20,
                color: 0xff5500,
                range: 250.0,
            },
            Form::FourArms => FormStats {
                hp: 180,
                speed: 2.5,
                attack: 30,
                color: 0xcc5555,
                range: 80.0,
            },
            Form::Xlr8 => FormStats {
                hp: 80,
                speed: 7.0,
                attack: 12,
                color: 0x00ccff,
                range: 120.0,
            },
            Form::Cannonbolt => FormStats {
                hp: 160,
                speed: 5.0,
                attack: 25,
                color: 0xffbb00,
                range: 100.0,
            },
        }
    }

    /// Lower-case identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Ben => "ben",
            Form::Heatblast => "heatblast",
            Form::FourArms => "fourarms",
            Form::Xlr8 => "xlr8",
            Form::Cannonbolt => "cannonbolt",
        }
    }

    /// Form at `index` in registry order
    pub fn from_index(index: usize) -> Option<Self> {
        Form::ALL.get(index).copied()
    }
}

/// Stats shared by every enemy of an archetype
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStats {
    pub hp: u32,
    pub speed: f32,
    pub attack: u32,
    pub color: u32,
    /// Collision diameter (px)
    pub size: f32,
    pub score: u64,
    /// Ranged-attack reach, if the archetype shoots
    pub range: Option<f32>,
}

/// Enemy archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnemyKind {
    #[default]
    Basic,
    Fast,
    Tank,
    Ranged,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Basic,
        EnemyKind::Fast,
        EnemyKind::Tank,
        EnemyKind::Ranged,
    ];

    pub const fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Basic => EnemyStats {
                hp: 30,
                speed: 1.0,
                attack: 10,
                color: 0xaa00aa,
                size: 30.0,
                score: 10,
                range: None,
            },
            EnemyKind::Fast => EnemyStats {
                hp: 20,
                speed: 2.5,
                attack: 8,
                color: 0xff00ff,
                size: 25.0,
                score: 15,
                range: None,
            },
            EnemyKind::Tank => EnemyStats {
                hp: 60,
                speed: 0.5,
                attack: 15,
                color: 0x880088,
                size: 40.0,
                score: 20,
                range: None,
            },
            EnemyKind::Ranged => EnemyStats {
                hp: 25,
                speed: 1.0,
                attack: 12,
                color: 0xff88aa,
                size: 28.0,
                score: 25,
                range: Some(150.0),
            },
        }
    }
}

/// Companion species orbiting the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetKind {
    Stinkfly,
    MiniHeatblast,
    GreyMatter,
}

impl PetKind {
    /// The fixed escort, in orbit order
    pub const ESCORT: [PetKind; 3] = [PetKind::Stinkfly, PetKind::MiniHeatblast, PetKind::GreyMatter];

    pub const fn color(self) -> u32 {
        match self {
            PetKind::Stinkfly => 0x00ff88,
            PetKind::MiniHeatblast => 0xff5500,
            PetKind::GreyMatter => 0x8888ff,
        }
    }
}
