//! Player preferences
//!
//! Persisted as JSON in LocalStorage. Missing fields take their defaults so
//! older saved blobs keep loading.

use serde::{Deserialize, Serialize};

use crate::sim::Layout;

/// Which control layout to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LayoutPreference {
    /// Pick from the device's user agent
    #[default]
    Auto,
    Desktop,
    Touch,
}

impl LayoutPreference {
    /// Final layout given what the device looks like
    pub fn resolve(&self, touch_device: bool) -> Layout {
        match self {
            LayoutPreference::Auto if touch_device => Layout::Touch,
            LayoutPreference::Auto | LayoutPreference::Desktop => Layout::Desktop,
            LayoutPreference::Touch => Layout::Touch,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Global mute; never affects simulation timing
    pub muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,

    // === Visual ===
    /// Draw particle bursts and score popups
    pub particles: bool,
    /// Control layout override
    pub layout: LayoutPreference,

    /// Fixed RNG seed for reproducible runs; clock-seeded when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            particles: true,
            layout: LayoutPreference::Auto,
            seed: None,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "pet_guardians_settings";

    /// Parse a stored blob, falling back to defaults on bad data
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                log::warn!("Ignoring corrupt settings: {}", e);
                Self::default()
            }
        }
    }

    /// Clamp volumes into range
    fn sanitized(mut self) -> Self {
        let clamp = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 1.0 };
        self.master_volume = clamp(self.master_volume);
        self.sfx_volume = clamp(self.sfx_volume);
        self
    }

    /// Gain applied to every sound effect (0 when muted)
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Flip mute; returns the new muted flag
    pub fn toggle_mute(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    /// Icon for the mute button
    pub fn mute_icon(&self) -> &'static str {
        if self.muted { "🔇" } else { "🔊" }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Could not persist settings");
                }
            }
        }
    }

    /// Native: defaults, optionally overridden by `PET_GUARDIANS_SEED`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Some(seed) = std::env::var("PET_GUARDIANS_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            settings.seed = Some(seed);
        }
        log::debug!("Settings key {} unused natively", Self::STORAGE_KEY);
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert!(!s.muted);
        assert!(s.particles);
        assert_eq!(s.layout, LayoutPreference::Auto);
        assert!((s.effective_volume() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s = Settings::from_json(r#"{"muted":true,"seed":99}"#);
        assert!(s.muted);
        assert_eq!(s.seed, Some(99));
        assert_eq!(s.sfx_volume, 1.0);
        assert_eq!(s.effective_volume(), 0.0);
    }

    #[test]
    fn test_corrupt_json_falls_back() {
        assert_eq!(Settings::from_json("{not json"), Settings::default());
    }

    #[test]
    fn test_volumes_clamped() {
        let s = Settings::from_json(r#"{"master_volume":3.0,"sfx_volume":-1.0}"#);
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.sfx_volume, 0.0);
    }

    #[test]
    fn test_toggle_mute_and_icon() {
        let mut s = Settings::default();
        assert_eq!(s.mute_icon(), "🔊");
        assert!(s.toggle_mute());
        assert_eq!(s.mute_icon(), "🔇");
        assert!(!s.toggle_mute());
    }

    #[test]
    fn test_layout_resolution() {
        assert_eq!(LayoutPreference::Auto.resolve(true), Layout::Touch);
        assert_eq!(LayoutPreference::Auto.resolve(false), Layout::Desktop);
        assert_eq!(LayoutPreference::Desktop.resolve(true), Layout::Desktop);
        assert_eq!(LayoutPreference::Touch.resolve(false), Layout::Touch);
    }

    #[test]
    fn test_roundtrip_json() {
        let mut s = Settings::default();
        s.layout = LayoutPreference::Touch;
        s.seed = Some(7);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json), s);
    }
}
