//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 32,
            QualityPreset::Medium => 128,
            QualityPreset::High => 512,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Sparkles and bursts
    pub particles: bool,
    /// Flash overlay on the win screen
    pub win_flash: bool,

    // === Feedback ===
    /// 0.0 - 1.0
    pub master_volume: f32,
    /// Multiplies master_volume
    pub sfx_volume: f32,
    pub muted: bool,
    /// Vibrate on commit where supported
    pub haptics: bool,
    /// Mute when the tab is hidden
    pub mute_on_blur: bool,

    // === Accessibility ===
    /// Reduced motion (no celebration, particles or flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            particles: true,
            win_flash: true,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            haptics: true,
            mute_on_blur: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Defaults with a preset applied
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Switch preset; only the flash depends on it
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset drops the full-screen flash
        if preset == QualityPreset::Low {
            self.win_flash = false;
        }
    }

    /// Effective win flash (respects reduced_motion)
    pub fn effective_win_flash(&self) -> bool {
        self.win_flash && !self.reduced_motion
    }

    /// Particle cap handed to the effects system
    pub fn max_particles(&self) -> usize {
        if !self.particles || self.reduced_motion {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Output gain for sound effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        }
    }

    /// Parse stored preferences; anything unreadable falls back to defaults
    pub fn from_stored(json: Option<&str>) -> Self {
        let Some(json) = json else {
            return Self::default();
        };
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {}", e);
            Self::default()
        })
    }
}

#[cfg(target_arch = "wasm32")]
impl Settings {
    const STORAGE_KEY: &'static str = "stacker_settings";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// Read from LocalStorage
    pub fn load() -> Self {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        Self::from_stored(stored.as_deref())
    }

    pub fn save(&self) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, settings not saved");
            return;
        };
        match serde_json::to_string(self) {
            Ok(json) if storage.set_item(Self::STORAGE_KEY, &json).is_ok() => {
                log::debug!("Settings saved")
            }
            Ok(_) => log::warn!("LocalStorage refused settings"),
            Err(e) => log::warn!("Cannot serialize settings: {}", e),
        }
    }
}

/// Natively preferences are not persisted
#[cfg(not(target_arch = "wasm32"))]
impl Settings {
    pub fn load() -> Self {
        Self::default()
    }

    pub fn save(&self) {}
}
