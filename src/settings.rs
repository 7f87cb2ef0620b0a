//! Player preferences
//!
//! The only preference is the bird color theme, persisted as an index into a
//! fixed palette.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::THEME_INDEX_KEY;
use crate::persistence::{KeyValueStore, read_int, write_int};

/// Bird body/wing/beak colors (0-255 RGB)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BirdTheme {
    pub name: &'static str,
    pub body: Vec3,
    pub wing: Vec3,
    pub beak: Vec3,
}

const fn rgb(r: u8, g: u8, b: u8) -> Vec3 {
    Vec3::new(r as f32, g as f32, b as f32)
}

/// Fixed theme palette
pub const BIRD_THEMES: [BirdTheme; 6] = [
    BirdTheme {
        name: "Yellow",
        body: rgb(0xFF, 0xFF, 0x00),
        wing: rgb(0xFF, 0xC3, 0x00),
        beak: rgb(0xF9, 0xA6, 0x02),
    },
    BirdTheme {
        name: "Red",
        body: rgb(0xE7, 0x4C, 0x3C),
        wing: rgb(0xC0, 0x39, 0x2B),
        beak: rgb(0xA9, 0x32, 0x26),
    },
    BirdTheme {
        name: "Blue",
        body: rgb(0x34, 0x98, 0xDB),
        wing: rgb(0x29, 0x80, 0xB9),
        beak: rgb(0x24, 0x71, 0xA3),
    },
    BirdTheme {
        name: "Green",
        body: rgb(0x27, 0xAE, 0x60),
        wing: rgb(0x22, 0x99, 0x54),
        beak: rgb(0x1E, 0x84, 0x49),
    },
    BirdTheme {
        name: "Purple",
        body: rgb(0x8E, 0x44, 0xAD),
        wing: rgb(0x7D, 0x3C, 0x98),
        beak: rgb(0x6C, 0x34, 0x83),
    },
    BirdTheme {
        name: "Orange",
        body: rgb(0xE6, 0x7E, 0x22),
        wing: rgb(0xD3, 0x54, 0x00),
        beak: rgb(0xBA, 0x4A, 0x00),
    },
];

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Index into [`BIRD_THEMES`], always kept in range
    pub theme_index: usize,
}

impl Settings {
    pub fn new(theme_index: usize) -> Self {
        Self {
            theme_index: theme_index % BIRD_THEMES.len(),
        }
    }

    /// Currently selected theme
    pub fn theme(&self) -> &'static BirdTheme {
        &BIRD_THEMES[self.theme_index % BIRD_THEMES.len()]
    }

    /// Advance to the next theme, wrapping at the end of the palette
    pub fn cycle_theme(&mut self) -> usize {
        self.theme_index = (self.theme_index + 1) % BIRD_THEMES.len();
        self.theme_index
    }

    /// Load settings from storage
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let settings = Self::new(read_int(store, THEME_INDEX_KEY) as usize);
        log::info!("Using bird theme: {}", settings.theme().name);
        settings
    }

    /// Save settings to storage (best-effort)
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        write_int(store, THEME_INDEX_KEY, self.theme_index as u32);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_cycle_wraps() {
        let mut settings = Settings::new(BIRD_THEMES.len() - 1);
        assert_eq!(settings.cycle_theme(), 0);
        assert_eq!(settings.cycle_theme(), 1);
        assert_eq!(settings.theme().name, "Red");
    }

    #[test]
    fn test_out_of_range_index_is_wrapped() {
        let settings = Settings::new(8);
        assert_eq!(settings.theme_index, 2);
    }

    #[test]
    fn test_load_wraps_stored_index() {
        let mut store = MemoryStore::new();
        store.set(THEME_INDEX_KEY, "13").unwrap();
        assert_eq!(Settings::load(&store).theme_index, 1);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::default();
        settings.cycle_theme();
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }
}
