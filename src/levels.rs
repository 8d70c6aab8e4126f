//! Level catalog
//!
//! Static, ordered table of level descriptors. Levels are selected by index and
//! never mutated; advancing past the last level wraps back to the first.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Terrain/city style that drives procedural generation and palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Urban,
    Ancient,
    Desert,
    Snow,
    Jungle,
    Alien,
}

impl Biome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Biome::Urban => "Urban",
            Biome::Ancient => "Ancient",
            Biome::Desert => "Desert",
            Biome::Snow => "Snow",
            Biome::Jungle => "Jungle",
            Biome::Alien => "Alien",
        }
    }
}

/// 24-bit sRGB colour packed as 0xRRGGBB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Colour channels normalized to 0..1
    pub fn to_f32(self) -> [f32; 3] {
        let r = ((self.0 >> 16) & 0xff) as f32 / 255.0;
        let g = ((self.0 >> 8) & 0xff) as f32 / 255.0;
        let b = (self.0 & 0xff) as f32 / 255.0;
        [r, g, b]
    }
}

/// Immutable per-level configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LevelDescriptor {
    pub id: u32,
    pub name: &'static str,
    pub country: &'static str,
    pub biome: Biome,
    pub sky_color: Rgb,
    pub horizon_color: Rgb,
    pub ground_color: Rgb,
    pub fog_color: Rgb,
    pub structure_color: Rgb,
    pub sun_position: Vec3,
    /// Spreads the checkpoint rings apart on X/Z (>= 1)
    pub ring_complexity: u32,
    /// Target number of procedurally placed structures
    pub density: u32,
}

#[allow(clippy::too_many_arguments)]
const fn level(
    id: u32,
    name: &'static str,
    country: &'static str,
    biome: Biome,
    palette: [u32; 5],
    sun: [f32; 3],
    ring_complexity: u32,
    density: u32,
) -> LevelDescriptor {
    LevelDescriptor {
        id,
        name,
        country,
        biome,
        sky_color: Rgb(palette[0]),
        horizon_color: Rgb(palette[1]),
        ground_color: Rgb(palette[2]),
        fog_color: Rgb(palette[3]),
        structure_color: Rgb(palette[4]),
        sun_position: Vec3::new(sun[0], sun[1], sun[2]),
        ring_complexity,
        density,
    }
}

// Palette order: sky, horizon, ground, fog, structure
static LEVELS: [LevelDescriptor; 30] = [
    level(1, "Roma", "Italia", Biome::Ancient, [0x7dd3fc, 0xfcd34d, 0x57534e, 0xbfdbfe, 0xd6d3d1], [100.0, 50.0, 100.0], 1, 800),
    level(2, "Tokyo", "Giappone", Biome::Urban, [0x1e1b4b, 0xdb2777, 0x0f172a, 0x312e81, 0x38bdf8], [-100.0, 20.0, -50.0], 2, 2000),
    level(3, "Il Cairo", "Egitto", Biome::Desert, [0xfef08a, 0xf97316, 0xd97706, 0xfed7aa, 0xfcd34d], [0.0, 80.0, 0.0], 1, 400),
    level(4, "Londra", "Regno Unito", Biome::Urban, [0x94a3b8, 0xcbd5e1, 0x3f6212, 0x64748b, 0x475569], [50.0, 30.0, 50.0], 1, 1500),
    level(5, "New York", "USA", Biome::Urban, [0x0ea5e9, 0xfdba74, 0x374151, 0xbae6fd, 0x94a3b8], [-200.0, 40.0, 100.0], 2, 2500),
    level(6, "Reykjavik", "Islanda", Biome::Snow, [0xe0f2fe, 0xffffff, 0xf8fafc, 0xe0f2fe, 0xa5f3fc], [0.0, 10.0, 200.0], 1, 1000),
    level(7, "Rio de Janeiro", "Brasile", Biome::Jungle, [0x0284c7, 0x4ade80, 0x166534, 0x7dd3fc, 0x15803d], [100.0, 90.0, 50.0], 2, 1800),
    level(8, "Mosca", "Russia", Biome::Urban, [0xf1f5f9, 0x94a3b8, 0xe2e8f0, 0xcbd5e1, 0x64748b], [50.0, 20.0, 50.0], 2, 1500),
    level(9, "Sydney", "Australia", Biome::Urban, [0x0c4a6e, 0xfacc15, 0x065f46, 0x38bdf8, 0xe2e8f0], [200.0, 60.0, 0.0], 2, 1200),
    level(10, "Pechino", "Cina", Biome::Urban, [0xd6d3d1, 0xef4444, 0x44403c, 0xa8a29e, 0x78350f], [0.0, 40.0, -100.0], 3, 2000),
    level(11, "Parigi", "Francia", Biome::Urban, [0x60a5fa, 0xfbbf24, 0x4d7c0f, 0x93c5fd, 0xe2e8f0], [80.0, 40.0, 80.0], 2, 1600),
    level(12, "Dubai", "EAU", Biome::Desert, [0x38bdf8, 0xfde047, 0xd97706, 0xfcd34d, 0xfef08a], [0.0, 100.0, 0.0], 3, 600),
    level(13, "Berlino", "Germania", Biome::Urban, [0x475569, 0x94a3b8, 0x1e293b, 0x64748b, 0x334155], [40.0, 40.0, 40.0], 2, 1400),
    level(14, "Città del Capo", "Sudafrica", Biome::Jungle, [0x0284c7, 0xec4899, 0x15803d, 0xa5f3fc, 0x86efac], [-100.0, 50.0, -100.0], 2, 1200),
    level(15, "Atene", "Grecia", Biome::Ancient, [0x38bdf8, 0xbae6fd, 0xa3a3a3, 0xe0f2fe, 0xf5f5f5], [100.0, 80.0, 100.0], 2, 900),
    level(16, "Bangkok", "Thailandia", Biome::Jungle, [0x10b981, 0xfacc15, 0x064e3b, 0x6ee7b7, 0xd4d4d8], [50.0, 70.0, 50.0], 3, 1800),
    level(17, "Toronto", "Canada", Biome::Urban, [0x0f172a, 0x3b82f6, 0xf1f5f9, 0x1e293b, 0x64748b], [-50.0, 20.0, 100.0], 2, 1700),
    level(18, "Città del Messico", "Messico", Biome::Urban, [0xfdba74, 0xef4444, 0x78350f, 0xfed7aa, 0xd6d3d1], [0.0, 60.0, 0.0], 2, 2200),
    level(19, "Mumbai", "India", Biome::Urban, [0xf97316, 0xdb2777, 0x854d0e, 0xfdba74, 0xfbbf24], [100.0, 50.0, -50.0], 3, 2500),
    level(20, "Buenos Aires", "Argentina", Biome::Urban, [0x67e8f9, 0xfef9c3, 0x3f6212, 0xcffafe, 0xe2e8f0], [-100.0, 80.0, 0.0], 2, 1500),
    level(21, "Seul", "Corea del Sud", Biome::Urban, [0x312e81, 0x818cf8, 0x111827, 0x4338ca, 0xa5f3fc], [0.0, 30.0, 0.0], 3, 2000),
    level(22, "Madrid", "Spagna", Biome::Ancient, [0xea580c, 0xfde047, 0xa16207, 0xfed7aa, 0xfdba74], [100.0, 50.0, 100.0], 2, 1100),
    level(23, "Singapore", "Singapore", Biome::Jungle, [0x059669, 0x34d399, 0x022c22, 0x6ee7b7, 0xf0fdf4], [0.0, 90.0, 0.0], 3, 1600),
    level(24, "Stoccolma", "Svezia", Biome::Snow, [0x1e3a8a, 0x93c5fd, 0x1e293b, 0x60a5fa, 0xcbd5e1], [50.0, 20.0, 50.0], 2, 1000),
    level(25, "Lima", "Perù", Biome::Desert, [0x9ca3af, 0xd1d5db, 0x374151, 0xe5e7eb, 0x9ca3af], [-50.0, 40.0, -50.0], 2, 800),
    level(26, "Istanbul", "Turchia", Biome::Ancient, [0x7c2d12, 0xfb923c, 0x78350f, 0xfdba74, 0xfdba74], [100.0, 30.0, 100.0], 3, 1300),
    level(27, "Nairobi", "Kenya", Biome::Jungle, [0x84cc16, 0xfacc15, 0x365314, 0xd9f99d, 0xd9f99d], [0.0, 80.0, 0.0], 2, 1000),
    level(28, "L'Avana", "Cuba", Biome::Ancient, [0x06b6d4, 0xf472b6, 0x064e3b, 0x67e8f9, 0xfce7f3], [-100.0, 60.0, 50.0], 2, 900),
    level(29, "Antartide", "Base", Biome::Snow, [0xf8fafc, 0xe2e8f0, 0xffffff, 0xf1f5f9, 0x0ea5e9], [0.0, 20.0, 100.0], 3, 500),
    level(30, "Marte", "Colonia", Biome::Alien, [0x450a0a, 0xef4444, 0x7f1d1d, 0xf87171, 0x1e293b], [100.0, 50.0, -100.0], 3, 400),
];

/// Number of levels in the catalog
pub fn count() -> usize {
    LEVELS.len()
}

/// Look up a level by index.
///
/// Panics on an out-of-range index; callers hold indices produced by
/// [`next_index`] so an invalid one is a programming error.
pub fn get(index: usize) -> &'static LevelDescriptor {
    debug_assert!(catalog_is_valid(), "level catalog is malformed");
    &LEVELS[index]
}

/// Non-panicking lookup
pub fn try_get(index: usize) -> Option<&'static LevelDescriptor> {
    LEVELS.get(index)
}

/// Index of the level after `index`, wrapping to the first level
pub fn next_index(index: usize) -> usize {
    (index + 1) % count()
}

/// All levels in catalog order
pub fn all() -> &'static [LevelDescriptor] {
    &LEVELS
}

fn catalog_is_valid() -> bool {
    LEVELS.iter().enumerate().all(|(i, l)| {
        l.ring_complexity >= 1 && l.id as usize == i + 1 && !l.name.is_empty()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_constraints() {
        assert_eq!(count(), 30);
        assert!(catalog_is_valid());
        for level in all() {
            assert!(level.ring_complexity >= 1, "{} ring complexity", level.name);
        }
    }

    #[test]
    fn test_next_index_wraps() {
        assert_eq!(next_index(0), 1);
        assert_eq!(next_index(count() - 1), 0);
    }

    #[test]
    fn test_try_get_out_of_range() {
        assert!(try_get(count()).is_none());
        assert_eq!(try_get(1).map(|l| l.name), Some("Tokyo"));
    }

    #[test]
    fn test_catalog_names_verbatim() {
        assert_eq!((get(0).name, get(0).country), ("Roma", "Italia"));
        assert_eq!((get(2).name, get(2).country), ("Il Cairo", "Egitto"));
        assert_eq!((get(13).name, get(13).country), ("Città del Capo", "Sudafrica"));
        assert_eq!((get(29).name, get(29).country), ("Marte", "Colonia"));
    }

    #[test]
    #[should_panic]
    fn test_get_out_of_range_panics() {
        let _ = get(count());
    }

    #[test]
    fn test_rgb_to_f32() {
        let [r, g, b] = Rgb(0xff8000).to_f32();
        assert_eq!(r, 1.0);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
    }

    #[test]
    fn test_biome_mix() {
        assert_eq!(get(0).biome, Biome::Ancient);
        assert_eq!(get(29).biome, Biome::Alien);
        assert!(all().iter().filter(|l| l.biome == Biome::Urban).count() > 10);
    }
}
