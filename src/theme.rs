//! Named presets that pin a handful of generation parameters to a range.
//!
//! The catalog is a static table; nothing here mutates after start-up.

use crate::error::{Result, SketchError};

/// Sentinel identifier meaning "skip constrained sampling".
pub const RANDOM_THEME: &str = "random";

/// Parameters a theme is allowed to constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemedParam {
    CellSize,
    MaxDepth,
    FlowSpeed,
    NoiseScale,
    Frequency,
}

impl ThemedParam {
    pub const ALL: [ThemedParam; 5] = [
        ThemedParam::CellSize,
        ThemedParam::MaxDepth,
        ThemedParam::FlowSpeed,
        ThemedParam::NoiseScale,
        ThemedParam::Frequency,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ThemedParam::CellSize => "cellSize",
            ThemedParam::MaxDepth => "maxDepth",
            ThemedParam::FlowSpeed => "flowSpeed",
            ThemedParam::NoiseScale => "noiseScale",
            ThemedParam::Frequency => "frequency",
        }
    }
}

/// Inclusive `[min, max]` interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub ranges: &'static [(ThemedParam, Range)],
}

impl Theme {
    /// Range this theme imposes on `param`, if any.
    pub fn range(&self, param: ThemedParam) -> Option<Range> {
        self.ranges
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, r)| *r)
    }

    fn validate(&self) -> Result<()> {
        for &(param, range) in self.ranges {
            // NaN bounds fail this comparison too.
            if !(range.min <= range.max) {
                return Err(SketchError::InvertedRange {
                    theme: self.id,
                    param: param.name(),
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

/// Outcome of theme selection: a preset or the unconstrained sentinel.
#[derive(Debug, Clone, Copy)]
pub enum ThemeChoice {
    Random,
    Preset(&'static Theme),
}

impl ThemeChoice {
    pub fn id(&self) -> &'static str {
        match self {
            ThemeChoice::Random => RANDOM_THEME,
            ThemeChoice::Preset(theme) => theme.id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeChoice::Random => "Random",
            ThemeChoice::Preset(theme) => theme.name,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ThemeChoice::Random => "Unconstrained parameter pools",
            ThemeChoice::Preset(theme) => theme.description,
        }
    }
}

/// Ordered, immutable registry of themes.
#[derive(Debug, Clone, Copy)]
pub struct ThemeCatalog {
    themes: &'static [Theme],
}

impl ThemeCatalog {
    /// Build a catalog, rejecting any theme with an inverted range.
    pub fn new(themes: &'static [Theme]) -> Result<Self> {
        for theme in themes {
            theme.validate()?;
        }
        Ok(Self { themes })
    }

    /// The thirteen presets shipped with the sketch.
    pub fn builtin() -> Self {
        Self {
            themes: &BUILTIN_THEMES,
        }
    }

    /// Themes in declaration order.
    pub fn list_themes(&self) -> &'static [Theme] {
        self.themes
    }

    pub fn get_theme(&self, id: &str) -> Result<&'static Theme> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| SketchError::UnknownTheme(id.to_owned()))
    }

    /// Like [`get_theme`](Self::get_theme) but accepts the `"random"` sentinel.
    pub fn resolve(&self, id: &str) -> Result<ThemeChoice> {
        if id == RANDOM_THEME {
            return Ok(ThemeChoice::Random);
        }
        self.get_theme(id).map(ThemeChoice::Preset)
    }
}

impl Default for ThemeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

const fn constraints(
    cell_size: (f32, f32),
    max_depth: (f32, f32),
    flow_speed: (f32, f32),
    noise_scale: (f32, f32),
    frequency: (f32, f32),
) -> [(ThemedParam, Range); 5] {
    [
        (ThemedParam::CellSize, Range::new(cell_size.0, cell_size.1)),
        (ThemedParam::MaxDepth, Range::new(max_depth.0, max_depth.1)),
        (ThemedParam::FlowSpeed, Range::new(flow_speed.0, flow_speed.1)),
        (ThemedParam::NoiseScale, Range::new(noise_scale.0, noise_scale.1)),
        (ThemedParam::Frequency, Range::new(frequency.0, frequency.1)),
    ]
}

static BUILTIN_THEMES: [Theme; 13] = [
    Theme {
        id: "filament",
        name: "Filament",
        description: "Thin, thread-like structures",
        ranges: &constraints((3.0, 5.0), (800.0, 1200.0), (0.03, 0.07), (0.00002, 0.00006), (0.005, 0.01)),
    },
    Theme {
        id: "bloom",
        name: "Bloom",
        description: "Soft, expanding cloud-like forms",
        ranges: &constraints((8.0, 12.0), (600.0, 900.0), (0.08, 0.15), (0.00008, 0.00015), (0.001, 0.005)),
    },
    Theme {
        id: "cellular",
        name: "Cellular",
        description: "Honeycomb-like cellular patterns",
        ranges: &constraints((6.0, 9.0), (700.0, 1000.0), (0.05, 0.1), (0.00005, 0.0001), (0.003, 0.008)),
    },
    Theme {
        id: "vortex",
        name: "Vortex",
        description: "Swirling, spiral-like formations",
        ranges: &constraints((4.0, 7.0), (900.0, 1300.0), (0.12, 0.18), (0.00003, 0.00008), (0.008, 0.015)),
    },
    Theme {
        id: "crystal",
        name: "Crystal",
        description: "Sharp, geometric crystalline structures",
        ranges: &constraints((2.0, 4.0), (1000.0, 1500.0), (0.02, 0.05), (0.00001, 0.00004), (0.01, 0.02)),
    },
    Theme {
        id: "organic",
        name: "Organic",
        description: "Natural, flowing biological forms",
        ranges: &constraints((10.0, 15.0), (500.0, 800.0), (0.06, 0.12), (0.0001, 0.0002), (0.002, 0.006)),
    },
    Theme {
        id: "fractal",
        name: "Fractal",
        description: "Self-similar patterns at multiple scales",
        ranges: &constraints((3.0, 6.0), (1200.0, 1800.0), (0.04, 0.08), (0.00002, 0.00005), (0.006, 0.012)),
    },
    Theme {
        id: "liquid",
        name: "Liquid",
        description: "Fluid, droplet-like formations",
        ranges: &constraints((8.0, 12.0), (600.0, 900.0), (0.15, 0.25), (0.00006, 0.00012), (0.003, 0.007)),
    },
    Theme {
        id: "neural",
        name: "Neural",
        description: "Brain-like network structures",
        ranges: &constraints((2.0, 5.0), (1000.0, 1400.0), (0.03, 0.07), (0.00001, 0.00003), (0.008, 0.016)),
    },
    Theme {
        id: "cosmic",
        name: "Cosmic",
        description: "Space-like nebula formations",
        ranges: &constraints((8.0, 14.0), (500.0, 800.0), (0.06, 0.12), (0.00008, 0.00015), (0.002, 0.006)),
    },
    Theme {
        id: "magnetic",
        name: "Magnetic",
        description: "Field-like, force-directed patterns",
        ranges: &constraints((5.0, 8.0), (800.0, 1100.0), (0.09, 0.16), (0.00004, 0.00009), (0.004, 0.009)),
    },
    Theme {
        id: "wave",
        name: "Wave",
        description: "Ocean wave-like undulating forms",
        ranges: &constraints((9.0, 13.0), (600.0, 900.0), (0.11, 0.19), (0.00007, 0.00013), (0.003, 0.008)),
    },
    Theme {
        id: "particle",
        name: "Particle",
        description: "Dust-like, scattered formations",
        ranges: &constraints((1.0, 3.0), (1400.0, 2000.0), (0.02, 0.05), (0.000005, 0.00002), (0.015, 0.025)),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_passes_validation() {
        assert!(ThemeCatalog::new(&BUILTIN_THEMES).is_ok());
    }

    #[test]
    fn list_preserves_declaration_order() {
        let ids: Vec<_> = ThemeCatalog::builtin()
            .list_themes()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids.first(), Some(&"filament"));
        assert_eq!(ids.last(), Some(&"particle"));
        assert_eq!(ids.len(), 13);
    }

    #[test]
    fn every_builtin_theme_constrains_all_params() {
        for theme in ThemeCatalog::builtin().list_themes() {
            for param in ThemedParam::ALL {
                assert!(theme.range(param).is_some(), "{} lacks {:?}", theme.id, param);
            }
        }
    }

    #[test]
    fn unknown_theme_is_not_found() {
        let catalog = ThemeCatalog::builtin();
        assert_eq!(
            catalog.get_theme("plaid").unwrap_err(),
            SketchError::UnknownTheme("plaid".into())
        );
        // The sentinel is only accepted by `resolve`.
        assert!(catalog.get_theme(RANDOM_THEME).is_err());
        assert!(matches!(catalog.resolve(RANDOM_THEME), Ok(ThemeChoice::Random)));
    }

    #[test]
    fn crystal_ranges_match_preset() {
        let crystal = ThemeCatalog::builtin().get_theme("crystal").unwrap();
        assert_eq!(crystal.range(ThemedParam::CellSize), Some(Range::new(2.0, 4.0)));
        assert_eq!(
            crystal.range(ThemedParam::MaxDepth),
            Some(Range::new(1000.0, 1500.0))
        );
    }

    #[test]
    fn inverted_range_is_rejected() {
        static BAD: [Theme; 1] = [Theme {
            id: "upside-down",
            name: "Upside Down",
            description: "",
            ranges: &[(ThemedParam::FlowSpeed, Range::new(0.5, 0.1))],
        }];
        let err = ThemeCatalog::new(&BAD).unwrap_err();
        assert!(matches!(
            err,
            SketchError::InvertedRange {
                theme: "upside-down",
                param: "flowSpeed",
                ..
            }
        ));
    }
}
