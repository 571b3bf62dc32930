use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub name: &'static str,
    pub colors: &'static [&'static str],
}

pub static PALETTES: [Palette; 4] = [
    Palette {
        name: "Default",
        colors: &["#1976d2", "#d81b60", "#388e3c", "#fbc02d", "#ff5722"],
    },
    Palette {
        name: "Pastel",
        colors: &["#ffcdd2", "#f8bbd9", "#e1bee7", "#d1c4e9", "#c5cae9"],
    },
    Palette {
        name: "Vibrant",
        colors: &["#f44336", "#e91e63", "#9c27b0", "#673ab7", "#3f51b5"],
    },
    Palette {
        name: "Monochrome",
        colors: &["#000000", "#333333", "#666666", "#999999", "#cccccc"],
    },
];

impl Palette {
    pub fn primary(&self) -> &'static str {
        self.colors[0]
    }

    /// `count` colors, wrapping around the palette as needed.
    pub fn cycle(&self, count: usize) -> Vec<String> {
        self.colors
            .iter()
            .cycle()
            .take(count)
            .map(|color| color.to_string())
            .collect()
    }
}

/// Looks a palette up by name, falling back to the first one.
pub fn palette_named(name: &str) -> &'static Palette {
    PALETTES
        .iter()
        .find(|palette| palette.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(|| {
            tracing::debug!("Unknown palette '{}', using {}", name, PALETTES[0].name);
            &PALETTES[0]
        })
}
