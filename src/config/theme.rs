// Highlight colors and the named themes that supply their defaults.

/// RGBA color represented as f32 components in [0.0, 1.0] range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a Color from f32 RGBA components.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string (e.g. "#1A1816") into an opaque Color.
    ///
    /// Accepts 6-digit hex with leading '#'. Case-insensitive.
    /// Returns None on any other format.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self {
            r: channel(0)? as f32 / 255.0,
            g: channel(2)? as f32 / 255.0,
            b: channel(4)? as f32 / 255.0,
            a: 1.0,
        })
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Translucent white, the highlight used when nothing else is configured.
pub const DEFAULT_SELECTION: Color = Color::new(1.0, 1.0, 1.0, 0.5);

/// Named theme supplying the base selection color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Light highlight over a dark terminal background.
    Dark,
    /// Dark highlight over a light terminal background.
    Light,
}

impl Theme {
    /// Config names accepted by [`Theme::from_name`].
    pub const NAMES: &'static [&'static str] = &["dark", "light"];

    /// Look up a theme by config name (e.g., "dark").
    /// Returns None if the name is unknown.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Opaque base color of the selection highlight.
    pub fn selection(self) -> Color {
        match self {
            Self::Dark => Color::new(1.0, 1.0, 1.0, 1.0),
            Self::Light => Color::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}
