use crate::config::SketchConfig;

/// The drawing modes a user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pencil,
    Marker,
    ThickMarker,
    Sticker,
}

impl ToolKind {
    pub const DRAWING: [ToolKind; 3] = [ToolKind::Pencil, ToolKind::Marker, ToolKind::ThickMarker];

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Marker => "Marker",
            ToolKind::ThickMarker => "Thick Marker",
            ToolKind::Sticker => "Sticker",
        }
    }
}

/// Pen thickness for each drawing tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thicknesses {
    pub pencil: f32,
    pub marker: f32,
    pub thick_marker: f32,
}

impl Default for Thicknesses {
    fn default() -> Self {
        Self {
            pencil: 2.0,
            marker: 5.0,
            thick_marker: 10.0,
        }
    }
}

impl From<&SketchConfig> for Thicknesses {
    fn from(config: &SketchConfig) -> Self {
        Self {
            pencil: config.pencil_thickness,
            marker: config.marker_thickness,
            thick_marker: config.thick_marker_thickness,
        }
    }
}

impl Thicknesses {
    /// Thickness of a drawing tool; the sticker tool has none
    pub fn of(&self, kind: ToolKind) -> f32 {
        match kind {
            ToolKind::Pencil => self.pencil,
            ToolKind::Marker => self.marker,
            ToolKind::ThickMarker => self.thick_marker,
            ToolKind::Sticker => 0.0,
        }
    }
}

/// The current tool. Exactly one exists at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    kind: ToolKind,
    thickness: f32,
    sticker: Option<String>,
}

impl Default for Tool {
    fn default() -> Self {
        Self::drawing(ToolKind::Pencil, Thicknesses::default().pencil)
    }
}

impl Tool {
    /// A pen tool; `kind` must not be `ToolKind::Sticker`
    pub fn drawing(kind: ToolKind, thickness: f32) -> Self {
        debug_assert_ne!(kind, ToolKind::Sticker);
        Self {
            kind,
            thickness,
            sticker: None,
        }
    }

    pub fn sticker(glyph: impl Into<String>) -> Self {
        Self {
            kind: ToolKind::Sticker,
            thickness: 0.0,
            sticker: Some(glyph.into()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        self.kind
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// The selected sticker glyph, only set for the sticker tool
    pub fn sticker_glyph(&self) -> Option<&str> {
        self.sticker.as_deref()
    }
}

/// Sticker glyphs the user can choose from. Only ever grows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StickerPalette {
    glyphs: Vec<String>,
}

impl StickerPalette {
    pub fn new(glyphs: impl IntoIterator<Item = String>) -> Self {
        let mut palette = Self::default();
        for glyph in glyphs {
            palette.register(glyph);
        }
        palette
    }

    pub fn glyphs(&self) -> &[String] {
        &self.glyphs
    }

    pub fn contains(&self, glyph: &str) -> bool {
        self.glyphs.iter().any(|g| g == glyph)
    }

    /// Adds `glyph` unless it is blank or already known; returns whether it was added
    pub fn register(&mut self, glyph: impl Into<String>) -> bool {
        let glyph = glyph.into();
        if glyph.trim().is_empty() || self.contains(&glyph) {
            return false;
        }
        self.glyphs.push(glyph);
        true
    }
}
