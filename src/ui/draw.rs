use std::collections::HashMap;

/// sRGB RGBA, each channel 0.0–1.0.
pub type Rgba = [f32; 4];

/// A colour whose alpha is zero means "no fill", not a blended draw.
pub fn is_clear(color: Rgba) -> bool {
    color[3] <= 0.0
}

/// Font description. Text nodes carry one; the surface resolves it to a
/// rasterised font through its own `FontCache`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontSpec {
    pub size: u16,
    pub face: String,
    pub weight: bool,
    pub italic: bool,
}

impl FontSpec {
    pub const DEFAULT_FACE: &'static str = "FAMania";

    pub fn sized(size: u16) -> Self {
        Self {
            size,
            face: Self::DEFAULT_FACE.to_string(),
            weight: false,
            italic: false,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::sized(32)
    }
}

/// Handle into a `FontCache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Interns font descriptions so each distinct spec is resolved once.
#[derive(Debug, Default)]
pub struct FontCache {
    ids: HashMap<FontSpec, FontId>,
    specs: Vec<FontSpec>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached id for `spec`, registering it on first use.
    pub fn instance(&mut self, spec: &FontSpec) -> FontId {
        if let Some(&id) = self.ids.get(spec) {
            return id;
        }
        let id = FontId(self.specs.len() as u32);
        self.specs.push(spec.clone());
        self.ids.insert(spec.clone(), id);
        id
    }

    pub fn spec(&self, id: FontId) -> Option<&FontSpec> {
        self.specs.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
        self.specs.clear();
    }
}

/// Image handles the presentation layer maps to loaded assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    TitleBackground,
    /// Triangle cursor drawn beside the selected button.
    SelectionMarker,
    TorchGlow,
    PartyMarker,
}

/// Drawing contract consumed by the core. Implemented by the presentation
/// layer; `DrawList` records calls instead of rasterising.
pub trait Surface {
    fn draw_rect(&mut self, x: f32, y: f32, z: i32, width: f32, height: f32, color: Rgba);
    fn draw_text(&mut self, x: f32, y: f32, z: i32, text: &str, font: &FontSpec, color: Rgba);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba);
    fn draw_sprite(&mut self, x: f32, y: f32, z: i32, sprite: Sprite);
}

/// Intermediate draw command for a filled rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCommand {
    pub x: f32,
    pub y: f32,
    pub z: i32,
    pub width: f32,
    pub height: f32,
    pub color: Rgba,
}

/// Intermediate draw command for a text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub z: i32,
    pub font: FontId,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineCommand {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpriteCommand {
    pub x: f32,
    pub y: f32,
    pub z: i32,
    pub sprite: Sprite,
}

/// Collects draw commands for one frame.
/// Decouples widget and view logic from the rasteriser.
#[derive(Debug, Default)]
pub struct DrawList {
    pub rects: Vec<RectCommand>,
    pub texts: Vec<TextCommand>,
    pub lines: Vec<LineCommand>,
    pub sprites: Vec<SpriteCommand>,
    pub fonts: FontCache,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop this frame's commands. The font cache survives across frames.
    pub fn clear(&mut self) {
        self.rects.clear();
        self.texts.clear();
        self.lines.clear();
        self.sprites.clear();
    }

    pub fn len(&self) -> usize {
        self.rects.len() + self.texts.len() + self.lines.len() + self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if any text command contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

impl Surface for DrawList {
    fn draw_rect(&mut self, x: f32, y: f32, z: i32, width: f32, height: f32, color: Rgba) {
        self.rects.push(RectCommand {
            x,
            y,
            z,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, x: f32, y: f32, z: i32, text: &str, font: &FontSpec, color: Rgba) {
        let font = self.fonts.instance(font);
        self.texts.push(TextCommand {
            text: text.to_string(),
            x,
            y,
            z,
            font,
            color,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, color: Rgba) {
        self.lines.push(LineCommand {
            from: (x1, y1),
            to: (x2, y2),
            color,
        });
    }

    fn draw_sprite(&mut self, x: f32, y: f32, z: i32, sprite: Sprite) {
        self.sprites.push(SpriteCommand { x, y, z, sprite });
    }
}
