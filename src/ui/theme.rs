use super::draw::Rgba;

/// Centralized visual style constants.
///
/// Single global theme. No runtime switching. Menus and views read from
/// Theme at construction time instead of hardcoding colors.
#[derive(Debug, Clone)]
pub struct Theme {
    // -- Color palette (sRGB RGBA) --
    /// Default text: white.
    pub text: Rgba,
    /// Text of a focussed option: #FFFF00.
    pub text_focussed: Rgba,
    /// Widget background when none is set. Alpha 0, so nothing is filled.
    pub bg_none: Rgba,
    /// Torch flame: #FFDF00.
    pub torch: Rgba,
    /// Party marker: #007FFF.
    pub party: Rgba,
    /// Explored stretch of the depth axis: #3F3F3F.
    pub explored: Rgba,
    /// GAME OVER banner: #C04040.
    pub danger: Rgba,

    // -- Font defaults --
    /// Menu and HUD font size in pixels.
    pub font_size: u16,
    /// Font size for text nodes that set none.
    pub font_default_size: u16,

    // -- Spacing defaults --
    /// Padding applied to every menu entry.
    pub menu_padding: f32,
}

/// Convert a hex color (#RRGGBB) to sRGB [f32; 4] with alpha 1.0.
pub const fn hex(r: u8, g: u8, b: u8) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Convert a hex color with custom alpha.
pub const fn hex_a(r: u8, g: u8, b: u8, a: f32) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a]
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: hex(0xFF, 0xFF, 0xFF),
            text_focussed: hex(0xFF, 0xFF, 0x00),
            bg_none: hex_a(0x00, 0x00, 0x00, 0.0),
            torch: hex(0xFF, 0xDF, 0x00),
            party: hex(0x00, 0x7F, 0xFF),
            explored: hex(0x3F, 0x3F, 0x3F),
            danger: hex(0xC0, 0x40, 0x40),

            font_size: 16,
            font_default_size: 32,

            menu_padding: 8.0,
        }
    }
}
