pub type Rgb = (u8, u8, u8);

// Globe palette.
pub const BACKGROUND: Rgb = (19, 22, 31);
pub const GRATICULE: Rgb = (120, 126, 150);
pub const TRAJECTORY: Rgb = (0, 255, 255);
pub const MARKER: Rgb = (255, 153, 0);
pub const OBSERVER: Rgb = (255, 0, 255);
pub const BILLBOARD: Rgb = (84, 84, 84);
pub const BILLBOARD_TEXT: Rgb = (196, 221, 207);

/// Format RGB plus alpha as a CSS color string.
pub fn rgba_css((r, g, b): Rgb, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Brighten a color by a factor (1.0 = no change, >1.0 = brighter).
pub fn brighten((r, g, b): Rgb, factor: f64) -> Rgb {
    (
        ((r as f64 * factor).min(255.0)) as u8,
        ((g as f64 * factor).min(255.0)) as u8,
        ((b as f64 * factor).min(255.0)) as u8,
    )
}
