//! Colors for game elements (linear RGBA, 0-1)

pub const BACKGROUND: [f32; 4] = [0.04, 0.04, 0.04, 1.0];
pub const GRID_CELL: [f32; 4] = [0.1, 0.1, 0.1, 1.0];
pub const ACTIVE_BLOCK: [f32; 4] = [1.0, 0.2, 0.2, 1.0];
pub const STACKED_BLOCK: [f32; 4] = [0.8, 0.13, 0.13, 1.0];
pub const MINOR_PRIZE: [f32; 4] = [1.0, 0.8, 0.0, 1.0];
pub const MAJOR_PRIZE: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const TEXT_DIM: [f32; 4] = [0.53, 0.53, 0.53, 1.0];
pub const DIM_OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];

/// Same color, different alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
}

/// Fully saturated color for a hue in degrees, lightness 50%
pub fn hue(degrees: f32) -> [f32; 4] {
    let h = degrees.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    [r, g, b, 1.0]
}

/// CSS `rgba()` string for canvas fill styles
pub fn to_css(color: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {:.3})",
        (color[0].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[1].clamp(0.0, 1.0) * 255.0).round() as u8,
        (color[2].clamp(0.0, 1.0) * 255.0).round() as u8,
        color[3].clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_primaries() {
        assert_eq!(hue(0.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hue(120.0), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(hue(240.0), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(hue(360.0), hue(0.0));
    }

    #[test]
    fn test_css() {
        assert_eq!(to_css(DIM_OVERLAY), "rgba(0, 0, 0, 0.700)");
        assert_eq!(to_css(with_alpha(TEXT, 2.0)), "rgba(255, 255, 255, 1.000)");
    }
}
