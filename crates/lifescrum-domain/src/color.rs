//! Hex color helpers for weight shading.

pub const DEFAULT_WEIGHT_MAX: u8 = 21;

const MIN_FACTOR: f64 = 0.3;

/// Parses `#rrggbb` (the leading `#` is optional).
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Lowercase `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// How far toward white a weight pushes the base color, in `[0.3, 1.0]`.
pub fn lighten_factor(weight: u8, max: u8) -> f64 {
    if max == 0 {
        return 1.0;
    }
    let intensity = (f64::from(weight) / f64::from(max)).min(1.0);
    MIN_FACTOR + (1.0 - MIN_FACTOR) * intensity
}

/// Lightens `base` by the weight's share of `max`. Heavier stories are paler,
/// and `max` itself is white. An unparseable base comes back unchanged.
pub fn weight_gradient_color(weight: u8, base: &str, max: u8) -> String {
    let Some((r, g, b)) = hex_to_rgb(base) else {
        return base.to_string();
    };
    let factor = lighten_factor(weight, max);
    let lighten = |c: u8| {
        let c = f64::from(c);
        (c + (255.0 - c) * factor).floor().min(255.0) as u8
    };
    rgb_to_hex(lighten(r), lighten(g), lighten(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(hex_to_rgb("#3B82F6"), Some((0x3b, 0x82, 0xf6)));
        assert_eq!(hex_to_rgb("10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(rgb_to_hex(0x3b, 0x82, 0xf6), "#3b82f6");
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
        assert_eq!(weight_gradient_color(5, "blue", 21), "blue");
    }

    #[test]
    fn test_factor_bounds() {
        assert!((lighten_factor(0, 21) - 0.3).abs() < f64::EPSILON);
        assert!((lighten_factor(21, 21) - 1.0).abs() < f64::EPSILON);
        assert!((lighten_factor(40, 21) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_max_weight_is_white() {
        assert_eq!(weight_gradient_color(21, "#3B82F6", DEFAULT_WEIGHT_MAX), "#ffffff");
    }

    #[test]
    fn test_zero_weight_uses_min_factor() {
        // 0x00 + 255 * 0.3 = 76.5 -> 76
        assert_eq!(weight_gradient_color(0, "#000000", 21), "#4c4c4c");
    }

    #[test]
    fn test_gradient_is_monotonic() {
        let mut previous = 0u32;
        for weight in [1u8, 3, 5, 8, 13, 21] {
            let (r, g, b) =
                hex_to_rgb(&weight_gradient_color(weight, "#3B82F6", DEFAULT_WEIGHT_MAX)).unwrap();
            let total = u32::from(r) + u32::from(g) + u32::from(b);
            assert!(total >= previous, "weight {} got darker", weight);
            previous = total;
        }
    }
}
