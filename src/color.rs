//! Color literals for the generated program (named palette or `#rrggbb`).

/// Literal used whenever a color cannot be parsed.
pub const DEFAULT_COLOR: &str = "color.white";

/// Map a palette name to a VPython color literal.
///
/// Colors the runtime has no `color.*` symbol for are spelled as explicit
/// `vector(r, g, b)` triples. Returns `None` for `"custom"` and anything
/// outside the palette so the caller can fall through to
/// [`hex_color_to_literal`].
pub fn named_color_to_literal(name: &str) -> Option<&'static str> {
    let lit = match name.trim().to_ascii_lowercase().as_str() {
        "red" => "color.red",
        "orange" => "color.orange",
        "yellow" => "color.yellow",
        "green" => "color.green",
        "blue" => "color.blue",
        "purple" => "vector(0.5, 0, 0.5)",
        "white" => "color.white",
        "black" => "vector(0, 0, 0)",
        "gray" | "grey" => "color.gray(0.5)",
        "brown" => "vector(0.6, 0.3, 0.1)",
        "cyan" => "color.cyan",
        "magenta" => "color.magenta",
        _ => return None,
    };
    Some(lit)
}

/// Convert `#rrggbb` into `vector(r, g, b)` with components in `0.00..=1.00`.
///
/// Anything that is not exactly a `#` followed by six hex digits yields
/// [`DEFAULT_COLOR`].
pub fn hex_color_to_literal(hex: &str) -> String {
    match parse_hex(hex) {
        Some((r, g, b)) => format!(
            "vector({:.2}, {:.2}, {:.2})",
            r as f64 / 255.0,
            g as f64 / 255.0,
            b as f64 / 255.0
        ),
        None => DEFAULT_COLOR.to_string(),
    }
}

/// Resolve a color picker value: palette name first, then hex.
pub fn color_to_literal(name: &str, hex: &str) -> String {
    match named_color_to_literal(name) {
        Some(lit) => lit.to_string(),
        None => hex_color_to_literal(hex),
    }
}

fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if hex.len() != 7 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pure_red() {
        assert_eq!(hex_color_to_literal("#ff0000"), "vector(1.00, 0.00, 0.00)");
    }

    #[test]
    fn mid_gray_rounds_to_two_places() {
        assert_eq!(hex_color_to_literal("#808080"), "vector(0.50, 0.50, 0.50)");
    }

    #[test]
    fn malformed_hex_is_white() {
        for bad in ["not-a-color", "", "#fff", "#ff00000", "ff0000", "#gg0000", "#ff00é"] {
            assert_eq!(hex_color_to_literal(bad), DEFAULT_COLOR, "input {bad:?}");
        }
    }

    #[test]
    fn palette_uses_triples_where_runtime_lacks_symbol() {
        assert_eq!(named_color_to_literal("purple"), Some("vector(0.5, 0, 0.5)"));
        assert_eq!(named_color_to_literal("black"), Some("vector(0, 0, 0)"));
        assert_eq!(named_color_to_literal("Brown"), Some("vector(0.6, 0.3, 0.1)"));
        assert_eq!(named_color_to_literal("red"), Some("color.red"));
        assert_eq!(named_color_to_literal("custom"), None);
    }

    #[test]
    fn custom_falls_through_to_hex() {
        assert_eq!(color_to_literal("custom", "#0000ff"), "vector(0.00, 0.00, 1.00)");
        assert_eq!(color_to_literal("cyan", "#0000ff"), "color.cyan");
        assert_eq!(color_to_literal("custom", "nope"), DEFAULT_COLOR);
    }
}
