//! Hex color notation used by the `stroke`, `fill` and `background-color` attributes.
//!
//! Documents carry unmultiplied sRGBA, the same bytes the model stores, so a
//! color survives a save/open cycle unchanged.

/// Format unmultiplied sRGBA bytes as `#rrggbbaa`
pub(crate) fn to_hex([r, g, b, a]: [u8; 4]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into unmultiplied sRGBA.
/// Colors without alpha are opaque.
pub(crate) fn parse_hex(value: &str) -> Option<[u8; 4]> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let rgba = match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
            [nibble(0)?, nibble(1)?, nibble(2)?, 255]
        }
        6 => [channel(0)?, channel(2)?, channel(4)?, 255],
        8 => [channel(0)?, channel(2)?, channel(4)?, channel(6)?],
        _ => return None,
    };
    Some(rgba)
}
