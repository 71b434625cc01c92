use super::Color;

impl Color {
    /// Parses `RRGGBB` or `#RRGGBB` (case-insensitive, surrounding
    /// whitespace ignored) into an opaque color.
    ///
    /// Never fails: anything that is not exactly six hex digits after the
    /// optional `#` yields [`Color::gray`].
    pub fn from_hex(hex: &str) -> Self {
        Self::try_from_hex(hex).unwrap_or_else(|| {
            log::trace!("malformed hex color {hex:?}, using gray");
            Color::gray()
        })
    }

    /// Strict variant of [`from_hex`](Self::from_hex): `None` on malformed input.
    pub fn try_from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let rgb = u32::from_str_radix(digits, 16).ok()?;
        Some(Color::from_rgba8((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 255))
    }
}
