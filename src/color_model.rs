use palette::{rgb::FromHexError, Srgb};

/// Luminance above which a color counts as bright, so dark foreground styling
/// stays legible on top of it.
pub const BRIGHTNESS_THRESHOLD: f64 = 186.0;

pub const WHITE: Srgb<u8> = Srgb::new(0xff, 0xff, 0xff);

/// Converts a correlated color temperature (Kelvin) to an approximate RGB
/// color, using Tanner Helland's curve fit.
///
/// The input is not clamped to any range. Every channel is clamped to
/// `[0, 255]` and rounded, so the function is total over all `f64` inputs.
pub fn color_temperature_to_rgb(kelvin: f64) -> Srgb<u8> {
    let t = kelvin / 100.0;

    let red = if t <= 66.0 {
        255.0
    } else {
        329.698_727_446 * (t - 60.0).powf(-0.133_204_759_2)
    };

    let green = if t <= 66.0 {
        99.470_802_586_1 * t.ln() - 161.119_568_166_1
    } else {
        288.122_169_528_3 * (t - 60.0).powf(-0.075_514_849_2)
    };

    let blue = if t >= 66.0 {
        255.0
    } else if t <= 19.0 {
        0.0
    } else {
        138.517_731_223_1 * (t - 10.0).ln() - 305.044_792_730_7
    };

    Srgb::new(to_channel(red), to_channel(green), to_channel(blue))
}

/// Same as [`color_temperature_to_rgb`], formatted as `#rrggbb`.
pub fn color_temperature_to_hex(kelvin: f64) -> String {
    to_hex(color_temperature_to_rgb(kelvin))
}

// NaN saturates to 0 in the `as` cast.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0).round() as u8
}

/// Perceived luminance `0.299 r + 0.587 g + 0.114 b` on the 0-255 scale.
pub fn luminance(color: Srgb<u8>) -> f64 {
    0.299 * f64::from(color.red) + 0.587 * f64::from(color.green) + 0.114 * f64::from(color.blue)
}

pub fn is_bright_color(color: Srgb<u8>) -> bool {
    luminance(color) > BRIGHTNESS_THRESHOLD
}

/// Brightness check for a `#rrggbb` string. Malformed input is reported
/// instead of being classified.
pub fn is_bright_hex(hex: &str) -> Result<bool, FromHexError> {
    Ok(is_bright_color(parse_hex(hex)?))
}

/// Parses `#rrggbb` or `#rgb`, with or without the leading `#`.
pub fn parse_hex(hex: &str) -> Result<Srgb<u8>, FromHexError> {
    let hex = hex.trim();
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    // palette slices by byte index and accepts signs, so only plain ASCII hex
    // digits are passed on.
    if !matches!(digits.len(), 3 | 6) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(FromHexError::HexFormatError("invalid hex code format"));
    }

    digits.parse()
}

/// Formats a color as lowercase `#rrggbb`, always zero-padding each channel.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:x}", color)
}
