//! Palette loading and sampling for map colors (viewer-only).
//!
//! - `.pal` continuous palette, `value  #RRGGBB` per line
//! - gamma-correct interpolation in linear RGB
//!
//! Assets are embedded with include_str! so there is no runtime IO.

use std::sync::OnceLock;

use engine::griddata::MapField;

/// A single color stop along a 1D value domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Domain value (polarity sign or Myr, depending on palette)
    pub v: f32,
    /// sRGB 8-bit triplet
    pub rgb: [u8; 3],
}

/// Continuous palette: strictly increasing stops.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub stops: Vec<ColorStop>,
    pub vmin: f32,
    pub vmax: f32,
}

/// Embedded default assets
pub const AGE_DEFAULT_STR: &str = include_str!("../assets/atlases/age_default.pal");
pub const POLARITY_STR: &str = include_str!("../assets/atlases/polarity.pal");

/// Parse a `.pal` continuous palette.
///
/// Blank lines and `#` comment lines are ignored; trailing text after the color
/// token is ignored too.
pub fn parse_pal(src: &str) -> Result<Palette, String> {
    let mut stops: Vec<ColorStop> = Vec::new();
    for (lineno, raw) in src.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut toks = line.split_whitespace();
        let v_str = toks.next().ok_or_else(|| format!(".pal: line {} missing value", lineno + 1))?;
        let v: f32 = v_str
            .parse::<f32>()
            .map_err(|_| format!(".pal: line {} bad value '{}'", lineno + 1, v_str))?;
        let col_tok = toks
            .find(|t| t.starts_with('#'))
            .ok_or_else(|| format!(".pal: line {} missing color", lineno + 1))?;
        let rgb = parse_hex_rgb(col_tok).map_err(|e| format!(".pal: line {} {}", lineno + 1, e))?;
        stops.push(ColorStop { v, rgb });
    }
    if stops.is_empty() {
        return Err(".pal: no stops".to_string());
    }
    for i in 1..stops.len() {
        if stops[i].v.partial_cmp(&stops[i - 1].v) != Some(std::cmp::Ordering::Greater) {
            return Err(format!(".pal: values must be strictly increasing at index {}", i));
        }
    }
    let vmin = stops[0].v;
    let vmax = stops[stops.len() - 1].v;
    Ok(Palette { stops, vmin, vmax })
}

#[inline]
fn parse_hex_rgb(tok: &str) -> Result<[u8; 3], String> {
    let hex = tok.trim().strip_prefix('#').ok_or_else(|| "expected #RRGGBB".to_string())?;
    if hex.len() != 6 {
        return Err("expected 6 hex digits".to_string());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| "bad R".to_string())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| "bad G".to_string())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| "bad B".to_string())?;
    Ok([r, g, b])
}

#[inline]
fn srgb_u8_to_linear(rgb: [u8; 3]) -> [f32; 3] {
    [srgb_to_linear(rgb[0]), srgb_to_linear(rgb[1]), srgb_to_linear(rgb[2])]
}

#[inline]
fn srgb_to_linear(c: u8) -> f32 {
    let x = (c as f32) / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb_u8(c: f32) -> u8 {
    let y = if c <= 0.003_130_8 { 12.92 * c } else { 1.055 * c.powf(1.0 / 2.4) - 0.055 };
    (y.clamp(0.0, 1.0) * 255.0 + 0.5).floor() as u8
}

/// Sample palette at x with linear-RGB interpolation (gamma-correct).
/// Values are clamped to [vmin, vmax].
pub fn sample_linear_srgb(p: &Palette, x: f32) -> [u8; 3] {
    let n = p.stops.len();
    if n == 0 {
        return [0, 0, 0];
    }
    if n == 1 {
        return p.stops[0].rgb;
    }
    let x = x.clamp(p.vmin, p.vmax);
    // Segment [i, i+1] with v_i <= x <= v_{i+1}; linear scan, palettes are short
    let i = p.stops.windows(2).position(|w| x <= w[1].v).unwrap_or(n - 2);
    let a = p.stops[i];
    let b = p.stops[i + 1];
    let t = if b.v > a.v { (x - a.v) / (b.v - a.v) } else { 0.0 };
    if t <= 0.0 {
        return a.rgb;
    }
    if t >= 1.0 {
        return b.rgb;
    }
    let la = srgb_u8_to_linear(a.rgb);
    let lb = srgb_u8_to_linear(b.rgb);
    let lr =
        [la[0] + t * (lb[0] - la[0]), la[1] + t * (lb[1] - la[1]), la[2] + t * (lb[2] - la[2])];
    [linear_to_srgb_u8(lr[0]), linear_to_srgb_u8(lr[1]), linear_to_srgb_u8(lr[2])]
}

static AGE_DEFAULT: OnceLock<Palette> = OnceLock::new();
static POLARITY: OnceLock<Palette> = OnceLock::new();

pub fn age_palette() -> &'static Palette {
    AGE_DEFAULT
        .get_or_init(|| parse_pal(AGE_DEFAULT_STR).unwrap_or_else(|e| panic!("age_default.pal: {e}")))
}

pub fn polarity_palette() -> &'static Palette {
    POLARITY.get_or_init(|| parse_pal(POLARITY_STR).unwrap_or_else(|e| panic!("polarity.pal: {e}")))
}

/// Palette used to draw a given map field.
pub fn palette_for(field: MapField) -> &'static Palette {
    match field {
        MapField::Polarity => polarity_palette(),
        MapField::Age => age_palette(),
    }
}
