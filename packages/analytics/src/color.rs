//! Chart color palettes and the duration gradient scale.

/// Categorical palette (Tableau 10) assigned to top genres by rank.
pub const CATEGORICAL_PALETTE: [u32; 10] = [
    0x004E_79A7,
    0x00F2_8E2C,
    0x00E1_5759,
    0x0076_B7B2,
    0x0059_A14F,
    0x00ED_C949,
    0x00AF_7AA1,
    0x00FF_9DA7,
    0x009C_755F,
    0x00BA_B0AB,
];

/// Five-stop perceptual gradient (viridis) used for track duration.
pub const DURATION_GRADIENT: [u32; 5] = [
    0x0044_0154,
    0x003B_528B,
    0x0021_918C,
    0x005E_C962,
    0x00FD_E725,
];

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Unpacks a `0xRRGGBB` integer.
    #[must_use]
    pub const fn from_code(code: u32) -> Self {
        Self {
            r: ((code >> 16) & 0xFF) as u8,
            g: ((code >> 8) & 0xFF) as u8,
            b: (code & 0xFF) as u8,
        }
    }

    /// Formats as `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear interpolation toward `other` at `t` in `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| {
            let v = (f64::from(b) - f64::from(a)).mul_add(t, f64::from(a));
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let v = v.round().clamp(0.0, 255.0) as u8;
            v
        };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }
}

/// Palette color for a genre at `rank`, wrapping past the palette length.
#[must_use]
pub fn categorical_color(rank: usize) -> String {
    Rgb::from_code(CATEGORICAL_PALETTE[rank % CATEGORICAL_PALETTE.len()]).to_hex()
}

/// Samples [`DURATION_GRADIENT`] at `t`, clamped to `[0, 1]`.
#[must_use]
pub fn gradient_color(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };

    #[allow(clippy::cast_precision_loss)]
    let segments = (DURATION_GRADIENT.len() - 1) as f64;
    let scaled = t * segments;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let idx = (scaled.floor() as usize).min(DURATION_GRADIENT.len() - 2);

    #[allow(clippy::cast_precision_loss)]
    let local = scaled - idx as f64;

    Rgb::from_code(DURATION_GRADIENT[idx]).lerp(Rgb::from_code(DURATION_GRADIENT[idx + 1]), local)
}

/// Linear duration → color scale over a legend domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationScale {
    min: f64,
    max: f64,
}

impl DurationScale {
    /// Creates a scale over `[min, max]`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Color for a duration. Values outside the domain are clamped; a
    /// zero-width domain maps everything to the gradient midpoint.
    #[must_use]
    pub fn color(&self, duration_min: f64) -> String {
        let span = self.max - self.min;
        let t = if span > 0.0 {
            (duration_min.clamp(self.min, self.max) - self.min) / span
        } else {
            0.5
        };
        gradient_color(t).to_hex()
    }
}
