/// A color with straight (non-premultiplied) alpha.
///
/// Terminal cells cannot store alpha, so translucent colors only exist
/// before painting: the renderer composites them over whatever is already
/// in the cell via [`Color::over`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// A fully resolved cell color, no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given opacity.
    pub const fn white(a: f32) -> Self {
        Self::rgba(255, 255, 255, a)
    }

    /// Black at the given opacity.
    pub const fn black(a: f32) -> Self {
        Self::rgba(0, 0, 0, a)
    }

    /// Neutral grey (`v` on every channel) at the given opacity.
    pub const fn grey(v: u8, a: f32) -> Self {
        Self::rgba(v, v, v, a)
    }

    pub const fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 0.999
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.001
    }

    /// Source-over composite onto an opaque backdrop.
    pub fn over(&self, below: Rgb) -> Rgb {
        if self.is_opaque() {
            return Rgb::new(self.r, self.g, self.b);
        }
        if self.is_transparent() {
            return below;
        }
        let a = self.a.clamp(0.0, 1.0);
        let blend = |src: u8, dst: u8| -> u8 {
            (src as f32 * a + dst as f32 * (1.0 - a)).round() as u8
        };
        Rgb::new(
            blend(self.r, below.r),
            blend(self.g, below.g),
            blend(self.b, below.b),
        )
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::rgb(rgb.r, rgb.g, rgb.b)
    }
}
