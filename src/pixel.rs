//! Build-time configurable pixel formats.
//!
//! The active format is chosen with Cargo features so the framebuffer layout
//! can match whatever the display backend's native buffer demands:
//!
//! | feature         | layout                           |
//! |-----------------|----------------------------------|
//! | (default)       | BGRA, 8 bits per channel         |
//! | `pixel-rgba8888`| RGBA, 8 bits per channel         |
//! | `pixel-rgb888`  | RGB, 8 bits per channel          |
//! | `pixel-rgb565`  | 5-6-5 bit-packed RGB in a `u16`  |
//! | `pixel-gray`    | single 8-bit grayscale channel   |
//!
//! Whatever the layout, `from_rgba` followed by `mul(1.0)` round-trips the
//! stored channels exactly.

#[cfg(all(feature = "pixel-gray", feature = "pixel-rgb565"))]
compile_error!("pixel format features are mutually exclusive");
#[cfg(all(feature = "pixel-gray", feature = "pixel-rgb888"))]
compile_error!("pixel format features are mutually exclusive");
#[cfg(all(feature = "pixel-gray", feature = "pixel-rgba8888"))]
compile_error!("pixel format features are mutually exclusive");
#[cfg(all(feature = "pixel-rgb565", feature = "pixel-rgb888"))]
compile_error!("pixel format features are mutually exclusive");
#[cfg(all(feature = "pixel-rgb565", feature = "pixel-rgba8888"))]
compile_error!("pixel format features are mutually exclusive");
#[cfg(all(feature = "pixel-rgb888", feature = "pixel-rgba8888"))]
compile_error!("pixel format features are mutually exclusive");

#[cfg(not(any(
    feature = "pixel-gray",
    feature = "pixel-rgb565",
    feature = "pixel-rgb888",
    feature = "pixel-rgba8888"
)))]
mod format {
    /// A color value in native framebuffer byte order: blue, green, red, alpha.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Pixel {
        pub b: u8,
        pub g: u8,
        pub r: u8,
        pub a: u8,
    }

    impl Pixel {
        pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);
        pub const WHITE: Self = Self::from_rgba(255, 255, 255, 255);

        pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
            Self { b, g, r, a }
        }

        pub const fn from_gray(g: u8) -> Self {
            Self::from_rgba(g, g, g, 255)
        }

        pub fn to_gray(&self) -> u8 {
            ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
        }

        /// Scales the color channels by `factor` in [0, 1]; alpha is preserved.
        pub fn mul(&self, factor: f32) -> Self {
            Self {
                b: (self.b as f32 * factor) as u8,
                g: (self.g as f32 * factor) as u8,
                r: (self.r as f32 * factor) as u8,
                a: self.a,
            }
        }
    }
}

#[cfg(feature = "pixel-rgba8888")]
mod format {
    /// A color value with red, green, blue, alpha channel byte order.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Pixel {
        pub r: u8,
        pub g: u8,
        pub b: u8,
        pub a: u8,
    }

    impl Pixel {
        pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);
        pub const WHITE: Self = Self::from_rgba(255, 255, 255, 255);

        pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
            Self { r, g, b, a }
        }

        pub const fn from_gray(g: u8) -> Self {
            Self::from_rgba(g, g, g, 255)
        }

        pub fn to_gray(&self) -> u8 {
            ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
        }

        /// Scales the color channels by `factor` in [0, 1]; alpha is preserved.
        pub fn mul(&self, factor: f32) -> Self {
            Self {
                r: (self.r as f32 * factor) as u8,
                g: (self.g as f32 * factor) as u8,
                b: (self.b as f32 * factor) as u8,
                a: self.a,
            }
        }
    }
}

#[cfg(feature = "pixel-rgb888")]
mod format {
    /// A color value with red, green, blue channel byte order, no alpha.
    #[repr(C)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Pixel {
        pub r: u8,
        pub g: u8,
        pub b: u8,
    }

    impl Pixel {
        pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);
        pub const WHITE: Self = Self::from_rgba(255, 255, 255, 255);

        pub const fn from_rgba(r: u8, g: u8, b: u8, _a: u8) -> Self {
            Self { r, g, b }
        }

        pub const fn from_gray(g: u8) -> Self {
            Self::from_rgba(g, g, g, 255)
        }

        pub fn to_gray(&self) -> u8 {
            ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
        }

        pub fn mul(&self, factor: f32) -> Self {
            Self {
                r: (self.r as f32 * factor) as u8,
                g: (self.g as f32 * factor) as u8,
                b: (self.b as f32 * factor) as u8,
            }
        }
    }
}

#[cfg(feature = "pixel-rgb565")]
mod format {
    /// A 5-6-5 bit-packed RGB color value in a single `u16`.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Pixel {
        bits: u16,
    }

    impl Pixel {
        pub const BLACK: Self = Self::from_rgba(0, 0, 0, 255);
        pub const WHITE: Self = Self::from_rgba(255, 255, 255, 255);

        pub const fn from_rgba(r: u8, g: u8, b: u8, _a: u8) -> Self {
            let bits =
                ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3);
            Self { bits }
        }

        pub const fn from_gray(g: u8) -> Self {
            Self::from_rgba(g, g, g, 255)
        }

        pub const fn r(&self) -> u8 {
            ((self.bits >> 11) as u8) << 3
        }

        pub const fn g(&self) -> u8 {
            (((self.bits >> 5) & 0x3f) as u8) << 2
        }

        pub const fn b(&self) -> u8 {
            ((self.bits & 0x1f) as u8) << 3
        }

        pub fn to_gray(&self) -> u8 {
            ((self.r() as u16 + self.g() as u16 + self.b() as u16) / 3) as u8
        }

        pub fn mul(&self, factor: f32) -> Self {
            Self::from_rgba(
                (self.r() as f32 * factor) as u8,
                (self.g() as f32 * factor) as u8,
                (self.b() as f32 * factor) as u8,
                255,
            )
        }
    }
}

#[cfg(feature = "pixel-gray")]
mod format {
    /// A single 8-bit grayscale value.
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Pixel {
        pub g: u8,
    }

    impl Pixel {
        pub const BLACK: Self = Self { g: 0 };
        pub const WHITE: Self = Self { g: 255 };

        pub const fn from_rgba(r: u8, g: u8, b: u8, _a: u8) -> Self {
            Self {
                g: ((r as u16 + g as u16 + b as u16) / 3) as u8,
            }
        }

        pub const fn from_gray(g: u8) -> Self {
            Self { g }
        }

        pub const fn to_gray(&self) -> u8 {
            self.g
        }

        pub fn mul(&self, factor: f32) -> Self {
            Self {
                g: (self.g as f32 * factor) as u8,
            }
        }
    }
}

pub use format::Pixel;
