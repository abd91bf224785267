// File: crates/surface-core/src/config.rs
// Summary: Capability requirements for context negotiation and surface geometry.

/// Requested framebuffer layout and API version for the drawing context.
///
/// Contract: a backend must refuse (rather than silently downgrade) configs
/// that cannot satisfy the color, alpha, and stencil sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContextConfig {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    /// MSAA sample count; 0 disables multisampling.
    pub samples: u8,
    /// (major, minor) of the requested GLES version.
    pub api_version: (u8, u8),
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 0,
            stencil_bits: 8,
            samples: 0,
            api_version: (2, 0),
        }
    }
}

impl ContextConfig {
    pub fn with_red_bits(mut self, bits: u8) -> Self { self.red_bits = bits; self }
    pub fn with_green_bits(mut self, bits: u8) -> Self { self.green_bits = bits; self }
    pub fn with_blue_bits(mut self, bits: u8) -> Self { self.blue_bits = bits; self }
    pub fn with_alpha_bits(mut self, bits: u8) -> Self { self.alpha_bits = bits; self }
    pub fn with_depth_bits(mut self, bits: u8) -> Self { self.depth_bits = bits; self }
    pub fn with_stencil_bits(mut self, bits: u8) -> Self { self.stencil_bits = bits; self }
    pub fn with_samples(mut self, samples: u8) -> Self { self.samples = samples; self }
    pub fn with_api_version(mut self, major: u8, minor: u8) -> Self {
        self.api_version = (major, minor);
        self
    }
}

/// Surface geometry in physical pixels.
/// Contract: both dimensions are non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    width: u32,
    height: u32,
}

impl SurfaceSize {
    /// Returns `None` for zero-sized geometry.
    pub const fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            None
        } else {
            Some(Self { width, height })
        }
    }

    /// Accepts the signed sizes hosts usually report; non-positive values give `None`.
    pub fn from_signed(width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            return None;
        }
        Self::new(width as u32, height as u32)
    }

    pub const fn width(&self) -> u32 { self.width }
    pub const fn height(&self) -> u32 { self.height }
}
