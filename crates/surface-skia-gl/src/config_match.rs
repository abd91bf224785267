// File: crates/surface-skia-gl/src/config_match.rs
// Summary: Capability negotiation: build the glutin config template and rank candidate configs.

use glutin::config::{Api, ColorBufferType, Config, ConfigSurfaceTypes, ConfigTemplate, ConfigTemplateBuilder};
use glutin::prelude::*;
use surface_core::ContextConfig;

/// Framebuffer layout of a candidate config, detached from the display so
/// ranking can be reasoned about (and tested) without a GPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigTraits {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub depth: u8,
    pub stencil: u8,
    pub samples: u8,
}

impl ConfigTraits {
    pub fn of(config: &Config) -> Option<Self> {
        let (red, green, blue) = match config.color_buffer_type()? {
            ColorBufferType::Rgb { r_size, g_size, b_size } => (r_size, g_size, b_size),
            ColorBufferType::Luminance(_) => return None,
        };
        Some(Self {
            red,
            green,
            blue,
            alpha: config.alpha_size(),
            depth: config.depth_size(),
            stencil: config.stencil_size(),
            samples: config.num_samples(),
        })
    }

    /// Lower is better; `None` when the config cannot satisfy `want`.
    /// Exact color sizes are required; extra depth, stencil, or samples cost score.
    pub fn score(&self, want: &ContextConfig) -> Option<u32> {
        let exact_color = self.red == want.red_bits
            && self.green == want.green_bits
            && self.blue == want.blue_bits
            && self.alpha == want.alpha_bits;
        if !exact_color
            || self.depth < want.depth_bits
            || self.stencil < want.stencil_bits
            || self.samples < want.samples
        {
            return None;
        }
        let extra = |have: u8, need: u8| u32::from(have - need);
        Some(
            extra(self.samples, want.samples) * 16
                + extra(self.depth, want.depth_bits)
                + extra(self.stencil, want.stencil_bits),
        )
    }
}

/// Template asking for a GLES config usable with both windows and the 1x1
/// placeholder pbuffer.
pub fn template(want: &ContextConfig) -> ConfigTemplate {
    let mut builder = ConfigTemplateBuilder::new()
        .with_api(Api::GLES2)
        .with_surface_type(ConfigSurfaceTypes::WINDOW | ConfigSurfaceTypes::PBUFFER)
        .with_alpha_size(want.alpha_bits)
        .with_depth_size(want.depth_bits)
        .with_stencil_size(want.stencil_bits);
    if want.samples > 0 {
        builder = builder.with_multisampling(want.samples);
    }
    builder.build()
}

/// Picks the best-scoring candidate.
pub fn pick<I>(candidates: I, want: &ContextConfig) -> Option<Config>
where
    I: IntoIterator<Item = Config>,
{
    candidates
        .into_iter()
        .filter_map(|config| {
            let score = ConfigTraits::of(&config)?.score(want)?;
            Some((score, config))
        })
        .min_by_key(|(score, _)| *score)
        .map(|(_, config)| config)
}
