// File: crates/surface-skia-gl/tests/config_match.rs
// Purpose: Config ranking and render-target helpers that need no display or GPU.

use surface_core::ContextConfig;
use surface_skia_gl::surface::framebuffer_info;
use surface_skia_gl::ConfigTraits;

fn rgba8(depth: u8, stencil: u8, samples: u8) -> ConfigTraits {
    ConfigTraits { red: 8, green: 8, blue: 8, alpha: 8, depth, stencil, samples }
}

#[test]
fn exact_layout_scores_zero() {
    let want = ContextConfig::default();
    assert_eq!(rgba8(0, 8, 0).score(&want), Some(0));
}

#[test]
fn mismatched_color_is_rejected() {
    let want = ContextConfig::default();
    let rgb565 = ConfigTraits { red: 5, green: 6, blue: 5, alpha: 0, depth: 0, stencil: 8, samples: 0 };
    assert_eq!(rgb565.score(&want), None);
    let no_alpha = ConfigTraits { alpha: 0, ..rgba8(0, 8, 0) };
    assert_eq!(no_alpha.score(&want), None);
}

#[test]
fn per_channel_request_matches_rgb565() {
    let want = ContextConfig::default()
        .with_red_bits(5)
        .with_green_bits(6)
        .with_blue_bits(5)
        .with_alpha_bits(0);
    let rgb565 = ConfigTraits { red: 5, green: 6, blue: 5, alpha: 0, depth: 0, stencil: 8, samples: 0 };
    assert_eq!(rgb565.score(&want), Some(0));
    assert_eq!(rgba8(0, 8, 0).score(&want), None);
}

#[test]
fn stencil_free_request_prefers_no_stencil() {
    let want = ContextConfig::default().with_stencil_bits(0);
    assert_eq!(rgba8(0, 0, 0).score(&want), Some(0));
    assert_eq!(rgba8(0, 8, 0).score(&want), Some(8));
}

#[test]
fn missing_stencil_or_samples_is_rejected() {
    let want = ContextConfig::default().with_samples(4);
    assert_eq!(rgba8(0, 0, 4).score(&want), None);
    assert_eq!(rgba8(0, 8, 0).score(&want), None);
    assert_eq!(rgba8(0, 8, 4).score(&want), Some(0));
}

#[test]
fn extra_samples_cost_more_than_extra_depth() {
    let want = ContextConfig::default();
    let deep = rgba8(24, 8, 0).score(&want).unwrap();
    let multisampled = rgba8(0, 8, 4).score(&want).unwrap();
    assert!(deep < multisampled, "{deep} vs {multisampled}");
}

#[test]
fn depth_request_is_honored() {
    let want = ContextConfig::default().with_depth_bits(16);
    assert_eq!(rgba8(0, 8, 0).score(&want), None);
    assert_eq!(rgba8(24, 8, 0).score(&want), Some(8));
}

#[test]
fn window_framebuffer_is_default_fbo() {
    let info = framebuffer_info();
    assert_eq!(info.fboid, 0);
}
