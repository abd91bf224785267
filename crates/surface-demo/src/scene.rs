// File: crates/surface-demo/src/scene.rs
// Summary: Demo content producer: a small animated Skia scene drawn onto whatever canvas the renderer hands out.

use skia_safe as skia;

pub fn draw(canvas: &skia::Canvas, seconds: f32, density: f32) {
    let size = canvas.base_layer_size();
    let (w, h) = (size.width as f32, size.height as f32);
    canvas.clear(skia::Color::from_argb(255, 18, 18, 20));

    // grid
    let mut grid = skia::Paint::default();
    grid.set_color(skia::Color::from_argb(255, 40, 40, 45));
    grid.set_anti_alias(true);
    grid.set_stroke_width(1.0 * density);
    let step = 48.0 * density;
    let mut x = 0.0;
    while x < w {
        canvas.draw_line((x, 0.0), (x, h), &grid);
        x += step;
    }
    let mut y = 0.0;
    while y < h {
        canvas.draw_line((0.0, y), (w, y), &grid);
        y += step;
    }

    // spinning card
    let side = w.min(h) * 0.35;
    let mut card = skia::Paint::default();
    card.set_anti_alias(true);
    card.set_color(skia::Color::from_argb(255, 64, 160, 255));
    canvas.save();
    canvas.translate((w / 2.0, h / 2.0));
    canvas.rotate(seconds * 45.0, None);
    let rect = skia::Rect::from_xywh(-side / 2.0, -side / 2.0, side, side);
    canvas.draw_round_rect(rect, 16.0 * density, 16.0 * density, &card);
    canvas.restore();

    let mut text = skia::Paint::default();
    text.set_color(skia::Color::from_argb(255, 235, 235, 245));
    let mut font = skia::Font::default();
    font.set_size(14.0 * density);
    let label = format!("{}x{}  t={seconds:.1}s", size.width, size.height);
    canvas.draw_str(label, (12.0 * density, h - 12.0 * density), &font, &text);
}
