use anyhow::Result;
use raylib::prelude::*;

use crate::compositor::Composite;
use crate::constants::*;

/// GPU copy of the composite currently on screen.
pub struct CompositeView {
    texture: Texture2D,
}

impl CompositeView {
    /// Uploads the already decoded RGBA surface; the JPEG is not touched.
    pub fn new(
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        composite: &Composite,
    ) -> Result<Self> {
        let (width, height) = composite.pixels.dimensions();
        let blank = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        let mut texture = rl
            .load_texture_from_image(thread, &blank)
            .map_err(|e| anyhow::anyhow!("Failed to create composite texture: {}", e))?;
        texture
            .update_texture(composite.pixels.as_raw())
            .map_err(|e| anyhow::anyhow!("Failed to upload composite pixels: {}", e))?;

        Ok(Self { texture })
    }

    /// Draws the composite centred, scaled down to fit the area above the button.
    pub fn draw(&self, d: &mut RaylibDrawHandle, screen_width: f32, screen_height: f32) {
        let tex_width = self.texture.width() as f32;
        let tex_height = self.texture.height() as f32;
        if tex_width <= 0.0 || tex_height <= 0.0 {
            return;
        }

        let area_height = (screen_height - BUTTON_HEIGHT - 2.0 * BUTTON_MARGIN).max(1.0);
        let scale = (screen_width * VIEW_FILL_RATIO / tex_width)
            .min(area_height * VIEW_FILL_RATIO / tex_height)
            .min(1.0);

        let scaled_width = tex_width * scale;
        let scaled_height = tex_height * scale;

        d.draw_texture_pro(
            &self.texture,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            Rectangle::new(
                (screen_width - scaled_width) * 0.5,
                (area_height - scaled_height) * 0.5,
                scaled_width,
                scaled_height,
            ),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }
}

/// Bottom-centre rectangle of the single action button.
pub fn button_rect(screen_width: f32, screen_height: f32) -> Rectangle {
    Rectangle::new(
        (screen_width - BUTTON_WIDTH) * 0.5,
        screen_height - BUTTON_HEIGHT - BUTTON_MARGIN,
        BUTTON_WIDTH,
        BUTTON_HEIGHT,
    )
}

pub fn draw_button(d: &mut RaylibDrawHandle, rect: Rectangle, label: &str, hovered: bool) {
    let fill = if hovered { Color::DARKGRAY } else { Color::GRAY };
    d.draw_rectangle_rec(rect, fill);
    d.draw_rectangle_lines_ex(rect, 2.0, Color::RAYWHITE);

    // Default font glyphs are roughly half as wide as the font size.
    let text_width = label.len() as i32 * BUTTON_FONT_SIZE / 2;
    d.draw_text(
        label,
        (rect.x + rect.width * 0.5) as i32 - text_width / 2,
        (rect.y + (rect.height - BUTTON_FONT_SIZE as f32) * 0.5) as i32,
        BUTTON_FONT_SIZE,
        Color::RAYWHITE,
    );
}
