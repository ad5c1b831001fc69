use crate::constants::PHOTO_BOX_RATIO;

/// Where the photo goes inside the frame, in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Placement {
    /// Integer rectangle for drawing; never smaller than one pixel.
    pub fn to_pixels(&self) -> (i64, i64, u32, u32) {
        (
            self.x.round() as i64,
            self.y.round() as i64,
            (self.width.round() as u32).max(1),
            (self.height.round() as u32).max(1),
        )
    }
}

/// Fits the photo into the centered 80% box of the frame, keeping the
/// photo's aspect ratio. Wider photos keep the full box width, all others
/// keep the full box height.
pub fn fit_within_frame(frame_width: u32, frame_height: u32, photo_width: u32, photo_height: u32) -> Placement {
    let frame_w = frame_width as f32;
    let frame_h = frame_height as f32;

    let mut width = frame_w * PHOTO_BOX_RATIO;
    let mut height = frame_h * PHOTO_BOX_RATIO;

    if photo_width > 0 && photo_height > 0 && frame_height > 0 {
        let photo_ratio = photo_width as f32 / photo_height as f32;
        let frame_ratio = frame_w / frame_h;

        if photo_ratio > frame_ratio {
            height = width / photo_ratio;
        } else {
            width = height * photo_ratio;
        }
    }

    Placement {
        x: (frame_w - width) / 2.0,
        y: (frame_h - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 1e-3, "{actual} != {expected}");
    }

    fn assert_placement(p: Placement, x: f32, y: f32, width: f32, height: f32) {
        assert_close(p.x, x);
        assert_close(p.y, y);
        assert_close(p.width, width);
        assert_close(p.height, height);
    }

    #[test]
    fn wide_photo_keeps_box_width() {
        let p = fit_within_frame(800, 600, 2000, 1000);
        assert_placement(p, 80.0, 140.0, 640.0, 320.0);
    }

    #[test]
    fn tall_photo_keeps_box_height() {
        let p = fit_within_frame(800, 600, 1000, 2000);
        assert_placement(p, 280.0, 60.0, 240.0, 480.0);
    }

    #[test]
    fn same_ratio_fills_the_box() {
        let p = fit_within_frame(800, 600, 400, 300);
        assert_placement(p, 80.0, 60.0, 640.0, 480.0);
    }

    #[test]
    fn degenerate_photo_uses_full_box() {
        let p = fit_within_frame(100, 50, 0, 10);
        assert_placement(p, 10.0, 5.0, 80.0, 40.0);
    }

    #[test]
    fn pixel_rect_rounds_and_clamps() {
        let p = Placement { x: 10.4, y: 9.6, width: 0.2, height: 33.5 };
        assert_eq!(p.to_pixels(), (10, 10, 1, 34));
    }
}
