pub const WINDOW_WIDTH: i32 = 960;            // Default window width
pub const WINDOW_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 30;                      // Frames per second

pub const DEFAULT_DURATION_MS: u64 = 30_000;  // How long each composite stays on screen
pub const DEFAULT_JPEG_QUALITY: u8 = 85;      // Quality of the encoded composite

pub const PHOTO_BOX_RATIO: f32 = 0.8;         // Share of the frame the photo may cover
pub const VIEW_FILL_RATIO: f32 = 0.9;         // Share of the window the composite may cover

pub const BUTTON_WIDTH: f32 = 160.0;
pub const BUTTON_HEIGHT: f32 = 44.0;
pub const BUTTON_MARGIN: f32 = 16.0;
pub const BUTTON_FONT_SIZE: i32 = 22;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];
pub const MAX_SURFACE_DIMENSION: u32 = 65_535;  // Largest side a JPEG can encode
