use std::path::PathBuf;
use std::time::Duration;
use clap::Parser;

use crate::constants::*;

#[derive(Parser, Debug)]
#[command(
    name = "photo-frames",
    about = "Random photo + picture frame slideshow",
    long_about = "
Pairs a random, not yet shown photo with a random decorative frame, composites
the photo under the frame's transparent window and shows the result. A new
pairing appears when the countdown runs out or when you press Next. Once every
photo has been shown the slideshow stops and only Exit remains.

Example Usage:
  photo-frames --frames ~/Frames --photos ~/Photos --duration-ms 10000
"
)]
pub struct Args {
    /// Directory holding the frame images (PNG with a transparent window)
    #[arg(long, env = "PHOTO_FRAMES_FRAMES_DIR", default_value = "frames")]
    pub frames: PathBuf,

    /// Directory holding the photos
    #[arg(long, env = "PHOTO_FRAMES_PHOTOS_DIR", default_value = "photos")]
    pub photos: PathBuf,

    /// How long each composite stays on screen, in milliseconds
    #[arg(
        long,
        env = "PHOTO_FRAMES_DURATION_MS",
        default_value_t = DEFAULT_DURATION_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub duration_ms: u64,

    /// JPEG quality of the composite (1-100)
    #[arg(
        long,
        env = "PHOTO_FRAMES_JPEG_QUALITY",
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Also write every composite as a JPEG into this directory
    #[arg(long)]
    pub save_dir: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub width: i32,

    /// Window height in pixels
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub height: i32,
}

impl Args {
    pub fn display_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsString;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["photo-frames"]).unwrap();
        assert_eq!(args.duration_ms, 30_000);
        assert_eq!(args.display_duration(), Duration::from_secs(30));
        assert_eq!(args.quality, DEFAULT_JPEG_QUALITY);
        assert!(args.save_dir.is_none());
    }

    #[test]
    fn explicit_values() {
        let args = Args::try_parse_from([
            "photo-frames",
            "--frames",
            "f",
            "--photos",
            "p",
            "--duration-ms",
            "5000",
            "--quality",
            "60",
            "--save-dir",
            "out",
        ])
        .unwrap();
        assert_eq!(args.frames, PathBuf::from("f"));
        assert_eq!(args.photos, PathBuf::from("p"));
        assert_eq!(args.display_duration(), Duration::from_secs(5));
        assert_eq!(args.quality, 60);
        assert_eq!(args.save_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn settings_are_read_from_the_environment() {
        let command = Args::command();
        let env_of = |id: &str| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(|env| env.to_os_string())
        };

        assert_eq!(env_of("duration_ms"), Some(OsString::from("PHOTO_FRAMES_DURATION_MS")));
        assert_eq!(env_of("frames"), Some(OsString::from("PHOTO_FRAMES_FRAMES_DIR")));
        assert_eq!(env_of("photos"), Some(OsString::from("PHOTO_FRAMES_PHOTOS_DIR")));
        assert_eq!(env_of("quality"), Some(OsString::from("PHOTO_FRAMES_JPEG_QUALITY")));
        assert_eq!(env_of("save_dir"), None);
    }

    #[test]
    fn rejects_zero_duration_and_bad_quality() {
        assert!(Args::try_parse_from(["photo-frames", "--duration-ms", "0"]).is_err());
        assert!(Args::try_parse_from(["photo-frames", "--quality", "0"]).is_err());
        assert!(Args::try_parse_from(["photo-frames", "--quality", "101"]).is_err());
    }
}
