use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use raylib::prelude::*;

mod compositor;
mod config;
mod constants;
mod countdown;
mod error;
mod image_loader;
mod layout;
mod selector;
mod session;
mod state;
mod view;
mod worker;

use crate::compositor::{Composite, FrameCompositor};
use crate::config::Args;
use crate::constants::*;
use crate::image_loader::load_sorted_image_paths;
use crate::session::Session;
use crate::state::{ShellCommand, SlideshowState};
use crate::view::{button_rect, draw_button, CompositeView};
use crate::worker::CompositeWorker;

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn save_composite(dir: &Path, revision: u64, composite: &Composite) {
    let path = dir.join(format!("composite_{:04}.jpg", revision));
    match fs::write(&path, &composite.jpeg) {
        Ok(()) => log::info!("Saved {}", path.display()),
        Err(e) => log::error!("Failed to save {}: {}", path.display(), e),
    }
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    // --- Load Catalogs ---
    let frames = load_sorted_image_paths(&args.frames)
        .with_context(|| format!("Failed to load frames from {}", args.frames.display()))?;
    let photos = load_sorted_image_paths(&args.photos)
        .with_context(|| format!("Failed to load photos from {}", args.photos.display()))?;
    log::info!("Found {} frames and {} photos", frames.len(), photos.len());

    if let Some(dir) = &args.save_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create save directory {}", dir.display()))?;
    }

    let worker = CompositeWorker::spawn(FrameCompositor::new(args.quality))
        .context("Failed to start compositor thread")?;
    let mut session = Session::new(
        photos,
        frames,
        args.display_duration(),
        worker,
        StdRng::from_os_rng(),
    );

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Photo Frames")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut view: Option<CompositeView> = None;
    let mut shown_revision = 0;
    let mut title = String::new();

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let sw = rl.get_screen_width() as f32;
        let sh = rl.get_screen_height() as f32;
        let button = button_rect(sw, sh);
        let hovered = button.check_collision_point_rec(rl.get_mouse_position());

        // 1. Shell input: one action, start -> next -> exit
        let activated = (hovered && rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT))
            || rl.is_key_pressed(KeyboardKey::KEY_SPACE)
            || rl.is_key_pressed(KeyboardKey::KEY_ENTER);
        if activated && session.on_action() == ShellCommand::Exit {
            break;
        }

        // 2. Collect finished composite, or run the countdown
        session.update(dt);

        // 3. Upload a freshly composed image
        if session.revision() != shown_revision {
            shown_revision = session.revision();
            if let Some(composite) = session.composite() {
                if let Some(dir) = &args.save_dir {
                    save_composite(dir, shown_revision, composite);
                }
                match CompositeView::new(&mut rl, &thread, composite) {
                    Ok(new_view) => view = Some(new_view),
                    Err(e) => log::error!("Failed to display composite: {:#}", e),
                }
            }
        }

        let status = session.status_text();
        if status != title {
            rl.set_window_title(&thread, &status);
            title = status;
        }

        // --- Draw ---
        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::BLACK);
        match &view {
            Some(view) => view.draw(&mut d, sw, sh),
            None if session.state() == SlideshowState::Idle => {
                d.draw_text("Press Start to begin", 20, 20, 20, Color::RAYWHITE);
            }
            None => {}
        }
        if session.state() == SlideshowState::Exhausted {
            d.draw_text("All photos shown", 20, 20, 20, Color::LIME);
        }
        draw_button(&mut d, button, session.action_label(), hovered);
    }

    log::info!("Slideshow closed after {} photos", session.shown_count());
    Ok(())
}
