use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::time::Duration;
use rand::rngs::StdRng;

use crate::compositor::Composite;
use crate::countdown::Countdown;
use crate::error::CompositeResult;
use crate::selector::{pick, ImagePair};
use crate::state::{ShellCommand, SlideshowState};
use crate::worker::CompositeWorker;

/// All state of one slideshow run, owned by the display loop.
///
/// At most one composite is in flight. The countdown is armed only once it
/// has settled, so time spent composing never eats into display time.
pub struct Session {
    photos: Vec<PathBuf>,
    frames: Vec<PathBuf>,
    used: HashSet<PathBuf>,
    failures: HashMap<PathBuf, u32>,

    state: SlideshowState,
    countdown: Option<Countdown>,
    in_flight: Option<ImagePair>,
    composite: Option<Composite>,
    revision: u64,

    display_duration: Duration,
    worker: CompositeWorker,
    rng: StdRng,
}

impl Session {
    pub fn new(
        photos: Vec<PathBuf>,
        frames: Vec<PathBuf>,
        display_duration: Duration,
        worker: CompositeWorker,
        rng: StdRng,
    ) -> Self {
        Self {
            photos,
            frames,
            used: HashSet::new(),
            failures: HashMap::new(),
            state: SlideshowState::Idle,
            countdown: None,
            in_flight: None,
            composite: None,
            revision: 0,
            display_duration,
            worker,
            rng,
        }
    }

    pub fn state(&self) -> SlideshowState {
        self.state
    }

    pub fn composite(&self) -> Option<&Composite> {
        self.composite.as_ref()
    }

    /// Bumped every time a new composite replaces the old one.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn shown_count(&self) -> usize {
        self.used.len()
    }

    pub fn is_composing(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn remaining_secs(&self) -> Option<u64> {
        self.countdown.as_ref().map(Countdown::remaining_secs)
    }

    pub fn start(&mut self) {
        if self.state != SlideshowState::Idle {
            return;
        }
        log::info!("Starting slideshow: {} photos, {} frames", self.photos.len(), self.frames.len());
        self.state = SlideshowState::Running;
        self.request_next();
    }

    /// Manual advance: drops the running countdown and moves on immediately.
    /// Ignored while a composite is still being made.
    pub fn advance(&mut self) {
        if self.state != SlideshowState::Running {
            return;
        }
        if self.is_composing() {
            log::debug!("Advance ignored, composite in flight");
            return;
        }
        self.countdown = None;
        self.request_next();
    }

    /// Collects a finished composite, or feeds frame time to the countdown
    /// and advances when it runs out.
    pub fn update(&mut self, dt: f32) {
        if self.state != SlideshowState::Running {
            return;
        }

        if self.in_flight.is_some() {
            // The frame that delivers the composite does not count towards its countdown.
            match self.worker.poll() {
                Ok(Some((pair, result))) => self.finish_cycle(pair, result),
                Ok(None) => {}
                Err(e) => {
                    if let Some(pair) = self.in_flight.take() {
                        self.finish_cycle(pair, Err(e));
                    }
                }
            }
            return;
        }

        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        if countdown.advance(dt) > 0 {
            log::debug!("Countdown: {}s left", countdown.remaining_secs());
        }
        if countdown.is_expired() {
            self.countdown = None;
            self.request_next();
        }
    }

    /// The single shell action: start, then advance, then exit.
    pub fn on_action(&mut self) -> ShellCommand {
        match self.state {
            SlideshowState::Idle => {
                self.start();
                ShellCommand::Continue
            }
            SlideshowState::Running => {
                self.advance();
                ShellCommand::Continue
            }
            SlideshowState::Exhausted => ShellCommand::Exit,
        }
    }

    pub fn action_label(&self) -> &'static str {
        match self.state {
            SlideshowState::Idle => "Start",
            SlideshowState::Running => "Next",
            SlideshowState::Exhausted => "Exit",
        }
    }

    pub fn status_text(&self) -> String {
        match self.state {
            SlideshowState::Idle => "Photo Frames".to_string(),
            SlideshowState::Running if self.is_composing() => format!(
                "Photo Frames - {}/{} - composing...",
                self.shown_count(),
                self.photos.len()
            ),
            SlideshowState::Running => match self.remaining_secs() {
                Some(secs) => format!(
                    "Photo Frames - {}/{} - next in {}s",
                    self.shown_count(),
                    self.photos.len(),
                    secs
                ),
                None => "Photo Frames".to_string(),
            },
            SlideshowState::Exhausted => "Photo Frames - all photos shown".to_string(),
        }
    }

    fn request_next(&mut self) {
        self.countdown = None;

        let Some(pair) = pick(&self.photos, &self.frames, &self.used, &mut self.rng) else {
            log::info!("All {} photos shown, slideshow finished", self.used.len());
            self.state = SlideshowState::Exhausted;
            return;
        };

        log::info!("Composing {} in {}", pair.photo.display(), pair.frame.display());
        match self.worker.submit(pair.clone()) {
            Ok(()) => self.in_flight = Some(pair),
            Err(e) => self.finish_cycle(pair, Err(e)),
        }
    }

    fn finish_cycle(&mut self, pair: ImagePair, result: CompositeResult<Composite>) {
        self.in_flight = None;

        match result {
            Ok(composite) => {
                log::info!("Showing {} in {}", pair.photo.display(), pair.frame.display());
                self.composite = Some(composite);
                self.revision += 1;
                self.failures.remove(&pair.photo);
                self.used.insert(pair.photo);
            }
            Err(e) => {
                log::error!("Failed to compose {} with {}: {}", pair.photo.display(), pair.frame.display(), e);
                let failures = self.failures.entry(pair.photo.clone()).or_insert(0);
                *failures += 1;
                if *failures > 1 {
                    log::warn!(
                        "{} failed {} times, it stays in the catalog and is retried",
                        pair.photo.display(),
                        failures
                    );
                }
            }
        }

        self.countdown = Some(Countdown::arm(self.display_duration));
    }
}
