//! Background compositing thread.
//!
//! The window loop submits one pair at a time and polls for the outcome each
//! frame, so loading, drawing and encoding never stall rendering.

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::{debug, error};
use std::thread;

use crate::compositor::{Composite, Compositor};
use crate::error::{CompositeError, CompositeResult};
use crate::selector::ImagePair;

pub type CompositeOutcome = (ImagePair, CompositeResult<Composite>);

pub struct CompositeWorker {
    requests: Sender<ImagePair>,
    results: Receiver<CompositeOutcome>,
    _handle: thread::JoinHandle<()>, // Detached on drop, a stalled load must not block exit
}

impl CompositeWorker {
    pub fn spawn<C: Compositor + Send + 'static>(mut compositor: C) -> std::io::Result<Self> {
        let (request_tx, request_rx) = unbounded::<ImagePair>();
        let (result_tx, result_rx) = unbounded::<CompositeOutcome>();

        let handle = thread::Builder::new()
            .name("photo-frames-compositor".to_string())
            .spawn(move || {
                debug!("Compositor worker started");
                while let Ok(pair) = request_rx.recv() {
                    let result = compositor.compose(&pair);
                    if result_tx.send((pair, result)).is_err() {
                        break;
                    }
                }
                debug!("Compositor worker stopped");
            })?;

        Ok(Self {
            requests: request_tx,
            results: result_rx,
            _handle: handle,
        })
    }

    pub fn submit(&self, pair: ImagePair) -> CompositeResult<()> {
        self.requests.send(pair).map_err(|e| {
            error!("Failed to enqueue composite for {}: worker gone", e.0.photo.display());
            CompositeError::WorkerStopped
        })
    }

    /// Non-blocking: `Ok(None)` while the composite is still being made.
    pub fn poll(&self) -> CompositeResult<Option<CompositeOutcome>> {
        match self.results.try_recv() {
            Ok(outcome) => Ok(Some(outcome)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(CompositeError::WorkerStopped),
        }
    }
}

// Sender drops -> channel closes -> worker leaves its recv() loop after the current job
impl Drop for CompositeWorker {
    fn drop(&mut self) {
        debug!("Compositor worker shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    struct Echo;

    impl Compositor for Echo {
        fn compose(&mut self, pair: &ImagePair) -> CompositeResult<Composite> {
            if pair.photo.ends_with("bad.jpg") {
                return Err(CompositeError::SurfaceUnavailable { width: 0, height: 0 });
            }
            Ok(Composite {
                width: 1,
                height: 1,
                jpeg: Vec::new(),
                pixels: RgbaImage::new(1, 1),
            })
        }
    }

    struct Panics;

    impl Compositor for Panics {
        fn compose(&mut self, _pair: &ImagePair) -> CompositeResult<Composite> {
            panic!("compositor crashed");
        }
    }

    fn pair(photo: &str) -> ImagePair {
        ImagePair {
            frame: PathBuf::from("frame.png"),
            photo: PathBuf::from(photo),
        }
    }

    fn wait(worker: &CompositeWorker) -> CompositeResult<CompositeOutcome> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = worker.poll()? {
                return Ok(outcome);
            }
            assert!(Instant::now() < deadline, "worker never answered");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn nothing_to_poll_before_submit() {
        let worker = CompositeWorker::spawn(Echo).unwrap();
        assert!(worker.poll().unwrap().is_none());
    }

    #[test]
    fn outcomes_come_back_in_order_with_their_pair() {
        let worker = CompositeWorker::spawn(Echo).unwrap();
        worker.submit(pair("a.jpg")).unwrap();
        worker.submit(pair("bad.jpg")).unwrap();

        let (first, result) = wait(&worker).unwrap();
        assert_eq!(first, pair("a.jpg"));
        assert!(result.is_ok());

        let (second, result) = wait(&worker).unwrap();
        assert_eq!(second, pair("bad.jpg"));
        assert!(matches!(result, Err(CompositeError::SurfaceUnavailable { .. })));
    }

    #[test]
    fn crashed_worker_is_reported() {
        let worker = CompositeWorker::spawn(Panics).unwrap();
        worker.submit(pair("a.jpg")).unwrap();
        assert!(matches!(wait(&worker), Err(CompositeError::WorkerStopped)));
        assert!(matches!(worker.submit(pair("b.jpg")), Err(CompositeError::WorkerStopped)));
    }
}
