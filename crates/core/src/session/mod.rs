//! The cooperative preview loop: acquire, render, display, poll, dispatch.

use std::time::Duration;

use image::RgbImage;
use tracing::{info, warn};

use crate::{
    input::{Command, InputDispatcher, Key},
    record::SnapshotRecorder,
    AppState, FrameRenderer, Mode, Result, SessionConfig,
};

/// Provider of base images.
pub trait FrameSource {
    /// Returns `Ok(None)` once the stream has ended.
    fn read_frame(&mut self) -> Result<Option<RgbImage>>;
}

/// Output window plus its keyboard.
pub trait DisplaySink {
    fn show(&mut self, frame: &RgbImage) -> Result<()>;
    /// Waits at most `timeout` for a key press.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn read_frame(&mut self) -> Result<Option<RgbImage>> {
        (**self).read_frame()
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn show(&mut self, frame: &RgbImage) -> Result<()> {
        (**self).show(frame)
    }

    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>> {
        (**self).poll_key(timeout)
    }
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    Quit,
    SourceEnded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub frames: u64,
    pub exit: ExitReason,
    pub final_mode: Mode,
}

/// Owns the capture source and display sink for the lifetime of the loop.
/// Both are dropped when [`Session::run`] returns, whatever the outcome.
pub struct Session<S, D> {
    source: S,
    sink: D,
    state: AppState,
    renderer: FrameRenderer,
    input: InputDispatcher,
    recorder: Option<SnapshotRecorder>,
    poll_timeout: Duration,
}

impl<S: FrameSource, D: DisplaySink> Session<S, D> {
    pub fn new(
        config: &SessionConfig,
        source: S,
        sink: D,
        state: AppState,
        renderer: FrameRenderer,
        input: InputDispatcher,
    ) -> Self {
        Self {
            source,
            sink,
            state,
            renderer,
            input,
            recorder: config.snapshot_dir.clone().map(SnapshotRecorder::new),
            poll_timeout: Duration::from_millis(config.poll_timeout_ms),
        }
    }

    pub fn run(mut self) -> Result<SessionSummary> {
        info!(mode = self.state.mode.display_name(), "starting session");
        let mut frames = 0u64;

        let exit = loop {
            let Some(base) = self.source.read_frame()? else {
                warn!("capture source stopped producing frames");
                break ExitReason::SourceEnded;
            };

            let composed = self.renderer.render(&base, &self.state);
            self.sink.show(&composed)?;
            frames += 1;

            let Some(key) = self.sink.poll_key(self.poll_timeout)? else {
                continue;
            };
            match self.input.dispatch(key, &mut self.state) {
                Command::Quit => break ExitReason::Quit,
                Command::SingleAction(mode) => self.snapshot(&composed, mode),
                _ => {}
            }
        };

        info!(frames, ?exit, "session closed");
        Ok(SessionSummary {
            frames,
            exit,
            final_mode: self.state.mode,
        })
    }

    fn snapshot(&mut self, frame: &RgbImage, mode: Mode) {
        if let Some(recorder) = self.recorder.as_mut() {
            if let Err(err) = recorder.capture(frame, mode) {
                warn!(error = %err, "failed to save snapshot");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        rc::Rc,
    };

    use image::{DynamicImage, Rgb};

    use super::*;
    use crate::{
        assets::TemplateCatalog, clock::FixedClock, input::ReferencePicker, OverlayError,
    };

    struct FakeSource {
        remaining: Option<usize>,
        fail: bool,
        drops: Rc<Cell<usize>>,
    }

    impl FrameSource for FakeSource {
        fn read_frame(&mut self) -> Result<Option<RgbImage>> {
            if self.fail {
                return Err(OverlayError::SourceUnavailable("unplugged".into()));
            }
            if let Some(remaining) = self.remaining.as_mut() {
                if *remaining == 0 {
                    return Ok(None);
                }
                *remaining -= 1;
            }
            Ok(Some(RgbImage::from_pixel(320, 180, Rgb([50, 50, 50]))))
        }
    }

    impl Drop for FakeSource {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    struct FakeSink {
        keys: VecDeque<Option<Key>>,
        shown: Rc<RefCell<Vec<RgbImage>>>,
        drops: Rc<Cell<usize>>,
    }

    impl DisplaySink for FakeSink {
        fn show(&mut self, frame: &RgbImage) -> Result<()> {
            self.shown.borrow_mut().push(frame.clone());
            Ok(())
        }

        fn poll_key(&mut self, _timeout: Duration) -> Result<Option<Key>> {
            Ok(self.keys.pop_front().unwrap_or(Some(Key::Char('q'))))
        }
    }

    impl Drop for FakeSink {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    struct CancellingPicker;

    impl ReferencePicker for CancellingPicker {
        fn pick(&mut self) -> Result<Option<DynamicImage>> {
            Ok(None)
        }
    }

    struct Rig {
        source_drops: Rc<Cell<usize>>,
        sink_drops: Rc<Cell<usize>>,
        shown: Rc<RefCell<Vec<RgbImage>>>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                source_drops: Rc::new(Cell::new(0)),
                sink_drops: Rc::new(Cell::new(0)),
                shown: Rc::default(),
            }
        }

        fn session(
            &self,
            config: &SessionConfig,
            state: AppState,
            frames: Option<usize>,
            fail: bool,
            keys: Vec<Option<Key>>,
        ) -> Session<FakeSource, FakeSink> {
            let source = FakeSource {
                remaining: frames,
                fail,
                drops: self.source_drops.clone(),
            };
            let sink = FakeSink {
                keys: keys.into(),
                shown: self.shown.clone(),
                drops: self.sink_drops.clone(),
            };
            let renderer = FrameRenderer::new(
                config,
                Box::new(TemplateCatalog::builtin()),
                Box::new(FixedClock::default()),
            );
            let input = InputDispatcher::new(Box::new(CancellingPicker));
            Session::new(config, source, sink, state, renderer, input)
        }

        fn assert_released_once(&self) {
            assert_eq!(self.source_drops.get(), 1);
            assert_eq!(self.sink_drops.get(), 1);
        }
    }

    fn press(c: char) -> Option<Key> {
        Some(Key::Char(c))
    }

    #[test]
    fn quit_ends_the_loop_within_one_tick() {
        let rig = Rig::new();
        let session = rig.session(
            &SessionConfig::default(),
            AppState::default(),
            None,
            false,
            vec![None, press('q'), press('m')],
        );

        let summary = session.run().unwrap();
        assert_eq!(summary.exit, ExitReason::Quit);
        assert_eq!(summary.frames, 2);
        assert_eq!(summary.final_mode, Mode::TraceProjection);
        rig.assert_released_once();
    }

    #[test]
    fn end_of_stream_stops_cleanly() {
        let rig = Rig::new();
        let session = rig.session(
            &SessionConfig::default(),
            AppState::default(),
            Some(3),
            false,
            vec![None; 10],
        );

        let summary = session.run().unwrap();
        assert_eq!(summary.exit, ExitReason::SourceEnded);
        assert_eq!(summary.frames, 3);
        rig.assert_released_once();
    }

    #[test]
    fn source_failure_is_fatal_but_releases_resources() {
        let rig = Rig::new();
        let session = rig.session(
            &SessionConfig::default(),
            AppState::default(),
            None,
            true,
            Vec::new(),
        );

        let err = session.run().unwrap_err();
        assert!(matches!(err, OverlayError::SourceUnavailable(_)));
        assert!(rig.shown.borrow().is_empty());
        rig.assert_released_once();
    }

    #[test]
    fn detecting_a_surface_swaps_prompt_for_template() {
        let rig = Rig::new();
        let session = rig.session(
            &SessionConfig::default(),
            AppState::default(),
            None,
            false,
            vec![press('d'), press('q')],
        );

        let summary = session.run().unwrap();
        assert_eq!(summary.frames, 2);
        let shown = rig.shown.borrow();
        // Prompt rectangle edge at (w / 4, h / 2) before, gone after.
        assert_eq!(*shown[0].get_pixel(80, 90), Rgb([255, 255, 0]));
        assert_ne!(*shown[1].get_pixel(80, 90), Rgb([255, 255, 0]));
    }

    #[test]
    fn cancelled_reference_pick_leaves_frames_unchanged() {
        let rig = Rig::new();
        let session = rig.session(
            &SessionConfig::default(),
            AppState::new(Mode::ReferenceImage),
            None,
            false,
            vec![press('d'), press('q')],
        );

        session.run().unwrap();
        let shown = rig.shown.borrow();
        assert_eq!(shown[0], shown[1]);
    }

    #[test]
    fn single_action_saves_snapshot_when_configured() {
        let dir = std::env::temp_dir().join(format!("artmentor-session-{}", std::process::id()));
        let config = SessionConfig {
            snapshot_dir: Some(dir.clone()),
            ..Default::default()
        };
        let rig = Rig::new();
        let session = rig.session(
            &config,
            AppState::new(Mode::Model3D),
            None,
            false,
            vec![press(' '), press('q')],
        );

        session.run().unwrap();
        assert!(dir.join("snapshot-model3d-1.png").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn mode_presses_cycle_through_all_modes() {
        let rig = Rig::new();
        let session = rig.session(
            &SessionConfig::default(),
            AppState::default(),
            None,
            false,
            vec![press('m'), press('m'), press('m'), press('m'), press('q')],
        );

        let summary = session.run().unwrap();
        assert_eq!(summary.final_mode, Mode::ReferenceImage);
        assert_eq!(summary.frames, 5);
    }
}
