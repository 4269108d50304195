//! Core library for the ArtMentor overlay preview.
//!
//! A session composes one of three mode dependent overlays (a traceable
//! template, a blended reference image or a stylised cube) on top of a base
//! frame, then reacts to single key presses. Every external collaborator
//! (capture device, window, file picker, clock) sits behind a trait so the
//! whole loop can be exercised without hardware.

pub mod assets;
pub mod background;
pub mod clock;
pub mod config;
pub mod error;
pub mod input;
pub mod record;
pub mod render;
pub mod session;
pub mod state;

pub use assets::{architectural_sketch, decode_image, SketchPicker, TemplateCatalog, TemplateSource};
pub use background::{test_background, StaticSource};
pub use clock::{rotation_angle, Clock, FixedClock, PlaybackClock};
pub use config::SessionConfig;
pub use error::{OverlayError, Result};
pub use input::{Command, InputDispatcher, Key, ReferencePicker};
pub use record::SnapshotRecorder;
pub use render::{blend::blend, FrameRenderer};
pub use session::{DisplaySink, ExitReason, FrameSource, Session, SessionSummary};
pub use state::{AppState, Mode, ModelDescriptor};
