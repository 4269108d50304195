use image::DynamicImage;
use tracing::{debug, info, warn};

use crate::{AppState, Mode, ModelDescriptor, Result};

/// Key event delivered by a display sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// The display window was closed by the user.
    Close,
}

/// Outcome of dispatching a single key against the session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// The single-press action fired in the given mode. State is untouched.
    SingleAction(Mode),
    ModeChanged(Mode),
    OverlayToggled(bool),
    SurfaceToggled(bool),
    ReferenceLoaded,
    /// The picker was cancelled or failed; state is unchanged.
    ReferenceUnchanged,
    ModelLoaded,
    Ignored,
}

impl Command {
    pub fn is_quit(self) -> bool {
        matches!(self, Command::Quit)
    }
}

/// Supplies reference images on demand, usually by asking the user for a file.
pub trait ReferencePicker {
    /// Returns `Ok(None)` when the user cancels the selection.
    fn pick(&mut self) -> Result<Option<DynamicImage>>;
}

/// Maps keys to state mutations. Only lowercase keys are recognised.
pub struct InputDispatcher {
    picker: Box<dyn ReferencePicker>,
}

impl InputDispatcher {
    pub fn new(picker: Box<dyn ReferencePicker>) -> Self {
        Self { picker }
    }

    pub fn dispatch(&mut self, key: Key, state: &mut AppState) -> Command {
        match key {
            Key::Close | Key::Char('q') => Command::Quit,
            Key::Char(' ') => {
                info!(mode = state.mode.slug(), "single press action");
                Command::SingleAction(state.mode)
            }
            Key::Char('m') => {
                state.cycle_mode();
                info!(mode = state.mode.display_name(), "switched mode");
                Command::ModeChanged(state.mode)
            }
            Key::Char('d') => self.double_action(state),
            Key::Char('o') => {
                state.toggle_overlay();
                info!(visible = state.overlay_visible, "overlay toggled");
                Command::OverlayToggled(state.overlay_visible)
            }
            Key::Char(other) => {
                debug!(key = ?other, "ignoring unbound key");
                Command::Ignored
            }
        }
    }

    fn double_action(&mut self, state: &mut AppState) -> Command {
        info!(mode = state.mode.slug(), "double press action");
        match state.mode {
            Mode::TraceProjection => {
                state.toggle_surface_detected();
                info!(detected = state.surface_detected, "surface detection toggled");
                Command::SurfaceToggled(state.surface_detected)
            }
            Mode::ReferenceImage => match self.picker.pick() {
                Ok(Some(image)) => {
                    let image = image.to_rgb8();
                    info!(
                        width = image.width(),
                        height = image.height(),
                        "reference image loaded"
                    );
                    state.set_reference(image);
                    Command::ReferenceLoaded
                }
                Ok(None) => {
                    debug!("reference selection cancelled");
                    Command::ReferenceUnchanged
                }
                Err(err) => {
                    warn!(error = %err, "failed to load reference image");
                    Command::ReferenceUnchanged
                }
            },
            Mode::Model3D => {
                let model = ModelDescriptor::default_cube();
                info!(kind = %model.kind, name = %model.name, "model loaded");
                state.set_model(model);
                Command::ModelLoaded
            }
        }
    }
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher").finish()
    }
}
