use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Overlay behaviour active in a session. Declaration order is the cycling
/// order used by [`AppState::cycle_mode`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    TraceProjection,
    ReferenceImage,
    Model3D,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::TraceProjection, Mode::ReferenceImage, Mode::Model3D];

    /// Human readable name shown in the HUD.
    pub fn display_name(self) -> &'static str {
        match self {
            Mode::TraceProjection => "Trace Projection",
            Mode::ReferenceImage => "Reference Image",
            Mode::Model3D => "3D Model",
        }
    }

    /// Short identifier, matching the CLI selector values.
    pub fn slug(self) -> &'static str {
        match self {
            Mode::TraceProjection => "trace",
            Mode::ReferenceImage => "reference",
            Mode::Model3D => "model3d",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Mode::TraceProjection => Mode::ReferenceImage,
            Mode::ReferenceImage => Mode::Model3D,
            Mode::Model3D => Mode::TraceProjection,
        }
    }
}

/// Minimal description of a loaded model. Replaced wholesale, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub kind: String,
    pub name: String,
}

impl ModelDescriptor {
    pub fn default_cube() -> Self {
        Self {
            kind: "cube".to_string(),
            name: "Basic Cube".to_string(),
        }
    }
}

/// Mutable session state. Only the content field belonging to the current
/// [`Mode`] is consulted while rendering; the others keep their values.
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub overlay_visible: bool,
    pub surface_detected: bool,
    pub reference: Option<RgbImage>,
    pub model: Option<ModelDescriptor>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}

impl AppState {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            overlay_visible: true,
            surface_detected: false,
            reference: None,
            model: None,
        }
    }

    pub fn cycle_mode(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn toggle_overlay(&mut self) {
        self.overlay_visible = !self.overlay_visible;
    }

    pub fn toggle_surface_detected(&mut self) {
        self.surface_detected = !self.surface_detected;
    }

    pub fn set_reference(&mut self, image: RgbImage) {
        self.reference = Some(image);
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
    }

    pub fn set_model(&mut self, model: ModelDescriptor) {
        self.model = Some(model);
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }
}
