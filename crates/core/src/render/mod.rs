//! Frame composition: one mode specific overlay followed by the HUD strip.

pub mod blend;
pub mod draw;
pub mod hud;
pub mod overlay;
pub mod text;

use image::RgbImage;
use tracing::trace;

use crate::{
    assets::TemplateSource,
    clock::{rotation_angle, Clock},
    AppState, Mode, SessionConfig,
};

/// Composes output frames from a base image and the session state.
pub struct FrameRenderer {
    templates: Box<dyn TemplateSource>,
    clock: Box<dyn Clock>,
    template: String,
    template_alpha: f32,
    reference_alpha: f32,
}

impl FrameRenderer {
    pub fn new(
        config: &SessionConfig,
        templates: Box<dyn TemplateSource>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            templates,
            clock,
            template: config.template.clone(),
            template_alpha: config.template_alpha,
            reference_alpha: config.reference_alpha,
        }
    }

    /// Returns a new frame; `base` is never modified. With the overlay
    /// hidden the result is an exact copy of `base`.
    pub fn render(&self, base: &RgbImage, state: &AppState) -> RgbImage {
        if !state.overlay_visible {
            return base.clone();
        }
        // Nothing can be drawn onto an empty frame.
        if base.width() == 0 || base.height() == 0 {
            return base.clone();
        }

        trace!(mode = state.mode.slug(), "rendering frame");
        let mut frame = self.apply_mode_overlay(base.clone(), state);
        hud::draw_hud(&mut frame, state);
        frame
    }

    fn apply_mode_overlay(&self, mut frame: RgbImage, state: &AppState) -> RgbImage {
        match state.mode {
            Mode::TraceProjection if state.surface_detected => overlay::trace_template(
                frame,
                self.templates.as_ref(),
                &self.template,
                self.template_alpha,
            ),
            Mode::TraceProjection => {
                overlay::trace_prompt(&mut frame);
                frame
            }
            Mode::ReferenceImage => match &state.reference {
                Some(reference) => {
                    overlay::reference_blend(&frame, reference, self.reference_alpha)
                }
                None => {
                    overlay::reference_placeholder(&mut frame);
                    frame
                }
            },
            Mode::Model3D => {
                match &state.model {
                    Some(model) => {
                        let angle = rotation_angle(self.clock.elapsed());
                        overlay::model_cube(&mut frame, model, angle);
                    }
                    None => overlay::model_placeholder(&mut frame),
                }
                frame
            }
        }
    }
}

impl std::fmt::Debug for FrameRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRenderer")
            .field("template", &self.template)
            .field("template_alpha", &self.template_alpha)
            .field("reference_alpha", &self.reference_alpha)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
        time::Duration,
    };

    use image::Rgb;

    use super::*;
    use crate::{
        assets::TemplateCatalog,
        clock::FixedClock,
        render::draw::{GREEN, YELLOW},
        ModelDescriptor,
    };

    /// Catalog wrapper that records which names were requested.
    struct CountingCatalog {
        inner: TemplateCatalog,
        lookups: Rc<Cell<usize>>,
        last: Rc<RefCell<Option<String>>>,
    }

    impl TemplateSource for CountingCatalog {
        fn lookup(&self, name: &str) -> Option<&RgbImage> {
            self.lookups.set(self.lookups.get() + 1);
            *self.last.borrow_mut() = Some(name.to_string());
            self.inner.lookup(name)
        }
    }

    struct Harness {
        renderer: FrameRenderer,
        lookups: Rc<Cell<usize>>,
        last: Rc<RefCell<Option<String>>>,
    }

    fn harness(inner: TemplateCatalog, clock: FixedClock) -> Harness {
        let lookups = Rc::new(Cell::new(0));
        let last = Rc::new(RefCell::new(None));
        let catalog = CountingCatalog {
            inner,
            lookups: lookups.clone(),
            last: last.clone(),
        };
        let renderer = FrameRenderer::new(
            &SessionConfig::default(),
            Box::new(catalog),
            Box::new(clock),
        );
        Harness {
            renderer,
            lookups,
            last,
        }
    }

    fn base(value: u8) -> RgbImage {
        RgbImage::from_pixel(640, 360, Rgb([value, value, value]))
    }

    #[test]
    fn hidden_overlay_passes_base_through() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        for mode in Mode::ALL {
            let mut state = AppState::new(mode);
            state.toggle_overlay();
            let frame = base(77);
            assert_eq!(h.renderer.render(&frame, &state), frame);
        }
        assert_eq!(h.lookups.get(), 0);
    }

    #[test]
    fn undetected_surface_never_touches_the_catalog() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        let frame = h.renderer.render(&base(20), &AppState::default());
        assert_eq!(h.lookups.get(), 0);
        assert_eq!(*frame.get_pixel(160, 180), YELLOW);
    }

    #[test]
    fn detected_surface_blends_the_default_template() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        let mut state = AppState::default();
        state.toggle_surface_detected();

        let frame = h.renderer.render(&base(100), &state);
        assert_eq!(h.lookups.get(), 1);
        assert_eq!(h.last.borrow().as_deref(), Some("circle"));
        assert_ne!(*frame.get_pixel(160, 180), YELLOW);
        assert_eq!(*frame.get_pixel(320, 180), Rgb([30, 30, 30]));
    }

    #[test]
    fn empty_catalog_falls_back_to_drawn_circle() {
        let h = harness(TemplateCatalog::new(), FixedClock::default());
        let mut state = AppState::default();
        state.toggle_surface_detected();

        let frame = h.renderer.render(&base(0), &state);
        assert_eq!(h.lookups.get(), 1);
        assert_eq!(*frame.get_pixel(380, 180), GREEN);
    }

    #[test]
    fn missing_reference_shows_placeholder_independent_of_base() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        let state = AppState::new(Mode::ReferenceImage);
        let (dark, light) = (base(5), base(250));
        let out_dark = h.renderer.render(&dark, &state);
        let out_light = h.renderer.render(&light, &state);

        let mut drawn = 0;
        for (x, y, pixel) in out_dark.enumerate_pixels() {
            let shows_base =
                pixel == dark.get_pixel(x, y) && out_light.get_pixel(x, y) == light.get_pixel(x, y);
            if !shows_base {
                assert_eq!(pixel, out_light.get_pixel(x, y), "pixel ({x}, {y})");
                drawn += 1;
            }
        }
        assert!(drawn > 0);
    }

    #[test]
    fn loaded_reference_dominates_the_blend() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        let mut state = AppState::new(Mode::ReferenceImage);
        state.set_reference(RgbImage::from_pixel(32, 18, Rgb([200, 200, 200])));

        let frame = h.renderer.render(&base(0), &state);
        assert_eq!(*frame.get_pixel(320, 180), Rgb([120, 120, 120]));
    }

    #[test]
    fn fixed_clock_renders_identical_cubes() {
        let h = harness(TemplateCatalog::builtin(), FixedClock(Duration::from_secs(2)));
        let mut state = AppState::new(Mode::Model3D);
        let placeholder = h.renderer.render(&base(0), &state);

        state.set_model(ModelDescriptor::default_cube());
        let first = h.renderer.render(&base(0), &state);
        let second = h.renderer.render(&base(0), &state);
        assert_eq!(first, second);
        assert_ne!(first, placeholder);
    }

    #[test]
    fn base_image_is_not_modified() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        let frame = base(42);
        let _ = h.renderer.render(&frame, &AppState::default());
        assert!(frame.pixels().all(|p| *p == Rgb([42, 42, 42])));
    }

    #[test]
    fn renders_odd_resolutions() {
        let h = harness(TemplateCatalog::builtin(), FixedClock::default());
        let mut state = AppState::default();
        state.toggle_surface_detected();
        let frame = h.renderer.render(&RgbImage::new(97, 41), &state);
        assert_eq!(frame.dimensions(), (97, 41));
    }

    #[test]
    fn degenerate_frames_render_in_every_mode() {
        let h = harness(TemplateCatalog::builtin(), FixedClock(Duration::from_secs(1)));
        let sizes = [(0, 0), (0, 12), (12, 0), (1, 1), (2, 1), (1, 3000), (5, 5)];
        for mode in Mode::ALL {
            for loaded in [false, true] {
                let mut state = AppState::new(mode);
                if loaded {
                    state.toggle_surface_detected();
                    state.set_reference(RgbImage::from_pixel(7, 5, Rgb([9, 9, 9])));
                    state.set_model(ModelDescriptor::default_cube());
                }
                for (width, height) in sizes {
                    let base = RgbImage::new(width, height);
                    let frame = h.renderer.render(&base, &state);
                    assert_eq!(frame.dimensions(), (width, height), "{mode:?} {width}x{height}");
                }
            }
        }
    }
}
