use std::path::PathBuf;

use artmentor_core::{
    AppState, FrameRenderer, FrameSource, InputDispatcher, Mode, PlaybackClock, ReferencePicker,
    Session, SessionConfig, StaticSource, TemplateCatalog,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[cfg(feature = "camera")]
mod camera;
#[cfg(feature = "picker")]
mod picker;
mod window;

fn main() -> artmentor_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let result = run(cli);
    if let Err(err) = &result {
        tracing::error!(error = %err, "artmentor stopped");
    }
    result
}

fn run(cli: Cli) -> artmentor_core::Result<()> {
    let config = match &cli.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let mode = Mode::from(cli.mode);
    tracing::info!(mode = mode.display_name(), source = ?cli.source, "starting artmentor");

    let source = open_source(cli.source, cli.camera_index, &config)?;
    let sink = window::WindowSink::open(cli.source.window_title(), &config)?;

    let renderer = FrameRenderer::new(
        &config,
        Box::new(TemplateCatalog::builtin()),
        Box::new(PlaybackClock::start()),
    );
    let input = InputDispatcher::new(reference_picker(&config));

    let summary = Session::new(&config, source, sink, AppState::new(mode), renderer, input).run()?;
    tracing::info!(frames = summary.frames, exit = ?summary.exit, "artmentor closed");
    Ok(())
}

fn open_source(
    source: SourceArg,
    camera_index: u32,
    config: &SessionConfig,
) -> artmentor_core::Result<Box<dyn FrameSource>> {
    match source {
        SourceArg::Static => Ok(Box::new(StaticSource::new(
            config.frame_width,
            config.frame_height,
        ))),
        SourceArg::Camera => open_camera(camera_index, config),
    }
}

#[cfg(feature = "camera")]
fn open_camera(
    index: u32,
    config: &SessionConfig,
) -> artmentor_core::Result<Box<dyn FrameSource>> {
    Ok(Box::new(camera::CameraSource::open(index, config)?))
}

#[cfg(not(feature = "camera"))]
fn open_camera(
    index: u32,
    _config: &SessionConfig,
) -> artmentor_core::Result<Box<dyn FrameSource>> {
    Err(artmentor_core::OverlayError::SourceUnavailable(format!(
        "camera {index} requested but artmentor was built without the `camera` feature"
    )))
}

#[cfg(feature = "picker")]
fn reference_picker(_config: &SessionConfig) -> Box<dyn ReferencePicker> {
    Box::new(picker::FileDialogPicker)
}

#[cfg(not(feature = "picker"))]
fn reference_picker(config: &SessionConfig) -> Box<dyn ReferencePicker> {
    Box::new(artmentor_core::SketchPicker::new(
        config.frame_width,
        config.frame_height,
    ))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Overlay preview for tracing, reference and model modes", long_about = None)]
struct Cli {
    /// Mode active when the preview opens.
    #[arg(long, value_enum, default_value_t = ModeArg::Trace)]
    mode: ModeArg,
    /// Where base frames come from.
    #[arg(long, value_enum, default_value_t = SourceArg::Static)]
    source: SourceArg,
    /// Capture device index used with `--source camera`.
    #[arg(long, default_value_t = 0)]
    camera_index: u32,
    /// Optional JSON file overriding the session defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ModeArg {
    Trace,
    Reference,
    #[value(name = "model3d")]
    Model3d,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Trace => Mode::TraceProjection,
            ModeArg::Reference => Mode::ReferenceImage,
            ModeArg::Model3d => Mode::Model3D,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum SourceArg {
    Static,
    Camera,
}

impl SourceArg {
    fn window_title(self) -> &'static str {
        match self {
            SourceArg::Static => "ArtMentor Static Test",
            SourceArg::Camera => "ArtMentor Camera Test",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_trace_on_static_background() {
        let cli = Cli::try_parse_from(["artmentor"]).unwrap();
        assert_eq!(cli.mode, ModeArg::Trace);
        assert_eq!(cli.source, SourceArg::Static);
        assert_eq!(cli.camera_index, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn mode_selector_maps_onto_modes() {
        let cli = Cli::try_parse_from(["artmentor", "--mode", "model3d"]).unwrap();
        assert_eq!(Mode::from(cli.mode), Mode::Model3D);

        let cli = Cli::try_parse_from(["artmentor", "--mode", "reference"]).unwrap();
        assert_eq!(Mode::from(cli.mode), Mode::ReferenceImage);
    }

    #[test]
    fn rejects_unknown_modes() {
        assert!(Cli::try_parse_from(["artmentor", "--mode", "sculpt"]).is_err());
    }

    #[test]
    fn verifies_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
