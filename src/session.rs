//! The frame loop.
//!
//! A [`Session`] owns everything a running viewer needs: the source image,
//! the projected framebuffer, the camera and the presenter. Each frame it
//! renders, then reads one command and applies it. Terminal setup and the
//! single teardown path live in [`run`].

use std::io::{self, Write};
use std::path::Path;

use crate::camera::{CameraState, Tuning};
use crate::command::Command;
use crate::config::Config;
use crate::error::AppError;
use crate::image_source::{Image, Raster};
use crate::input::{ByteSource, InputSampler, StdinSource, Timing};
use crate::mode::Mode;
use crate::projection::{Framebuffer, Projector};
use crate::terminal::{query_terminal_size, ColorGrid, Presenter, RawModeGuard, SignalFlags};
use crate::view;

/// Everything needed to start a session, resolved from CLI and config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub mode: Mode,
    pub tuning: Tuning,
    pub horizon: u32,
    pub timing: Timing,
}

impl Settings {
    pub fn new(mode: Mode, config: &Config) -> Self {
        Self {
            mode,
            tuning: config.tuning(),
            horizon: config.render.horizon,
            timing: config.render.timing(),
        }
    }

    pub fn with_horizon(mut self, horizon: Option<u32>) -> Self {
        if let Some(h) = horizon {
            self.horizon = h;
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new(Mode::default(), &Config::default())
    }
}

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Render state for one viewer session.
pub struct Session<W: Write> {
    mode: Mode,
    image: Image,
    framebuffer: Framebuffer,
    camera: CameraState,
    projector: Projector,
    presenter: Presenter<W>,
    grid: ColorGrid,
    rows: u16,
    cols: u16,
    frames: u64,
}

impl<W: Write> Session<W> {
    /// Build a session for a terminal of `(rows, cols)` cells.
    pub fn new(image: Image, settings: &Settings, presenter: Presenter<W>, size: (u16, u16)) -> Self {
        let camera = CameraState::new(settings.mode, image.width(), image.height(), settings.tuning);
        let framebuffer = Framebuffer::matching(&image);
        let (rows, cols) = size;

        Self {
            mode: settings.mode,
            image,
            framebuffer,
            camera,
            projector: Projector::new(settings.horizon),
            presenter,
            grid: ColorGrid::new(cols, rows),
            rows,
            cols,
            frames: 0,
        }
    }

    /// Draw one frame.
    ///
    /// In affine mode the image is projected into the framebuffer first and
    /// the framebuffer is scaled to the terminal; the flat view samples the
    /// image directly.
    pub fn render(&mut self) -> io::Result<()> {
        match self.mode {
            Mode::View => {
                view::sample_view_into(&self.image, &self.camera, self.cols, self.rows, &mut self.grid);
            }
            Mode::Affine => {
                let stats = self
                    .projector
                    .project(&self.camera, &self.image, &mut self.framebuffer);
                log::trace!(
                    "frame {}: {} cell(s) written, {} rejected",
                    self.frames,
                    stats.written,
                    stats.rejected
                );
                view::scale_into(&self.framebuffer, self.cols, self.rows, &mut self.grid);
            }
        }

        self.frames += 1;
        self.presenter.draw(&self.grid)
    }

    /// Apply one frame's command to the camera.
    pub fn handle(&mut self, command: Command) -> Flow {
        if command == Command::Quit {
            return Flow::Quit;
        }
        self.camera.update(command, self.mode);
        Flow::Continue
    }

    /// Adopt a new terminal size from the next frame on.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        if (rows, cols) != (self.rows, self.cols) {
            log::debug!("Terminal resized to {}x{}", cols, rows);
        }
        self.rows = rows;
        self.cols = cols;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn grid(&self) -> &ColorGrid {
        &self.grid
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Release the image and framebuffer, keeping only the presenter.
    pub fn into_presenter(self) -> Presenter<W> {
        self.presenter
    }
}

/// Run frames until a quit command or a shutdown signal.
///
/// The shutdown flag is checked before every frame; a pending resize
/// re-queries the terminal size through `size` before drawing.
pub fn frame_loop<W: Write, S: ByteSource>(
    session: &mut Session<W>,
    input: &mut InputSampler<S>,
    signals: &SignalFlags,
    mut size: impl FnMut() -> (u16, u16),
) -> io::Result<()> {
    loop {
        if signals.shutdown_requested() {
            log::info!("Shutdown requested by signal");
            break;
        }
        if signals.take_resize() {
            let (rows, cols) = size();
            session.resize(rows, cols);
        }

        session.render()?;

        let command = input.poll(session.mode())?;
        if session.handle(command) == Flow::Quit {
            log::info!("Quit requested");
            break;
        }
    }
    Ok(())
}

/// Restore the terminal: line discipline first, then release the buffers,
/// then reset the screen and show the cursor.
pub fn teardown<W: Write>(raw: &mut RawModeGuard, session: Session<W>) -> io::Result<()> {
    let mode_result = raw.exit();
    let mut presenter = session.into_presenter();
    presenter.reset()?;
    mode_result
}

/// Open `image_path` and run an interactive session on the real terminal.
pub fn run(image_path: &Path, settings: &Settings) -> Result<(), AppError> {
    // Decode before touching the terminal so a bad file leaves it untouched
    let image = Image::open(image_path)?;
    let signals = SignalFlags::install()?;
    let keys = StdinSource::open()?;

    let mut raw = RawModeGuard::enter()?;
    let mut presenter = Presenter::new(io::stdout().lock());
    presenter.hide_cursor()?;

    let mut session = Session::new(image, settings, presenter, query_terminal_size());
    let mut input = InputSampler::new(keys, settings.timing);

    log::info!("Starting {} mode on {}", settings.mode, image_path.display());
    let result = frame_loop(&mut session, &mut input, &signals, query_terminal_size);

    let frames = session.frames();
    let cleanup = teardown(&mut raw, session);
    log::info!("Session ended after {} frame(s)", frames);

    result?;
    cleanup?;
    Ok(())
}
