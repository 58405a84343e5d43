use crate::config::{PlotStyle, Settings};
use crate::data::model::RotatedFrame;
use crate::session::{file_name, load_frame, Command, ConversionSession};

// ---------------------------------------------------------------------------
// Status indicator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ready,
    Busy(&'static str),
}

// ---------------------------------------------------------------------------
// Preview of one selected file
// ---------------------------------------------------------------------------

pub struct Preview {
    /// Index into the session's file list.
    pub index: usize,
    pub title: String,
    /// The frame, or the formatted error chain.
    pub frame: Result<RotatedFrame, String>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub session: ConversionSession,

    pub settings: Settings,

    pub style: PlotStyle,

    pub status: Status,

    /// Command waiting for the busy indicator to be painted.
    pending: Option<Command>,
    busy_painted: bool,

    /// Result of the last command, shown in the top bar.
    pub status_message: Option<String>,

    /// Whether `status_message` describes a failure.
    pub status_is_error: bool,

    pub preview: Option<Preview>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let style = settings.plot_style().unwrap_or_else(|e| {
            log::warn!("Invalid plot settings, using defaults: {e:#}");
            PlotStyle::default()
        });
        Self {
            session: ConversionSession::default(),
            settings,
            style,
            status: Status::Ready,
            pending: None,
            busy_painted: false,
            status_message: None,
            status_is_error: false,
            preview: None,
        }
    }

    /// Queue a command; it runs once the busy status has been on screen for a frame.
    pub fn queue(&mut self, command: Command) {
        self.status = Status::Busy(command.busy_label());
        self.pending = Some(command);
        self.busy_painted = false;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Called once per frame. Runs the pending command on the frame after
    /// the one that first showed it as busy.
    pub fn poll(&mut self) {
        if self.pending.is_none() {
            return;
        }
        if !self.busy_painted {
            self.busy_painted = true;
            return;
        }
        if let Some(command) = self.pending.take() {
            self.run(command);
        }
    }

    /// Execute a command synchronously.
    pub fn run(&mut self, command: Command) {
        let is_selection = matches!(command, Command::SelectFiles(_));
        if let Command::ExportCsv(dir) | Command::ExportPng(dir) = &command {
            self.settings.output_dir = Some(dir.clone());
        }

        match self.session.execute(command, &self.style) {
            Some(report) => {
                self.status_is_error = !report.is_success();
                self.status_message = Some(report.summary());
            }
            None => {
                self.status_is_error = false;
                self.status_message =
                    Some(format!("{} file(s) selected", self.session.files().len()));
            }
        }
        if is_selection {
            self.preview = None;
            self.load_preview(0);
        }
        self.status = Status::Ready;
    }

    /// Parse and rotate the file at `index` for the central plot.
    pub fn load_preview(&mut self, index: usize) {
        let Some(path) = self.session.files().get(index) else {
            return;
        };
        let title = file_name(path);
        let frame = load_frame(path).map_err(|e| {
            log::error!("Preview of {title} failed: {e:#}");
            format!("{e:#}")
        });
        self.preview = Some(Preview {
            index,
            title,
            frame,
        });
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
