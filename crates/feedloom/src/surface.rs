//! Presentation surfaces: where a rendered feed ends up.
//!
//! Every call replaces what the surface showed before. There is no
//! incremental update.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use crate::error::FeedError;
use crate::html;
use crate::record::FeedView;
use crate::text;

/// A place that shows the feed, or the error that prevented it.
pub trait Surface: Send + Sync {
    /// Replace the whole presentation with `view`.
    fn replace_feed(&self, view: &FeedView) -> io::Result<()>;

    /// Replace the presentation with a visible error state.
    fn show_error(&self, error: &FeedError) -> io::Result<()>;
}

impl<T: Surface + ?Sized> Surface for &T {
    fn replace_feed(&self, view: &FeedView) -> io::Result<()> {
        (**self).replace_feed(view)
    }

    fn show_error(&self, error: &FeedError) -> io::Result<()> {
        (**self).show_error(error)
    }
}

/// What a [`MemorySurface`] currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Shown {
    #[default]
    Blank,
    Feed(FeedView),
    Error(String),
}

/// In-memory surface, for tests.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<MemorySurfaceState>,
}

#[derive(Debug, Default)]
struct MemorySurfaceState {
    shown: Shown,
    updates: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current presentation.
    pub fn shown(&self) -> Shown {
        self.lock().shown.clone()
    }

    /// The current feed, if one is shown.
    pub fn feed(&self) -> Option<FeedView> {
        match self.shown() {
            Shown::Feed(view) => Some(view),
            _ => None,
        }
    }

    /// The current error message, if one is shown.
    pub fn error(&self) -> Option<String> {
        match self.shown() {
            Shown::Error(message) => Some(message),
            _ => None,
        }
    }

    /// How many times the presentation was replaced.
    pub fn updates(&self) -> usize {
        self.lock().updates
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemorySurfaceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn replace_feed(&self, view: &FeedView) -> io::Result<()> {
        let mut state = self.lock();
        state.shown = Shown::Feed(view.clone());
        state.updates += 1;
        Ok(())
    }

    fn show_error(&self, error: &FeedError) -> io::Result<()> {
        let mut state = self.lock();
        state.shown = Shown::Error(error.to_string());
        state.updates += 1;
        Ok(())
    }
}

/// Writes a complete HTML page to a file.
///
/// The page is written next to the target and renamed over it, so readers
/// never see a half-written page.
#[derive(Debug, Clone)]
pub struct HtmlFileSurface {
    path: PathBuf,
}

impl HtmlFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_page(&self, page: &str) -> io::Result<()> {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, page)?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl Surface for HtmlFileSurface {
    fn replace_feed(&self, view: &FeedView) -> io::Result<()> {
        self.write_page(&html::render_page(view))
    }

    fn show_error(&self, error: &FeedError) -> io::Result<()> {
        self.write_page(&html::render_error_page(error.kind(), &error.to_string()))
    }
}

/// Prints the feed to stdout and errors to stderr.
#[derive(Debug, Clone, Copy)]
pub struct TerminalSurface {
    color: bool,
}

impl TerminalSurface {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Surface for TerminalSurface {
    fn replace_feed(&self, view: &FeedView) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text::render_feed(view, self.color).as_bytes())?;
        stdout.flush()
    }

    fn show_error(&self, error: &FeedError) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        writeln!(stderr, "{}\nerror: {error}", error.kind().headline())
    }
}
