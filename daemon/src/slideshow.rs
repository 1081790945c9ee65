//! The slideshow loop.
//!
//! Picks a random wallpaper, applies it, waits for the interval and starts over until a shutdown
//! is requested. The wallpaper list is taken at construction and never refreshed.

use rand::Rng;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::backends::{self, Backend};
use crate::shutdown::Shutdown;

#[derive(Debug, PartialEq, Error)]
pub enum SlideshowError {
    #[error("no wallpapers to show")]
    NoWallpapers,
}

/// Lifecycle of a [`Slideshow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Starting,
    Running,
    /// A shutdown was seen and the loop has been left, the wallpapers are still held.
    Stopping,
    /// The wallpaper list is released.
    Stopped,
}

pub struct Slideshow<T: Backend> {
    wallpapers: Vec<PathBuf>,
    interval: Duration,
    backend: T,
    dry_run: bool,
    state: State,
}

/// How a wait ended.
enum Wake {
    Elapsed,
    Shutdown,
}

impl<T: Backend> Slideshow<T> {
    #[must_use]
    pub fn new(wallpapers: Vec<PathBuf>, interval: Duration, backend: T) -> Self {
        Self {
            wallpapers,
            interval,
            backend,
            dry_run: false,
            state: State::Starting,
        }
    }

    /// Only log the commands instead of running them.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn wallpapers(&self) -> &[PathBuf] {
        &self.wallpapers
    }

    #[must_use]
    pub fn backend(&self) -> &T {
        &self.backend
    }

    /// Picks a wallpaper uniformly at random.
    ///
    /// # Panics
    /// Panics if there are no wallpapers, [`Slideshow::run`] checks this beforehand.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> &Path {
        let index = rng.random_range(0..self.wallpapers.len());
        &self.wallpapers[index]
    }

    /// Runs until `shutdown` is requested, leaving the slideshow in [`State::Stopping`].
    ///
    /// A command that is already running when the shutdown arrives is allowed to finish. The wait
    /// between two wallpapers is cut short immediately. Call [`Slideshow::stop`] afterwards.
    ///
    /// Returns how many wallpapers were applied.
    ///
    /// # Errors
    /// Returns [`SlideshowError::NoWallpapers`] if the list is empty. The slideshow stays in
    /// [`State::Starting`] then.
    pub async fn run(&mut self, shutdown: &Shutdown) -> Result<usize, SlideshowError> {
        if self.wallpapers.is_empty() {
            return Err(SlideshowError::NoWallpapers);
        }
        self.state = State::Running;
        let mut rng = rand::rng();
        let mut applied = 0;

        while !shutdown.is_requested() {
            let image = self.pick(&mut rng).to_path_buf();
            backends::apply(&self.backend, &image, self.dry_run).await;
            applied += 1;

            match wait(self.interval, shutdown).await {
                Wake::Elapsed => {}
                Wake::Shutdown => break,
            }
        }

        self.state = State::Stopping;
        log::debug!("{applied} wallpapers applied");
        Ok(applied)
    }

    /// Releases the wallpaper list. A slideshow that never ran just stays as it is.
    pub fn stop(&mut self) {
        if self.state != State::Stopping {
            return;
        }
        self.wallpapers = Vec::new();
        self.state = State::Stopped;
        log::info!("Slideshow stopped");
    }
}

async fn wait(interval: Duration, shutdown: &Shutdown) -> Wake {
    smol::future::race(
        async {
            smol::Timer::after(interval).await;
            Wake::Elapsed
        },
        async {
            shutdown.requested().await;
            Wake::Shutdown
        },
    )
    .await
}
