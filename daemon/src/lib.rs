pub mod backends;
pub mod collector;
pub mod config;
pub mod daemon;
pub mod desktop;
pub mod shutdown;
pub mod slideshow;

pub use daemon::DaemonError;
pub use slideshow::{Slideshow, SlideshowError, State};
