//! Cooperative shutdown.
//!
//! A [`Trigger`] and any number of [`Shutdown`] tokens share a channel that never carries a
//! message. Firing the trigger closes it, which every token observes.
//!
//! [`listen`] hooks SIGINT and SIGTERM up to a trigger.

use nix::sys::signal::{SigSet, Signal};
use smol::channel::{Receiver, Sender};
use std::{io, thread};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("cannot block signals: {0}")]
    Mask(#[from] nix::Error),
    #[error("cannot spawn signal thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Fires the shutdown once.
pub struct Trigger(Sender<()>);

/// Tells whether a shutdown was requested.
#[derive(Clone)]
pub struct Shutdown(Receiver<()>);

/// Creates a connected pair.
#[must_use]
pub fn channel() -> (Trigger, Shutdown) {
    let (tx, rx) = smol::channel::bounded(1);
    (Trigger(tx), Shutdown(rx))
}

impl Trigger {
    pub fn fire(self) {
        self.0.close();
    }
}

impl Shutdown {
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.is_closed()
    }

    /// Completes once the shutdown is requested.
    pub async fn requested(&self) {
        // Nothing is ever sent, so this only returns when the channel is closed
        while self.0.recv().await.is_ok() {}
    }
}

/// Routes SIGINT and SIGTERM to `trigger`.
///
/// Both signals are blocked for the calling thread, and thus for every thread it spawns from now
/// on. A dedicated thread picks them up with `sigwait` instead. Call this before spawning other
/// threads, otherwise they keep the default disposition and a signal may kill the process.
///
/// # Errors
/// Fails if the signal mask cannot be changed or the thread cannot be spawned.
pub fn listen(trigger: Trigger) -> Result<(), SignalError> {
    let mut mask = SigSet::empty();
    mask.add(Signal::SIGINT);
    mask.add(Signal::SIGTERM);
    mask.thread_block()?;

    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || match mask.wait() {
            Ok(signal) => {
                log::info!("Received {signal}, stopping");
                trigger.fire();
            }
            Err(err) => {
                log::error!("failed to wait for signals: {err}");
            }
        })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn firing_is_seen_by_clones() {
        let (trigger, shutdown) = channel();
        let other = shutdown.clone();
        assert!(!shutdown.is_requested());
        trigger.fire();
        assert!(shutdown.is_requested());
        assert!(other.is_requested());
    }

    #[test]
    fn dropping_the_trigger_counts() {
        let (trigger, shutdown) = channel();
        drop(trigger);
        assert!(shutdown.is_requested());
    }

    #[test]
    fn waiting() {
        let (trigger, shutdown) = channel();
        let start = Instant::now();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            trigger.fire();
        });
        smol::block_on(shutdown.requested());
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert!(shutdown.is_requested());
    }
}
