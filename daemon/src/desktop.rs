//! Figures out which desktop environment we are running under.
//!
//! Detection only looks at `$XDG_CURRENT_DESKTOP` and `$DESKTOP_SESSION`, in that order, and is
//! done once at startup.

use clap::ValueEnum;
use std::env;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Desktop {
    Xfce,
    Gnome,
    Kde,
    Mate,
    Cinnamon,
    I3,
    Sway,
    Unknown,
}

impl Desktop {
    /// Short lowercase tag, as printed in status lines.
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::Xfce => "xfce",
            Self::Gnome => "gnome",
            Self::Kde => "kde",
            Self::Mate => "mate",
            Self::Cinnamon => "cinnamon",
            Self::I3 => "i3",
            Self::Sway => "sway",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Desktop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// Both variables are matched against different sets: tiling WMs only ever show up in the session
// name, while MATE and Cinnamon only in the current desktop.
fn match_current_desktop(value: &str) -> Option<Desktop> {
    let value = value.to_lowercase();
    if value.contains("xfce") {
        Some(Desktop::Xfce)
    } else if value.contains("gnome") {
        Some(Desktop::Gnome)
    } else if value.contains("kde") || value.contains("plasma") {
        Some(Desktop::Kde)
    } else if value.contains("mate") {
        Some(Desktop::Mate)
    } else if value.contains("cinnamon") {
        Some(Desktop::Cinnamon)
    } else {
        None
    }
}

fn match_session(value: &str) -> Option<Desktop> {
    let value = value.to_lowercase();
    if value.contains("xfce") {
        Some(Desktop::Xfce)
    } else if value.contains("gnome") {
        Some(Desktop::Gnome)
    } else if value.contains("kde") || value.contains("plasma") {
        Some(Desktop::Kde)
    } else if value.contains("i3") {
        Some(Desktop::I3)
    } else if value.contains("sway") {
        Some(Desktop::Sway)
    } else {
        None
    }
}

/// Maps the values of `$XDG_CURRENT_DESKTOP` and `$DESKTOP_SESSION` to a [`Desktop`].
///
/// The first variable wins whenever it matches anything.
#[must_use]
pub fn detect(current_desktop: Option<&str>, session: Option<&str>) -> Desktop {
    current_desktop
        .and_then(match_current_desktop)
        .or_else(|| session.and_then(match_session))
        .unwrap_or(Desktop::Unknown)
}

/// Same as [`detect`], reading the process environment.
#[must_use]
pub fn detect_from_env() -> Desktop {
    let current = env::var("XDG_CURRENT_DESKTOP").ok();
    let session = env::var("DESKTOP_SESSION").ok();
    let desktop = detect(current.as_deref(), session.as_deref());
    log::debug!(
        "XDG_CURRENT_DESKTOP={current:?} DESKTOP_SESSION={session:?} -> {desktop}"
    );
    desktop
}
