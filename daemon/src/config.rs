//! Loads the user configuration.
//!
//! The config file looks like JSON, but it is not parsed as such. Only two fields are picked out
//! of it by scanning for their keys:
//!
//! ```json
//! {
//!     "wallpaper_dir": "/home/me/Pictures/Wallpapers",
//!     "slideshow_interval": 300
//! }
//! ```
//!
//! Anything else in the file is ignored, and so are fields whose value cannot be read. Escaped
//! quotes inside strings are not supported.

use nom::bytes::complete::{tag, take_till, take_until};
use nom::character::complete::{char, digit1, multispace0};
use nom::combinator::{map_res, opt, recognize};
use nom::sequence::{delimited, pair};
use nom::{IResult, Parser};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::collector::DEFAULT_MAX_FILES;
use crate::desktop::Desktop;

/// Seconds between two wallpapers if nothing else is configured.
pub const DEFAULT_INTERVAL: u64 = 300;

/// Location of the config file relative to the home directory.
pub const CONFIG_FILE: &str = ".config/wallpimp/config.json";

#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    #[error("cannot read config file `{0}`")]
    Unreadable(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub wallpaper_dir: PathBuf,
    pub interval: Duration,
    pub desktop: Desktop,
    pub max_files: usize,
}

impl Config {
    /// Built-in defaults for the given home directory.
    #[must_use]
    pub fn defaults(home: &Path) -> Self {
        Self {
            wallpaper_dir: home.join("Pictures/Wallpapers"),
            interval: Duration::from_secs(DEFAULT_INTERVAL),
            desktop: Desktop::Unknown,
            max_files: DEFAULT_MAX_FILES,
        }
    }

    /// Reads the config file at `path`, starting from [`Config::defaults`].
    ///
    /// # Errors
    /// Returns [`ConfigError::Unreadable`] if the file does not exist or cannot be read. The
    /// caller is expected to carry on with the defaults in that case.
    pub fn load(path: &Path, home: &Path) -> Result<Self, ConfigError> {
        let text =
            fs::read_to_string(path).map_err(|_| ConfigError::Unreadable(path.to_path_buf()))?;
        let mut config = Self::defaults(home);
        config.apply(&text);
        Ok(config)
    }

    /// Overrides fields with whatever can be found in `text`.
    pub fn apply(&mut self, text: &str) {
        let dir = scan(text, "wallpaper_dir", string_value);
        if let Some(dir) = dir.filter(|dir| !dir.is_empty()) {
            self.wallpaper_dir = PathBuf::from(dir);
        }
        match scan(text, "slideshow_interval", integer_value) {
            Some(secs) if secs > 0 => {
                self.interval = Duration::from_secs(secs.unsigned_abs());
            }
            Some(secs) => {
                log::warn!(
                    "slideshow_interval must be positive, got {secs}, keeping {}s",
                    self.interval.as_secs()
                );
            }
            None => {}
        }
    }
}

/// Eats everything up to and including `"key"`.
fn locate_key<'a>(input: &'a str, key: &str) -> IResult<&'a str, ()> {
    let quoted = format!("\"{key}\"");
    let (input, _) = take_until(quoted.as_str())(input)?;
    let (input, _) = tag(quoted.as_str())(input)?;
    Ok((input, ()))
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(':'), multispace0).parse(input)
}

fn string_value(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"')).parse(input)
}

fn integer_value(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), |s: &str| {
        s.parse::<i64>()
    })
    .parse(input)
}

/// Finds the value of `key` in `text`.
///
/// Every occurrence of the key is tried and the last readable one wins. Occurrences that are not
/// followed by a colon and a value of the expected shape are skipped.
fn scan<'a, T, P>(text: &'a str, key: &str, mut value: P) -> Option<T>
where
    P: Parser<&'a str, Output = T, Error = nom::error::Error<&'a str>>,
{
    let mut found = None;
    let mut rest = text;
    while let Ok((after_key, ())) = locate_key(rest, key) {
        rest = after_key;
        let Ok((after_sep, _)) = separator(after_key) else {
            continue;
        };
        if let Ok((after_value, parsed)) = value.parse(after_sep) {
            found = Some(parsed);
            rest = after_value;
        }
    }
    found
}
