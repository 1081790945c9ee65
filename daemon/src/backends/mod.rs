//! Desktop specific ways of setting the wallpaper.
//!
//! A [`Backend`] only describes which external programs to run. Running them is done by
//! [`apply`], which never fails: a wallpaper that cannot be set is logged and the slideshow moves
//! on.

mod feh;
mod gnome;
mod kde;
mod xfce;

pub use feh::Feh;
pub use gnome::Gnome;
pub use kde::Kde;
pub use xfce::Xfce;

use smol::process::{Command, Stdio};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;

/// An external program together with its arguments.
///
/// Arguments are handed to the program as they are, no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysCommand {
    pub program: String,
    pub args: Vec<OsString>,
}

impl SysCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Gets the [`Command`] with all output discarded.
    #[must_use]
    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

impl fmt::Display for SysCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// General trait of a backend.
#[allow(async_fn_in_trait)]
pub trait Backend {
    fn name(&self) -> &'static str;

    /// Commands that display `image`, to be run one after another.
    async fn get_sys_commands(&self, image: &Path) -> Vec<SysCommand>;
}

/// Builds a `file://` URI, as wanted by GNOME and Plasma.
fn file_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// Sets `image` as wallpaper using `backend`.
///
/// Each command is awaited before the next one starts. With `dry_run`, the commands are only
/// logged. Read-only queries a backend makes to build its commands still run.
///
/// Returns how many commands were started.
pub async fn apply<T: Backend>(backend: &T, image: &Path, dry_run: bool) -> usize {
    log::info!("Setting wallpaper: {}", image.display());
    let commands = backend.get_sys_commands(image).await;
    if commands.is_empty() {
        log::warn!("{}: nothing to run for `{}`", backend.name(), image.display());
    }
    let mut started = 0;
    for sys_cmd in commands {
        if dry_run {
            log::info!("Run: {sys_cmd}");
            continue;
        }
        log::debug!("Run: {sys_cmd}");
        match sys_cmd.to_command().status().await {
            Ok(status) if status.success() => started += 1,
            Ok(status) => {
                started += 1;
                log::debug!("{}: `{}` exited with {status}", backend.name(), sys_cmd.program);
            }
            Err(err) => {
                log::warn!("{}: cannot run `{}`: {err}", backend.name(), sys_cmd.program);
            }
        }
    }
    started
}
