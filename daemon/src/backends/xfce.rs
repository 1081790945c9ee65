//! Xfce keeps one `last-image` property per monitor and workspace, all of them are updated.

use smol::process::{Command, Stdio};
use std::path::Path;

use crate::backends::{Backend, SysCommand};

const CHANNEL: &str = "xfce4-desktop";

pub struct Xfce;

/// Picks the `last-image` properties out of `xfconf-query -l` output.
fn image_properties(listing: &str) -> Vec<&str> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| line.contains("last-image"))
        .collect()
}

async fn list_properties() -> String {
    let output = Command::new("xfconf-query")
        .arg("-c")
        .arg(CHANNEL)
        .arg("-l")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .await;
    match output {
        Ok(output) => String::from_utf8_lossy(&output.stdout).into_owned(),
        Err(err) => {
            log::warn!("xfce: cannot run `xfconf-query`: {err}");
            String::new()
        }
    }
}

fn set_commands(properties: &[&str], image: &Path) -> Vec<SysCommand> {
    properties
        .iter()
        .map(|property| {
            SysCommand::new("xfconf-query")
                .arg("-c")
                .arg(CHANNEL)
                .arg("-p")
                .arg(property)
                .arg("-s")
                .arg(image)
        })
        .collect()
}

impl Backend for Xfce {
    fn name(&self) -> &'static str {
        "xfce"
    }

    async fn get_sys_commands(&self, image: &Path) -> Vec<SysCommand> {
        let listing = list_properties().await;
        set_commands(&image_properties(&listing), image)
    }
}
