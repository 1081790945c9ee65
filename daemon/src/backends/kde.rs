//! Plasma has no settings key for the wallpaper, so a script is evaluated by plasmashell over
//! D-Bus which rewrites the config of every desktop.

use smol::process::{Command, Stdio};
use std::path::Path;
use std::sync::OnceLock;

use crate::backends::{Backend, SysCommand, file_uri};

// Plasma 6 ships qdbus6, Plasma 5 ships qdbus
const QDBUS_CANDIDATES: [&str; 2] = ["qdbus6", "qdbus"];

#[derive(Default)]
pub struct Kde {
    qdbus: OnceLock<&'static str>,
}

impl Kde {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn qdbus(&self) -> &'static str {
        if let Some(found) = self.qdbus.get() {
            return *found;
        }
        let mut found = QDBUS_CANDIDATES[QDBUS_CANDIDATES.len() - 1];
        for exe in QDBUS_CANDIDATES {
            let probe = Command::new(exe)
                .arg("--version")
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await;
            if probe.is_ok() {
                found = exe;
                break;
            }
        }
        log::debug!("kde: using `{found}`");
        *self.qdbus.get_or_init(|| found)
    }
}

/// Escapes `value` for use inside a single quoted JavaScript string.
fn js_quote(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn script(image: &Path) -> String {
    let uri = js_quote(&file_uri(image));
    format!(
        "var d = desktops();\
         for (var i = 0; i < d.length; i++) {{\
         d[i].wallpaperPlugin = 'org.kde.image';\
         d[i].currentConfigGroup = Array('Wallpaper', 'org.kde.image', 'General');\
         d[i].writeConfig('Image', '{uri}');\
         }}"
    )
}

impl Backend for Kde {
    fn name(&self) -> &'static str {
        "kde"
    }

    async fn get_sys_commands(&self, image: &Path) -> Vec<SysCommand> {
        vec![
            SysCommand::new(self.qdbus().await)
                .arg("org.kde.plasmashell")
                .arg("/PlasmaShell")
                .arg("org.kde.PlasmaShell.evaluateScript")
                .arg(script(image)),
        ]
    }
}
