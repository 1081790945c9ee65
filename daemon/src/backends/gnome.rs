use std::path::Path;

use crate::backends::{Backend, SysCommand, file_uri};

const SCHEMA: &str = "org.gnome.desktop.background";

pub struct Gnome;

impl Backend for Gnome {
    fn name(&self) -> &'static str {
        "gnome"
    }

    // GNOME 42+ keeps a separate picture for the dark style
    async fn get_sys_commands(&self, image: &Path) -> Vec<SysCommand> {
        let uri = file_uri(image);
        ["picture-uri", "picture-uri-dark"]
            .into_iter()
            .map(|key| {
                SysCommand::new("gsettings")
                    .arg("set")
                    .arg(SCHEMA)
                    .arg(key)
                    .arg(&uri)
            })
            .collect()
    }
}
