//! Fallback for everything without a known settings tool.

use std::path::Path;

use crate::backends::{Backend, SysCommand};

pub struct Feh;

impl Backend for Feh {
    fn name(&self) -> &'static str {
        "feh"
    }

    async fn get_sys_commands(&self, image: &Path) -> Vec<SysCommand> {
        vec![SysCommand::new("feh").arg("--bg-fill").arg(image)]
    }
}
