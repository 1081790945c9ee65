//! Do some preparations for integration tests

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, Once, RwLock};

use wallpimpd::backends::{Backend, SysCommand};

pub static CAPTURED: LazyLock<Arc<RwLock<String>>> =
    LazyLock::new(|| Arc::new(RwLock::new(String::new())));
static INIT: Once = Once::new();

struct Capturer {
    content: Arc<RwLock<String>>,
}
impl std::io::Write for Capturer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut locked = self.content.write().unwrap();
        let got = std::str::from_utf8(buf).unwrap();
        locked.push_str(got);
        Ok(buf.len())
    }
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

pub fn setup() {
    INIT.call_once(|| {
        let cap = Capturer {
            content: CAPTURED.clone(),
        };
        env_logger::builder()
            .is_test(true)
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .filter_level(log::LevelFilter::Trace)
            .target(env_logger::Target::Pipe(Box::new(cap)))
            .init();
    });
}

pub fn captured() -> String {
    CAPTURED.read().expect("Cannot read captured log").clone()
}

/// Remembers every image it was asked for and runs `true` for it.
#[derive(Default)]
pub struct Recorder {
    pub images: Mutex<Vec<PathBuf>>,
}

impl Backend for Recorder {
    fn name(&self) -> &'static str {
        "recorder"
    }

    async fn get_sys_commands(&self, image: &Path) -> Vec<SysCommand> {
        self.images.lock().unwrap().push(image.to_path_buf());
        vec![SysCommand::new("true").arg(image)]
    }
}
