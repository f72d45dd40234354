use std::sync::Mutex;

use anyhow::anyhow;
use anyhow::Result;

use crate::domain::models::ClipboardWriter;

pub struct SystemClipboard {
    clipboard: Mutex<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<SystemClipboard> {
        let clipboard = match arboard::Clipboard::new() {
            Ok(clipboard) => clipboard,
            Err(err) => return Err(anyhow!(format!("Clipboard failed to initialize: {err}"))),
        };

        return Ok(SystemClipboard {
            clipboard: Mutex::new(clipboard),
        });
    }
}

impl ClipboardWriter for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = self
            .clipboard
            .lock()
            .map_err(|err| return anyhow!(err.to_string()))?;
        clipboard.set_text(text.to_string())?;

        return Ok(());
    }
}

/// Used when no system clipboard is available, every copy fails.
pub struct UnavailableClipboard {
    pub reason: String,
}

impl ClipboardWriter for UnavailableClipboard {
    fn set_text(&self, _text: &str) -> Result<()> {
        return Err(anyhow!(self.reason.to_string()));
    }
}
