use anyhow::Result;

pub trait ClipboardWriter {
    fn set_text(&self, text: &str) -> Result<()>;
}
