use anyhow::{Result, anyhow};
use arboard::Clipboard;
use parking_lot::Mutex;
use std::sync::LazyLock;

// Some platforms drop the clipboard contents together with the handle.
static CLIPBOARD: LazyLock<Mutex<Option<Clipboard>>> =
    LazyLock::new(|| Mutex::new(Clipboard::new().ok()));

pub fn copy_to_clipboard(text: &str) -> Result<bool> {
    let mut clipboard = CLIPBOARD.lock();
    if let Some(clipboard) = clipboard.as_mut() {
        clipboard
            .set_text(text)
            .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;
        Ok(true)
    } else {
        Ok(false)
    }
}
