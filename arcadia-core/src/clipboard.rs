use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Error;

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), Error>;
}

/// The desktop clipboard.  On X11 the copied text stays available only while
/// this value is alive, so keep it for the lifetime of the program.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), Error> {
        self.inner.set_text(text)?;
        Ok(())
    }
}

/// Keeps the last copied text in memory.  Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryClipboard {
    text: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), Error> {
        self.text.lock().replace(text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_copied_text() {
        let clipboard = MemoryClipboard::new();
        let mut handle: Box<dyn Clipboard> = Box::new(clipboard.clone());
        assert_eq!(clipboard.text(), None);
        handle.set_text("http://localhost:3000/games/PC").unwrap();
        assert_eq!(clipboard.text().as_deref(), Some("http://localhost:3000/games/PC"));
    }

    #[test]
    fn backend_failures_map_to_clipboard_error() {
        let err = Error::from(arboard::Error::ContentNotAvailable);
        assert!(matches!(err, Error::ClipboardError(_)));
        assert!(err.to_string().starts_with("Clipboard unavailable: "));
    }
}
