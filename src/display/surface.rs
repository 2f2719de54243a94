use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// A named place in a host display that can hold text.
pub trait OutputSurface: Send + Sync {
    /// Replaces whatever the surface currently shows with `text`.
    fn replace_content(&self, text: &str) -> io::Result<()>;
}

/// Registry of output surfaces addressed by name.
#[derive(Default)]
pub struct Document {
    elements: RwLock<HashMap<String, Arc<dyn OutputSurface>>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(self, name: impl Into<String>, surface: Arc<dyn OutputSurface>) -> Self {
        self.insert(name, surface);
        self
    }

    /// Registers `surface` under `name`, returning the one it replaced.
    pub fn insert(
        &self,
        name: impl Into<String>,
        surface: Arc<dyn OutputSurface>,
    ) -> Option<Arc<dyn OutputSurface>> {
        self.elements.write().insert(name.into(), surface)
    }

    pub fn remove(&self, name: &str) -> Option<Arc<dyn OutputSurface>> {
        self.elements.write().remove(name)
    }

    pub fn get_element(&self, name: &str) -> Option<Arc<dyn OutputSurface>> {
        self.elements.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.elements.read().contains_key(name)
    }
}

/// Keeps every content it was given, newest last.
#[derive(Debug, Default)]
pub struct MemorySurface {
    history: Mutex<Vec<String>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }
}

impl OutputSurface for MemorySurface {
    fn replace_content(&self, text: &str) -> io::Result<()> {
        self.history.lock().push(text.to_string());
        Ok(())
    }
}

/// Rewrites a single terminal line in place. Without ANSI support each
/// content goes on its own line instead.
pub struct TerminalSurface<W: Write + Send> {
    out: Mutex<W>,
    ansi: bool,
}

impl TerminalSurface<io::Stdout> {
    /// ANSI rewriting only when stdout is a terminal.
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_ansi(atty::is(atty::Stream::Stdout))
    }
}

impl<W: Write + Send> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            ansi: true,
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> OutputSurface for TerminalSurface<W> {
    fn replace_content(&self, text: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        if self.ansi {
            // carriage return + erase line
            write!(out, "\r\x1b[2K{}", text)?;
        } else {
            writeln!(out, "{}", text)?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_finds_registered_elements_only() {
        let surface = Arc::new(MemorySurface::new());
        let document = Document::new().with_element("time", surface.clone());

        assert!(document.contains("time"));
        assert!(document.get_element("clock").is_none());

        document
            .get_element("time")
            .expect("registered")
            .replace_content("12:00:00")
            .unwrap();
        assert_eq!(surface.current().as_deref(), Some("12:00:00"));
    }

    #[test]
    fn removing_an_element_hides_it() {
        let document = Document::new().with_element("time", Arc::new(MemorySurface::new()));
        assert!(document.remove("time").is_some());
        assert!(document.get_element("time").is_none());
    }

    #[test]
    fn terminal_surface_rewrites_the_line() {
        let surface = TerminalSurface::new(Vec::new());
        surface.replace_content("first").unwrap();
        surface.replace_content("second").unwrap();
        let written = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(written, "\r\x1b[2Kfirst\r\x1b[2Ksecond");
    }

    #[test]
    fn plain_terminal_surface_writes_no_escapes() {
        let surface = TerminalSurface::new(Vec::new()).with_ansi(false);
        surface.replace_content("first").unwrap();
        surface.replace_content("second").unwrap();
        let written = String::from_utf8(surface.into_inner()).unwrap();
        assert_eq!(written, "first\nsecond\n");
    }
}
