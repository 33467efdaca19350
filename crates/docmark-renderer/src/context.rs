//! Per-render state threaded through the render call chain.

use std::path::{Path, PathBuf};

/// The chain of files being rendered, outermost document first.
///
/// A context is a value: entering an included file produces a new context
/// via [`descend`](RenderContext::descend) instead of mutating the
/// caller's, so the chain a caller observes can never be corrupted by a
/// nested render, and no cleanup is needed when a nested render unwinds.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// use docmark_renderer::RenderContext;
///
/// let ctx = RenderContext::new("docs/guide.md");
/// let nested = ctx.descend("docs/partials/setup.md");
///
/// assert_eq!(ctx.current_file(), Some(Path::new("docs/guide.md")));
/// assert_eq!(nested.current_file(), Some(Path::new("docs/partials/setup.md")));
/// assert!(nested.contains(Path::new("docs/guide.md")));
/// ```
#[derive(Clone, Debug, Default)]
pub struct RenderContext {
    stack: Vec<PathBuf>,
}

impl RenderContext {
    /// Create a context rooted at the document being rendered.
    #[must_use]
    pub fn new(document: impl Into<PathBuf>) -> Self {
        Self {
            stack: vec![document.into()],
        }
    }

    /// The file whose tokens are currently being rendered.
    ///
    /// `None` for an anonymous render with no backing file.
    #[must_use]
    pub fn current_file(&self) -> Option<&Path> {
        self.stack.last().map(PathBuf::as_path)
    }

    /// Whether `path` is already part of the active inclusion chain.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.stack.iter().any(|entry| entry == path)
    }

    /// A new context with `path` pushed onto the inclusion chain.
    #[must_use]
    pub fn descend(&self, path: impl Into<PathBuf>) -> Self {
        let mut stack = self.stack.clone();
        stack.push(path.into());
        Self { stack }
    }

    /// Number of files in the active chain.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
