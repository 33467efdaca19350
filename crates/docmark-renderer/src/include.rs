//! Recursive, cycle-safe file inclusion.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::context::RenderContext;
use crate::escape::escape_html;
use crate::path::{is_relative_reference, resolve_relative, split_fragment};
use crate::renderer::{ReadFileFn, TokenRenderer, default_read_file};
use crate::snippet::{current_file_label, find_tag_region};

/// Why an inclusion could not be resolved.
#[derive(Debug, thiserror::Error)]
pub enum IncludeError {
    #[error("Include reference \"{path}\" is not supported in file {file}")]
    UnsupportedForm { path: String, file: String },

    /// Reports the path as declared in the token, matching what the
    /// document author wrote.
    #[error("Can not find reference {path}")]
    NotFound { path: String },

    #[error("Circular dependency found in \"{}\"", path.display())]
    Circular { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Region '{region}' is not found in file {}", path.display())]
    RegionNotFound { region: String, path: PathBuf },
}

/// Resolves include tokens by rendering the referenced file in place.
///
/// Holds no per-render state: the inclusion chain used for resolution and
/// cycle detection travels in the [`RenderContext`].
pub struct IncludeResolver {
    read_file: Arc<ReadFileFn>,
}

impl Default for IncludeResolver {
    fn default() -> Self {
        Self::new(Arc::new(default_read_file))
    }
}

impl IncludeResolver {
    /// Create a resolver reading files through `read_file`.
    #[must_use]
    pub fn new(read_file: Arc<ReadFileFn>) -> Self {
        Self { read_file }
    }

    /// Resolve an include token into an HTML fragment.
    ///
    /// An absent or empty `src` falls back to `raw` verbatim. Every
    /// failure degrades to an inline error fragment; the surrounding
    /// document render always continues.
    pub fn load(
        &self,
        renderer: &TokenRenderer,
        src: Option<&str>,
        raw: &str,
        ctx: &RenderContext,
    ) -> String {
        let Some(src) = src.filter(|s| !s.is_empty()) else {
            return raw.to_owned();
        };
        match self.resolve(renderer, src, ctx) {
            Ok(html) => html,
            Err(err) => {
                tracing::error!(src, error = %err, "Include failed");
                format!(
                    r#"<code class="include-error">{}</code>"#,
                    escape_html(&err.to_string())
                )
            }
        }
    }

    fn resolve(
        &self,
        renderer: &TokenRenderer,
        src: &str,
        ctx: &RenderContext,
    ) -> Result<String, IncludeError> {
        if !is_relative_reference(src) {
            return Err(IncludeError::UnsupportedForm {
                path: src.to_owned(),
                file: current_file_label(ctx),
            });
        }

        let (path_part, region) = split_fragment(src);
        let resolved = resolve_relative(path_part, ctx.current_file());
        if ctx.contains(&resolved) {
            return Err(IncludeError::Circular { path: resolved });
        }

        let content = (self.read_file)(&resolved).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                IncludeError::NotFound {
                    path: path_part.to_owned(),
                }
            } else {
                IncludeError::Io {
                    path: resolved.clone(),
                    source,
                }
            }
        })?;

        let content = match region {
            None => content,
            Some(region) => {
                let lines: Vec<&str> = content.lines().collect();
                let selected = find_tag_region(&lines, region).ok_or_else(|| {
                    IncludeError::RegionNotFound {
                        region: region.to_owned(),
                        path: resolved.clone(),
                    }
                })?;
                selected.join("\n")
            }
        };

        let tokens = renderer.tokenize(&content);
        Ok(renderer.render_all(&tokens, &ctx.descend(resolved)))
    }
}
