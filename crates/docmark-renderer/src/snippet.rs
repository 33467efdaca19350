//! Code extraction from external source files.

use std::io;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};

use docmark_tokens::ExtractDirective;
use regex::Regex;

use crate::context::RenderContext;
use crate::path::{is_relative_reference, resolve_relative};
use crate::renderer::{ReadFileFn, default_read_file};

/// Matches `<name>` and `</name>` markers anywhere in a line, so tag
/// regions work with any comment syntax.
static TAG_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*(/?)\s*([\w.-]+)\s*>").unwrap());

/// Why a snippet could not be extracted.
#[derive(Debug, thiserror::Error)]
pub enum SnippetError {
    #[error("Code absolute path: {path} is not supported in file {file}")]
    AbsolutePath { path: String, file: String },

    /// Reports the path as declared in the token, matching what the
    /// document author wrote.
    #[error("Can not find reference {path}")]
    NotFound { path: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Tag '{tag}' is not found in file {}", path.display())]
    TagNotFound { tag: String, path: PathBuf },

    #[error("Invalid line range {} in file {} ({lines} lines available)", range_label(*start, *end), path.display())]
    InvalidRange {
        start: usize,
        end: Option<usize>,
        path: PathBuf,
        lines: usize,
    },
}

fn range_label(start: usize, end: Option<usize>) -> String {
    match end {
        Some(end) => format!("L{start}-L{end}"),
        None => format!("L{start}-"),
    }
}

/// Extracts the selected part of an external source file.
///
/// The extractor holds no per-render state; the inclusion chain used for
/// path resolution travels in the [`RenderContext`], so one instance can
/// serve concurrent renders.
pub struct SnippetExtractor {
    read_file: Arc<ReadFileFn>,
}

impl Default for SnippetExtractor {
    fn default() -> Self {
        Self::new(Arc::new(default_read_file))
    }
}

impl SnippetExtractor {
    /// Create an extractor reading files through `read_file`.
    #[must_use]
    pub fn new(read_file: Arc<ReadFileFn>) -> Self {
        Self { read_file }
    }

    /// Extract the lines `directive` selects from `path`.
    ///
    /// `path` must be relative; it is resolved against the file on top of
    /// the context's inclusion chain. An absolute path is rejected before
    /// any file access.
    pub fn extract(
        &self,
        path: &str,
        directive: &ExtractDirective,
        ctx: &RenderContext,
    ) -> Result<Vec<String>, SnippetError> {
        if !is_relative_reference(path) {
            return Err(SnippetError::AbsolutePath {
                path: path.to_owned(),
                file: current_file_label(ctx),
            });
        }

        let resolved = resolve_relative(path, ctx.current_file());
        let content = (self.read_file)(&resolved).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SnippetError::NotFound {
                    path: path.to_owned(),
                }
            } else {
                SnippetError::Io {
                    path: resolved.clone(),
                    source,
                }
            }
        })?;

        let lines: Vec<&str> = content.lines().collect();
        let selected = match directive {
            ExtractDirective::WholeFile => &lines[..],
            ExtractDirective::Tag(tag) => {
                find_tag_region(&lines, tag).ok_or_else(|| SnippetError::TagNotFound {
                    tag: tag.clone(),
                    path: resolved.clone(),
                })?
            }
            ExtractDirective::Lines { start, end } => select_lines(&lines, *start, *end)
                .ok_or_else(|| SnippetError::InvalidRange {
                    start: *start,
                    end: *end,
                    path: resolved.clone(),
                    lines: lines.len(),
                })?,
        };

        Ok(selected.iter().map(|line| (*line).to_owned()).collect())
    }
}

pub(crate) fn current_file_label(ctx: &RenderContext) -> String {
    ctx.current_file()
        .map_or_else(|| "<input>".to_owned(), |p| p.display().to_string())
}

/// Lines strictly between the opening and closing markers of `tag`.
///
/// Matching is case-insensitive; a closing marker before any opening one
/// is ignored. Returns `None` unless both markers are present.
pub(crate) fn find_tag_region<'a>(lines: &'a [&'a str], tag: &str) -> Option<&'a [&'a str]> {
    let mut opening = None;
    for (idx, line) in lines.iter().enumerate() {
        for caps in TAG_MARKER.captures_iter(line) {
            if !caps[2].eq_ignore_ascii_case(tag) {
                continue;
            }
            let closing = !caps[1].is_empty();
            match opening {
                None if !closing => opening = Some(idx),
                Some(start) if closing => {
                    return lines.get(start + 1..idx).or(Some(&[]));
                }
                _ => {}
            }
        }
    }
    None
}

fn select_lines<'a>(
    lines: &'a [&'a str],
    start: usize,
    end: Option<usize>,
) -> Option<&'a [&'a str]> {
    if start == 0 || start > lines.len() || end.is_some_and(|e| e < start) {
        return None;
    }
    let end = end.map_or(lines.len(), |e| e.min(lines.len()));
    Some(&lines[start - 1..end])
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn reader(files: &[(&str, &str)]) -> Arc<ReadFileFn> {
        let map: HashMap<PathBuf, String> = files
            .iter()
            .map(|(path, content)| (PathBuf::from(path), (*content).to_owned()))
            .collect();
        Arc::new(move |path: &Path| {
            map.get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        })
    }

    fn ctx() -> RenderContext {
        RenderContext::new("docs/guide.md")
    }

    #[test]
    fn test_whole_file() {
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.rs", "fn main() {}\n")]));
        let lines = extractor
            .extract("ex.rs", &ExtractDirective::WholeFile, &ctx())
            .unwrap();
        assert_eq!(lines, vec!["fn main() {}"]);
    }

    #[test]
    fn test_resolves_against_current_file() {
        let extractor = SnippetExtractor::new(reader(&[("docs/snippets/ex.rs", "let x = 1;")]));
        let lines = extractor
            .extract("snippets/ex.rs", &ExtractDirective::WholeFile, &ctx())
            .unwrap();
        assert_eq!(lines, vec!["let x = 1;"]);
    }

    #[test]
    fn test_tag_region_excludes_markers() {
        let source = "// <Main>\nfn main() {\n    run();\n}\n// </Main>\nfn run() {}\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.rs", source)]));
        let lines = extractor
            .extract("ex.rs", &ExtractDirective::Tag("Main".to_owned()), &ctx())
            .unwrap();
        assert_eq!(lines, vec!["fn main() {", "    run();", "}"]);
    }

    #[test]
    fn test_tag_region_is_case_insensitive() {
        let source = "# <setup>\npip install docmark\n# </SETUP>\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.sh", source)]));
        let lines = extractor
            .extract("ex.sh", &ExtractDirective::Tag("Setup".to_owned()), &ctx())
            .unwrap();
        assert_eq!(lines, vec!["pip install docmark"]);
    }

    #[test]
    fn test_unmatched_tag_is_an_error_not_empty() {
        let extractor =
            SnippetExtractor::new(reader(&[("docs/ex.rs", "// <Main>\nfn main() {}\n")]));
        let err = extractor
            .extract("ex.rs", &ExtractDirective::Tag("Main".to_owned()), &ctx())
            .unwrap_err();
        assert!(matches!(err, SnippetError::TagNotFound { .. }));
        assert_eq!(err.to_string(), "Tag 'Main' is not found in file docs/ex.rs");
    }

    #[test]
    fn test_empty_region_is_a_successful_extraction() {
        let adjacent = "// <Empty>\n// </Empty>\nbody\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.rs", adjacent)]));
        let lines = extractor
            .extract("ex.rs", &ExtractDirective::Tag("Empty".to_owned()), &ctx())
            .unwrap();
        assert_eq!(lines, Vec::<String>::new());

        let same_line = "// <Empty> </Empty>\nbody\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.rs", same_line)]));
        let lines = extractor
            .extract("ex.rs", &ExtractDirective::Tag("Empty".to_owned()), &ctx())
            .unwrap();
        assert_eq!(lines, Vec::<String>::new());
    }

    #[test]
    fn test_closing_marker_before_opening_is_ignored() {
        let source = "// </Main>\n// <Main>\nbody\n// </Main>\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.rs", source)]));
        let lines = extractor
            .extract("ex.rs", &ExtractDirective::Tag("Main".to_owned()), &ctx())
            .unwrap();
        assert_eq!(lines, vec!["body"]);
    }

    #[test]
    fn test_line_range() {
        let source = "one\ntwo\nthree\nfour\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.txt", source)]));
        let lines = extractor
            .extract(
                "ex.txt",
                &ExtractDirective::Lines {
                    start: 2,
                    end: Some(3),
                },
                &ctx(),
            )
            .unwrap();
        assert_eq!(lines, vec!["two", "three"]);
    }

    #[test]
    fn test_open_range_clamps_to_eof() {
        let source = "one\ntwo\nthree\n";
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.txt", source)]));

        let open = extractor
            .extract(
                "ex.txt",
                &ExtractDirective::Lines {
                    start: 2,
                    end: None,
                },
                &ctx(),
            )
            .unwrap();
        assert_eq!(open, vec!["two", "three"]);

        let clamped = extractor
            .extract(
                "ex.txt",
                &ExtractDirective::Lines {
                    start: 2,
                    end: Some(99),
                },
                &ctx(),
            )
            .unwrap();
        assert_eq!(clamped, vec!["two", "three"]);
    }

    #[test]
    fn test_invalid_ranges() {
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.txt", "one\ntwo\n")]));

        for (start, end) in [(0, Some(1)), (5, None), (2, Some(1))] {
            let err = extractor
                .extract("ex.txt", &ExtractDirective::Lines { start, end }, &ctx())
                .unwrap_err();
            assert!(matches!(err, SnippetError::InvalidRange { .. }), "{err}");
        }
    }

    #[test]
    fn test_invalid_range_message_names_range_and_file() {
        let extractor = SnippetExtractor::new(reader(&[("docs/ex.txt", "one\n")]));
        let err = extractor
            .extract(
                "ex.txt",
                &ExtractDirective::Lines {
                    start: 3,
                    end: Some(9),
                },
                &ctx(),
            )
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid line range L3-L9 in file docs/ex.txt (1 lines available)"
        );
    }

    #[test]
    fn test_absolute_path_never_touches_the_reader() {
        let extractor = SnippetExtractor::new(Arc::new(|_: &Path| -> io::Result<String> {
            panic!("no file access expected")
        }));
        let err = extractor
            .extract("/etc/passwd", &ExtractDirective::WholeFile, &ctx())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Code absolute path: /etc/passwd is not supported in file docs/guide.md"
        );
    }

    #[test]
    fn test_missing_file_has_distinct_message() {
        let extractor = SnippetExtractor::new(reader(&[]));
        let err = extractor
            .extract("gone.rs", &ExtractDirective::WholeFile, &ctx())
            .unwrap_err();
        assert!(matches!(err, SnippetError::NotFound { .. }));
        assert_eq!(err.to_string(), "Can not find reference gone.rs");
    }

    #[test]
    fn test_unreadable_file_surfaces_io_error() {
        let extractor = SnippetExtractor::new(Arc::new(|_: &Path| -> io::Result<String> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }));
        let err = extractor
            .extract("ex.rs", &ExtractDirective::WholeFile, &ctx())
            .unwrap_err();
        assert!(matches!(err, SnippetError::Io { .. }));
        assert_eq!(err.to_string(), "Failed to read docs/ex.rs: denied");
    }

    #[test]
    fn test_extractor_is_shareable() {
        static_assertions::assert_impl_all!(SnippetExtractor: Send, Sync);
    }
}
