//! Token dispatch and HTML fragment assembly.

use std::io;
use std::path::Path;
use std::sync::Arc;

use docmark_tokens::{ExtractDirective, Token};

use crate::context::RenderContext;
use crate::escape::escape_html;
use crate::include::IncludeResolver;
use crate::snippet::SnippetExtractor;
use crate::split::split_blockquote;

/// Produces token trees from source text.
///
/// The tokenizer is an external collaborator; the renderer only needs it
/// to re-tokenize file content pulled in by include tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize `source` into an ordered token sequence.
    fn tokenize(&self, source: &str) -> Vec<Token>;
}

/// File reading callback shared by the include resolver and code extractor.
///
/// Default: [`std::fs::read_to_string`].
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send + Sync;

/// Default file reading function.
pub(crate) fn default_read_file(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Renders docmark tokens to HTML fragments.
///
/// Collaborators are injected once at construction: the tokenizer that
/// re-parses included files, and a file reader shared by the include
/// resolver and the code extractor. The renderer holds no per-render
/// state; the inclusion chain travels in the [`RenderContext`], so a
/// single instance can serve concurrent renders.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use docmark_renderer::{RenderContext, Token, TokenRenderer, Tokenizer};
///
/// struct PlainText;
///
/// impl Tokenizer for PlainText {
///     fn tokenize(&self, source: &str) -> Vec<Token> {
///         vec![Token::Text { text: source.to_owned() }]
///     }
/// }
///
/// let renderer = TokenRenderer::new(Arc::new(PlainText));
/// let blockquote = Token::Blockquote {
///     children: vec![Token::Note {
///         label: "NOTE".to_owned(),
///         content: "<p>Heads up.</p>".to_owned(),
///     }],
/// };
/// let html = renderer.render(&blockquote, &RenderContext::new("guide.md"));
/// assert_eq!(html, "<div class=\"NOTE\"><h5>NOTE</h5><p>Heads up.</p></div>\n");
/// ```
pub struct TokenRenderer {
    tokenizer: Arc<dyn Tokenizer>,
    includes: IncludeResolver,
    snippets: SnippetExtractor,
}

impl TokenRenderer {
    /// Create a renderer that reads files directly from the filesystem.
    #[must_use]
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            tokenizer,
            includes: IncludeResolver::default(),
            snippets: SnippetExtractor::default(),
        }
    }

    /// Replace the file reading callback.
    #[must_use]
    pub fn with_read_file(mut self, read_file: Arc<ReadFileFn>) -> Self {
        self.includes = IncludeResolver::new(Arc::clone(&read_file));
        self.snippets = SnippetExtractor::new(read_file);
        self
    }

    pub(crate) fn tokenize(&self, source: &str) -> Vec<Token> {
        self.tokenizer.tokenize(source)
    }

    /// Render one token to an HTML fragment.
    pub fn render(&self, token: &Token, ctx: &RenderContext) -> String {
        match token {
            Token::Xref { href, title, name } => {
                render_xref(href.as_deref(), title.as_deref(), name.as_deref())
            }
            Token::IncludeBlock { src, raw, .. } | Token::IncludeInline { src, raw, .. } => {
                self.includes.load(self, src.as_deref(), raw, ctx)
            }
            Token::YamlHeader { content } => render_yaml_header(content),
            Token::Blockquote { children } => self.render_blockquote(children, ctx),
            Token::Fences {
                path,
                language,
                directive,
                raw,
            } => self.render_fences(path, language.as_deref(), directive, raw, ctx),
            // A section marker only decorates its blockquote-level wrapper.
            Token::Section { .. } => String::new(),
            Token::Note { content, .. } => content.clone(),
            Token::Text { text } => escape_html(text),
            Token::Markup { html } => html.clone(),
        }
    }

    /// Render a token sequence, concatenating the fragments.
    pub fn render_all(&self, tokens: &[Token], ctx: &RenderContext) -> String {
        tokens.iter().map(|token| self.render(token, ctx)).collect()
    }

    fn render_blockquote(&self, children: &[Token], ctx: &RenderContext) -> String {
        let mut out = String::new();
        for group in split_blockquote(children) {
            let inner = self.render_all(group.tokens, ctx);
            match group.marker {
                Some(Token::Section { attributes }) => {
                    if attributes.is_empty() {
                        out.push_str("<div>");
                    } else {
                        out.push_str(&format!("<div {attributes}>"));
                    }
                    out.push_str(&inner);
                    out.push_str("</div>\n");
                }
                Some(Token::Note { label, .. }) => {
                    let label = escape_html(label);
                    out.push_str(&format!(r#"<div class="{label}"><h5>{label}</h5>"#));
                    out.push_str(&inner);
                    out.push_str("</div>\n");
                }
                _ => {
                    out.push_str("<blockquote>");
                    out.push_str(&inner);
                    out.push_str("</blockquote>\n");
                }
            }
        }
        out
    }

    fn render_fences(
        &self,
        path: &str,
        language: Option<&str>,
        directive: &ExtractDirective,
        raw: &str,
        ctx: &RenderContext,
    ) -> String {
        if path.is_empty() {
            return code_block(language, None, raw);
        }
        let body = match self.snippets.extract(path, directive, ctx) {
            Ok(lines) => lines.join("\n"),
            Err(err) => {
                tracing::error!(path, error = %err, "Code extraction failed");
                err.to_string()
            }
        };
        code_block(language, Some(path), &body)
    }
}

fn render_xref(href: Option<&str>, title: Option<&str>, name: Option<&str>) -> String {
    let mut out = String::from("<xref");
    if let Some(href) = href {
        out.push_str(&format!(r#" href="{}""#, escape_html(href)));
    }
    if let Some(title) = title {
        out.push_str(&format!(r#" title="{}""#, escape_html(title)));
    }
    out.push('>');
    if let Some(name) = name {
        out.push_str(&escape_html(name));
    }
    out.push_str("</xref>");
    out
}

fn render_yaml_header(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    format!("<yamlheader>{}</yamlheader>", escape_html(content))
}

/// Fenced code block wrapper, used for both extracted lines and inline
/// error text so failures stay visible in the output.
fn code_block(language: Option<&str>, src: Option<&str>, body: &str) -> String {
    let mut out = String::from("<pre><code");
    if let Some(lang) = language {
        out.push_str(&format!(r#" class="language-{}""#, escape_html(lang)));
    }
    if let Some(src) = src {
        out.push_str(&format!(r#" data-src="{}""#, escape_html(src)));
    }
    out.push('>');
    out.push_str(&escape_html(body));
    out.push_str("\n</code></pre>");
    out
}
