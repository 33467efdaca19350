//! Token-to-HTML renderer for the docmark markdown dialect.
//!
//! This crate takes the token trees produced by a docmark tokenizer and
//! turns them into HTML fragments: cross-reference links, transcluded
//! files, code extracted from external sources, and grouped blockquote
//! callouts.
//!
//! # Architecture
//!
//! [`TokenRenderer`] dispatches over the closed [`Token`] enum. Tokens
//! that reach outside the document go through two injected services:
//! [`IncludeResolver`] pulls other markdown files into the output
//! (re-tokenizing them through the [`Tokenizer`] collaborator), and
//! [`SnippetExtractor`] lifts code regions out of source files. Both
//! share one file-reading callback, so tests and embedders can swap the
//! filesystem out in a single place.
//!
//! Failures never abort a render. Every include or extraction error is
//! converted into a visible inline fragment and the surrounding document
//! keeps rendering.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use docmark_renderer::{RenderContext, Token, TokenRenderer, Tokenizer};
//!
//! struct PlainText;
//!
//! impl Tokenizer for PlainText {
//!     fn tokenize(&self, source: &str) -> Vec<Token> {
//!         vec![Token::Text { text: source.to_owned() }]
//!     }
//! }
//!
//! let renderer = TokenRenderer::new(Arc::new(PlainText));
//! let token = Token::Xref {
//!     href: Some("system.String".to_owned()),
//!     title: None,
//!     name: Some("String".to_owned()),
//! };
//! let html = renderer.render(&token, &RenderContext::new("docs/index.md"));
//! assert_eq!(html, r#"<xref href="system.String">String</xref>"#);
//! ```

mod context;
mod escape;
mod include;
mod path;
mod renderer;
mod snippet;
mod split;

pub use context::RenderContext;
pub use docmark_tokens::{ExtractDirective, Token};
pub use escape::escape_html;
pub use include::{IncludeError, IncludeResolver};
pub use path::{is_relative_reference, resolve_relative, split_fragment};
pub use renderer::{ReadFileFn, TokenRenderer, Tokenizer};
pub use snippet::{SnippetError, SnippetExtractor};
pub use split::{SplitToken, split_blockquote};
