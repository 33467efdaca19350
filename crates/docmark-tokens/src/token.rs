//! The token variants the renderer understands.

use crate::ExtractDirective;

/// A parsed token in a docmark document.
///
/// Tokens form a tree: block tokens such as [`Token::Blockquote`] carry
/// their children; everything else is a leaf. Plain markdown constructs
/// arrive pre-rendered as [`Token::Markup`], so the renderer only deals
/// with the dialect-specific kinds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Token {
    /// Cross-reference: a link resolved by name rather than literal URL.
    Xref {
        #[cfg_attr(feature = "serde", serde(default))]
        href: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        title: Option<String>,
        /// Link text; the element body stays empty when absent.
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
    },

    /// Block-level inclusion of another markup file.
    IncludeBlock {
        /// Reference to the included file, optionally with a `#region`
        /// fragment restricting it to a tag-delimited region.
        #[cfg_attr(feature = "serde", serde(default))]
        src: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        title: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
        /// Original source text, rendered verbatim when `src` is absent.
        #[cfg_attr(feature = "serde", serde(default))]
        raw: String,
    },

    /// Inline inclusion of another markup file.
    IncludeInline {
        #[cfg_attr(feature = "serde", serde(default))]
        src: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        title: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        name: Option<String>,
        #[cfg_attr(feature = "serde", serde(default))]
        raw: String,
    },

    /// Front-matter block carried through as opaque text.
    YamlHeader { content: String },

    /// Blockquote with its ordered child tokens.
    Blockquote {
        #[cfg_attr(feature = "serde", serde(default))]
        children: Vec<Token>,
    },

    /// Fenced code block sourced from an external file.
    Fences {
        /// Path of the source file, relative to the including document.
        path: String,
        #[cfg_attr(feature = "serde", serde(default))]
        language: Option<String>,
        /// Which part of the file to extract.
        #[cfg_attr(feature = "serde", serde(default))]
        directive: ExtractDirective,
        /// Original source text, used as the code body when `path` is empty.
        #[cfg_attr(feature = "serde", serde(default))]
        raw: String,
    },

    /// Section marker inside a blockquote.
    Section {
        /// Pre-validated HTML attribute text for the wrapping `<div>`.
        #[cfg_attr(feature = "serde", serde(default))]
        attributes: String,
    },

    /// Note/callout marker inside a blockquote.
    Note {
        /// Callout class, e.g. `NOTE` or `WARNING`.
        label: String,
        /// Pre-rendered HTML for the marker line, emitted verbatim.
        content: String,
    },

    /// Plain text, HTML-encoded on render.
    Text { text: String },

    /// Pre-rendered HTML from the generic renderer, emitted verbatim.
    Markup { html: String },
}
