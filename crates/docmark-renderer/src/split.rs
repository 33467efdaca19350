//! Blockquote child grouping into section, note, and plain runs.

use docmark_tokens::Token;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Section,
    Note,
    Plain,
}

fn kind_of(token: &Token) -> Kind {
    match token {
        Token::Section { .. } => Kind::Section,
        Token::Note { .. } => Kind::Note,
        _ => Kind::Plain,
    }
}

/// A maximal run of same-kind children within a blockquote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitToken<'a> {
    /// The token that opened a section or note run; `None` for plain runs.
    pub marker: Option<&'a Token>,
    /// The run's children in original order, marker included.
    pub tokens: &'a [Token],
}

/// Partition `children` into maximal contiguous runs of the same kind.
///
/// A run holds section markers, note markers, or plain tokens; adjacent
/// tokens of the same kind share a run. The returned groups borrow
/// contiguous sub-slices of `children`, so concatenating them yields the
/// input exactly.
#[must_use]
pub fn split_blockquote(children: &[Token]) -> Vec<SplitToken<'_>> {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < children.len() {
        let kind = kind_of(&children[start]);
        let mut end = start + 1;
        while end < children.len() && kind_of(&children[end]) == kind {
            end += 1;
        }
        groups.push(SplitToken {
            marker: (kind != Kind::Plain).then_some(&children[start]),
            tokens: &children[start..end],
        });
        start = end;
    }
    groups
}
