//! Extraction directives for code sourced from external files.

/// Which part of a source file a fences token extracts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExtractDirective {
    /// Every line of the file.
    #[default]
    WholeFile,
    /// Lines strictly between the `<name>` and `</name>` marker pair.
    Tag(String),
    /// 1-based inclusive line range; an absent end runs to end of file.
    Lines { start: usize, end: Option<usize> },
}

impl ExtractDirective {
    /// Parse a reference fragment into a directive.
    ///
    /// `L10-L20` selects a range, `L10-` an open range, `L10` a single
    /// line; anything else names a tag region. An empty fragment selects
    /// the whole file.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.trim();
        if fragment.is_empty() {
            return Self::WholeFile;
        }
        parse_line_range(fragment).unwrap_or_else(|| Self::Tag(fragment.to_owned()))
    }
}

fn parse_line_range(fragment: &str) -> Option<ExtractDirective> {
    let rest = fragment.strip_prefix('L')?;
    match rest.split_once('-') {
        None => {
            let line = rest.parse().ok()?;
            Some(ExtractDirective::Lines {
                start: line,
                end: Some(line),
            })
        }
        Some((start, "")) => Some(ExtractDirective::Lines {
            start: start.parse().ok()?,
            end: None,
        }),
        Some((start, end)) => Some(ExtractDirective::Lines {
            start: start.parse().ok()?,
            end: Some(end.strip_prefix('L')?.parse().ok()?),
        }),
    }
}
