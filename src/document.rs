// Marker-delimited block substitution.
// Rewrites the region between a start and end marker, appending it when absent.

use regex::{Captures, RegexBuilder};

use crate::error::Result;

/// A pair of HTML comments delimiting a generated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markers {
    pub start: &'static str,
    pub end: &'static str,
}

pub const BLOG_MARKERS: Markers = Markers {
    start: "<!-- DYNAMIC:START:blog -->",
    end: "<!-- DYNAMIC:END:blog -->",
};

pub const STATS_MARKERS: Markers = Markers {
    start: "<!-- DYNAMIC:START:stats -->",
    end: "<!-- DYNAMIC:END:stats -->",
};

impl Markers {
    /// Put `block` between these markers in `content`.
    pub fn apply(&self, content: &str, block: &str) -> Result<String> {
        replace_block(content, self.start, self.end, block)
    }
}

/// Replace everything between `start` and `end` with `block`.
///
/// Markers match case-insensitively and the interior may span lines. Every
/// marked region is rewritten, keeping the start marker as written. With no
/// marked region, the block is appended after a blank line.
pub fn replace_block(content: &str, start: &str, end: &str, block: &str) -> Result<String> {
    let pattern = format!("({})(.*?){}", regex::escape(start), regex::escape(end));
    let re = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .dot_matches_new_line(true)
        .build()?;

    if !re.is_match(content) {
        return Ok(format!(
            "{}\n\n{}\n{}{}\n",
            content.trim_end(),
            start,
            block,
            end
        ));
    }

    let replaced = re.replace_all(content, |caps: &Captures| {
        format!("{}\n{}{}", &caps[1], block, end)
    });
    Ok(replaced.into_owned())
}
