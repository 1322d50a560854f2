//! Word wrapping for the message log.
//!
//! Lines are broken at the last space that still fits; a word longer than
//! the width is hard-cut. [`wrap`] and [`wrap_ranges`] count `char`s.
//! [`wrap_columns`] counts terminal cells, so wide characters such as CJK
//! take two columns each; the log uses it so no row is wider than the panel.

use std::ops::Range;
use unicode_width::UnicodeWidthChar;

/// Splits `text` into lines of at most `max_width` characters.
///
/// The space a line is broken at is dropped. A single word longer than
/// `max_width` is cut at exactly `max_width` with nothing inserted. Empty
/// input yields one empty line.
///
/// ```
/// use roomchat_core::wrap::wrap;
/// assert_eq!(wrap("the quick brown fox", 9), ["the quick", "brown fox"]);
/// ```
pub fn wrap(text: &str, max_width: usize) -> Vec<String> {
    wrap_ranges(text, max_width)
        .into_iter()
        .map(|range| text[range].to_string())
        .collect()
}

/// Same as [`wrap`], returning byte ranges into `text` instead of copies.
///
/// Consecutive ranges are separated by either nothing (hard cut) or the
/// single space that was dropped. A `max_width` of zero behaves like 1.
pub fn wrap_ranges(text: &str, max_width: usize) -> Vec<Range<usize>> {
    wrap_by(text, max_width, |_| 1)
}

/// Like [`wrap_ranges`], with `max_width` in terminal columns.
///
/// Zero-width characters (combining marks) stay attached to the character
/// before them. A character wider than `max_width` gets a line of its own.
pub fn wrap_columns(text: &str, max_width: usize) -> Vec<Range<usize>> {
    wrap_by(text, max_width, |ch| ch.width().unwrap_or(0))
}

fn wrap_by(text: &str, max_width: usize, width_of: impl Fn(char) -> usize) -> Vec<Range<usize>> {
    let max_width = max_width.max(1);
    let mut ranges = Vec::new();
    let mut start = 0;

    loop {
        let rest = &text[start..];
        // Byte offset of the first character that overflows the width. None
        // means the remainder already fits.
        let Some((cut, ch)) = overflow(rest, max_width, &width_of) else {
            break;
        };
        // A lone character too wide for the line is the last line itself.
        if cut == 0 && ch.len_utf8() == rest.len() {
            break;
        }

        let space = if ch == ' ' {
            Some(cut)
        } else {
            rest[..cut].rfind(' ')
        };

        match space {
            Some(pos) => {
                ranges.push(start..start + pos);
                start += pos + 1;
            }
            // Always take at least one character.
            None => {
                let cut = if cut == 0 { ch.len_utf8() } else { cut };
                ranges.push(start..start + cut);
                start += cut;
            }
        }
    }

    ranges.push(start..text.len());
    ranges
}

fn overflow(text: &str, max_width: usize, width_of: impl Fn(char) -> usize) -> Option<(usize, char)> {
    let mut used = 0;
    for (idx, ch) in text.char_indices() {
        used += width_of(ch);
        if used > max_width {
            return Some((idx, ch));
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
