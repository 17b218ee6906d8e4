//! ANSI-aware Text Measurement and Slicing
//!
//! Layer content arrives pre-styled, so every measurement here treats an
//! escape sequence as zero-width. A sequence starts at `ESC` and runs up to
//! and including the first ASCII letter that follows it.
//!
//! # Slicing
//!
//! [`slice`] extracts a visual column range `[start, end)` from a styled line
//! without losing color state: sequences seen before `start` are replayed in
//! front of the first in-range cell, sequences inside the range are kept in
//! place, and a styled slice is closed with [`RESET`].

use unicode_width::UnicodeWidthChar;

/// Escape-sequence introducer
const ESC: char = '\x1b';

/// SGR reset
pub const RESET: &str = "\x1b[0m";

/// One lexical unit of a styled line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token<'a> {
    /// A complete (or unterminated trailing) escape sequence
    Escape(&'a str),
    /// A printable or zero-width character
    Char(char),
}

/// Iterator splitting a line into escape sequences and characters
struct Tokens<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.offset..];
        let ch = rest.chars().next()?;

        if ch != ESC {
            self.offset += ch.len_utf8();
            return Some(Token::Char(ch));
        }

        // Terminator is the first ASCII letter after the introducer
        let len = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(idx, c)| idx + c.len_utf8())
            .unwrap_or(rest.len());

        self.offset += len;
        Some(Token::Escape(&rest[..len]))
    }
}

/// Cell width of a single character (control characters count as zero)
fn char_width(ch: char) -> usize {
    ch.width().unwrap_or(0)
}

/// Whether the text carries any escape sequence
pub fn has_escapes(text: &str) -> bool {
    text.contains(ESC)
}

/// Remove every escape sequence, keeping only visible characters
pub fn strip(text: &str) -> String {
    if !has_escapes(text) {
        return text.to_string();
    }

    Tokens::new(text)
        .filter_map(|token| match token {
            Token::Char(ch) => Some(ch),
            Token::Escape(_) => None,
        })
        .collect()
}

/// Visual width of a single line in terminal cells
///
/// Escape sequences contribute nothing; wide (CJK, emoji) characters count
/// as two cells and combining marks as zero.
pub fn line_width(line: &str) -> usize {
    Tokens::new(line)
        .map(|token| match token {
            Token::Char(ch) => char_width(ch),
            Token::Escape(_) => 0,
        })
        .sum()
}

/// Extract the visual cells `[start, end)` of a styled line
///
/// A wide character that straddles either boundary is replaced by blank
/// cells for the columns that fall inside the range, so the result is never
/// wider than `end - start`. It can be narrower when the line itself ends
/// before `end`.
pub fn slice(line: &str, start: usize, end: usize) -> String {
    if start >= end {
        return String::new();
    }

    let mut out = String::new();
    // Style that was active before `start`, replayed lazily
    let mut carried = String::new();
    let mut styled = false;
    let mut column = 0usize;
    let mut last_included = false;

    for token in Tokens::new(line) {
        match token {
            Token::Escape(seq) => {
                if column < start {
                    carried.push_str(seq);
                } else if column < end {
                    flush_carried(&mut out, &mut carried, &mut styled);
                    out.push_str(seq);
                    styled = true;
                }
            }
            Token::Char(ch) => {
                let width = char_width(ch);

                // Combining marks ride along with the preceding cell
                if width == 0 {
                    if last_included {
                        out.push(ch);
                    }
                    continue;
                }

                if column >= end {
                    break;
                }

                let next = column + width;
                if column >= start && next <= end {
                    flush_carried(&mut out, &mut carried, &mut styled);
                    out.push(ch);
                    last_included = true;
                } else {
                    let covered = next.min(end).saturating_sub(column.max(start));
                    if covered > 0 {
                        flush_carried(&mut out, &mut carried, &mut styled);
                        out.extend(std::iter::repeat(' ').take(covered));
                    }
                    last_included = false;
                }
                column = next;
            }
        }
    }

    if styled {
        out.push_str(RESET);
    }
    out
}

fn flush_carried(out: &mut String, carried: &mut String, styled: &mut bool) {
    if !carried.is_empty() {
        out.push_str(carried);
        carried.clear();
        *styled = true;
    }
}
