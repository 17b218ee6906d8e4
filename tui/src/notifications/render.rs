//! Toast box rendering
//!
//! Each notification becomes a rounded, bordered box: one row of vertical
//! padding, two columns of horizontal padding, a bold title in the accent
//! color and the word-wrapped message below it.

use std::borrow::Cow;

use crossterm::style::Stylize;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};

use super::Notification;
use crate::compositor::ansi;
use crate::theme::ToastTheme;

/// Horizontal padding on each side of the content
const PADDING_X: usize = 2;

/// Border plus padding, both sides
pub const CHROME_WIDTH: usize = 2 * (PADDING_X + 1);

/// Greedy word wrap on whitespace
///
/// Lines break once the next word would push them past `width` cells. Words
/// are never split or hyphenated, so a word longer than `width` gets a line
/// of its own. Runs of whitespace collapse to a single space. A zero width
/// returns the text unchanged.
pub fn word_wrap(text: &str, width: usize) -> String {
    if width == 0 {
        return text.to_string();
    }

    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return normalized;
    }

    let options = Options::new(width)
        .break_words(false)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .wrap_algorithm(WrapAlgorithm::FirstFit);

    textwrap::wrap(&normalized, options).join("\n")
}

/// Render one notification as a bordered box `width + CHROME_WIDTH` cells wide
pub fn render_box(notification: &Notification, theme: &ToastTheme) -> String {
    let width = notification.width();
    let accent = theme.accent(notification.kind);
    let inner = width + 2 * PADDING_X;

    let mut body: Vec<String> = Vec::new();
    if !notification.title.is_empty() {
        for line in box_lines(&notification.title, width, true) {
            let (title, fill) = fit(&line, width);
            body.push(format!("{}{}", title.with(accent).bold(), fill));
        }
    }
    if !notification.message.is_empty() {
        for line in box_lines(&notification.message, width, false) {
            let (text, fill) = fit(&line, width);
            body.push(format!("{}{}", text.with(theme.text), fill));
        }
    }
    if body.is_empty() {
        body.push(" ".repeat(width));
    }

    let side = "│".with(accent).to_string();
    let padding = " ".repeat(PADDING_X);
    let blank_row = format!("{side}{}{side}", " ".repeat(inner));

    let mut rows = Vec::with_capacity(body.len() + 4);
    rows.push(format!("{}", format!("╭{}╮", "─".repeat(inner)).with(accent)));
    rows.push(blank_row.clone());
    for line in body {
        rows.push(format!("{side}{padding}{line}{padding}{side}"));
    }
    rows.push(blank_row);
    rows.push(format!("{}", format!("╰{}╯", "─".repeat(inner)).with(accent)));

    rows.join("\n")
}

/// Stack boxes top to bottom, right-aligned to the widest one
pub fn stack_right(boxes: &[String]) -> String {
    let widest = boxes
        .iter()
        .flat_map(|b| b.split('\n'))
        .map(ansi::line_width)
        .max()
        .unwrap_or(0);

    boxes
        .iter()
        .flat_map(|b| b.split('\n'))
        .map(|line| {
            let indent = widest.saturating_sub(ansi::line_width(line));
            format!("{}{line}", " ".repeat(indent))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Lines of `text` as laid out inside a box `width` cells wide
///
/// Words wider than the box are broken across lines instead of clipped.
/// Control characters other than whitespace are dropped; with `keep_breaks`
/// each `\n` starts a new line, otherwise it folds into the wrap.
fn box_lines(text: &str, width: usize, keep_breaks: bool) -> Vec<String> {
    let printable: String = text
        .chars()
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect();
    let paragraphs: Vec<&str> = if keep_breaks {
        printable.split('\n').collect()
    } else {
        vec![printable.as_str()]
    };

    let mut lines = Vec::new();
    for paragraph in paragraphs {
        for line in word_wrap(paragraph, width).split('\n') {
            if ansi::line_width(line) <= width {
                lines.push(line.to_string());
                continue;
            }
            let options = Options::new(width)
                .break_words(true)
                .word_separator(WordSeparator::AsciiSpace)
                .word_splitter(WordSplitter::NoHyphenation);
            lines.extend(textwrap::wrap(line, options).into_iter().map(Cow::into_owned));
        }
    }
    lines
}

/// Truncate plain text to `width` cells, returning it with the blank fill
fn fit(text: &str, width: usize) -> (String, String) {
    let clipped = ansi::slice(text, 0, width);
    let fill = " ".repeat(width.saturating_sub(ansi::line_width(&clipped)));
    (clipped, fill)
}
