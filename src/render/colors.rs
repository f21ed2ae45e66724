//! Terminal colors for rendered cells.
//!
//! Every helper goes through `if_supports_color`, so color is dropped when
//! stdout is not a terminal, `NO_COLOR` is set, or [`disable`] was called.

use owo_colors::{OwoColorize, Stream};

/// Turn colors off for the rest of the process (`--no-color`).
pub fn disable() {
    owo_colors::set_override(false);
}

pub fn bold(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bold())
        .to_string()
}

pub fn dim(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.dimmed())
        .to_string()
}

pub fn gray(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.bright_black())
        .to_string()
}

pub fn cyan(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.cyan())
        .to_string()
}

pub fn green(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.green())
        .to_string()
}

pub fn yellow(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.yellow())
        .to_string()
}

pub fn red(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.red())
        .to_string()
}

pub fn blue(text: &str) -> String {
    text.if_supports_color(Stream::Stdout, |t| t.blue())
        .to_string()
}
