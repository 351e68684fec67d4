// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::builder::styling::{Ansi256Color, Color, Style, Styles};
use crate::env;
use imgqa_core::Severity;
use std::io::IsTerminal;

/// 256-color palette codes
pub mod codes {
    pub const HEADER: u8 = 74;
    /// Flags and values in help output
    pub const LITERAL: u8 = 250;
    pub const MUTED: u8 = 240;
    pub const PENDING: u8 = 110;
    pub const OK: u8 = 114;
    pub const WARNING: u8 = 179;
    pub const FAILURE: u8 = 167;
}

/// Explicit `NO_COLOR`/`COLOR` choice, else whether stdout is a terminal.
pub fn should_colorize() -> bool {
    env::color_choice().unwrap_or_else(|| std::io::stdout().is_terminal())
}

fn fg(code: u8) -> Style {
    Style::new().fg_color(Some(Color::Ansi256(Ansi256Color(code))))
}

/// clap help styles in the same palette.
pub fn styles() -> Styles {
    if should_colorize() {
        Styles::styled()
            .header(fg(codes::HEADER))
            .usage(fg(codes::HEADER))
            .literal(fg(codes::LITERAL))
            .placeholder(fg(codes::MUTED))
    } else {
        Styles::plain()
    }
}

const RESET: &str = "\x1b[0m";

fn paint(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[38;5;{code}m{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn header(text: &str) -> String {
    paint(codes::HEADER, text)
}

pub fn muted(text: &str) -> String {
    paint(codes::MUTED, text)
}

pub fn severity_code(severity: Severity) -> u8 {
    match severity {
        Severity::Pending => codes::PENDING,
        Severity::Ok => codes::OK,
        Severity::Warning => codes::WARNING,
        Severity::Failure => codes::FAILURE,
    }
}

/// Color `text` by how bad `severity` is.
pub fn severity(text: &str, severity: Severity) -> String {
    paint(severity_code(severity), text)
}

/// Length of `text` as shown on a terminal, ignoring color escapes.
pub fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in text.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
