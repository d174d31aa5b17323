// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the taxon CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. The theme comes
//! from `TAXON_THEME` ("dark" or "light") when set, then from the `COLORFGBG`
//! hint some terminals export, and defaults to dark. `NO_COLOR` and non-TTY
//! stdout turn styling off entirely so piped output stays plain.

use std::sync::OnceLock;
use std::time::Duration;

use taxon::build::IngestReport;
use taxon::search::{MatcherStats, ScoredPhrase};

/// Width between the box borders.
pub const BOX_WIDTH: usize = 64;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn parse_theme(value: &str) -> Option<Theme> {
    match value.to_lowercase().as_str() {
        "light" | "l" => Some(Theme::Light),
        "dark" | "d" => Some(Theme::Dark),
        _ => None,
    }
}

/// `COLORFGBG` is "fg;bg"; background colors 7 and above (except 8) are light.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let bg = value.split(';').next_back()?.parse::<u8>().ok()?;
    Some(if bg >= 7 && bg != 8 { Theme::Light } else { Theme::Dark })
}

fn detect_theme() -> Theme {
    if let Some(theme) = std::env::var("TAXON_THEME").ok().as_deref().and_then(parse_theme) {
        return theme;
    }
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(theme_from_colorfgbg)
        .unwrap_or(Theme::Dark)
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply a theme color with optional modifiers, or nothing off a TTY.
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

pub fn pad_right(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}

pub fn pad_left(s: &str, width: usize) -> String {
    let len = visible_len(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - len), s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    println!("│ {} │", pad_right(content, BOX_WIDTH - 2));
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", themed(CYAN, &[BOLD], label));
    let fill = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!("┌{}{}┐", label_part, "─".repeat(fill));
}

pub fn section_bot() {
    println!("└{}┘", "─".repeat(BOX_WIDTH));
}

// ═══════════════════════════════════════════════════════════════════════════
// VALUE FORMATTING
// ═══════════════════════════════════════════════════════════════════════════

/// Scores at or above a direct match boost read green, positive ones yellow.
pub fn score_colored(score: f64) -> String {
    let text = format!("{:.1}", score);
    if score >= 1000.0 {
        themed(GREEN, &[BOLD], &text)
    } else if score > 0.0 {
        themed(YELLOW, &[], &text)
    } else {
        themed(RED, &[], &text)
    }
}

pub fn timing(elapsed: Duration) -> String {
    let us = elapsed.as_secs_f64() * 1_000_000.0;
    let text = if us >= 1000.0 {
        format!("{:.2}ms", us / 1000.0)
    } else {
        format!("{:.1}µs", us)
    };
    let color: fn() -> String = if us < 100.0 {
        GREEN
    } else if us < 10_000.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

/// Ranked phrases for one query, one per line.
pub fn print_results(query: &str, results: &[ScoredPhrase], elapsed: Duration, show_scores: bool) {
    if results.is_empty() {
        println!("{} {}", themed(GRAY, &[], "no match for"), query);
        return;
    }
    for (rank, scored) in results.iter().enumerate() {
        let position = themed(GRAY, &[DIM], &pad_left(&format!("{}.", rank + 1), 3));
        if show_scores {
            println!(
                "{} {} {} {}",
                position,
                pad_right(&themed(BRIGHT_CYAN, &[], &scored.phrase), 32),
                pad_left(&score_colored(scored.score), 8),
                themed(GRAY, &[DIM], &format!("[{}]", scored.terms.join(" ")))
            );
        } else {
            println!("{} {}", position, scored.phrase);
        }
    }
    if show_scores {
        println!("{}", themed(GRAY, &[DIM], &format!("    resolved in {}", timing(elapsed))));
    }
}

pub fn print_ingest_report(report: &IngestReport, elapsed: Duration) {
    section_top("INGEST");
    row(&format!("lines       {}", pad_left(&report.lines.to_string(), 10)));
    row(&format!(
        "indexed     {}",
        pad_left(&themed(GREEN, &[], &report.indexed.to_string()), 10)
    ));
    row(&format!("duplicates  {}", pad_left(&report.duplicates.to_string(), 10)));
    let skipped = if report.skipped > 0 {
        themed(YELLOW, &[], &report.skipped.to_string())
    } else {
        report.skipped.to_string()
    };
    row(&format!("skipped     {}", pad_left(&skipped, 10)));
    row(&format!("elapsed     {}", pad_left(&timing(elapsed), 10)));
    section_bot();
}

pub fn print_stats(stats: &MatcherStats) {
    section_top("MATCHER");
    row(&format!("phrases              {}", stats.phrases));
    row(&format!("index lookups        {}", stats.index_lookups));
    row(&format!("retrieval cache hits {}", stats.retrieval_cache_hits));
    row(&format!("query cache hits     {}", stats.query_cache_hits));
    row(&format!("cached tuples        {}", stats.cached_tuples));
    row(&format!("cached queries       {}", stats.cached_queries));
    section_bot();
}
