//! Plain-text output routed through the log pipeline.
//!
//! Every line goes out as an event on [`PRINT_TARGET`] so it is drawn above
//! the spinner instead of through it.

use colored::*;
use tracing::info;

use crate::terminal::colors;
use crate::terminal::logging::PRINT_TARGET;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 8;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner() {
    let title: String = format!("⟦ NETCENSUS v{} ⟧", env!("CARGO_PKG_VERSION"));
    let side: String = "═".repeat(TOTAL_WIDTH.saturating_sub(title.chars().count()) / 2);
    print(&format!(
        "{}{}{}",
        side.bright_black(),
        title.bright_green().bold(),
        side.bright_black()
    ));
}

pub fn header(msg: &str) {
    let title: String = format!("⟦ {} ⟧", msg.to_uppercase());
    let fill: usize = TOTAL_WIDTH.saturating_sub(title.chars().count());
    let (left, right) = (fill / 2, fill - fill / 2);
    print(&format!(
        "{}{}{}",
        "─".repeat(left).bright_black(),
        title.bright_green(),
        "─".repeat(right).bright_black()
    ));
}

pub fn fat_separator() {
    print(&"═".repeat(TOTAL_WIDTH).bright_black().to_string());
}

fn dotted_key(key: &str) -> String {
    format!(
        "{}{}",
        ".".repeat(KEY_WIDTH.saturating_sub(key.chars().count())).color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR)
    )
}

/// `> Key.....: value`, used for the scan parameters.
pub fn aligned_line(key: &str, value: impl Into<ColoredString>) {
    print(&format!(
        "{} {}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dotted_key(key),
        value.into()
    ));
}

pub fn tree_head(idx: usize, name: &str) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));
}

pub fn as_tree_one_level(rows: Vec<(String, ColoredString)>) {
    let count: usize = rows.len();
    for (i, (key, value)) in rows.into_iter().enumerate() {
        let branch: &str = if i + 1 < count { "├─" } else { "└─" };
        print(&format!(
            " {} {}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            dotted_key(&key),
            value
        ));
    }
}

/// Centers plain `text`, then applies `style` to it.
pub fn centerln(text: &str, style: fn(ColoredString) -> ColoredString) {
    let space: String = " ".repeat(TOTAL_WIDTH.saturating_sub(text.chars().count()) / 2);
    print(&format!("{space}{}", style(text.into())));
}

pub fn no_results() {
    centerln("no hosts answered", |s| s.red().bold());
}
