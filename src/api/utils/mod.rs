pub mod amount;

use colored::Colorize;
use lazy_static::lazy_static;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

pub use amount::format_amount;

const MIN_BOX_WIDTH: usize = 30;

lazy_static! {
    static ref ANSI_ESCAPE: Regex = Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
}

fn strip_ansi_codes(s: &str) -> String {
    ANSI_ESCAPE.replace_all(s, "").to_string()
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi_codes(s).as_str())
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding_needed = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(padding_needed))
}

/// Lays `rows` out inside a rounded box titled `header_text`. Widths are
/// measured on the visible text, so colored rows line up.
pub fn render_dashboard(header_text: &str, rows: &[String]) -> Vec<String> {
    let header_text_width = display_width(header_text);
    let max_content_width = rows.iter().map(|row| display_width(row)).max().unwrap_or(0);

    // one space of margin on each side of the content and the title
    let total_width = (max_content_width + 2)
        .max(header_text_width + 2)
        .max(MIN_BOX_WIDTH);

    let header_padding_total = total_width - header_text_width;
    let header_padding_left = header_padding_total / 2;
    let header_padding_right = header_padding_total - header_padding_left;

    let header = format!(
        "╭{}{}{}╮",
        "─".repeat(header_padding_left),
        header_text,
        "─".repeat(header_padding_right)
    );
    let footer = format!("╰{}╯", "─".repeat(total_width));

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header.bold().green().to_string());

    let green_vertical_row_char = "│".green();
    for row in rows {
        let padded_row = pad_to_width(row, total_width - 2);
        lines.push(format!(
            "{green_vertical_row_char} {padded_row} {green_vertical_row_char}"
        ));
    }

    lines.push(footer.bold().green().to_string());
    lines
}

pub fn print_pretty_dashboard(header_text: &str, rows: &[String]) {
    for line in render_dashboard(header_text, rows) {
        println!("{line}");
    }
}
