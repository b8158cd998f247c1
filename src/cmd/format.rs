/*!
format.rs

Human-readable output primitives for the `boostwrap` CLI.

  - StyleOptions::detect() -> StyleOptions   (NO_COLOR / NO_EMOJI / COLUMNS)
  - color(role, text, &StyleOptions) -> String
  - emoji(tag, &StyleOptions) -> &'static str
  - box_header(title, subtitle_opt, &StyleOptions) -> String
  - table(headers, rows, &StyleOptions) -> String

Everything returns strings; nothing here prints. JSON output paths must not
use these helpers.
*/

use std::borrow::Cow;

/* -------------------------------------------------------------------------- */
/* Style Options                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    pub use_emoji: bool,
    pub term_width: usize,
}

impl StyleOptions {
    pub fn detect() -> Self {
        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(100);

        StyleOptions {
            use_color: std::env::var_os("NO_COLOR").is_none(),
            use_emoji: std::env::var_os("NO_EMOJI").is_none(),
            term_width: width,
        }
    }

    /// No color, no emoji, fixed width.
    #[cfg(test)]
    pub fn plain() -> Self {
        StyleOptions {
            use_color: false,
            use_emoji: false,
            term_width: 100,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Color / Emoji                                                              */
/* -------------------------------------------------------------------------- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
    Dim,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Primary => "38;5;45",
        Role::Secondary => "38;5;250",
        Role::Accent => "38;5;213",
        Role::Success => "38;5;82",
        Role::Warning => "38;5;214",
        Role::Error => "38;5;196",
        Role::Dim => "2",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

pub fn emoji(tag: &str, style: &StyleOptions) -> &'static str {
    if !style.use_emoji {
        return "";
    }
    match tag {
        "success" => "✔",
        "error" => "✖",
        "warn" => "⚠",
        "info" => "ℹ",
        "wallet" => "👛",
        "deal" => "📦",
        "list" => "📜",
        _ => "",
    }
}

/* -------------------------------------------------------------------------- */
/* Box Header                                                                 */
/* -------------------------------------------------------------------------- */

/// Single-line title (plus optional subtitle) in a light box. Content wider
/// than the terminal is truncated rather than wrapped.
pub fn box_header(
    title: impl AsRef<str>,
    subtitle: Option<impl AsRef<str>>,
    style: &StyleOptions,
) -> String {
    let title_styled = color(Role::Primary, title.as_ref(), style);
    let inner = match subtitle {
        Some(sub) => format!(
            "{title_styled}  {}",
            color(Role::Secondary, sub.as_ref(), style)
        ),
        None => title_styled,
    };

    let max_inner = style.term_width.clamp(20, 200) - 4;
    let inner = if display_width(&inner) > max_inner {
        truncate_plain(&strip_ansi(&inner), max_inner)
    } else {
        inner
    };
    let width = display_width(&inner);

    let hline = "─".repeat(width + 2);
    format!("┌{hline}┐\n│ {inner} │\n└{hline}┘")
}

/* -------------------------------------------------------------------------- */
/* Table Rendering                                                             */
/* -------------------------------------------------------------------------- */

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header. Columns are not shrunk; the terminal wraps long rows.
pub fn table(headers: &[&str], rows: &[Vec<String>], style: &StyleOptions) -> String {
    if headers.is_empty() {
        return String::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(headers.len()) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    let mut out = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| color(Role::Accent, pad(h, widths[i]), style))
        .collect();
    out.push_str(header_line.join("  ").trim_end());
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&color(Role::Dim, rule.join("  "), style));

    for row in rows {
        out.push('\n');
        let cells: Vec<String> = (0..headers.len())
            .map(|c| pad(row.get(c).map(String::as_str).unwrap_or(""), widths[c]))
            .collect();
        out.push_str(cells.join("  ").trim_end());
    }

    out
}

fn pad(s: &str, width: usize) -> String {
    let len = display_width(s);
    if len >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - len))
    }
}

fn truncate_plain(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

/* -------------------------------------------------------------------------- */
/* ANSI / Width Utilities                                                      */
/* -------------------------------------------------------------------------- */

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // skip parameters up to and including the final letter
            for n in chars.by_ref() {
                if n.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(c);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    strip_ansi(s).chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_header_contains_title_and_subtitle() {
        let b = box_header("Wallets (2)", Some("boost • 12ms"), &StyleOptions::plain());
        let lines: Vec<&str> = b.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Wallets (2)"));
        assert!(lines[1].contains("boost • 12ms"));
        assert_eq!(lines[0].chars().count(), lines[1].chars().count());
    }

    #[test]
    fn box_header_truncates_long_titles() {
        let style = StyleOptions {
            term_width: 40,
            ..StyleOptions::plain()
        };
        let b = box_header("x".repeat(100), None::<&str>, &style);
        assert!(b.lines().all(|l| l.chars().count() <= 40));
        assert!(b.contains('…'));
    }

    #[test]
    fn table_aligns_columns() {
        let t = table(
            &["ADDRESS", "BALANCE"],
            &[
                vec!["f1a".into(), "5".into()],
                vec!["f1longer".into(), "0".into()],
            ],
            &StyleOptions::plain(),
        );
        let lines: Vec<&str> = t.lines().collect();
        assert_eq!(lines[0], "ADDRESS   BALANCE");
        assert_eq!(lines[1], "--------  -------");
        assert_eq!(lines[2], "f1a       5");
        assert_eq!(lines[3], "f1longer  0");
    }

    #[test]
    fn plain_style_has_no_escapes() {
        let s = StyleOptions::plain();
        assert_eq!(color(Role::Error, "boom", &s), "boom");
        assert_eq!(emoji("success", &s), "");
    }

    #[test]
    fn strip_ansi_removes_sgr() {
        assert_eq!(strip_ansi("\x1b[38;5;45mRED\x1b[0m"), "RED");
        assert_eq!(display_width("\x1b[2m---\x1b[0m"), 3);
    }
}
