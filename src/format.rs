//! Terminal rendering of tickets and articles.
//!
//! Every function returns a `String`; printing is left to the commands.
//! Column alignment uses display width, so titles containing wide or
//! combining characters still line up.

use std::sync::LazyLock;

use colored::{ColoredString, Colorize};
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::models::{display_date, display_datetime, Article, Ticket};

/// Titles wider than this are truncated in the ticket table.
const MAX_TITLE_WIDTH: usize = 34;

/// Width a truncated title is cut to before the ellipsis is appended.
const TRUNCATED_TITLE_WIDTH: usize = 32;

/// Column separator for the ticket table.
const COLUMN_GAP: &str = "  ";

const TABLE_HEADERS: [&str; 7] = [
    "ID", "Number", "Title", "State", "Priority", "Customer", "Updated",
];

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid line break pattern"));

static PARAGRAPH_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</p>").expect("valid paragraph pattern"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));

/// Column holding the ID, dimmed.
const ID_COLUMN: usize = 0;

/// Column holding the state, colored by name.
const STATE_COLUMN: usize = 3;

/// Colors a state name with the state palette.
pub fn color_state(state: &str) -> ColoredString {
    match state {
        "new" => state.cyan(),
        "open" => state.green(),
        "pending reminder" | "pending close" => state.yellow(),
        "closed" => state.dimmed(),
        "merged" => state.magenta(),
        _ => state.white(),
    }
}

/// Renders tickets as an aligned table with a header row.
pub fn format_ticket_table(tickets: &[Ticket]) -> String {
    let rows: Vec<[String; 7]> = tickets
        .iter()
        .map(|t| {
            [
                t.id.to_string(),
                t.number.clone(),
                truncate_title(&t.title),
                t.display_state().to_string(),
                t.display_priority(),
                t.display_customer(),
                display_date(t.updated_at.as_ref()),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.width());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.width());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header: Vec<String> = TABLE_HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w).as_str().bold().to_string())
        .collect();
    lines.push(header.join(COLUMN_GAP).trim_end().to_string());

    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    lines.push(rule.join(COLUMN_GAP).as_str().dimmed().to_string());

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(col, (cell, w))| {
                let padded = pad(cell, *w);
                match col {
                    ID_COLUMN => padded.as_str().dimmed().to_string(),
                    STATE_COLUMN => {
                        let fill = padded.len() - cell.len();
                        format!("{}{}", color_state(cell), " ".repeat(fill))
                    }
                    _ => padded,
                }
            })
            .collect();
        lines.push(cells.join(COLUMN_GAP).trim_end().to_string());
    }

    lines.join("\n")
}

/// Renders the labelled detail view of one ticket.
pub fn format_ticket_detail(ticket: &Ticket) -> String {
    let articles = ticket
        .article_count
        .map(|c| c.to_string())
        .unwrap_or_else(|| "-".to_string());

    let fields: [(&str, String); 9] = [
        ("Title:", ticket.title.clone()),
        ("State:", color_state(ticket.display_state()).to_string()),
        ("Priority:", ticket.display_priority()),
        ("Group:", ticket.display_group()),
        ("Owner:", ticket.display_owner().to_string()),
        ("Customer:", ticket.display_customer()),
        ("Articles:", articles),
        ("Created:", display_datetime(ticket.created_at.as_ref())),
        ("Updated:", display_datetime(ticket.updated_at.as_ref())),
    ];

    let mut lines = vec![
        format!(
            "{} #{} {}",
            "Ticket".bold(),
            ticket.number,
            format!("(ID: {})", ticket.id).as_str().dimmed()
        ),
        String::new(),
    ];
    for (label, value) in fields {
        lines.push(format!("  {} {}", pad(label, 9).as_str().bold(), value));
    }

    lines.join("\n")
}

/// Renders one article: header, date and plain-text body.
pub fn format_article(article: &Article) -> String {
    let internal = if article.internal {
        " [internal]".yellow().to_string()
    } else {
        String::new()
    };

    let header = format!(
        "{} {} from {}{}",
        format!("#{}", article.id).as_str().bold(),
        article.display_type().dimmed(),
        article.display_from().cyan(),
        internal
    );

    let body = if article.is_html() {
        strip_html(&article.body)
    } else {
        article.body.clone()
    };

    [
        header,
        display_datetime(article.created_at.as_ref())
            .as_str()
            .dimmed()
            .to_string(),
        String::new(),
        body.trim().to_string(),
    ]
    .join("\n")
}

/// Converts an HTML fragment to plain text.
///
/// `<br>` and `</p>` become newlines, every other tag is dropped, and the
/// common named entities plus `&#39;` are decoded. `&amp;` is decoded
/// first, so `&amp;lt;` ends up as `<`.
pub fn strip_html(html: &str) -> String {
    let text = LINE_BREAK.replace_all(html, "\n");
    let text = PARAGRAPH_END.replace_all(&text, "\n");
    let text = ANY_TAG.replace_all(&text, "");

    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

fn truncate_title(title: &str) -> String {
    if title.width() <= MAX_TITLE_WIDTH {
        return title.to_string();
    }

    let mut cut = String::new();
    let mut width = 0;
    for ch in title.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + ch_width > TRUNCATED_TITLE_WIDTH {
            break;
        }
        width += ch_width;
        cut.push(ch);
    }
    cut.push('…');
    cut
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}
