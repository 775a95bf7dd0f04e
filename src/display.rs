//! Pretty-print helpers for CLI output

use crate::api::{Board, Post, SearchHit, Thread};
use crate::stats::FieldStats;
use chrono::{DateTime, Local};
use colored::Colorize;

/// Separator printed between posts
const POST_SEPARATOR: &str = "--------";

/// Indent for replies and catalog last replies
const REPLY_INDENT: &str = "    ";

/// Print a main header (command title)
pub fn print_header(title: &str) {
    println!();
    println!("{}", title.bold().cyan());
    println!("{}", "─".repeat(50).dimmed());
}

/// Board flags with their short labels, in display order
fn flag_labels(b: &Board) -> [(&'static str, bool); 13] {
    [
        ("code", b.code_tags),
        ("flags", b.country_flags),
        ("anon", b.forced_anon),
        ("arch", b.is_archived),
        ("math", b.math_tags),
        ("oe", b.oekaki),
        ("subject", b.require_subject),
        ("sjis", b.sjis_tags),
        ("spoil", b.spoilers),
        ("txt", b.text_only),
        ("troll", b.troll_flags),
        ("uid", b.user_ids),
        ("webm", b.webm_audio),
    ]
}

/// Board limits with their column widths
fn limit_columns(b: &Board) -> [(u64, usize); 11] {
    [
        (b.pages, 3),
        (b.per_page, 3),
        (b.bump_limit, 4),
        (b.image_limit, 4),
        (b.max_comment_chars, 5),
        (b.max_filesize, 9),
        (b.max_webm_duration, 4),
        (b.max_webm_filesize, 8),
        (b.custom_spoilers, 2),
        (b.min_image_height, 5),
        (b.min_image_width, 5),
    ]
}

/// Comma-separated labels of the flags a board has set
pub fn board_flags(board: &Board) -> String {
    flag_labels(board)
        .iter()
        .filter(|(_, set)| *set)
        .map(|(label, _)| *label)
        .collect::<Vec<_>>()
        .join(",")
}

/// Board limits as fixed-width right-aligned columns
pub fn board_limits(board: &Board) -> String {
    limit_columns(board)
        .iter()
        .map(|(value, width)| format!("{:>width$}", value, width = *width))
        .collect()
}

/// One line of the board listing
pub fn format_board(board: &Board) -> String {
    format!(
        "{:<5} {:<30} {:<55} {}",
        board.board,
        board_flags(board),
        board_limits(board),
        board.title
    )
}

/// Display the board listing
pub fn display_boards(boards: &[Board]) {
    print_header(&format!("Boards ({} total)", boards.len()));
    for board in boards {
        println!("{}", format_board(board));
    }
}

/// Local date and time of a unix timestamp
fn format_time(time: Option<i64>) -> String {
    time.and_then(|t| DateTime::from_timestamp(t, 0))
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "??".to_string())
}

/// `key=value` summary of the counters a post carries
fn format_info(post: &Post) -> String {
    let mut info = Vec::new();
    let mut push = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            info.push(format!("{}={}", label, value));
        }
    };

    push("#IP", post.unique_ips.map(|v| v.to_string()));
    push("skippedimgs", post.omitted_images.map(|v| v.to_string()));
    push("skippedposts", post.omitted_posts.map(|v| v.to_string()));
    push("maxbump", post.bumplimit.map(|v| v.to_string()));
    push("maximg", post.imagelimit.map(|v| v.to_string()));
    push("imgs", post.images.map(|v| v.to_string()));
    push("replies", post.replies.map(|v| v.to_string()));
    push("resto", post.resto.map(|v| v.to_string()));
    push("tag", post.tag.clone());

    info.join(", ")
}

/// Render a post (and any catalog last replies) as text.
///
/// Every rendered post, nested replies included, is tallied in `stats`.
pub fn format_post(post: &Post, indent: &str, stats: &mut FieldStats) -> String {
    let mut out = String::new();

    out += &format!("{}From: {}\n", indent, post.name.as_deref().unwrap_or("??"));
    out += &format!("{}Date: {}\n", indent, format_time(post.time));

    if let Some(sub) = post.sub.as_deref().filter(|s| !s.is_empty()) {
        out += &format!("{}Subject: {}\n", indent, sub);
    }

    if let Some(filename) = post.filename.as_deref().filter(|s| !s.is_empty()) {
        let wh = match (post.w, post.h) {
            (Some(w), Some(h)) if w > 0 => format!("  {}x{}", w, h),
            _ => String::new(),
        };
        let tim = post.tim.map(|t| t.to_string()).unwrap_or_else(|| "-".into());
        out += &format!(
            "{}Filename: ({}{}) <{}> {}{}\n",
            indent,
            post.fsize.unwrap_or(0),
            wh,
            tim,
            filename,
            post.ext.as_deref().unwrap_or("")
        );
    }

    out += &format!("Info: {}\n\n", format_info(post));

    if let Some(com) = post.com.as_deref().filter(|s| !s.is_empty()) {
        if !indent.is_empty() {
            out += indent;
        }
        out += &com.replace('\n', &format!("\n{}", indent));
        out += "\n\n";
    }

    for reply in &post.last_replies {
        out += POST_SEPARATOR;
        out += "\n";
        out += &format_post(reply, REPLY_INDENT, stats);
    }

    stats.record(post);
    out
}

/// Display a catalog entry with its last replies
pub fn display_catalog_post(post: &Post, stats: &mut FieldStats) {
    print!("{}", format_post(post, "", stats));
}

/// Render a thread: the opening post flush left, replies indented
pub fn format_thread(thread: &Thread, stats: &mut FieldStats) -> String {
    let mut out = String::new();
    for (i, post) in thread.posts.iter().enumerate() {
        let indent = if i == 0 { "" } else { REPLY_INDENT };
        out.push_str(&format_post(post, indent, stats));
        out.push_str(POST_SEPARATOR);
        out.push('\n');
    }
    out
}

/// Display one thread
pub fn display_thread(thread: &Thread, stats: &mut FieldStats) {
    print!("{}", format_thread(thread, stats));
}

/// Display one search hit
pub fn display_search_hit(hit: &SearchHit, stats: &mut FieldStats) {
    let board = hit.board.as_deref().unwrap_or("?");
    let thread = hit
        .thread
        .as_ref()
        .map(|t| match t {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .unwrap_or_else(|| "?".into());

    println!("{}", format!("/{}/ {}", board, thread).bold());
    for post in &hit.posts {
        print!("{}", format_post(post, REPLY_INDENT, stats));
        println!("{}", POST_SEPARATOR);
    }
}

/// Display field statistics as `count - key` lines
pub fn display_stats(stats: &FieldStats) {
    print_header("Field statistics");
    if stats.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (key, count) in stats.iter() {
        println!("{:>6} - {}", count, key);
    }
}

/// Display an error message
pub fn display_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
