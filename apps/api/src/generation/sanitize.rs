//! Strips Markdown noise from LLM output so sections paste cleanly into
//! LinkedIn, which renders plain text only.

use once_cell::sync::Lazy;
use regex::Regex;

static BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static ITALIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*(.+?)\*").expect("valid regex"));
static UNDERSCORE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").expect("valid regex"));
static UNDERSCORE_ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b_(.+?)_\b").expect("valid regex"));
static BACKTICKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"`{1,3}(.+?)`{1,3}").expect("valid regex"));
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s{0,3}#{1,6}\s+").expect("valid regex"));
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*[-•+]\s+").expect("valid regex"));
static TRAILING_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").expect("valid regex"));

/// Removes Markdown emphasis/headings, normalizes bullets to `"- "`, and
/// trims trailing whitespace per line.
pub fn sanitize_llm_text(input: &str) -> String {
    let text = input.replace("\r\n", "\n");
    let text = BOLD.replace_all(&text, "$1");
    let text = ITALIC.replace_all(&text, "$1");
    let text = UNDERSCORE_BOLD.replace_all(&text, "$1");
    let text = UNDERSCORE_ITALIC.replace_all(&text, "$1");
    let text = BACKTICKS.replace_all(&text, "$1");
    let text = HEADING.replace_all(&text, "");
    // Leftover emphasis markers after pair removal.
    let text = text.replace('*', "");
    let text = BULLET.replace_all(&text, "- ");
    let text = TRAILING_WS.replace_all(&text, "");
    text.trim().to_string()
}
