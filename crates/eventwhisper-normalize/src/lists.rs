use std::collections::HashSet;
use std::sync::LazyLock;

use eventwhisper_types::Param;
use regex::Regex;
use serde_json::Value;

use crate::quotes::strip_wrapping_quotes;

static INT_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+$").expect("integer token pattern is valid"));

/// A single token produced while walking a list-ish parameter
enum Token<'a> {
    Int(i64),
    Text(&'a str),
}

/// Normalize any list-ish parameter into a de-duplicated `Vec<i64>`.
///
/// Accepts a bare integer, `"1, 2; '03'"`, a JSON array string such as
/// `"[1, \"02\"]"`, or a list of any of those. Tokens that are not plain
/// integers are dropped. First-seen order is kept.
pub fn normalize_int_list(value: &Param) -> Vec<i64> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    visit(value, &mut |token: Token<'_>| {
        let n = match token {
            Token::Int(n) => n,
            Token::Text(text) => {
                let text = strip_wrapping_quotes(text);
                if !INT_TOKEN.is_match(text) {
                    return;
                }
                match text.parse::<i64>() {
                    Ok(n) => n,
                    Err(_) => return,
                }
            }
        };
        if seen.insert(n) {
            out.push(n);
        }
    });

    out
}

/// Normalize any list-ish parameter into a de-duplicated `Vec<String>`.
///
/// Uses the same splitting rules as [`normalize_int_list`]. Tokens are
/// unwrapped and trimmed, empties dropped, and optionally lowercased before
/// de-duplication.
pub fn normalize_str_list(value: &Param, lowercase: bool) -> Vec<String> {
    let mut out = Vec::new();
    let mut seen = HashSet::new();

    visit(value, &mut |token: Token<'_>| {
        let owned;
        let text = match token {
            Token::Int(n) => {
                owned = n.to_string();
                owned.as_str()
            }
            Token::Text(text) => strip_wrapping_quotes(text),
        };
        if text.is_empty() {
            return;
        }
        let text = if lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        if seen.insert(text.clone()) {
            out.push(text);
        }
    });

    out
}

fn visit<F: FnMut(Token<'_>)>(param: &Param, on_token: &mut F) {
    match param {
        Param::Null => {}
        Param::Int(n) => on_token(Token::Int(*n)),
        Param::List(items) => {
            for item in items {
                visit(item, on_token);
            }
        }
        other => {
            if let Some(text) = other.to_text() {
                visit_text(&text, on_token);
            }
        }
    }
}

fn visit_text<F: FnMut(Token<'_>)>(text: &str, on_token: &mut F) {
    let text = strip_wrapping_quotes(text);
    if text.is_empty() {
        return;
    }

    if let Some(items) = json_array(text) {
        for item in items {
            visit(&Param::from(item), on_token);
        }
        return;
    }

    let mut parts = split_multi(text);
    if parts.is_empty() {
        parts.push(text);
    }
    for part in parts {
        on_token(Token::Text(part));
    }
}

/// Split on commas and semicolons, dropping empty pieces
fn split_multi(s: &str) -> Vec<&str> {
    s.split([',', ';'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn json_array(s: &str) -> Option<Vec<Value>> {
    if !(s.starts_with('[') && s.ends_with(']')) {
        return None;
    }
    serde_json::from_str(s).ok()
}
