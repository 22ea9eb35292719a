//! Control paths: `user.name`, `users[0].age`, `users.0.age`

use serde::{Deserialize, Serialize};

/// One step from a composite control to a child
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Group field name, or a dotted segment that may name a sequence index
    Key(String),
    /// Bracketed sequence index
    Index(usize),
}

/// How paths are rendered in lookups and validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStyle {
    /// `users[0].age`
    #[default]
    Bracketed,
    /// `users.0.age`
    Dotted,
}

/// Parse a path. The empty string is the root; malformed input yields `None`.
pub fn parse(path: &str) -> Option<Vec<PathSegment>> {
    let mut segments = Vec::new();
    let mut chars = path.chars().peekable();
    let mut key = String::new();
    // Set after `]`: only `.`, `[` or the end may follow
    let mut after_index = false;

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if key.is_empty() && !after_index {
                    return None;
                }
                if !key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut key)));
                }
                after_index = false;
                // A trailing or doubled dot is malformed
                if matches!(chars.peek(), None | Some('.') | Some('[')) {
                    return None;
                }
            }
            '[' => {
                if !key.is_empty() {
                    segments.push(PathSegment::Key(std::mem::take(&mut key)));
                }
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(d) if d.is_ascii_digit() => digits.push(d),
                        _ => return None,
                    }
                }
                segments.push(PathSegment::Index(digits.parse().ok()?));
                after_index = true;
            }
            ']' => return None,
            _ => {
                if after_index {
                    return None;
                }
                key.push(c);
            }
        }
    }

    if !key.is_empty() {
        segments.push(PathSegment::Key(key));
    }
    Some(segments)
}

/// Render segments in the given style
pub fn render(segments: &[PathSegment], style: PathStyle) -> String {
    let mut out = String::new();
    for segment in segments {
        match (segment, style) {
            (PathSegment::Key(key), _) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            (PathSegment::Index(i), PathStyle::Bracketed) => {
                out.push_str(&format!("[{i}]"));
            }
            (PathSegment::Index(i), PathStyle::Dotted) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(&i.to_string());
            }
        }
    }
    out
}
