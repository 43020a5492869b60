use crate::policy::FormatPolicy;
use crate::strings::Masked;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Collapse `text` into a single command line.
///
/// Leading/trailing whitespace is trimmed and every whitespace run becomes one space. Then
/// spaces next to a tight char are dropped when nested inside a scope. At top level a space is
/// only dropped before an attaching char, and kept when the previous argument is numeric.
/// Double-quoted strings pass through unchanged.
///
/// Applying it twice gives the same result as applying it once.
pub fn make_inline(text: &str, policy: &FormatPolicy) -> String {
    let masked = Masked::new(text);
    let collapsed = WHITESPACE.replace_all(masked.text().trim(), " ");
    let chars: Vec<char> = collapsed.chars().collect();

    let mut out = String::with_capacity(collapsed.len());
    let mut depth = 0usize;
    for (i, &ch) in chars.iter().enumerate() {
        match ch {
            '[' | '{' => depth += 1,
            ']' | '}' => depth = depth.saturating_sub(1),
            ' ' if drops_space(&chars, i, depth, policy) => continue,
            _ => {}
        }
        out.push(ch);
    }

    masked.restore(&out)
}

fn drops_space(chars: &[char], i: usize, depth: usize, policy: &FormatPolicy) -> bool {
    let prev = i.checked_sub(1).and_then(|p| chars.get(p)).copied();
    let (Some(prev), Some(&next)) = (prev, chars.get(i + 1)) else {
        return false;
    };

    if !policy.is_tight(prev) && !policy.is_tight(next) {
        return false;
    }
    if depth > 0 {
        return true;
    }
    policy.attaches(next) && !(policy.keep_space_after_number && ends_number(prev))
}

fn ends_number(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '~' || ch == '^'
}
