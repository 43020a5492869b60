use crate::inline::make_inline;
use crate::policy::FormatPolicy;
use crate::strings::Masked;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Line-breaking rules, applied in order to the inline form.
static BREAK_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // every bracket and brace on a line of its own
        (r"\}", "\n}\n"),
        (r"\]", "\n]\n"),
        (r"\{", "\n{\n"),
        (r"\[", "\n[\n"),
        (",", ",\n"),
        (r"\n{2,}", "\n"),
        // a quote right before an opener belongs to it: `Name:'[...]'`
        (r"'\n\[", "\n'["),
        (r"'\n\{", "\n'{"),
        // closers stay glued to a following quote or comma
        (r"\]\n'", "]'"),
        (r"\}\n'", "}'"),
        (r"\]\n,", "],"),
        (r"\}\n,", "},"),
        (r"\n{2,}", "\n"),
        // empty scopes keep one line to type into
        (r"\{\n\}", "{\n\n}"),
        (r"\[\n\]", "[\n\n]"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        let regex = Regex::new(pattern).expect("format rule pattern is valid");
        (regex, replacement)
    })
    .collect()
});

/// Chars that turn a following `=` into part of a compound operator (`+=`, `>=`, `==`, ...).
const OPERATOR_PREFIXES: &str = "+-*/%<>!=";

/// Expand `text` into indented multi-line form.
///
/// The text is first collapsed with [`make_inline`]. Every bracket and brace then gets a line of
/// its own, commas end their line, and each line is indented by its nesting depth. A line that
/// starts with a closer is indented one level less so it lines up with its opener.
///
/// ```rust
/// use cmdblock_ide_format::{FormatPolicy, auto_format};
///
/// let formatted = auto_format("kill @e[type=pig,tag=x]", &FormatPolicy::default());
/// assert_eq!(formatted, "kill @e\n[\n  type = pig,\n  tag = x\n]");
/// ```
pub fn auto_format(text: &str, policy: &FormatPolicy) -> String {
    let inline = make_inline(text, policy);
    let masked = Masked::new(&inline);

    let mut broken = masked.text().to_string();
    for (regex, replacement) in BREAK_RULES.iter() {
        broken = regex.replace_all(&broken, *replacement).into_owned();
    }
    if policy.spaced_equals {
        broken = space_equals(&broken);
    }

    let indented = indent(broken.trim(), policy);
    trace!(lines = indented.lines().count(), "auto-formatted command");
    masked.restore(&indented)
}

/// Put exactly one space on each side of every bare `=`. Compound operators such as
/// `+=` or `>=` are left as written.
fn space_equals(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let compound = (i > 0 && OPERATOR_PREFIXES.contains(chars[i - 1]))
            || chars.get(i + 1) == Some(&'=');
        if ch != '=' || compound {
            out.push(ch);
            i += 1;
            continue;
        }

        out.truncate(out.trim_end_matches([' ', '\t']).len());
        out.push_str(" = ");
        i += 1;
        while matches!(chars.get(i), Some(' ' | '\t')) {
            i += 1;
        }
    }

    out
}

fn indent(text: &str, policy: &FormatPolicy) -> String {
    let mut depth = 0usize;
    let mut lines = Vec::new();

    for line in text.split('\n') {
        let line = line.trim();
        let level = if line.starts_with([']', '}']) {
            depth.saturating_sub(1)
        } else {
            depth
        };
        lines.push(format!("{}{line}", policy.indent(level)));

        let opens = line.chars().filter(|ch| matches!(ch, '[' | '{')).count();
        let closes = line.chars().filter(|ch| matches!(ch, ']' | '}')).count();
        depth = (depth + opens).saturating_sub(closes);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closer_lines_align_with_opener() {
        let policy = FormatPolicy::default();
        assert_eq!(indent("a\n{\nb\n[\nc\n]\n}", &policy), "a\n{\n  b\n  [\n    c\n  ]\n}");
    }

    #[test]
    fn test_only_bare_equals_are_spaced() {
        assert_eq!(space_equals("type=pig"), "type = pig");
        assert_eq!(space_equals("a  =\tb\nc= d"), "a = b\nc = d");
        assert_eq!(space_equals("@s a += @s b"), "@s a += @s b");
        assert_eq!(space_equals("@s a>=@s b"), "@s a>=@s b");
        assert_eq!(space_equals("a==b"), "a==b");
    }

    #[test]
    fn test_unbalanced_closers_do_not_underflow() {
        let policy = FormatPolicy::default();
        assert_eq!(indent("]\n}\nx", &policy), "]\n}\nx");
    }
}
