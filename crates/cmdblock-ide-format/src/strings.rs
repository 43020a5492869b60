//! Double-quoted string protection.
//!
//! Both transforms work on a copy of the text where every string literal is replaced by one
//! placeholder char, so nothing inside a string is ever split, indented or squeezed.

/// Stands in for one string literal (or for a literal placeholder char in the input).
const SLOT: char = '\u{FFFC}';

pub(crate) struct Masked {
    text: String,
    slots: Vec<String>,
}

impl Masked {
    pub(crate) fn new(text: &str) -> Self {
        let mut masked = String::with_capacity(text.len());
        let mut slots = Vec::new();
        let mut literal: Option<String> = None;
        let mut escaped = false;

        for ch in text.chars() {
            if let Some(current) = literal.as_mut() {
                current.push(ch);
                let closes = !escaped && ch == '"';
                escaped = !escaped && ch == '\\';
                if closes {
                    slots.extend(literal.take());
                }
                continue;
            }

            match ch {
                '"' => {
                    masked.push(SLOT);
                    literal = Some(String::from('"'));
                }
                SLOT => {
                    masked.push(SLOT);
                    slots.push(SLOT.to_string());
                }
                _ => masked.push(ch),
            }
        }
        // Unterminated string runs to the end of the text.
        slots.extend(literal);

        Self {
            text: masked,
            slots,
        }
    }

    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// Put the string literals back into `text`, a transformed copy of [`Masked::text`].
    pub(crate) fn restore(&self, text: &str) -> String {
        let mut slots = self.slots.iter();
        let literal_len: usize = self.slots.iter().map(String::len).sum();
        let mut out = String::with_capacity(text.len() + literal_len);
        for ch in text.chars() {
            match ch {
                SLOT => out.push_str(slots.next().map(String::as_str).unwrap_or_default()),
                _ => out.push(ch),
            }
        }
        out
    }
}
