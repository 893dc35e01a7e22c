//! Escaping of untrusted strings embedded in Typst markup.
//!
//! Upstream values (player names, ids, motd, timestamps) are placed inside content
//! blocks. Markup-significant characters get a backslash prefix; line breaks and
//! tabs collapse to a single space since every field is laid out on one line.
//! `/` is escaped too, so `//` and `/*` cannot open a comment.

/// Characters that carry meaning in Typst markup mode
const SPECIAL: &[char] = &['\\', '[', ']', '#', '$', '`', '*', '_', '<', '>', '@', '/'];

/// Escape `input` for embedding inside a Typst content block.
///
/// Single left-to-right pass: a backslash introduced by escaping is written once and
/// never revisited, which gives the same result as escaping backslashes first.
pub fn escape_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 8);
    let mut in_break = false;

    for c in input.chars() {
        if matches!(c, '\n' | '\r' | '\t') {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
            continue;
        }
        in_break = false;
        if SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }

    out
}
