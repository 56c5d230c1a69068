//! Subscript notation for labels.
//!
//! Labels are stored raw. A run of digits wrapped in underscores (`x_12_`)
//! marks a subscript, rendered either as Unicode subscript glyphs on screen or
//! as TeX subscript markup on export.

/// How subscript markers are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptStyle {
    /// Replace the digits with U+2080..U+2089 and drop the underscores.
    Unicode,
    /// Replace `_<digits>_` with `_{<digits>}`.
    Markup,
}

/// Rewrites every non-overlapping `_<digits>_` match in `text` using `style`.
///
/// Anything that does not form a complete match is copied through unchanged.
pub fn apply_subscripts(text: &str, style: SubscriptStyle) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('_') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let digits_len = after
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map(|(i, _)| i)
            .unwrap_or(after.len());
        let closes = after[digits_len..].starts_with('_');
        if digits_len == 0 || !closes {
            // Not a marker; keep the underscore and rescan from the next char.
            out.push('_');
            rest = after;
            continue;
        }
        let digits = &after[..digits_len];
        match style {
            SubscriptStyle::Unicode => out.extend(digits.chars().map(subscript_digit)),
            SubscriptStyle::Markup => {
                out.push_str("_{");
                out.push_str(digits);
                out.push('}');
            }
        }
        rest = &after[digits_len + 1..];
    }
    out.push_str(rest);
    out
}

fn subscript_digit(d: char) -> char {
    d.to_digit(10)
        .and_then(|n| char::from_u32(0x2080 + n))
        .unwrap_or(d)
}
