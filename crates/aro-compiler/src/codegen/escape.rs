//! Escaping for LLVM IR string and comment text.

use std::fmt::Write;

/// Escapes bytes for a `c"..."` array literal.
///
/// Printable ASCII passes through except `"` and `\`; every other byte
/// becomes `\XX` with uppercase hex digits.
pub fn escape_ir_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        if (0x20..=0x7E).contains(&b) && b != b'"' && b != b'\\' {
            out.push(b as char);
        } else {
            // Writing to a String cannot fail.
            let _ = write!(out, "\\{b:02X}");
        }
    }
    out
}

/// Array length of a NUL-terminated constant: UTF-8 byte length plus one.
pub fn ir_array_len(value: &str) -> usize {
    value.len() + 1
}

/// Makes text safe for a single-line `;` comment.
pub fn comment_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_quotes_backslashes_and_control_bytes() {
        assert_eq!(escape_ir_bytes(b"plain text"), "plain text");
        assert_eq!(escape_ir_bytes(br#"a"b\c"#), r"a\22b\5Cc");
        assert_eq!(escape_ir_bytes(b"line\n\ttab"), r"line\0A\09tab");
        assert_eq!(escape_ir_bytes(&[0x7F, 0x00]), r"\7F\00");
    }

    #[test]
    fn escapes_utf8_bytewise() {
        let value = "caf\u{e9}";
        assert_eq!(escape_ir_bytes(value.as_bytes()), r"caf\C3\A9");
        assert_eq!(ir_array_len(value), 6);
    }

    #[test]
    fn comment_text_strips_newlines() {
        assert_eq!(comment_text("a\nb"), "a b");
    }
}
