//! String literal unescaping, matching Cool's escape set: `\n \t \b \f
//! \" \\`, a backslash-newline line continuation, and an explicit ban
//! on `\0` / embedded NUL bytes.

pub fn unescape_string(raw: &str) -> Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\0' {
            return Err("String contains null character".to_string());
        }
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('\n') => out.push('\n'),
            Some('0') => return Err("String contains null character".to_string()),
            Some(other) => out.push(other),
            None => return Err("Unterminated string".to_string()),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_standard_escapes() {
        assert_eq!(unescape_string("a\\nb\\t").expect("ok"), "a\nb\t");
    }

    #[test]
    fn rejects_null_escape() {
        assert!(unescape_string("a\\0b").is_err());
    }

    #[test]
    fn passes_through_unknown_escape() {
        assert_eq!(unescape_string("\\x").expect("ok"), "x");
    }
}
