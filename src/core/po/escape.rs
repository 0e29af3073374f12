//! C-style string escaping used inside PO quoted strings.

/// Escape `text` for use between double quotes in a PO file.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            _ => out.push(ch),
        }
    }
    out
}

/// Parse one quoted string token at the start of `input` (leading spaces
/// allowed). Returns the decoded value and the remainder after the closing
/// quote.
///
/// Errors are plain messages; the caller attaches file and line.
pub fn parse_quoted(input: &str) -> Result<(String, &str), String> {
    let input = input.trim_start();
    let Some(body) = input.strip_prefix('"') else {
        return Err(format!("expected a quoted string, found `{}`", input));
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' => return Ok((out, &body[idx + 1..])),
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                match escaped {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    'a' => out.push('\u{7}'),
                    'b' => out.push('\u{8}'),
                    'v' => out.push('\u{b}'),
                    'f' => out.push('\u{c}'),
                    '\\' => out.push('\\'),
                    '"' => out.push('"'),
                    '\'' => out.push('\''),
                    '?' => out.push('?'),
                    'x' => {
                        let digits: String = chars
                            .clone()
                            .map(|(_, c)| c)
                            .take_while(char::is_ascii_hexdigit)
                            .take(2)
                            .collect();
                        if digits.is_empty() {
                            return Err("invalid \\x escape".to_string());
                        }
                        for _ in 0..digits.len() {
                            chars.next();
                        }
                        push_code(&mut out, u32::from_str_radix(&digits, 16))?;
                    }
                    '0'..='7' => {
                        let mut digits = escaped.to_string();
                        digits.extend(
                            chars
                                .clone()
                                .map(|(_, c)| c)
                                .take_while(|c| ('0'..='7').contains(c))
                                .take(2),
                        );
                        for _ in 1..digits.len() {
                            chars.next();
                        }
                        push_code(&mut out, u32::from_str_radix(&digits, 8))?;
                    }
                    other => return Err(format!("invalid escape sequence \\{}", other)),
                }
            }
            _ => out.push(ch),
        }
    }
    Err("unterminated string".to_string())
}

fn push_code(out: &mut String, code: Result<u32, std::num::ParseIntError>) -> Result<(), String> {
    let ch = code
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(|| "invalid numeric escape".to_string())?;
    out.push(ch);
    Ok(())
}
