//! Literal cooking: C-style integers, floats and escapes.

/// Parse a C integer literal: `0x` hex, leading-zero octal or decimal.
/// Trailing `u`/`l` suffixes are ignored. `None` on overflow or on an
/// invalid octal digit.
pub(crate) fn parse_c_int(text: &str) -> Option<u64> {
    let digits = text.trim_end_matches(['u', 'U', 'l', 'L']);
    let (digits, radix) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (hex, 16)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (&digits[1..], 8)
    } else {
        (digits, 10)
    };
    u64::from_str_radix(digits, radix).ok()
}

#[inline]
pub(crate) fn parse_c_float(text: &str) -> Option<f64> {
    text.parse().ok()
}

/// Cook one escape sequence whose text follows the backslash. Returns the
/// character and the number of bytes consumed.
fn cook_escape(rest: &str) -> Option<(char, usize)> {
    let first = rest.chars().next()?;
    let simple = match first {
        'n' => Some('\n'),
        't' => Some('\t'),
        'r' => Some('\r'),
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'v' => Some('\x0b'),
        'e' => Some('\x1b'),
        _ => None,
    };
    if let Some(c) = simple {
        return Some((c, 1));
    }
    if first == 'x' {
        let len = rest[1..]
            .chars()
            .take(2)
            .take_while(char::is_ascii_hexdigit)
            .count();
        if len == 0 {
            return Some(('x', 1));
        }
        let code = u32::from_str_radix(&rest[1..=len], 16).ok()?;
        return Some((char::from_u32(code)?, 1 + len));
    }
    if first.is_digit(8) {
        let len = rest.chars().take(3).take_while(|c| c.is_digit(8)).count();
        let code = u32::from_str_radix(&rest[..len], 8).ok()?;
        return Some((char::from_u32(code)?, len));
    }
    Some((first, first.len_utf8()))
}

/// Process the escape sequences of a quoted literal's contents.
pub(crate) fn unescape(content: &str) -> Option<String> {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let (c, used) = cook_escape(&rest[pos + 1..])?;
        out.push(c);
        rest = &rest[pos + 1 + used..];
    }
    out.push_str(rest);
    Some(out)
}

/// Cook the contents of a char literal into exactly one character.
pub(crate) fn unescape_char(content: &str) -> Option<char> {
    let cooked = unescape(content)?;
    let mut chars = cooked.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
