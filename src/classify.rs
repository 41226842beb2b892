/// Classify a single character into one of the four pattern symbols:
/// `u` uppercase, `l` lowercase, `d` decimal digit, `s` everything else.
/// Only ASCII digits count as `d`; other numeric characters fall into `s`.
pub fn classify_char(c: char) -> char {
    if c.is_uppercase() {
        'u'
    } else if c.is_lowercase() {
        'l'
    } else if c.is_ascii_digit() {
        'd'
    } else {
        's'
    }
}

/// Encode a password as its per-character class string, e.g. "Pass1!" -> "ulllds".
/// The result always has the same character count as the input.
pub fn pattern_of(password: &str) -> String {
    password.chars().map(classify_char).collect()
}

/// Character length and complexity class (1-4, the number of distinct
/// character classes present) of a password.
pub fn measure(password: &str) -> (usize, u8) {
    let mut length = 0usize;
    let (mut lower, mut upper, mut digit, mut special) = (false, false, false, false);

    for c in password.chars() {
        length += 1;
        match classify_char(c) {
            'l' => lower = true,
            'u' => upper = true,
            'd' => digit = true,
            _ => special = true,
        }
    }

    let complexity = [lower, upper, digit, special]
        .iter()
        .filter(|present| **present)
        .count() as u8;

    (length, complexity)
}
