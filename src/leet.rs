/// Convert common leet-speak characters to their alphabetic equivalents so
/// that words such as "p@ssw0rd" and "p4ssword" collapse to the same base
/// form "password". Callers lowercase the token first; characters without a
/// substitution pass through unchanged.
pub fn unleet(token: &str) -> String {
    token
        .chars()
        .map(|c| match c {
            '0' => 'o',
            '1' | '!' | '|' | 'ï' => 'i',
            '3' | 'é' | 'è' => 'e',
            '4' | '@' | 'à' => 'a',
            '5' | '$' => 's',
            'ù' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Remove the final character when it is one of the common leet-derived
/// suffixes (i, e, a, s, o) and the token keeps at least 4 characters.
/// Tokens shorter than 5 characters are returned unchanged.
pub fn truncate_suffix(token: &str) -> &str {
    if token.chars().count() < 5 {
        return token;
    }
    match token.char_indices().last() {
        Some((idx, 'i' | 'e' | 'a' | 's' | 'o')) => &token[..idx],
        _ => token,
    }
}
