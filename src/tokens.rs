use std::collections::HashMap;

use crate::leet;

/// Restricted token alphabet: letters plus the leet digits/symbols the
/// normalizer understands, so leet-spelled words are captured whole.
pub const TOKEN_PATTERN: &str = r"[A-Za-z01345$!|@é]{4,}";

/// An ordered (key, count) pair used when histograms must be ranked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub key: String,
    pub count: u32,
}

/// Rank a histogram by descending count. Ties are broken lexicographically
/// on the key so that ranking, and everything built on it, is deterministic.
pub fn rank_desc(histogram: &HashMap<String, u32>) -> Vec<Entry> {
    let mut entries: Vec<Entry> = histogram
        .iter()
        .map(|(key, count)| Entry {
            key: key.clone(),
            count: *count,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
    entries
}

/// Collapse extended variants of a root token into the root: whenever an
/// entry's key contains another surviving entry's key as a substring, its
/// count moves to the contained entry and it is dropped. Absorbed entries
/// are skipped as further sources but remain eligible as targets. Total
/// count mass is conserved.
pub fn merge_into_smaller(mut entries: Vec<Entry>) -> Vec<Entry> {
    let mut absorbed = vec![false; entries.len()];

    for i in 0..entries.len() {
        if absorbed[i] {
            continue;
        }
        for j in 0..entries.len() {
            if i == j || absorbed[j] {
                continue;
            }
            if entries[i].key.contains(entries[j].key.as_str()) {
                let donated = entries[i].count;
                entries[j].count += donated;
                absorbed[i] = true;
                break;
            }
        }
    }

    entries
        .into_iter()
        .zip(absorbed)
        .filter(|(_, gone)| !gone)
        .map(|(entry, _)| entry)
        .collect()
}

fn max_count(entries: &[Entry]) -> u32 {
    entries.iter().map(|e| e.count).max().unwrap_or(0)
}

/// Consolidate near-duplicate tokens with two competing strategies and keep
/// the stronger result:
///
/// * **A** - rank the raw histogram and run the substring-absorption pass.
/// * **B** - first re-aggregate counts under suffix-truncated keys (when the
///   truncated form still meets `min_token_len`), then run the same pass.
///
/// The strategy whose surviving entry with the highest count is strictly
/// larger wins; ties keep strategy A.
pub fn consolidate(histogram: &HashMap<String, u32>, min_token_len: usize) -> Vec<Entry> {
    let plain = merge_into_smaller(rank_desc(histogram));

    let mut truncated: HashMap<String, u32> = HashMap::with_capacity(histogram.len());
    for (token, count) in histogram {
        let base = leet::truncate_suffix(token);
        if base.chars().count() >= min_token_len {
            *truncated.entry(base.to_string()).or_insert(0) += count;
        } else {
            *truncated.entry(token.clone()).or_insert(0) += count;
        }
    }
    let stripped = merge_into_smaller(rank_desc(&truncated));

    if max_count(&stripped) > max_count(&plain) {
        stripped
    } else {
        plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn histogram(pairs: &[(&str, u32)]) -> HashMap<String, u32> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn ranking_is_deterministic_on_ties() {
        let ranked = rank_desc(&histogram(&[("beta", 2), ("alpha", 2), ("gamma", 5)]));
        let keys: Vec<&str> = ranked.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["gamma", "alpha", "beta"]);
    }

    #[test]
    fn superstrings_are_absorbed_into_their_root() {
        let merged = merge_into_smaller(rank_desc(&histogram(&[
            ("dragon", 4),
            ("dragons", 2),
            ("reddragon", 1),
        ])));
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].key, "dragon");
        assert_eq!(merged[0].count, 7);
    }

    #[test]
    fn unrelated_tokens_survive() {
        let merged = merge_into_smaller(rank_desc(&histogram(&[("winter", 3), ("summer", 2)])));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn consolidation_conserves_count_mass() {
        let input = histogram(&[("pass", 3), ("password", 2), ("passwords", 1), ("admin", 4)]);
        let total: u32 = input.values().sum();
        let merged = consolidate(&input, 4);
        assert_eq!(merged.iter().map(|e| e.count).sum::<u32>(), total);
    }

    #[test]
    fn suffix_strategy_wins_when_it_unifies_variants() {
        // Neither key contains the other, but both truncate to "dragon".
        let merged = consolidate(&histogram(&[("dragoni", 2), ("dragone", 2)]), 4);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].key, "dragon");
        assert_eq!(merged[0].count, 4);
    }

    #[test]
    fn plain_strategy_kept_on_tie() {
        let merged = consolidate(&histogram(&[("abcd", 3), ("abcdi", 1)]), 4);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].key, "abcd");
        assert_eq!(merged[0].count, 4);
    }
}
