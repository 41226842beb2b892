use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

use crate::stats::PasswordStats;

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Default worker count when none is requested: the machine's CPUs, capped.
pub fn resolve_workers(requested: Option<usize>) -> usize {
    requested.unwrap_or_else(|| std::cmp::min(num_cpus::get(), 8))
}

/// Part expressed as a percentage of total, rounded to one decimal place.
/// Returns 0 when total is 0.
pub fn percent(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Sum of histogram values whose key falls in `min..=max`.
pub fn sum_length_range(lengths: &HashMap<usize, u32>, min: usize, max: usize) -> u32 {
    lengths
        .iter()
        .filter(|(length, _)| **length >= min && **length <= max)
        .map(|(_, count)| count)
        .sum()
}

pub fn format_number(num: u32) -> String {
    num.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

/// Keep the first two and last two characters visible and star the middle.
/// Passwords of 4 characters or fewer are returned unchanged.
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    let n = chars.len();
    if n <= 4 {
        return password.to_string();
    }
    let mut masked: String = chars[..2].iter().collect();
    masked.push_str(&"*".repeat(n - 4));
    masked.extend(&chars[n - 2..]);
    masked
}

/// Mask the plaintext keys of the reuse histogram for display. Counts stay
/// intact; keyword tokens remain visible.
pub fn mask_stats(stats: &mut PasswordStats) {
    let masked = stats
        .most_reuse
        .drain()
        .fold(HashMap::new(), |mut acc, (password, count)| {
            *acc.entry(mask_password(&password)).or_insert(0) += count;
            acc
        });
    stats.most_reuse = masked;
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if args.top == 0 {
        anyhow::bail!("--top must be greater than 0");
    }

    if args.min_token_length == 0 {
        anyhow::bail!("--min-token-length must be greater than 0");
    }

    if let Some(workers) = args.workers {
        if workers == 0 {
            anyhow::bail!("--workers must be greater than 0");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_zero_total() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(50, 0), 0.0);
    }

    #[test]
    fn percent_rounds_to_one_decimal() {
        assert_eq!(percent(50, 200), 25.0);
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(2, 3), 66.7);
    }

    #[test]
    fn sums_length_bands() {
        let lengths: HashMap<usize, u32> = [(4, 2), (8, 5), (10, 1), (14, 3)].into();
        assert_eq!(sum_length_range(&lengths, 0, 10), 8);
        assert_eq!(sum_length_range(&lengths, 11, 20), 3);
        assert_eq!(sum_length_range(&lengths, 20, 30), 0);
    }

    #[test]
    fn formats_thousands_separators() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn masks_all_but_the_edges() {
        assert_eq!(mask_password("secretpass"), "se******ss");
        assert_eq!(mask_password("abcd"), "abcd");
        assert_eq!(mask_password(""), "");
        // character based, so multi-byte input keeps its edges intact
        assert_eq!(mask_password("héhéhé"), "hé**hé");
    }
}
