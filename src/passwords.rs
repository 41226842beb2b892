use anyhow::{Context, Result};
use rayon::prelude::*;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::classify;
use crate::leet;
use crate::stats::PasswordStats;
use crate::tokens::{self, TOKEN_PATTERN};
use crate::utils::resolve_workers;

/// Returned when the password file holds fewer than 2 non-blank lines;
/// the downstream reuse and complexity comparisons need at least two
/// passwords to mean anything.
#[derive(Debug)]
pub struct InsufficientData {
    pub lines: u32,
}

impl fmt::Display for InsufficientData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "password file must contain at least 2 passwords (found {})",
            self.lines
        )
    }
}

impl std::error::Error for InsufficientData {}

/// Per-shard accumulator merged additively before consolidation runs.
#[derive(Debug, Default)]
struct Shard {
    cracked: u32,
    lengths: HashMap<usize, u32>,
    complexity: HashMap<u8, u32>,
    patterns: HashMap<String, u32>,
    reuse: HashMap<String, u32>,
    tokens: HashMap<String, u32>,
}

fn scan_line(shard: &mut Shard, line: &str, token_regex: &Regex, min_token_len: usize) {
    let (length, complexity) = classify::measure(line);

    shard.cracked += 1;
    *shard.lengths.entry(length).or_insert(0) += 1;
    *shard.complexity.entry(complexity).or_insert(0) += 1;
    *shard.patterns.entry(classify::pattern_of(line)).or_insert(0) += 1;
    *shard.reuse.entry(line.to_string()).or_insert(0) += 1;

    for candidate in token_regex.find_iter(line) {
        let normalized = leet::unleet(&candidate.as_str().to_lowercase());
        if normalized.chars().count() >= min_token_len {
            *shard.tokens.entry(normalized).or_insert(0) += 1;
        }
    }
}

/// Scan the password file at `path` (one cleartext password per line, blank
/// lines ignored) and compute the aggregate statistics: length distribution,
/// complexity, structural patterns, reuse and consolidated keyword tokens.
/// Tokens shorter than `min_token_len` after normalization are not counted.
pub fn analyze_passwords(path: &Path, min_token_len: usize, workers: Option<usize>) -> Result<PasswordStats> {
    let start_time = Instant::now();
    info!(action = "start", component = "password_analysis", path = ?path, "Starting password analysis");

    let file = File::open(path).with_context(|| format!("cannot open password file {path:?}"))?;
    let reader = BufReader::new(file);
    let token_regex = Regex::new(TOKEN_PATTERN).context("failed to compile token pattern")?;

    let workers = resolve_workers(workers);
    info!(action = "configure", component = "password_analysis", workers = workers, "Using worker threads");
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .context("failed to build worker pool")?;

    // A read failure (e.g. an invalid-UTF-8 line) is fatal, not a reason to
    // return a truncated aggregate.
    let lines: Vec<String> = reader
        .lines()
        .collect::<std::io::Result<Vec<String>>>()
        .with_context(|| format!("cannot read password file {path:?}"))?;

    // Shard lines across rayon workers; shard histograms are merged
    // additively below, before consolidation sees the whole dataset.
    let shards: Vec<Shard> = pool.install(|| {
        lines
            .into_par_iter()
            .filter(|line| !line.is_empty())
            .fold(Shard::default, |mut shard, line| {
                scan_line(&mut shard, &line, &token_regex, min_token_len);
                shard
            })
            .collect()
    });

    let mut stats = PasswordStats::default();
    let mut raw_tokens: HashMap<String, u32> = HashMap::new();
    for shard in shards {
        stats.cracked_count += shard.cracked;
        for (length, count) in shard.lengths {
            *stats.lengths.entry(length).or_insert(0) += count;
        }
        for (class, count) in shard.complexity {
            *stats.complexity.entry(class).or_insert(0) += count;
        }
        for (pattern, count) in shard.patterns {
            *stats.patterns.entry(pattern).or_insert(0) += count;
        }
        for (password, count) in shard.reuse {
            *stats.most_reuse.entry(password).or_insert(0) += count;
        }
        for (token, count) in shard.tokens {
            *raw_tokens.entry(token).or_insert(0) += count;
        }
    }

    if stats.cracked_count < 2 {
        return Err(InsufficientData {
            lines: stats.cracked_count,
        }
        .into());
    }

    stats.token_counts = tokens::consolidate(&raw_tokens, min_token_len)
        .into_iter()
        .map(|entry| (entry.key, entry.count))
        .collect();

    stats.reuse_count = stats.most_reuse.values().filter(|n| **n > 1).sum();

    info!(
        action = "complete",
        component = "password_analysis",
        cracked_count = stats.cracked_count,
        reuse_count = stats.reuse_count,
        token_count = stats.token_counts.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Password analysis completed"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_passwords(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        for line in lines {
            writeln!(file, "{line}").expect("write line");
        }
        file
    }

    #[test]
    fn histogram_sums_match_cracked_count() {
        let file = write_passwords(&["abcd", "abcd", "ABCD1", "Passw0rd!", ""]);
        let stats = analyze_passwords(file.path(), 4, Some(1)).expect("analysis");

        assert_eq!(stats.cracked_count, 4);
        assert_eq!(stats.lengths.values().sum::<u32>(), stats.cracked_count);
        assert_eq!(stats.complexity.values().sum::<u32>(), stats.cracked_count);
    }

    #[test]
    fn aggregates_basic_corpus() {
        let file = write_passwords(&["abcd", "abcd", "ABCD1"]);
        let stats = analyze_passwords(file.path(), 4, Some(1)).expect("analysis");

        assert_eq!(stats.cracked_count, 3);
        assert_eq!(stats.lengths.get(&4), Some(&2));
        assert_eq!(stats.lengths.get(&5), Some(&1));
        assert_eq!(stats.complexity.get(&1), Some(&2));
        assert_eq!(stats.complexity.get(&2), Some(&1));
        assert_eq!(stats.most_reuse.get("abcd"), Some(&2));
        assert_eq!(stats.most_reuse.get("ABCD1"), Some(&1));
        assert_eq!(stats.reuse_count, 2);
        // "ABCD1" unleets to "abcdi" which is absorbed into "abcd"
        assert_eq!(stats.token_counts.len(), 1);
        assert_eq!(stats.token_counts.get("abcd"), Some(&3));
    }

    #[test]
    fn single_password_is_insufficient() {
        let file = write_passwords(&["lonely", ""]);
        let err = analyze_passwords(file.path(), 4, Some(1)).expect_err("too few lines");
        let insufficient = err.downcast_ref::<InsufficientData>().expect("typed error");
        assert_eq!(insufficient.lines, 1);
    }

    #[test]
    fn invalid_utf8_line_fails_the_whole_pass() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"first\nsecond\n\xff\xfe\xfd\nthird\nfourth\n")
            .expect("write bytes");
        let err = analyze_passwords(file.path(), 4, Some(1)).expect_err("corrupt line");
        // an I/O failure, not the too-few-passwords case
        assert!(err.downcast_ref::<InsufficientData>().is_none());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = analyze_passwords(Path::new("/nonexistent/pw.txt"), 4, Some(1))
            .expect_err("missing file");
        assert!(err.downcast_ref::<InsufficientData>().is_none());
    }
}
