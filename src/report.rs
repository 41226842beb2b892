use std::collections::HashMap;

use crate::stats::PasswordStats;
use crate::tokens;
use crate::utils::{format_number, percent};

fn print_top(title: &str, histogram: &HashMap<String, u32>, top: usize) {
    let ranked = tokens::rank_desc(histogram);
    println!("\n{} (top {}):", title, std::cmp::min(top, ranked.len()));
    for entry in ranked.iter().take(top) {
        println!("- {}: {}", entry.key, format_number(entry.count));
    }
}

/// Print a plain-text summary of the aggregates. Rendering beyond this
/// summary is left to external consumers of `PasswordStats`.
pub fn print_report(stats: &PasswordStats) {
    println!("\n--- Password Audit ---");
    println!("Cracked passwords: {}", format_number(stats.cracked_count));
    println!(
        "Reused passwords: {} ({}%)",
        format_number(stats.reuse_count),
        percent(stats.reuse_count, stats.cracked_count)
    );

    let mut lengths: Vec<(usize, u32)> = stats.lengths.iter().map(|(k, v)| (*k, *v)).collect();
    lengths.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    println!("\nLengths (top {}):", std::cmp::min(stats.top, lengths.len()));
    for (length, count) in lengths.iter().take(stats.top) {
        println!("- {} characters: {}", length, format_number(*count));
    }

    println!("\nComplexity:");
    for class in 1u8..=4 {
        let count = stats.complexity.get(&class).copied().unwrap_or(0);
        println!(
            "- {} classes: {} ({}%)",
            class,
            format_number(count),
            percent(count, stats.cracked_count)
        );
    }

    print_top("Patterns", &stats.patterns, stats.top);
    print_top("Most reused", &stats.most_reuse, stats.top);
    print_top("Keywords", &stats.token_counts, stats.top);

    println!("\nHashes:");
    if !stats.hashes.from_hash_file {
        println!("(derived from cracked passwords, no hash file supplied)");
    }
    println!("- Total: {}", format_number(stats.hashes.total));
    println!("- Unique: {}", format_number(stats.hashes.unique));
    println!("- Reused: {}", format_number(stats.hashes.reused));
    if stats.hashes.from_hash_file {
        println!("- LM hashes present: {}", format_number(stats.hashes.lm_present));
        println!("- Empty NT hashes: {}", format_number(stats.hashes.empty));
        if !stats.hashes.username_as_password.is_empty() {
            println!(
                "- Accounts using their username as password: {}",
                stats.hashes.username_as_password.join(", ")
            );
        }
    }

    println!("\nRisk: {} ({}%)", stats.risk, stats.global_percent);
}
