use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};

use passaudit::utils::{percent, sum_length_range};
use passaudit::{hashes, passwords, report, risk, utils, Args, PasswordStats};

fn run(args: &Args) -> Result<()> {
    let mut stats = passwords::analyze_passwords(&args.passwords, args.min_token_length, args.workers)?;
    stats.top = args.top;

    if let Some(hash_file) = &args.hashes {
        stats.hashes = hashes::analyze_hashes(hash_file)?;
        stats.hashes.from_hash_file = true;

        match hashes::username_as_password(hash_file) {
            Ok(accounts) => stats.hashes.username_as_password = accounts,
            Err(e) => warn!(action = "detect", component = "username_check", error = %e, "Username-as-password check failed"),
        }

        if stats.hashes.total < stats.cracked_count {
            anyhow::bail!(
                "hash file contains fewer records ({}) than the password file ({})",
                stats.hashes.total,
                stats.cracked_count
            );
        }
    } else {
        warn!(
            action = "fallback",
            component = "hash_analysis",
            "No hash file provided: hash statistics are derived from cracked passwords and may be less representative"
        );
        stats.hashes.total = stats.cracked_count;
        stats.hashes.reused = stats.reuse_count;
        stats.hashes.unique = stats.cracked_count - stats.reuse_count;
        stats.hashes.from_hash_file = false;
    }

    let assessment = risk::evaluate_risk_for_locale(&args.lang, &risk_metrics(&stats));
    stats.risk = assessment.label;
    stats.global_percent = assessment.score;

    if args.anonymize {
        utils::mask_stats(&mut stats);
    }

    report::print_report(&stats);
    Ok(())
}

fn risk_metrics(stats: &PasswordStats) -> Vec<risk::RiskMetric> {
    let weak_complexity: u32 = (1u8..=3)
        .map(|class| stats.complexity.get(&class).copied().unwrap_or(0))
        .sum();

    let mut metrics = vec![
        risk::RiskMetric::new("reuse_rate", percent(stats.hashes.reused, stats.hashes.total)),
        risk::RiskMetric::new(
            "weak_complexity_rate",
            percent(weak_complexity, stats.cracked_count),
        ),
        risk::RiskMetric::new(
            "short_length_rate",
            percent(sum_length_range(&stats.lengths, 0, 10), stats.cracked_count),
        ),
    ];

    // The crack rate only means something against a real hash corpus.
    if stats.hashes.from_hash_file {
        metrics.push(risk::RiskMetric::new(
            "crack_rate",
            percent(stats.cracked_count, stats.hashes.total),
        ));
    }

    metrics
}

fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!(error = %e, "Audit failed");
            std::process::exit(1);
        }
    }
}
