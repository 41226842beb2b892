use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "passaudit",
    about = "Audit a cracked-password corpus and report password-policy weaknesses",
    version,
    long_about = None
)]
pub struct Args {
    /// Password file, one cleartext password per line
    #[arg(short, long)]
    pub passwords: PathBuf,

    /// Hash file (username:rid:lmhash:nthash:::)
    #[arg(short = 'H', long)]
    pub hashes: Option<PathBuf>,

    /// Minimum normalized token length counted as a keyword occurrence
    #[arg(short, long, default_value_t = 5)]
    pub min_token_length: usize,

    /// Number of top entries to display per section
    #[arg(short, long, default_value_t = 5)]
    pub top: usize,

    /// Language for the risk labels (lang/<code>.json)
    #[arg(short, long, default_value = "en")]
    pub lang: String,

    /// Mask passwords in the output (keep first and last two characters)
    #[arg(long)]
    pub anonymize: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of worker threads
    #[arg(short, long)]
    pub workers: Option<usize>,
}
