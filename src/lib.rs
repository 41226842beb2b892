pub mod args;
pub mod classify;
pub mod hashes;
pub mod leet;
pub mod passwords;
pub mod report;
pub mod risk;
pub mod stats;
pub mod tokens;
pub mod utils;

pub use args::Args;
pub use hashes::{analyze_hashes, ntlm_hash, username_as_password};
pub use passwords::{analyze_passwords, InsufficientData};
pub use risk::{evaluate_risk, evaluate_risk_for_locale, RiskLevel, RiskMetric};
pub use stats::{HashStats, PasswordStats};
