use std::collections::HashMap;

/// Aggregated statistics for one hash-file pass.
#[derive(Debug, Default)]
pub struct HashStats {
    pub total: u32,
    /// NT hash values occurring exactly once.
    pub unique: u32,
    /// total - unique.
    pub reused: u32,
    /// Records carrying a crackable LM hash (non-empty, not the disabled constant).
    pub lm_present: u32,
    /// NT fields that are blank or equal to the hash of the empty password.
    pub empty: u32,
    /// True when the numbers come from a real hash file rather than being
    /// derived from the cracked-password aggregates.
    pub from_hash_file: bool,
    /// Accounts whose password equals their username, in input order.
    pub username_as_password: Vec<String>,
}

/// Aggregated statistics for one password-file pass.
///
/// Histogram counts are non-negative and both `lengths` and `complexity`
/// sum to `cracked_count`. Lengths are measured in characters, not bytes.
#[derive(Debug, Default)]
pub struct PasswordStats {
    pub cracked_count: u32,
    /// Password length -> count.
    pub lengths: HashMap<usize, u32>,
    /// Distinct character classes present (1-4) -> count.
    pub complexity: HashMap<u8, u32>,
    /// Per-character class encoding (l/u/d/s) -> count.
    pub patterns: HashMap<String, u32>,
    /// Exact password -> occurrence count, used to derive reuse.
    pub most_reuse: HashMap<String, u32>,
    /// Consolidated keyword token -> count.
    pub token_counts: HashMap<String, u32>,
    /// Passwords appearing more than once, counted with multiplicity.
    pub reuse_count: u32,
    pub hashes: HashStats,
    /// Averaged risk percentage computed by the orchestrator.
    pub global_percent: f64,
    /// Localized risk label matching `global_percent`.
    pub risk: String,
    /// Display parameter carried through for renderers, never computed here.
    pub top: usize,
}
