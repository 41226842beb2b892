use anyhow::{Context, Result};
use md4::{Digest, Md4};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use crate::stats::HashStats;

/// Canonical LM field value meaning "LM hashing disabled / not present".
pub const DISABLED_LM_HASH: &str = "aad3b435b51404eeaad3b435b51404ee";

/// NT hash of the empty password.
pub const EMPTY_NT_HASH: &str = "31d6cfe0d16ae931b73c59d7e0c089c0";

/// NT hash of a string: MD4 over its UTF-16LE encoding, lowercase hex.
pub fn ntlm_hash(password: &str) -> String {
    let mut bytes = Vec::with_capacity(password.len() * 2);
    for unit in password.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }

    let mut hasher = Md4::new();
    hasher.update(&bytes);
    hex::encode(hasher.finalize())
}

/// Split a pwdump-style record (`username:rid:lmhash:nthash:::`) into its
/// fields. Records with fewer than 4 fields are malformed and yield None;
/// extra trailing fields are tolerated and ignored.
fn split_record(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let parts: Vec<&str> = line.split(':').collect();
    if parts.len() < 4 {
        return None;
    }
    Some(parts)
}

/// Scan a pwdump-style hash file and aggregate totals: overall record count,
/// NT hashes seen exactly once vs. reused, crackable LM hashes, and blank or
/// empty-password NT fields. Malformed lines are skipped silently.
pub fn analyze_hashes(path: &Path) -> Result<HashStats> {
    let start_time = Instant::now();
    info!(action = "start", component = "hash_analysis", path = ?path, "Starting hash analysis");

    let file = File::open(path).with_context(|| format!("cannot open hash file {path:?}"))?;
    let reader = BufReader::new(file);

    let mut stats = HashStats::default();
    let mut nt_seen: HashMap<String, u32> = HashMap::new();

    for line in reader.lines() {
        let line = line.with_context(|| format!("cannot read hash file {path:?}"))?;
        let Some(parts) = split_record(&line) else {
            continue;
        };

        let lm = parts[2];
        let nt = parts[3];

        stats.total += 1;
        if nt.is_empty() || nt.eq_ignore_ascii_case(EMPTY_NT_HASH) {
            stats.empty += 1;
        }
        *nt_seen.entry(nt.to_string()).or_insert(0) += 1;

        if !lm.is_empty() && !lm.eq_ignore_ascii_case(DISABLED_LM_HASH) {
            stats.lm_present += 1;
        }
    }

    stats.unique = nt_seen.values().filter(|count| **count == 1).count() as u32;
    stats.reused = stats.total - stats.unique;

    info!(
        action = "complete",
        component = "hash_analysis",
        total = stats.total,
        unique = stats.unique,
        reused = stats.reused,
        lm_present = stats.lm_present,
        empty = stats.empty,
        duration_ms = start_time.elapsed().as_millis(),
        "Hash analysis completed"
    );

    Ok(stats)
}

/// Scan a pwdump-style hash file and report accounts whose password equals
/// their username: the bare account name (domain prefix stripped up to the
/// last backslash) is hashed and compared with the stored NT field. Matches
/// keep input order and duplicates.
pub fn username_as_password(path: &Path) -> Result<Vec<String>> {
    let start_time = Instant::now();
    info!(action = "start", component = "username_check", path = ?path, "Checking for username-as-password accounts");

    let file = File::open(path).with_context(|| format!("cannot open hash file {path:?}"))?;
    let reader = BufReader::new(file);

    let mut matches = Vec::new();
    for line in reader.lines() {
        let line = line.with_context(|| format!("cannot read hash file {path:?}"))?;
        let Some(parts) = split_record(&line) else {
            continue;
        };

        let account = match parts[0].rfind('\\') {
            Some(idx) => &parts[0][idx + 1..],
            None => parts[0],
        };

        let nt = parts[3];
        if nt.is_empty() {
            continue;
        }

        if ntlm_hash(account).eq_ignore_ascii_case(nt) {
            matches.push(account.to_string());
        }
    }

    info!(
        action = "complete",
        component = "username_check",
        match_count = matches.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Username-as-password check completed"
    );

    Ok(matches)
}
