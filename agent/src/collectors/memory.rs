//! Memory and swap statistics for Solaris, parsed from `prtconf` and `swap -s`.
//!
//! Solaris distinguishes *virtual* swap (RAM-backed plus disk-backed) from
//! *physical* (disk-backed only) swap. Physical swap is reserved against
//! first; the RAM-backed portion grows and shrinks with free RAM, so total
//! virtual swap can swing widely under load. `swap -s` reports virtual swap
//! only — it says nothing about how much physical swap exists or how much of
//! it has been used. Computing physical swap would require a separate
//! `swap -l` invocation and block-size arithmetic; that is deliberately not
//! done here, and the report carries only the virtual figures.

use serde::{Serialize, Serializer};

use super::CollectionError;
use crate::runner::CommandRunner;

/// Command producing the physical RAM line, e.g. `Memory size: 16384 Megabytes`.
pub const PRTCONF_MEMORY: &str = "prtconf | grep Memory";

/// Command producing the virtual swap summary sentence.
pub const SWAP_SUMMARY: &str = "swap -s";

// `swap -s` is a fixed-format sentence, not a key/value table:
//   total: <N>k bytes allocated + <N>k reserved = <N>k used, <N>k available
// The used and available figures sit at whitespace-token indices 8 and 10.
// This coupling to the exact wording is intentional; a "smarter" parse could
// silently report wrong numbers if the wording ever shifts.
const SWAP_USED_INDEX: usize = 8;
const SWAP_FREE_INDEX: usize = 10;

/// Memory and swap snapshot. All values are kilobytes, held as integers;
/// the legacy `"<n>kB"` rendering is applied only when serializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemoryReport {
    #[serde(serialize_with = "kb_string")]
    pub total: u64,
    pub swap: SwapReport,
}

/// Virtual swap figures. `total`/`free` and the `virtual` pair are two names
/// for the same measured values, kept for backwards compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapReport {
    #[serde(serialize_with = "kb_string")]
    pub total: u64,
    #[serde(serialize_with = "kb_string")]
    pub free: u64,
    #[serde(rename = "virtual")]
    pub virt: VirtualSwap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VirtualSwap {
    #[serde(serialize_with = "kb_string")]
    pub total: u64,
    #[serde(serialize_with = "kb_string")]
    pub free: u64,
}

fn kb_string<S: Serializer>(kilobytes: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{kilobytes}kB"))
}

/// Collects one [`MemoryReport`] per invocation. Stateless; every call runs
/// both commands afresh.
#[derive(Debug)]
pub struct MemoryCollector;

impl MemoryCollector {
    pub fn new() -> Self {
        Self
    }

    pub async fn collect(
        &self,
        runner: &dyn CommandRunner,
    ) -> Result<MemoryReport, CollectionError> {
        let meminfo = runner.run(PRTCONF_MEMORY).await?;
        let total = parse_total_kb(&meminfo)?;

        let summary = runner.run(SWAP_SUMMARY).await?;
        let (used, free) = parse_swap_kb(&summary)?;

        Ok(MemoryReport {
            total,
            swap: SwapReport {
                total: used + free,
                free,
                virt: VirtualSwap {
                    total: used + free,
                    free,
                },
            },
        })
    }
}

impl Default for MemoryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the `prtconf | grep Memory` line. Token 2 is the RAM size in
/// megabytes; the report carries kilobytes.
fn parse_total_kb(line: &str) -> Result<u64, CollectionError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let token = tokens.get(2).ok_or_else(|| CollectionError::Parse {
        command: PRTCONF_MEMORY,
        reason: format!("expected at least 3 fields, got {}", tokens.len()),
    })?;
    let megabytes: u64 = token.parse().map_err(|_| CollectionError::Parse {
        command: PRTCONF_MEMORY,
        reason: format!("field 2 is not an integer: `{token}`"),
    })?;
    Ok(megabytes * 1024)
}

/// Parse the `swap -s` sentence into `(used, free)` virtual swap kilobytes.
fn parse_swap_kb(output: &str) -> Result<(u64, u64), CollectionError> {
    let tokens: Vec<&str> = output.trim().split_whitespace().collect();
    let used = kilobyte_token(&tokens, SWAP_USED_INDEX)?;
    let free = kilobyte_token(&tokens, SWAP_FREE_INDEX)?;
    Ok((used, free))
}

/// Extract a `<digits>k` token at a fixed position.
fn kilobyte_token(tokens: &[&str], index: usize) -> Result<u64, CollectionError> {
    let token = tokens.get(index).ok_or_else(|| CollectionError::Parse {
        command: SWAP_SUMMARY,
        reason: format!(
            "expected at least {} fields, got {}",
            index + 1,
            tokens.len()
        ),
    })?;
    let digits = token.strip_suffix('k').ok_or_else(|| CollectionError::Parse {
        command: SWAP_SUMMARY,
        reason: format!("field {index} is missing the `k` suffix: `{token}`"),
    })?;
    digits.parse().map_err(|_| CollectionError::Parse {
        command: SWAP_SUMMARY,
        reason: format!("field {index} is not an integer kilobyte count: `{token}`"),
    })
}
