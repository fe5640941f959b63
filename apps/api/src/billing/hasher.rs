//! Invoice identity hashing.
//!
//! The public key of a rendered client invoice is the SHA-256 of
//! `"{id}_{client_id}_{inv_date}"`. It is deterministic and unsalted: anyone
//! who knows an invoice id, its client and its date can recompute it.

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `input`.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Public lookup key for a client invoice.
pub fn invoice_hash(inv_id: i32, client_id: i32, inv_date: NaiveDate) -> String {
    sha256_hex(&format!("{inv_id}_{client_id}_{}", inv_date.format("%Y-%m-%d")))
}
