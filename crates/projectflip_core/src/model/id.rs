//! Entity identifiers.
//!
//! # Responsibility
//! - Define the string identifier shared by all store collections.
//! - Generate short random tokens for newly inserted records.
//!
//! # Invariants
//! - Generated tokens use the lowercase base36 alphabet only.
//! - Token length stays within `MIN_ID_LENGTH..=MAX_ID_LENGTH`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Shortest generated token accepted by store configuration.
pub const MIN_ID_LENGTH: usize = 6;
/// Longest generated token. 36^16 is below 2^83, far inside the 122 random
/// bits a v4 uuid carries.
pub const MAX_ID_LENGTH: usize = 16;
/// Default token length, matching the ids the site has always produced.
pub const DEFAULT_ID_LENGTH: usize = 9;

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Identifier of one record inside its collection.
///
/// Seed records keep their fixed ids (`"1"`, `"2"`, ...); everything inserted
/// at runtime gets a random base36 token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an existing identifier, e.g. from seed data or persisted rows.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generates a random token of `length` base36 characters.
    ///
    /// `length` is clamped to `MIN_ID_LENGTH..=MAX_ID_LENGTH`. Uniqueness is
    /// not checked here; the store retries against issued ids.
    pub fn generate(length: usize) -> Self {
        let length = length.clamp(MIN_ID_LENGTH, MAX_ID_LENGTH);
        let mut bits = random_bits(Uuid::new_v4().as_u128());
        let mut token = String::with_capacity(length);
        for _ in 0..length {
            token.push(char::from(ID_ALPHABET[(bits % 36) as usize]));
            bits /= 36;
        }
        Self(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Packs the 122 random bits of a v4 uuid into the low bits of a `u128`.
///
/// The version nibble (bits 76..80) and variant bits (62..64) are fixed and
/// would otherwise skew the higher digits of every token.
fn random_bits(raw: u128) -> u128 {
    let low = raw & ((1 << 62) - 1);
    let middle = (raw >> 64) & 0xfff;
    let high = raw >> 80;
    low | (middle << 62) | (high << 74)
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// A clock set before 1970 yields `0` instead of failing.
pub fn now_epoch_ms() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
