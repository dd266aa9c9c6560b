//! Key normalization strategies

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Deterministic key transform applied before every lookup and mutation
///
/// Implementations must be pure: the output may depend on the key alone.
/// Returning `Cow::Borrowed` when the key is already canonical avoids an
/// allocation on the read path.
pub trait KeyNormalizer<K>: Send + Sync {
    fn normalize<'k>(&self, key: &'k K) -> Cow<'k, K>
    where
        K: Clone;
}

/// Leaves keys untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl<K> KeyNormalizer<K> for Identity {
    #[inline]
    fn normalize<'k>(&self, key: &'k K) -> Cow<'k, K>
    where
        K: Clone,
    {
        Cow::Borrowed(key)
    }
}

/// Adapts a plain function into a [`KeyNormalizer`]
///
/// The function always produces an owned key.
pub struct NormalizeWith<F>(pub F);

impl<K, F> KeyNormalizer<K> for NormalizeWith<F>
where
    F: Fn(&K) -> K + Send + Sync,
{
    fn normalize<'k>(&self, key: &'k K) -> Cow<'k, K>
    where
        K: Clone,
    {
        Cow::Owned((self.0)(key))
    }
}

impl<F> fmt::Debug for NormalizeWith<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizeWith").finish_non_exhaustive()
    }
}

/// Canonicalization policies for string keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyPolicy {
    /// Keys are used as given
    #[default]
    Identity,
    /// Keys are upper-cased
    Uppercase,
    /// Keys are lower-cased
    Lowercase,
    /// Leading and trailing whitespace is removed
    Trimmed,
    /// Whitespace is removed, then the key is lower-cased
    TrimmedLowercase,
}

impl KeyPolicy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            KeyPolicy::Identity => "identity",
            KeyPolicy::Uppercase => "uppercase",
            KeyPolicy::Lowercase => "lowercase",
            KeyPolicy::Trimmed => "trimmed",
            KeyPolicy::TrimmedLowercase => "trimmed_lowercase",
        }
    }
}

impl fmt::Display for KeyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "identity" | "none" => Ok(KeyPolicy::Identity),
            "uppercase" | "upper" => Ok(KeyPolicy::Uppercase),
            "lowercase" | "lower" => Ok(KeyPolicy::Lowercase),
            "trimmed" | "trim" => Ok(KeyPolicy::Trimmed),
            "trimmed_lowercase" => Ok(KeyPolicy::TrimmedLowercase),
            other => Err(format!("unknown key policy '{other}'")),
        }
    }
}

impl KeyNormalizer<String> for KeyPolicy {
    fn normalize<'k>(&self, key: &'k String) -> Cow<'k, String> {
        match self {
            KeyPolicy::Identity => Cow::Borrowed(key),
            KeyPolicy::Uppercase => changed_or_borrowed(key, key.to_uppercase()),
            KeyPolicy::Lowercase => changed_or_borrowed(key, key.to_lowercase()),
            KeyPolicy::Trimmed => {
                let trimmed = key.trim();
                if trimmed.len() == key.len() {
                    Cow::Borrowed(key)
                } else {
                    Cow::Owned(trimmed.to_string())
                }
            }
            KeyPolicy::TrimmedLowercase => changed_or_borrowed(key, key.trim().to_lowercase()),
        }
    }
}

fn changed_or_borrowed(original: &String, candidate: String) -> Cow<'_, String> {
    if candidate == *original {
        Cow::Borrowed(original)
    } else {
        Cow::Owned(candidate)
    }
}
