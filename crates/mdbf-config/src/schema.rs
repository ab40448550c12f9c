//! Semantic rules for the top-level document.

use crate::document::ConfigDocument;
use crate::error::{ConfigError, ConfigResult};
use mdbf_common::UserId;
use serde_yaml::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Top-level key listing the users allowed to reload the bot.
pub const ADMINS_KEY: &str = "admins";

/// Users authorized to trigger a reload. Never empty once validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminSet(BTreeSet<UserId>);

impl AdminSet {
    /// Extracts and validates `admins` from the document.
    ///
    /// The key must hold a non-empty sequence of non-negative integers.
    pub fn from_document(document: &ConfigDocument) -> ConfigResult<Self> {
        let value = document
            .get(ADMINS_KEY)
            .ok_or_else(|| ConfigError::invalid("missing required key `admins`"))?;

        let Value::Sequence(entries) = value else {
            return Err(ConfigError::invalid("`admins` must be a list of user ids"));
        };

        let ids = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry
                    .as_u64()
                    .map(UserId)
                    .ok_or_else(|| ConfigError::invalid(format!("admins[{i}] is not a user id")))
            })
            .collect::<ConfigResult<BTreeSet<_>>>()?;

        if ids.is_empty() {
            return Err(ConfigError::invalid("`admins` must list at least one user id"));
        }

        Ok(Self(ids))
    }

    /// Whether `user` may trigger a reload.
    pub fn contains(&self, user: UserId) -> bool {
        self.0.contains(&user)
    }

    /// Number of admins.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True before the first successful load.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Admins in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = UserId> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<UserId> for AdminSet {
    fn from_iter<I: IntoIterator<Item = UserId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for AdminSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}
