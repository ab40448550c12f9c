//! Lock-free snapshot of the current admin set.

use crate::schema::AdminSet;
use arc_swap::ArcSwap;
use mdbf_common::UserId;
use std::sync::Arc;

/// Shared handle to the live [`AdminSet`].
///
/// Cloning yields another handle to the same set. Readers never block on a
/// reload pass; the set is swapped wholesale once a new one validates.
#[derive(Debug, Clone)]
pub struct AdminCache {
    admins: Arc<ArcSwap<AdminSet>>,
}

impl AdminCache {
    /// Creates a cache holding `admins`.
    pub fn new(admins: AdminSet) -> Self {
        Self {
            admins: Arc::new(ArcSwap::from_pointee(admins)),
        }
    }

    /// Gets the current admin set.
    pub fn get(&self) -> Arc<AdminSet> {
        self.admins.load_full()
    }

    /// Replaces the admin set atomically.
    pub fn update(&self, admins: AdminSet) {
        self.admins.store(Arc::new(admins));
    }

    /// Whether `user` is in the current admin set.
    pub fn is_admin(&self, user: UserId) -> bool {
        self.admins.load().contains(user)
    }
}

impl Default for AdminCache {
    fn default() -> Self {
        Self::new(AdminSet::default())
    }
}
