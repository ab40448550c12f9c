//! Configuration reload orchestration.

use crate::cog::{CogConstructor, CogInit};
use crate::lifecycle::LoadedCog;
use crate::registry::CogRegistry;
use mdbf_config::{read_config, AdminCache, AdminSet, ConfigResult, Fingerprint};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// A [`CogManager`] shared between the command handler and background tasks.
///
/// The mutex serializes reload passes: a reload requested while another is
/// running waits for it to finish.
pub type SharedCogManager = Arc<Mutex<CogManager>>;

/// What a reload pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReloadReport {
    /// Cogs whose data changed, in application order.
    pub updated: Vec<&'static str>,
    /// Cogs whose update failed; they are retried by the next pass.
    pub failed: Vec<&'static str>,
}

impl ReloadReport {
    /// True when no cog changed, whether or not some failed.
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Owns every cog and the top-level configuration state of one bot.
pub struct CogManager {
    bot_name: Arc<str>,
    registry: CogRegistry,
    cogs: Vec<LoadedCog>,
    config_path: PathBuf,
    fingerprint: Option<Fingerprint>,
    admins: AdminCache,
}

impl CogManager {
    /// Constructs every cog from the document at `config_path`, then runs one
    /// reload pass to establish the admin set and the document fingerprint.
    ///
    /// Cogs are constructed and later updated in registry order. Cogs
    /// without a registry entry come last, in the order they were passed.
    ///
    /// Any configuration error here is returned to the caller; the bot cannot
    /// start without a valid configuration.
    pub async fn start(
        bot_name: impl Into<Arc<str>>,
        config_path: impl Into<PathBuf>,
        registry: CogRegistry,
        constructors: &[CogConstructor],
    ) -> ConfigResult<Self> {
        let bot_name = bot_name.into();
        let config_path = config_path.into();
        let document = read_config(&config_path).await?;

        let mut unique: Vec<&CogConstructor> = Vec::with_capacity(constructors.len());
        for constructor in constructors {
            if unique.iter().any(|seen| seen.name() == constructor.name()) {
                warn!(cog = constructor.name(), "Cog added twice; keeping the first instance");
                continue;
            }
            unique.push(constructor);
        }
        // Stable: unregistered cogs keep their relative order
        unique.sort_by_key(|constructor| {
            registry
                .position(constructor.name())
                .unwrap_or(usize::MAX)
        });

        let cogs: Vec<LoadedCog> = unique
            .into_iter()
            .map(|constructor| {
                let section = document.section(registry.section_for(constructor.name()));
                LoadedCog::construct(constructor, &bot_name, &section)
            })
            .collect();

        let mut manager = Self {
            bot_name,
            registry,
            cogs,
            config_path,
            fingerprint: None,
            admins: AdminCache::default(),
        };

        // Cogs are already configured, so this pass normally reports nothing;
        // it exists to load the admins and the document fingerprint.
        let report = manager.reload(None).await?;
        info!(
            bot = %manager.bot_name,
            cogs = manager.cogs.len(),
            updated = ?report.updated,
            "Cogs initialized"
        );
        Ok(manager)
    }

    /// Runs one reload pass.
    ///
    /// `path` replaces the remembered configuration path when given. Errors
    /// reading, hashing or validating the document abort the pass before
    /// any state changes. Cogs are then updated one at a time in registry
    /// order; a failing cog is logged and skipped.
    pub async fn reload(&mut self, path: Option<PathBuf>) -> ConfigResult<ReloadReport> {
        let path = path.unwrap_or_else(|| self.config_path.clone());
        let document = read_config(&path).await?;
        let fingerprint = document.fingerprint()?;

        if self.fingerprint == Some(fingerprint) {
            debug!(bot = %self.bot_name, path = %path.display(), "Configuration unchanged");
            self.config_path = path;
            return Ok(ReloadReport::default());
        }

        let admins = AdminSet::from_document(&document)?;
        debug!(bot = %self.bot_name, %admins, "Loaded admins");
        self.admins.update(admins);

        let mut report = ReloadReport::default();
        for cog in &mut self.cogs {
            let section = document.section(self.registry.section_for(cog.name()));
            match cog.apply(&section) {
                Ok(true) => report.updated.push(cog.name()),
                Ok(false) => {}
                Err(e) => {
                    error!(
                        bot = %self.bot_name,
                        cog = cog.name(),
                        error = %e,
                        "Failed to apply configuration"
                    );
                    report.failed.push(cog.name());
                }
            }
        }

        if report.failed.is_empty() {
            self.fingerprint = Some(fingerprint);
        } else {
            warn!(
                bot = %self.bot_name,
                failed = ?report.failed,
                "Keeping previous configuration fingerprint so failed cogs are retried"
            );
        }
        self.config_path = path;

        info!(
            bot = %self.bot_name,
            %fingerprint,
            updated = ?report.updated,
            "Configuration reloaded"
        );
        Ok(report)
    }

    /// Wraps the manager for sharing across tasks.
    pub fn into_shared(self) -> SharedCogManager {
        Arc::new(Mutex::new(self))
    }

    /// Handle to the live admin set.
    pub fn admins(&self) -> AdminCache {
        self.admins.clone()
    }

    /// Name of the bot that owns the cogs.
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Path used by the last successful pass.
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Fingerprint of the last fully applied document.
    pub const fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    /// Identifiers of all cogs, in application order.
    pub fn cog_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cogs.iter().map(LoadedCog::name)
    }

    /// The loaded cog with identifier `name`.
    pub fn loaded(&self, name: &str) -> Option<&LoadedCog> {
        self.cogs.iter().find(|cog| cog.name() == name)
    }

    /// The cog of type `C`, if it was added.
    pub fn cog<C: CogInit>(&self) -> Option<&C> {
        self.loaded(C::NAME).and_then(|cog| cog.downcast_ref::<C>())
    }
}

impl std::fmt::Debug for CogManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CogManager")
            .field("bot_name", &self.bot_name)
            .field("registry", &self.registry)
            .field("cogs", &self.cogs)
            .field("config_path", &self.config_path)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}
