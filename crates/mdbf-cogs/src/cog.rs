//! The contract every cog implements.

use crate::error::CogResult;
use serde_yaml::Value;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::Span;

/// A pluggable unit of bot functionality that owns one configuration section.
///
/// Cogs only hold data derived from their section. The framework keeps
/// track of section fingerprints and calls [`Cog::update`] only when the
/// section actually changed.
pub trait Cog: Send + Sync + 'static {
    /// Replaces the cog's data with what `section` describes.
    ///
    /// On error the cog must keep its previous data.
    fn update(&mut self, section: &Value) -> CogResult<()>;

    /// Upcast used to reach the concrete cog type.
    fn as_any(&self) -> &dyn Any;
}

/// Construction half of the contract.
pub trait CogInit: Cog + Sized {
    /// Identifier used for registry lookups and reload reports.
    const NAME: &'static str;

    /// Builds the cog in its unconfigured state. The initial section is
    /// applied right after through [`Cog::update`].
    fn init(context: &CogContext) -> Self;
}

/// What a cog gets from its host: the bot it belongs to and its own logger.
#[derive(Clone)]
pub struct CogContext {
    bot_name: Arc<str>,
    cog: &'static str,
    span: Span,
}

impl CogContext {
    /// Creates the context of cog `cog` inside bot `bot_name`.
    pub fn new(bot_name: Arc<str>, cog: &'static str) -> Self {
        let span = tracing::info_span!("cog", bot = %bot_name, cog);
        Self {
            bot_name,
            cog,
            span,
        }
    }

    /// Name of the owning bot.
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Identifier of the cog.
    pub const fn cog(&self) -> &'static str {
        self.cog
    }

    /// Span carrying `bot` and `cog` fields; enter it to log as this cog.
    pub const fn span(&self) -> &Span {
        &self.span
    }
}

impl fmt::Debug for CogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CogContext")
            .field("bot_name", &self.bot_name)
            .field("cog", &self.cog)
            .finish_non_exhaustive()
    }
}

/// Type-erased constructor for a [`CogInit`] implementor.
#[derive(Clone, Copy)]
pub struct CogConstructor {
    name: &'static str,
    build: fn(&CogContext) -> Box<dyn Cog>,
}

impl CogConstructor {
    /// Constructor for cog type `C`.
    pub fn of<C: CogInit>() -> Self {
        Self {
            name: C::NAME,
            build: build_boxed::<C>,
        }
    }

    /// Identifier of the cog this builds.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Builds a fresh, unconfigured instance.
    pub fn build(&self, context: &CogContext) -> Box<dyn Cog> {
        (self.build)(context)
    }
}

impl fmt::Debug for CogConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CogConstructor").field(&self.name).finish()
    }
}

fn build_boxed<C: CogInit>(context: &CogContext) -> Box<dyn Cog> {
    Box::new(C::init(context))
}
