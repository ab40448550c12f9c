//! Per-cog change detection.

use crate::cog::{Cog, CogConstructor, CogContext};
use crate::error::CogResult;
use mdbf_config::Fingerprint;
use serde_yaml::Value;
use std::sync::Arc;
use tracing::{error, info};

/// A constructed cog together with the fingerprint of the section it last
/// applied.
pub struct LoadedCog {
    context: CogContext,
    cog: Box<dyn Cog>,
    fingerprint: Option<Fingerprint>,
}

impl LoadedCog {
    /// Builds the cog and applies its initial section.
    ///
    /// A failing initial apply is logged and leaves the cog without a
    /// fingerprint, so the next reload pass tries again.
    pub fn construct(constructor: &CogConstructor, bot_name: &Arc<str>, section: &Value) -> Self {
        let context = CogContext::new(Arc::clone(bot_name), constructor.name());
        let cog = constructor.build(&context);
        let mut loaded = Self {
            context,
            cog,
            fingerprint: None,
        };

        let _entered = loaded.context.span().clone().entered();
        if let Err(e) = loaded.apply_section(section) {
            error!(error = %e, "Initial configuration could not be applied");
        }
        info!("Initialized {}", loaded.name());
        loaded
    }

    /// Applies `section` if it differs from the last applied one.
    ///
    /// Returns whether the cog's data changed. On error the stored
    /// fingerprint is left untouched.
    pub fn apply(&mut self, section: &Value) -> CogResult<bool> {
        let _entered = self.context.span().clone().entered();
        self.apply_section(section)
    }

    // The first successful apply is not logged as an update.
    fn apply_section(&mut self, section: &Value) -> CogResult<bool> {
        let fingerprint = Fingerprint::of(section)?;
        if self.fingerprint == Some(fingerprint) {
            return Ok(false);
        }

        self.cog.update(section)?;
        let quiet = self.fingerprint.is_none();
        self.fingerprint = Some(fingerprint);
        if !quiet {
            info!(%fingerprint, "Updated {} config", self.name());
        }
        Ok(true)
    }

    /// Identifier of the cog.
    pub const fn name(&self) -> &'static str {
        self.context.cog()
    }

    /// Fingerprint of the last successfully applied section.
    pub const fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    /// The cog as its concrete type.
    pub fn downcast_ref<C: Cog>(&self) -> Option<&C> {
        self.cog.as_any().downcast_ref::<C>()
    }
}

impl std::fmt::Debug for LoadedCog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedCog")
            .field("name", &self.name())
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cog::CogInit;
    use crate::error::CogError;
    use mdbf_common::test_utils::LogCapture;
    use std::any::Any;

    /// Records every section it is given; rejects sections with `fail: true`.
    #[derive(Default)]
    struct Recorder {
        applied: Vec<Value>,
    }

    impl Cog for Recorder {
        fn update(&mut self, section: &Value) -> CogResult<()> {
            if section.get("fail") == Some(&Value::Bool(true)) {
                return Err(CogError::apply(Self::NAME, "asked to fail"));
            }
            self.applied.push(section.clone());
            Ok(())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    impl CogInit for Recorder {
        const NAME: &'static str = "recorder";

        fn init(_context: &CogContext) -> Self {
            Self::default()
        }
    }

    fn yaml(s: &str) -> Value {
        serde_yaml::from_str(s).unwrap()
    }

    fn construct(section: &Value) -> LoadedCog {
        LoadedCog::construct(&CogConstructor::of::<Recorder>(), &Arc::from("Test"), section)
    }

    fn applied(cog: &LoadedCog) -> usize {
        cog.downcast_ref::<Recorder>().unwrap().applied.len()
    }

    #[test]
    fn test_construct_applies_initial_section() {
        let cog = construct(&yaml("level: 1"));
        assert_eq!(cog.name(), "recorder");
        assert_eq!(applied(&cog), 1);
        assert_eq!(cog.fingerprint(), Some(Fingerprint::of(&yaml("level: 1")).unwrap()));
    }

    #[test]
    fn test_unchanged_section_is_skipped() {
        let mut cog = construct(&yaml("{a: 1, b: 2}"));
        assert!(!cog.apply(&yaml("{b: 2, a: 1}")).unwrap());
        assert_eq!(applied(&cog), 1);
    }

    #[test]
    fn test_changed_section_is_applied() {
        let mut cog = construct(&yaml("level: 1"));
        assert!(cog.apply(&yaml("level: 2")).unwrap());
        assert_eq!(applied(&cog), 2);
        assert_eq!(cog.fingerprint(), Some(Fingerprint::of(&yaml("level: 2")).unwrap()));
    }

    #[test]
    fn test_failed_update_keeps_fingerprint() {
        let mut cog = construct(&yaml("level: 1"));
        let before = cog.fingerprint();
        assert!(cog.apply(&yaml("fail: true")).is_err());
        assert_eq!(cog.fingerprint(), before);
        assert_eq!(applied(&cog), 1);

        // The same failing section is attempted again rather than skipped
        assert!(cog.apply(&yaml("fail: true")).is_err());
    }

    #[test]
    fn test_failed_construction_retries_on_next_apply() {
        let mut cog = construct(&yaml("fail: true"));
        assert_eq!(cog.fingerprint(), None);
        assert_eq!(applied(&cog), 0);

        assert!(cog.apply(&yaml("level: 1")).unwrap());
        assert_eq!(applied(&cog), 1);
    }

    #[test]
    fn test_first_successful_apply_is_not_logged_as_update() {
        let logs = LogCapture::default();
        let _guard = logs.set_default();

        let mut cog = construct(&yaml("fail: true"));
        assert!(cog.apply(&yaml("level: 1")).unwrap());
        assert!(!logs.contents().contains("Updated recorder config"));

        assert!(cog.apply(&yaml("level: 2")).unwrap());
        assert!(logs.contents().contains("Updated recorder config"));
    }

    #[test]
    fn test_unfingerprintable_section_is_an_error() {
        let mut cog = construct(&yaml("level: 1"));
        let err = cog.apply(&yaml("ratio: .inf")).unwrap_err();
        assert!(matches!(err, CogError::Fingerprint(_)));
    }
}
