//! Routing of configuration sections to cogs.

/// One cog → section pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CogRegistration {
    /// Cog identifier.
    pub cog: &'static str,
    /// Top-level document key holding the cog's section.
    pub section: &'static str,
}

/// Fixed mapping from cog identifier to the section it owns.
///
/// Cogs without an entry have no dedicated section and receive an empty
/// mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CogRegistry {
    entries: Vec<CogRegistration>,
}

impl CogRegistry {
    /// An empty registry.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Maps `cog` to `section`, replacing an earlier mapping for `cog`.
    #[must_use]
    pub fn register(mut self, cog: &'static str, section: &'static str) -> Self {
        match self.entries.iter_mut().find(|entry| entry.cog == cog) {
            Some(entry) => entry.section = section,
            None => self.entries.push(CogRegistration { cog, section }),
        }
        self
    }

    /// Section owned by `cog`, if it has one.
    pub fn section_for(&self, cog: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.cog == cog)
            .map(|entry| entry.section)
    }

    /// Position of `cog` in registration order.
    pub fn position(&self, cog: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.cog == cog)
    }

    /// Registrations in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &CogRegistration> {
        self.entries.iter()
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no cog has a section.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(&'static str, &'static str)> for CogRegistry {
    fn from_iter<I: IntoIterator<Item = (&'static str, &'static str)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |registry, (cog, section)| registry.register(cog, section))
    }
}
