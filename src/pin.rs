use std::fmt;
use std::sync::Arc;

pub type PinHandle = Arc<dyn Pin>;

/// Identity contract a driver's pin handle exposes to the registry.
///
/// The `Display` implementation is the descriptor quoted in diagnostics
/// and error messages.
pub trait Pin: fmt::Display + Send + Sync {
    fn name(&self) -> &str;

    fn number(&self) -> i32;

    /// The real pin behind this handle, when the handle is itself an
    /// alias wrapper. Handle types that are not wrappers keep the
    /// default.
    fn real_pin(&self) -> Option<PinHandle> {
        None
    }
}

/// Alias pseudo-handle returned by lookups and enumeration: carries the
/// alias's own name, delegates everything else to the resolved target.
pub struct PinAlias {
    name: String,
    real: PinHandle,
}

impl PinAlias {
    pub(crate) fn new(name: &str, real: PinHandle) -> Self {
        Self {
            name: name.to_string(),
            real,
        }
    }
}

impl Pin for PinAlias {
    fn name(&self) -> &str {
        &self.name
    }

    fn number(&self) -> i32 {
        self.real.number()
    }

    fn real_pin(&self) -> Option<PinHandle> {
        Some(self.real.clone())
    }
}

impl fmt::Display for PinAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.real.name())
    }
}
