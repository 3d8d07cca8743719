//! Results that carry tolerated failures alongside a value.

use crate::error::ResolveError;

/// A resolved value plus the warnings recorded while producing it.
///
/// Warnings are logged when recorded. A resolution with no warnings is
/// *clean*; otherwise it is *degraded* and the value may be empty or point at
/// something missing.
#[derive(Debug)]
#[must_use]
pub struct Resolution<T> {
    /// The (possibly degraded) value.
    pub value: T,
    /// Failures tolerated while producing `value`, in the order they occurred.
    pub warnings: Vec<ResolveError>,
}

impl<T> Resolution<T> {
    /// A resolution with no warnings.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// A resolution with a single warning.
    pub fn degraded(value: T, warning: ResolveError) -> Self {
        let mut resolution = Self::clean(value);
        resolution.warn(warning);
        resolution
    }

    /// Record and log a tolerated failure.
    pub fn warn(&mut self, warning: ResolveError) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// True if nothing was tolerated.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        Resolution {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Feed the value into a further resolution step, accumulating warnings.
    pub fn and_then<U>(self, f: impl FnOnce(&T) -> Resolution<U>) -> Resolution<(T, U)> {
        let next = f(&self.value);
        let mut warnings = self.warnings;
        warnings.extend(next.warnings);
        Resolution {
            value: (self.value, next.value),
            warnings,
        }
    }

    /// Treat any warning as fatal: return the first one, or the value.
    pub fn into_result(self) -> Result<T, ResolveError> {
        match self.warnings.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(self.value),
        }
    }
}
