//! Optional change directives for partial updates.

use serde::{Deserialize, Deserializer};

/// Whether a partial update should leave a field alone or overwrite it.
///
/// For nullable fields use `Change<Option<T>>`: `Set(None)` clears the field while `Keep` leaves
/// it untouched.
///
/// When deserialized as a struct field marked `#[serde(default)]`, a missing field becomes
/// [Change::Keep] and any present value, including `null`, becomes [Change::Set].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change<T> {
    /// Leave the current value unchanged.
    Keep,
    /// Replace the current value.
    Set(T),
}

impl<T> Change<T> {
    /// Overwrite `target` if this is [Change::Set].
    pub fn apply_to(self, target: &mut T) {
        if let Change::Set(value) = self {
            *target = value;
        }
    }

    /// The new value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Change::Keep => None,
            Change::Set(value) => Some(value),
        }
    }
}

impl<T> Default for Change<T> {
    fn default() -> Self {
        Change::Keep
    }
}

impl<'de, T> Deserialize<'de> for Change<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Change::Set)
    }
}
