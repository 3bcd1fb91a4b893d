//! Partial-update field semantics.

use serde::{Deserialize, Deserializer};

/// Deserializes a nullable field of a partial update. An absent key means
/// "leave unchanged" and an explicit `null` means "clear the value"; plain
/// `Option<T>` cannot tell the two apart, so the field is wrapped twice and
/// this adapter turns any present value, `null` included, into `Some(..)`.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
