//! Post-scan checks: mandatory arguments must be present, omitted optional
//! ones get a synthesized value.

use crate::error::{ArgError, Result};
use crate::registry::{Registry, SpecId};
use crate::results::{Origin, ParseResults, ResultEntry};

/// Complete `results` so every registered spec has exactly one entry.
///
/// Specs are visited in registration order, so the first missing mandatory
/// argument is the one reported.
pub(crate) fn finalize(registry: &Registry, results: &mut ParseResults) -> Result<()> {
    for (idx, spec) in registry.specs().iter().enumerate() {
        if results.contains(spec.name()) {
            continue;
        }
        if !spec.is_optional() {
            return Err(ArgError::MissingArgument(spec.name().to_string()));
        }

        let value = if spec.is_flag() { "false" } else { "" };
        tracing::trace!(name = spec.name(), value, "defaulted argument");
        results.insert(ResultEntry::new(
            spec.name(),
            SpecId::Named(idx),
            value,
            Origin::Default,
        ));
    }
    Ok(())
}
