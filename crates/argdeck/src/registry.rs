use std::collections::HashMap;

use crate::error::{ArgError, Result};

/// A declared key-addressed argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    name: String,
    aliases: Vec<String>,
    description: String,
    is_flag: bool,
    is_optional: bool,
}

impl ArgumentSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        self.aliases.as_slice()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Flags consume no value; their presence sets them.
    pub fn is_flag(&self) -> bool {
        self.is_flag
    }

    /// Always `true` for flags.
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }
}

/// The trailing positional argument, bound to the last element of argv.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalArgumentSpec {
    name: String,
    description: String,
}

impl FinalArgumentSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Handle to a spec owned by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecId {
    Named(usize),
    Final,
}

/// A resolved [`SpecId`].
#[derive(Debug, Clone, Copy)]
pub enum SpecRef<'a> {
    Named(&'a ArgumentSpec),
    Final(&'a FinalArgumentSpec),
}

impl SpecRef<'_> {
    pub fn name(&self) -> &str {
        match self {
            Self::Named(spec) => spec.name(),
            Self::Final(spec) => spec.name(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Self::Named(spec) => spec.description(),
            Self::Final(spec) => spec.description(),
        }
    }
}

/// Argument definitions in registration order, plus a lookup covering every
/// canonical name and alias.
///
/// Every name or alias resolves to exactly one spec: a registration that would
/// reuse one fails with [`ArgError::DuplicateDefinition`] and changes nothing.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: Vec<ArgumentSpec>,
    names: HashMap<String, usize>,
    final_arg: Option<FinalArgumentSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an argument that takes a value, e.g. `--threads 12`.
    ///
    /// `aliases` is comma separated (`"-t,-j"`); blank entries are skipped.
    /// Surrounding whitespace is trimmed from the name and from each alias, so
    /// `"-t, -j"` registers `-j`, not `" -j"`.
    pub fn add_value_argument(
        &mut self,
        name: &str,
        aliases: &str,
        description: &str,
        optional: bool,
    ) -> Result<SpecId> {
        self.register(name, aliases, description, false, optional)
    }

    /// Register a presence-only flag, e.g. `--colour`. Flags are always optional.
    pub fn add_flag_argument(
        &mut self,
        name: &str,
        aliases: &str,
        description: &str,
    ) -> Result<SpecId> {
        self.register(name, aliases, description, true, true)
    }

    /// Set the mandatory trailing argument. A later call replaces it.
    pub fn set_final_argument(&mut self, name: &str, description: &str) -> Result<()> {
        let name = check_name(name)?;
        if self.names.contains_key(name) {
            return Err(ArgError::DuplicateDefinition(name.to_string()));
        }
        if let Some(prev) = &self.final_arg {
            tracing::debug!(previous = prev.name(), "replacing final argument");
        }
        tracing::debug!(name, "set final argument");
        self.final_arg = Some(FinalArgumentSpec {
            name: name.to_string(),
            description: description.to_string(),
        });
        Ok(())
    }

    /// Resolve a canonical name or alias.
    pub fn lookup(&self, token: &str) -> Result<&ArgumentSpec> {
        self.resolve(token).map(|idx| &self.specs[idx])
    }

    pub(crate) fn resolve(&self, token: &str) -> Result<usize> {
        self.names
            .get(token)
            .copied()
            .ok_or_else(|| ArgError::UnknownArgument(token.to_string()))
    }

    pub fn get(&self, id: SpecId) -> Option<SpecRef<'_>> {
        match id {
            SpecId::Named(idx) => self.specs.get(idx).map(SpecRef::Named),
            SpecId::Final => self.final_arg.as_ref().map(SpecRef::Final),
        }
    }

    /// Specs in registration order.
    pub fn specs(&self) -> &[ArgumentSpec] {
        self.specs.as_slice()
    }

    pub fn final_argument(&self) -> Option<&FinalArgumentSpec> {
        self.final_arg.as_ref()
    }

    fn register(
        &mut self,
        name: &str,
        aliases: &str,
        description: &str,
        is_flag: bool,
        is_optional: bool,
    ) -> Result<SpecId> {
        let name = check_name(name)?;
        let aliases = split_aliases(name, aliases);

        let final_name = self.final_arg.as_ref().map(|f| f.name());
        for key in std::iter::once(name).chain(aliases.iter().map(String::as_str)) {
            if self.names.contains_key(key) || final_name == Some(key) {
                return Err(ArgError::DuplicateDefinition(key.to_string()));
            }
        }

        let idx = self.specs.len();
        self.names.insert(name.to_string(), idx);
        for alias in &aliases {
            self.names.insert(alias.clone(), idx);
        }
        tracing::debug!(name, ?aliases, is_flag, is_optional, "registered argument");
        self.specs.push(ArgumentSpec {
            name: name.to_string(),
            aliases,
            description: description.to_string(),
            is_flag,
            is_optional,
        });
        Ok(SpecId::Named(idx))
    }
}

fn check_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ArgError::InvalidDefinition {
            name: name.to_string(),
            reason: "name must not be empty",
        });
    }
    Ok(trimmed)
}

fn split_aliases(name: &str, raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for alias in raw.split(',').map(str::trim) {
        if alias.is_empty() || alias == name || out.iter().any(|a| a == alias) {
            continue;
        }
        out.push(alias.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_drop_blank_and_repeated_entries() {
        assert_eq!(split_aliases("--threads", ",-t,,-j,"), vec!["-t", "-j"]);
        assert_eq!(split_aliases("--threads", " -t , -t,--threads"), vec!["-t"]);
        assert!(split_aliases("--threads", "").is_empty());
    }

    #[test]
    fn lookup_resolves_name_and_aliases() {
        let mut reg = Registry::new();
        reg.add_value_argument("--threads", "-t,-j", "Worker count", true)
            .unwrap();
        assert_eq!(reg.lookup("--threads").unwrap().name(), "--threads");
        assert_eq!(reg.lookup("-t").unwrap().name(), "--threads");
        assert_eq!(reg.lookup("-j").unwrap().name(), "--threads");
        match reg.lookup("-x").unwrap_err() {
            ArgError::UnknownArgument(key) => assert_eq!(key, "-x"),
            other => panic!("expected UnknownArgument, got: {other:?}"),
        }
    }

    #[test]
    fn flags_are_always_optional() {
        let mut reg = Registry::new();
        reg.add_flag_argument("--colour", "-c", "Enable colour").unwrap();
        let spec = reg.lookup("-c").unwrap();
        assert!(spec.is_flag());
        assert!(spec.is_optional());
    }

    #[test]
    fn duplicate_alias_is_rejected_without_side_effects() {
        let mut reg = Registry::new();
        reg.add_value_argument("--input", "-i", "", false).unwrap();
        let err = reg.add_flag_argument("--ignore", "-x,-i", "").unwrap_err();
        match err {
            ArgError::DuplicateDefinition(key) => assert_eq!(key, "-i"),
            other => panic!("expected DuplicateDefinition, got: {other:?}"),
        }
        assert_eq!(reg.specs().len(), 1);
        assert!(reg.lookup("-x").is_err());
        assert!(reg.lookup("--ignore").is_err());
    }

    #[test]
    fn final_argument_name_cannot_collide() {
        let mut reg = Registry::new();
        reg.add_flag_argument("--colour", "", "").unwrap();
        assert!(matches!(
            reg.set_final_argument("--colour", ""),
            Err(ArgError::DuplicateDefinition(_))
        ));

        reg.set_final_argument("file", "Input").unwrap();
        assert!(matches!(
            reg.add_value_argument("--out", "file", "", true),
            Err(ArgError::DuplicateDefinition(_))
        ));
    }

    #[test]
    fn final_argument_last_write_wins() {
        let mut reg = Registry::new();
        reg.set_final_argument("first", "").unwrap();
        reg.set_final_argument("second", "The real one").unwrap();
        let f = reg.final_argument().unwrap();
        assert_eq!(f.name(), "second");
        assert_eq!(f.description(), "The real one");
        assert_eq!(reg.get(SpecId::Final).unwrap().name(), "second");
    }

    #[test]
    fn names_are_trimmed_like_aliases() {
        let mut reg = Registry::new();
        reg.add_flag_argument(" --x ", " -y ,", "").unwrap();
        let spec = reg.lookup("--x").unwrap();
        assert_eq!(spec.name(), "--x");
        assert_eq!(spec.aliases(), ["-y"]);
        assert!(reg.lookup(" --x").is_err());

        assert!(matches!(
            reg.add_value_argument("--x\t", "", "", true),
            Err(ArgError::DuplicateDefinition(key)) if key == "--x"
        ));

        reg.set_final_argument("  file ", "").unwrap();
        assert_eq!(reg.final_argument().unwrap().name(), "file");
    }

    #[test]
    fn empty_name_is_invalid() {
        let mut reg = Registry::new();
        assert!(matches!(
            reg.add_flag_argument("  ", "", ""),
            Err(ArgError::InvalidDefinition { .. })
        ));
    }
}
