use serde::{Deserialize, Serialize};

use crate::error::{ArgError, Result};
use crate::registry::{ArgumentSpec, Registry, SpecId};
use crate::results::{Origin, ParseResults, ResultEntry};
use crate::validate;

/// Settings that shape parsing and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParserConfig {
    /// Shown at the start of the example command.
    pub program_name: String,
    /// Characters that split `--key=value` style tokens. Empty disables splitting.
    pub split_chars: String,
    /// Make [`ArgParser::parse_or_report`] return `Ok(false)` on parse errors.
    pub catch_errors: bool,
    /// When catching, write a diagnostic and the help text.
    pub print_help_on_error: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            program_name: "PROGRAM".to_string(),
            split_chars: "=".to_string(),
            catch_errors: false,
            print_help_on_error: true,
        }
    }
}

/// Argument definitions plus the results of the most recent parse.
#[derive(Debug, Clone, Default)]
pub struct ArgParser {
    pub(crate) config: ParserConfig,
    pub(crate) registry: Registry,
    results: ParseResults,
}

/// What the scanner is waiting for.
enum State<'a> {
    Key,
    Value { key: &'a str, spec: usize },
}

impl ArgParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn set_program_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.config.program_name = name.into();
        self
    }

    pub fn set_split_chars(&mut self, chars: impl Into<String>) -> &mut Self {
        self.config.split_chars = chars.into();
        self
    }

    pub fn set_catch_errors(&mut self, catch: bool) -> &mut Self {
        self.config.catch_errors = catch;
        self
    }

    pub fn set_print_help_on_error(&mut self, print: bool) -> &mut Self {
        self.config.print_help_on_error = print;
        self
    }

    /// See [`Registry::add_value_argument`].
    pub fn add_value_argument(
        &mut self,
        name: &str,
        aliases: &str,
        description: &str,
        optional: bool,
    ) -> Result<SpecId> {
        self.registry
            .add_value_argument(name, aliases, description, optional)
    }

    /// See [`Registry::add_flag_argument`].
    pub fn add_flag_argument(
        &mut self,
        name: &str,
        aliases: &str,
        description: &str,
    ) -> Result<SpecId> {
        self.registry.add_flag_argument(name, aliases, description)
    }

    /// See [`Registry::set_final_argument`].
    pub fn set_final_argument(&mut self, name: &str, description: &str) -> Result<()> {
        self.registry.set_final_argument(name, description)
    }

    pub fn lookup(&self, token: &str) -> Result<&ArgumentSpec> {
        self.registry.lookup(token)
    }

    /// Results of the last parse. Incomplete if that parse failed.
    pub fn results(&self) -> &ParseResults {
        &self.results
    }

    /// Look up a parsed argument by canonical name.
    pub fn get(&self, name: &str) -> Result<&ResultEntry> {
        self.results.get(name)
    }

    /// Parse and validate `argv`, replacing any previous results.
    ///
    /// `argv[0]` is the program name and is skipped. With a final argument
    /// configured, the last element is bound to it and excluded from key
    /// scanning. The remaining tokens are read left to right as `key value`,
    /// `key<split>value` or a bare flag key.
    ///
    /// A token containing a split character is always read as
    /// `key<split>value`, even when the key is a flag; a flag read that way is
    /// set to `"true"` whatever follows the split character.
    pub fn parse<I, S>(&mut self, argv: I) -> Result<&ParseResults>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv: Vec<S> = argv.into_iter().collect();
        let argv: Vec<&str> = argv.iter().map(|s| s.as_ref()).collect();
        self.results.clear();

        let args = argv.get(1..).unwrap_or_default();
        let (window, last) = match self.registry.final_argument() {
            Some(final_arg) => match args.split_last() {
                Some((last, rest)) => (rest, Some(*last)),
                None => return Err(ArgError::MissingArgument(final_arg.name().to_string())),
            },
            None => (args, None),
        };

        self.scan(window)?;

        if let (Some(final_arg), Some(value)) = (self.registry.final_argument(), last) {
            tracing::trace!(name = final_arg.name(), value, "bound final argument");
            self.results.insert(ResultEntry::new(
                final_arg.name(),
                SpecId::Final,
                value,
                Origin::Final,
            ));
        }

        validate::finalize(&self.registry, &mut self.results)?;
        Ok(&self.results)
    }

    fn scan(&mut self, window: &[&str]) -> Result<()> {
        let mut state = State::Key;
        for &token in window {
            tracing::trace!(token, "scanning");
            state = match state {
                State::Key => {
                    if let Some((key, value)) = split_token(token, &self.config.split_chars) {
                        let idx = self.registry.resolve(key)?;
                        self.emit(idx, value);
                        State::Key
                    } else {
                        let idx = self.registry.resolve(token)?;
                        if self.registry.specs()[idx].is_flag() {
                            self.emit(idx, "true");
                            State::Key
                        } else {
                            State::Value {
                                key: token,
                                spec: idx,
                            }
                        }
                    }
                }
                State::Value { spec, .. } => {
                    self.emit(spec, token);
                    State::Key
                }
            };
        }

        match state {
            State::Key => Ok(()),
            State::Value { key, .. } => Err(ArgError::MissingValue(key.to_string())),
        }
    }

    fn emit(&mut self, idx: usize, value: &str) {
        let spec = &self.registry.specs()[idx];
        let value = if spec.is_flag() { "true" } else { value };
        tracing::trace!(name = spec.name(), value, "matched argument");
        self.results.insert(ResultEntry::new(
            spec.name(),
            SpecId::Named(idx),
            value,
            Origin::Input,
        ));
    }
}

/// Split at the first character found in `split_chars`.
fn split_token<'a>(token: &'a str, split_chars: &str) -> Option<(&'a str, &'a str)> {
    let (at, ch) = token
        .char_indices()
        .find(|(_, c)| split_chars.contains(*c))?;
    Some((&token[..at], &token[at + ch.len_utf8()..]))
}
