use std::io::Write;

use crate::error::{ArgError, Result};
use crate::parser::ArgParser;

impl ArgParser {
    /// Parse `argv`, optionally turning parse errors into a `false` return.
    ///
    /// With `catch_errors` off this is [`ArgParser::parse`] reduced to a
    /// boolean. With it on, unknown arguments, missing values and missing
    /// mandatory arguments yield `Ok(false)`; if `print_help_on_error` is also
    /// set, a one-line diagnostic goes to `err` and the help text to `out`.
    pub fn parse_or_report<I, S, E, O>(&mut self, argv: I, mut err: E, mut out: O) -> Result<bool>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        E: Write,
        O: Write,
    {
        let parsed = self.parse(argv).map(|_| ());
        let error = match parsed {
            Ok(()) => return Ok(true),
            Err(e) if self.config.catch_errors && e.is_parse_error() => e,
            Err(e) => return Err(e),
        };

        tracing::debug!(%error, "command line rejected");
        if self.config.print_help_on_error {
            writeln!(err, "{}", self.diagnostic(&error))?;
            write!(out, "{}", self.help())?;
            out.flush()?;
        }
        Ok(false)
    }

    fn diagnostic(&self, error: &ArgError) -> String {
        match error {
            ArgError::UnknownArgument(key) => {
                format!("Error: Unknown argument provided: {key}")
            }
            ArgError::MissingArgument(key) => {
                format!("Error: Required argument {key} is missing")
            }
            ArgError::MissingValue(key) => {
                let mut msg = format!("Error: Last argument {key} is missing corresponding value");
                if let Some(final_arg) = self.registry.final_argument() {
                    msg.push_str(&format!(
                        "\n  Hint: Did you forget the final argument '{}'?",
                        final_arg.name()
                    ));
                }
                msg
            }
            other => format!("Error: {other}"),
        }
    }
}
