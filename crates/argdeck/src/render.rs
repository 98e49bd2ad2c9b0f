use crate::parser::ArgParser;
use crate::registry::ArgumentSpec;

fn example_token(spec: &ArgumentSpec) -> String {
    if spec.is_flag() {
        format!("[{}]", spec.name())
    } else if spec.is_optional() {
        format!("[{} <value>]", spec.name())
    } else {
        format!("<{} <value>>", spec.name())
    }
}

fn spec_block(spec: &ArgumentSpec) -> String {
    let mut out = format!("  {}", spec.name());
    for alias in spec.aliases() {
        out.push_str(&format!(", {alias}"));
    }
    if !spec.is_flag() {
        out.push_str(" <value>");
    }
    out.push_str(&format!("\n    {}", spec.description()));
    if !spec.is_flag() {
        out.push_str(if spec.is_optional() {
            ": Optional"
        } else {
            ": Mandatory"
        });
    }
    out.push_str("\n\n");
    out
}

impl ArgParser {
    /// One-line usage example: `prog [--flag] [--opt <value>] <--req <value>> final`.
    ///
    /// Tokens are joined by single spaces with no trailing space, so an empty
    /// registry renders just the program name (`"PROGRAM"`, not `"PROGRAM "`).
    pub fn example_command(&self) -> String {
        let mut parts = vec![self.config.program_name.clone()];
        parts.extend(self.registry.specs().iter().map(example_token));
        if let Some(final_arg) = self.registry.final_argument() {
            parts.push(final_arg.name().to_string());
        }
        parts.join(" ")
    }

    /// Render the help text: the example command, then one block per argument
    /// in registration order, then the final argument.
    pub fn help(&self) -> String {
        let mut out = String::from("Example Command: \n");
        out.push_str(&format!("  {}\n\n", self.example_command()));

        for spec in self.registry.specs() {
            out.push_str(&spec_block(spec));
        }
        if let Some(final_arg) = self.registry.final_argument() {
            out.push_str(&format!(
                "  {}\n    {}\n\n",
                final_arg.name(),
                final_arg.description()
            ));
        }
        out
    }
}
