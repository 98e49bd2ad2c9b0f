use thiserror::Error;

pub type Result<T> = std::result::Result<T, ArgError>;

#[derive(Debug, Error)]
pub enum ArgError {
    /// A key token matched no registered name or alias.
    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    /// A value argument was the last scanned token.
    #[error("argument {0} has no value")]
    MissingValue(String),

    /// A mandatory argument was not supplied, or a lookup named an argument
    /// that is not in the result set.
    #[error("missing mandatory argument: {0}")]
    MissingArgument(String),

    #[error("cannot read {name}={value:?} as {target}: {reason}")]
    Conversion {
        name: String,
        value: String,
        target: &'static str,
        reason: String,
    },

    #[error("argument name already defined: {0}")]
    DuplicateDefinition(String),

    #[error("invalid argument definition {name:?}: {reason}")]
    InvalidDefinition { name: String, reason: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArgError {
    /// The argument name or token the error is about, if it carries one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::UnknownArgument(key)
            | Self::MissingValue(key)
            | Self::MissingArgument(key)
            | Self::DuplicateDefinition(key) => Some(key),
            Self::Conversion { name, .. } | Self::InvalidDefinition { name, .. } => Some(name),
            Self::Io(_) => None,
        }
    }

    /// Whether the error comes from reading the command line, as opposed to
    /// defining arguments or converting values afterwards.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownArgument(_) | Self::MissingValue(_) | Self::MissingArgument(_)
        )
    }
}
