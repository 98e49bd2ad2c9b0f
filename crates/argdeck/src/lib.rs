//! Declarative command-line argument parsing.
//!
//! A host registers value arguments, flags and an optional trailing "final"
//! argument on an [`ArgParser`], parses the process argument vector, then reads
//! values back by canonical name:
//!
//! ```
//! use argdeck::ArgParser;
//!
//! let mut parser = ArgParser::new();
//! parser.add_value_argument("--input", "-i", "Input file", false)?;
//! parser.add_flag_argument("--colour", "-c", "Enable colour")?;
//!
//! parser.parse(["prog", "-i", "foo.txt", "--colour"])?;
//! assert_eq!(parser.get("--input")?.as_str(""), "foo.txt");
//! assert!(parser.get("--colour")?.as_bool(false));
//! # Ok::<(), argdeck::ArgError>(())
//! ```
//!
//! Parsing is strict: unknown keys, dangling value keys and missing mandatory
//! arguments fail the whole parse. Hosts that prefer a boolean outcome with a
//! printed diagnostic use [`ArgParser::parse_or_report`].

mod error;
mod parser;
mod registry;
mod render;
mod report;
mod results;
mod validate;

pub use error::{ArgError, Result};
pub use parser::{ArgParser, ParserConfig};
pub use registry::{ArgumentSpec, FinalArgumentSpec, Registry, SpecId, SpecRef};
pub use results::{Origin, ParseResults, ResultEntry};
