use anyhow::{Context, Result};
use argdeck::ArgParser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

fn build_parser() -> Result<ArgParser> {
    let mut parser = ArgParser::new();
    parser
        .set_program_name("argdeck-demo")
        .set_catch_errors(true)
        .set_print_help_on_error(true);

    parser.add_value_argument("--input", "-i", "Input file", false)?;
    parser.add_value_argument("--threads", "-t", "Number of worker threads", true)?;
    parser.add_flag_argument("--colour", "-c,--color", "Enable colour")?;
    parser.add_flag_argument("--json", "-j", "Print the resolved arguments as JSON")?;
    parser.set_final_argument("file", "File to process")?;
    Ok(parser)
}

fn main() -> Result<ExitCode> {
    init_tracing();

    let mut parser = build_parser()?;
    let argv: Vec<String> = std::env::args().collect();
    if !parser.parse_or_report(&argv, io::stderr(), io::stdout())? {
        return Ok(ExitCode::from(2));
    }
    tracing::debug!(count = parser.results().len(), "arguments resolved");

    let mut stdout = io::stdout().lock();
    if parser.get("--json")?.as_bool(false) {
        let json = serde_json::to_string_pretty(parser.results())
            .context("failed to serialize arguments")?;
        writeln!(stdout, "{json}")?;
        return Ok(ExitCode::SUCCESS);
    }

    let threads = parser
        .get("--threads")?
        .as_i32(1)
        .context("--threads must be an integer")?;
    writeln!(stdout, "input={}", parser.get("--input")?.as_str(""))?;
    writeln!(stdout, "threads={threads}")?;
    writeln!(stdout, "colour={}", parser.get("--colour")?.as_bool(false))?;
    writeln!(stdout, "file={}", parser.get("file")?.as_str(""))?;
    Ok(ExitCode::SUCCESS)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}
