mod commands;

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use ja_core::{AccessOptions, DebugLevel, EngineOptions, GrammarMode, JsonEngine, ScalarPolicy};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::commands::ReadAs;

#[derive(Debug, Parser)]
#[command(name = "json-access", version, about = "Read and write JSON documents by access string")]
struct Cli {
  /// Legacy grammar: one index per segment and `@attribute` lookups
  #[arg(long, global = true)]
  legacy: bool,

  /// Match field names ignoring ASCII case
  #[arg(long, global = true)]
  case_insensitive: bool,

  /// Parse numeric and boolean strings when reading scalars
  #[arg(long, global = true)]
  lenient: bool,

  /// How much the access layer reports about each operation
  #[arg(long, global = true, value_enum, default_value_t = CliDebugLevel::None)]
  debug_level: CliDebugLevel,

  /// Tracing filter directive; overrides RUST_LOG
  #[arg(long, global = true, env = "JSON_ACCESS_LOG")]
  log: Option<String>,

  /// Pretty-print output
  #[arg(long, global = true)]
  pretty: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Read the node at PATH
  Get {
    file: PathBuf,
    #[arg(default_value = "")]
    path: String,
    #[arg(long = "as", value_enum, default_value_t = ReadAs::Value)]
    read_as: ReadAs,
    #[arg(long)]
    default: Option<String>,
  },
  /// Write VALUE (JSON, or a bare string) at PATH and save the file
  Set {
    file: PathBuf,
    path: String,
    value: String,
    #[arg(long)]
    out: Option<PathBuf>,
  },
  /// Append VALUE to the array at PATH and save the file
  Append {
    file: PathBuf,
    path: String,
    value: String,
    #[arg(long)]
    out: Option<PathBuf>,
  },
  /// Report array nesting at PATH
  Shape { file: PathBuf, path: String },
  /// Sanitize, validate and parse an access string
  Check { path: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDebugLevel {
  None,
  Basic,
  Detailed,
  Verbose,
}

impl From<CliDebugLevel> for DebugLevel {
  fn from(l: CliDebugLevel) -> Self {
    match l {
      CliDebugLevel::None => DebugLevel::None,
      CliDebugLevel::Basic => DebugLevel::Basic,
      CliDebugLevel::Detailed => DebugLevel::Detailed,
      CliDebugLevel::Verbose => DebugLevel::Verbose,
    }
  }
}

impl Cli {
  fn access_options(&self) -> AccessOptions {
    AccessOptions {
      grammar: if self.legacy {
        GrammarMode::Legacy
      } else {
        GrammarMode::Advanced
      },
      case_sensitive: !self.case_insensitive,
      scalar_policy: if self.lenient {
        ScalarPolicy::Lenient
      } else {
        ScalarPolicy::Strict
      },
      debug_level: self.debug_level.into(),
    }
  }

  // The access layer's debug level implies at least that much tracing output.
  fn default_directive(&self) -> &'static str {
    match self.debug_level {
      CliDebugLevel::None => "warn",
      CliDebugLevel::Basic | CliDebugLevel::Detailed => "warn,ja_core=debug",
      CliDebugLevel::Verbose => "warn,ja_core=trace",
    }
  }
}

fn init_tracing(cli: &Cli) {
  let filter = match &cli.log {
    Some(directive) => EnvFilter::new(directive),
    None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.default_directive())),
  };
  // Ignore the error if a subscriber is already installed.
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), String> {
  let text = if pretty {
    serde_json::to_string_pretty(value)
  } else {
    serde_json::to_string(value)
  }
  .map_err(|e| e.to_string())?;
  println!("{text}");
  Ok(())
}

fn run(cli: &Cli) -> Result<bool, String> {
  let access = cli.access_options();
  let engine = JsonEngine::new(EngineOptions {
    access,
    ..EngineOptions::default()
  });

  match &cli.command {
    Command::Get {
      file,
      path,
      read_as,
      default,
    } => {
      let res = commands::get(&engine, file, path, *read_as, default.as_deref())?;
      print_json(&res, cli.pretty)?;
      Ok(res.found)
    }
    Command::Set { file, path, value, out } => {
      let res = commands::set(&engine, file, path, value, false, out.as_deref(), cli.pretty)?;
      print_json(&res, cli.pretty)?;
      Ok(res.written)
    }
    Command::Append { file, path, value, out } => {
      let res = commands::set(&engine, file, path, value, true, out.as_deref(), cli.pretty)?;
      print_json(&res, cli.pretty)?;
      Ok(res.written)
    }
    Command::Shape { file, path } => {
      let res = commands::shape(&engine, file, path)?;
      print_json(&res, cli.pretty)?;
      Ok(res.is_array)
    }
    Command::Check { path } => {
      let res = commands::check(path, access.grammar);
      print_json(&res, cli.pretty)?;
      Ok(res.valid)
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(&cli);

  match run(&cli) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::from(1),
    Err(e) => {
      tracing::error!(error = %e, "command failed");
      eprintln!("error: {e}");
      ExitCode::from(2)
    }
  }
}
