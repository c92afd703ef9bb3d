use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use redirects_cli::config::{ParserConfig, parse_config_file};
use redirects_cli::{RedirectsError, Rule, RuleParser};

#[derive(Parser)]
#[command(name = "redirects")]
#[command(
	author,
	version,
	about = "Parse Netlify-style _redirects files into structured rules"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Parser configuration file (TOML)
	#[arg(long, global = true, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Enable debug logging on stderr
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Parse a _redirects file and print the rules as JSON
	Parse {
		/// Input file; reads stdin when omitted or `-`
		file: Option<PathBuf>,

		/// Print JSON on a single line
		#[arg(long)]
		compact: bool,
	},
	/// Check a _redirects file for errors and print a summary
	Check {
		/// Input file; reads stdin when omitted or `-`
		file: Option<PathBuf>,
	},
	/// Display the effective parser configuration
	Config,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::registry()
		.with(
			fmt::layer()
				.with_target(false)
				.without_time()
				.with_writer(std::io::stderr),
		)
		.with(filter)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	let config = load_config(cli.config.as_deref())?;

	match cli.command {
		Commands::Parse { file, compact } => handle_parse(&config, file.as_deref(), compact),
		Commands::Check { file } => handle_check(&config, file.as_deref()),
		Commands::Config => handle_config_show(&config),
	}
}

fn load_config(path: Option<&Path>) -> Result<ParserConfig> {
	match path {
		Some(path) => parse_config_file(path)
			.with_context(|| format!("Failed to load configuration from {}", path.display())),
		None => Ok(ParserConfig::default()),
	}
}

fn open_input(file: Option<&Path>) -> Result<Box<dyn Read>, RedirectsError> {
	match file {
		None => Ok(Box::new(std::io::stdin().lock())),
		Some(path) if path == Path::new("-") => Ok(Box::new(std::io::stdin().lock())),
		Some(path) => {
			let handle =
				std::fs::File::open(path).map_err(|source| RedirectsError::InputReadError {
					path: path.to_path_buf(),
					source,
				})?;
			Ok(Box::new(handle))
		}
	}
}

fn read_rules(config: &ParserConfig, file: Option<&Path>) -> Result<Vec<Rule>> {
	let input = open_input(file)?;
	let source = file.map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

	RuleParser::new(config.clone())
		.parse(input)
		.with_context(|| format!("Failed to parse {}", source))
}

fn handle_parse(config: &ParserConfig, file: Option<&Path>, compact: bool) -> Result<ExitCode> {
	let rules = read_rules(config, file)?;

	let json = if compact {
		serde_json::to_string(&rules)
	} else {
		serde_json::to_string_pretty(&rules)
	}
	.context("Failed to encode rules as JSON")?;

	println!("{}", json);
	Ok(ExitCode::SUCCESS)
}

fn handle_check(config: &ParserConfig, file: Option<&Path>) -> Result<ExitCode> {
	let rules = match read_rules(config, file) {
		Ok(rules) => rules,
		Err(e) => {
			eprintln!("Invalid redirects: {e:#}");
			return Ok(ExitCode::FAILURE);
		}
	};

	let rewrites = rules.iter().filter(|r| r.is_rewrite()).count();
	let proxies = rules.iter().filter(|r| r.is_proxy()).count();
	let forced = rules.iter().filter(|r| r.force).count();

	println!("{} rules are valid:", rules.len());
	println!("  rewrites: {}", rewrites);
	println!("  proxies: {}", proxies);
	println!("  forced: {}", forced);
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(config: &ParserConfig) -> Result<ExitCode> {
	let rendered = toml::to_string(config).context("Failed to render configuration")?;
	print!("{}", rendered);
	Ok(ExitCode::SUCCESS)
}
