#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

const LOG_ENV: &str = "HANDOVER_LOG";

#[derive(Parser)]
#[command(name = "handover", about = "Fill schema-described records from environment and flag sources")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Print the field descriptors a schema produces.
	Inspect {
		schema: PathBuf,
		#[arg(long)]
		json: bool,
	},
	/// Fill a schema-described record and print its values.
	Fill {
		schema: PathBuf,
		/// Read fields tagged `env` from the process environment.
		#[arg(long)]
		env: bool,
		/// Value for fields tagged `set`; repeat a key to supply several tokens.
		#[arg(long = "set", value_name = "KEY=VALUE")]
		assignments: Vec<String>,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> handover::fill::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Inspect { schema, json } => cmd::inspect::run(schema, json),
		Commands::Fill {
			schema,
			env,
			assignments,
			json,
		} => cmd::fill::run(schema, env, assignments, json),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
