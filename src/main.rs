use clap::{ArgAction, Parser, ValueEnum};
use hilbert_check::{Checker, CheckerConfig, CitationOrder, Verdict};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
	Auto,
	Always,
	Never,
}

/// Checks a numbered proof in the calculus with axioms AX1-AX3, modus ponens and substitution.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
	/// Proof file; `-` or nothing reads standard input.
	input: Option<PathBuf>,

	/// Only let lines cite lines with smaller numbers.
	#[arg(long)]
	forward_only: bool,

	#[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
	color: ColorChoice,

	/// Log more; repeat for more detail.
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::WARN,
		1 => LevelFilter::INFO,
		2 => LevelFilter::DEBUG,
		_ => LevelFilter::TRACE,
	};
	let filter = EnvFilter::builder()
		.with_default_directive(level.into())
		.from_env_lossy();
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}

/// Proof text and the name to show in snippets.
fn read_input(input: Option<&PathBuf>) -> io::Result<(String, Option<String>)> {
	match input {
		Some(path) if path.as_os_str() != "-" => {
			let text = std::fs::read_to_string(path)?;
			Ok((text, Some(path.display().to_string())))
		},
		_ => {
			let mut text = String::new();
			io::stdin().read_to_string(&mut text)?;
			Ok((text, None))
		},
	}
}

fn main() -> ExitCode {
	let args = Args::parse();
	init_logging(args.verbose);

	let (text, origin) = match read_input(args.input.as_ref()) {
		Ok(x) => x,
		Err(err) => {
			eprintln!("can't read proof: {}", err);
			return ExitCode::from(5);
		},
	};

	let color = match args.color {
		ColorChoice::Auto => io::stdout().is_terminal(),
		ColorChoice::Always => true,
		ColorChoice::Never => false,
	};
	colored::control::set_override(color);

	let citation_order = if args.forward_only { CitationOrder::EarlierOnly } else { CitationOrder::Anywhere };
	let checker = Checker::new(CheckerConfig { citation_order });
	tracing::debug!(config = ?checker.config(), origin = ?origin, "checking proof");
	let verification = checker.verify(&text);

	print!("{}", verification.report.render(color));
	if let Verdict::Rejected(rejection) = &verification.verdict {
		eprintln!("{}", rejection.to_snippet(&text, origin.as_deref(), color));
	}

	ExitCode::from(verification.verdict.exit_code())
}
