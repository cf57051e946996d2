use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use unroll_cli::Commands;
use unroll_cli::OutputFormat;
use unroll_cli::UnrollCli;
use unroll_core::CheckReport;
use unroll_core::RunStats;
use unroll_core::UnrollConfig;
use unroll_core::UnrollOptions;
use unroll_core::check_file;
use unroll_core::render_str;
use unroll_core::unroll_file_with_options;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = UnrollCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose, use_color);

	let result = match &args.command {
		Some(Commands::Update { files, dry_run }) => run_update(&args, files, *dry_run),
		Some(Commands::Check {
			files,
			diff,
			format,
		}) => run_check(&args, files, *diff, *format),
		None => {
			eprintln!("No subcommand specified. Run `comment-unroll --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(true) => {}
		Ok(false) => process::exit(1),
		Err(e) => {
			match e.downcast::<unroll_core::UnrollError>() {
				Ok(unroll_err) => {
					let report: miette::Report = (*unroll_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_directive = if verbose { "debug" } else { "warn" };
	let filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn load_options(args: &UnrollCli) -> Result<UnrollOptions, Box<dyn std::error::Error>> {
	let config = if let Some(path) = &args.config {
		UnrollConfig::load_from(path)?
	} else {
		let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
		UnrollConfig::load(&root)?.unwrap_or_default()
	};

	let options = UnrollOptions::from_config(&config)?;
	tracing::debug!(?options, "resolved options");

	Ok(options)
}

fn print_stats(path: &Path, stats: &RunStats) {
	println!(
		"  {}: {} region(s), {} line(s) generated, {} line(s) replaced",
		path.display(),
		stats.unroll_regions,
		stats.generated_lines,
		stats.discarded_lines
	);
}

/// Returns `Ok(true)` when every file was processed.
fn run_update(
	args: &UnrollCli,
	files: &[PathBuf],
	dry_run: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
	let options = load_options(args)?;

	if dry_run {
		for file in files {
			let source = std::fs::read_to_string(file)?;
			let rendered = render_str(&source, &options)?;
			if files.len() > 1 {
				println!("{}", colored!(format!("==> {} <==", file.display()), bold));
			}
			print!("{}", rendered.content);
		}
		return Ok(true);
	}

	let mut regions = 0;
	let mut generated = 0;
	for file in files {
		let stats = unroll_file_with_options(file, &options)?;
		regions += stats.unroll_regions;
		generated += stats.generated_lines;
		if args.verbose {
			print_stats(file, &stats);
		}
	}

	println!(
		"Updated {} file(s): {regions} region(s), {generated} line(s) generated.",
		files.len()
	);

	Ok(true)
}

/// Returns `Ok(false)` when at least one file is stale.
fn run_check(
	args: &UnrollCli,
	files: &[PathBuf],
	show_diff: bool,
	format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
	let options = load_options(args)?;
	let mut reports = Vec::with_capacity(files.len());
	for file in files {
		reports.push(check_file(file, &options)?);
	}

	let stale: Vec<&CheckReport> = reports.iter().filter(|report| report.is_stale()).collect();

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = reports
				.iter()
				.map(|report| {
					serde_json::json!({
						"file": report.path.display().to_string(),
						"stale": report.is_stale(),
						"regions": report.stats.unroll_regions,
						"generated_lines": report.stats.generated_lines,
					})
				})
				.collect();
			let output = serde_json::json!({
				"ok": stale.is_empty(),
				"files": entries,
			});
			println!("{output}");
		}
		OutputFormat::Text => {
			if stale.is_empty() {
				println!("Check passed: all unroll regions are up to date.");
				if args.verbose {
					for report in &reports {
						print_stats(&report.path, &report.stats);
					}
				}
			} else {
				eprintln!("Check failed.");
				eprintln!();
				eprintln!("Stale files:");
				for report in &stale {
					eprintln!("  {}", report.path.display());
					if show_diff {
						print_diff(&report.current, &report.expected);
					}
				}
				eprintln!();
				eprintln!(
					"{} file(s) are out of date. Run `comment-unroll update` to fix.",
					stale.len()
				);
			}
		}
	}

	Ok(stale.is_empty())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
