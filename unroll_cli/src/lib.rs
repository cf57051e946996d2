use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Expand comment-delimited templates against inline tables, in place.",
	long_about = "comment-unroll scans a file for marker comments. Lines between `# comment-unroll \
	              template` and `# comment-unroll end` are templates, lines between `# \
	              comment-unroll table` and `# comment-unroll end` are a CSV table, and the body \
	              of every `# comment-unroll unroll` region is regenerated with one line per \
	              (row, template) pair.\n\nQuick start:\n  comment-unroll update FILE  \
	              Regenerate unroll regions\n  comment-unroll check FILE   Verify generated \
	              regions are current"
)]
pub struct UnrollCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to a config file. Defaults to `unroll.toml`, `.unroll.toml` or
	/// `.config/unroll.toml` in the current directory.
	#[arg(long, short, global = true)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Regenerate every unroll region and rewrite the files in place.
	///
	/// Each file is rendered to a scratch file first and only copied over
	/// the original once the whole file was processed without errors.
	Update {
		/// Files to rewrite.
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Print the rendered output instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that every unroll region is up to date.
	///
	/// Exits with a non-zero status code if `update` would change any of the
	/// files.
	Check {
		/// Files to check.
		#[arg(required = true)]
		files: Vec<PathBuf>,

		/// Show a line diff for each stale file.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
