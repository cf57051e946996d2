use std::path::Path;
use std::path::PathBuf;

use crate::UnrollConfig;
use crate::UnrollResult;
use crate::document::Document;
use crate::machine::RegionMachine;
use crate::machine::RunStats;
use crate::marker::Markers;
use crate::sink::OutputSink;

/// Settings for a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnrollOptions {
	pub markers: Markers,
	/// Cell delimiter for table regions.
	pub delimiter: u8,
}

impl Default for UnrollOptions {
	fn default() -> Self {
		Self {
			markers: Markers::default(),
			delimiter: b',',
		}
	}
}

impl UnrollOptions {
	pub fn from_config(config: &UnrollConfig) -> UnrollResult<Self> {
		Ok(Self {
			markers: config.markers()?,
			delimiter: config.delimiter()?,
		})
	}
}

/// Output of an in-memory run.
#[derive(Debug, Clone)]
pub struct Rendered {
	pub content: String,
	pub stats: RunStats,
}

/// Result of checking whether a document is up to date.
#[derive(Debug, Clone)]
pub struct CheckReport {
	pub path: PathBuf,
	/// The document as it is on disk.
	pub current: String,
	/// What an update would write.
	pub expected: String,
	pub stats: RunStats,
}

impl CheckReport {
	/// Returns true if running an update would change the document.
	pub fn is_stale(&self) -> bool {
		self.current != self.expected
	}
}

/// Rewrite the document at `path` in place using the default markers.
pub fn unroll_file(path: &Path) -> UnrollResult<RunStats> {
	unroll_file_with_options(path, &UnrollOptions::default())
}

/// Rewrite the document at `path` in place.
///
/// Output is streamed to a scratch file first. Only once the whole document
/// has been processed is the scratch content copied over `path`, so any
/// template or table error leaves the original untouched.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn unroll_file_with_options(path: &Path, options: &UnrollOptions) -> UnrollResult<RunStats> {
	let document = Document::load(path)?;
	let mut sink = OutputSink::scratch()?;
	let stats = RegionMachine::new(document, options).run(&mut sink)?;
	sink.into_scratch()?.commit(path)?;

	Ok(stats)
}

/// Run the transform over `source` without touching the filesystem.
pub fn render_str(source: &str, options: &UnrollOptions) -> UnrollResult<Rendered> {
	let document = Document::parse(source);
	let mut sink = OutputSink::in_memory();
	let stats = RegionMachine::new(document, options).run(&mut sink)?;
	let bytes = sink.finish()?;

	Ok(Rendered {
		content: String::from_utf8_lossy(&bytes).into_owned(),
		stats,
	})
}

/// Render the document at `path` and compare it against what is on disk.
pub fn check_file(path: &Path, options: &UnrollOptions) -> UnrollResult<CheckReport> {
	let current = std::fs::read_to_string(path)?;
	let Rendered { content, stats } = render_str(&current, options)?;

	Ok(CheckReport {
		path: path.to_path_buf(),
		current,
		expected: content,
		stats,
	})
}
