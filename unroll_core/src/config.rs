use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::UnrollError;
use crate::UnrollResult;
use crate::marker::Markers;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["unroll.toml", ".unroll.toml", ".config/unroll.toml"];

pub const DEFAULT_TEMPLATE_MARKER: &str = "# comment-unroll template";
pub const DEFAULT_TABLE_MARKER: &str = "# comment-unroll table";
pub const DEFAULT_UNROLL_MARKER: &str = "# comment-unroll unroll";
pub const DEFAULT_END_MARKER: &str = "# comment-unroll end";

/// Configuration loaded from an `unroll.toml` file.
///
/// ```toml
/// [markers]
/// template = "// comment-unroll template"
/// table = "// comment-unroll table"
/// unroll = "// comment-unroll unroll"
/// end = "// comment-unroll end"
///
/// [table]
/// delimiter = ";"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnrollConfig {
	/// The sentinel substrings that open and close regions.
	#[serde(default)]
	pub markers: MarkerConfig,
	/// How table regions are parsed.
	#[serde(default)]
	pub table: TableConfig,
}

/// Marker literals. Each one is matched by containment anywhere in a line.
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct MarkerConfig {
	#[serde(default = "default_template_marker")]
	pub template: String,
	#[serde(default = "default_table_marker")]
	pub table: String,
	#[serde(default = "default_unroll_marker")]
	pub unroll: String,
	#[serde(default = "default_end_marker")]
	pub end: String,
}

impl Default for MarkerConfig {
	fn default() -> Self {
		Self {
			template: default_template_marker(),
			table: default_table_marker(),
			unroll: default_unroll_marker(),
			end: default_end_marker(),
		}
	}
}

/// Table parsing configuration.
///
/// ```toml
/// [table]
/// delimiter = "\t"
/// ```
#[derive(Debug, Clone, Deserialize, Eq, PartialEq)]
pub struct TableConfig {
	/// Single ASCII character separating cells. Defaults to `,`.
	#[serde(default = "default_delimiter")]
	pub delimiter: String,
}

impl Default for TableConfig {
	fn default() -> Self {
		Self {
			delimiter: default_delimiter(),
		}
	}
}

fn default_template_marker() -> String {
	DEFAULT_TEMPLATE_MARKER.to_string()
}

fn default_table_marker() -> String {
	DEFAULT_TABLE_MARKER.to_string()
}

fn default_unroll_marker() -> String {
	DEFAULT_UNROLL_MARKER.to_string()
}

fn default_end_marker() -> String {
	DEFAULT_END_MARKER.to_string()
}

fn default_delimiter() -> String {
	",".to_string()
}

impl UnrollConfig {
	/// Return the first existing config file path in `root`, following
	/// [`CONFIG_FILE_CANDIDATES`] precedence.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> UnrollResult<Option<UnrollConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load and validate the config stored at `path`.
	pub fn load_from(path: &Path) -> UnrollResult<UnrollConfig> {
		let content = std::fs::read_to_string(path)?;
		let config = Self::from_toml(&content)?;
		tracing::debug!(path = %path.display(), "loaded config");

		Ok(config)
	}

	/// Parse and validate config from TOML text.
	pub fn from_toml(content: &str) -> UnrollResult<UnrollConfig> {
		let config: UnrollConfig =
			toml::from_str(content).map_err(|e| UnrollError::ConfigParse(e.to_string()))?;
		config.validate()?;

		Ok(config)
	}

	/// Check that the markers can be told apart and the delimiter is usable.
	pub fn validate(&self) -> UnrollResult<()> {
		self.markers()?;
		self.delimiter()?;
		Ok(())
	}

	/// Build the marker detector described by this config.
	pub fn markers(&self) -> UnrollResult<Markers> {
		Markers::new(
			&self.markers.template,
			&self.markers.table,
			&self.markers.unroll,
			&self.markers.end,
		)
	}

	/// The table delimiter as a single byte.
	pub fn delimiter(&self) -> UnrollResult<u8> {
		match self.table.delimiter.as_bytes() {
			[byte] if byte.is_ascii() => Ok(*byte),
			_ => Err(UnrollError::InvalidDelimiter(self.table.delimiter.clone())),
		}
	}
}
