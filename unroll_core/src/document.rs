use std::path::Path;

use crate::UnrollResult;

/// The terminator that ended a line in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
	#[default]
	Lf,
	CrLf,
	/// The final line of a document that does not end with a newline.
	None,
}

impl LineEnding {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lf => "\n",
			Self::CrLf => "\r\n",
			Self::None => "",
		}
	}
}

/// A single line of the document, split from its terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
	pub text: String,
	pub ending: LineEnding,
}

/// The document held as an ordered sequence of lines plus a read cursor.
///
/// The cursor only moves forward. It equals `len()` once every line has been
/// consumed.
#[derive(Debug, Clone)]
pub struct Document {
	lines: Vec<Line>,
	cursor: usize,
}

impl Document {
	/// Split `content` into lines, keeping each line's terminator so that
	/// copying every line reproduces `content` exactly.
	pub fn parse(content: &str) -> Self {
		let lines = content
			.split_inclusive('\n')
			.map(|raw| {
				if let Some(text) = raw.strip_suffix("\r\n") {
					Line {
						text: text.to_string(),
						ending: LineEnding::CrLf,
					}
				} else if let Some(text) = raw.strip_suffix('\n') {
					Line {
						text: text.to_string(),
						ending: LineEnding::Lf,
					}
				} else {
					Line {
						text: raw.to_string(),
						ending: LineEnding::None,
					}
				}
			})
			.collect();

		Self { lines, cursor: 0 }
	}

	/// Read the whole document at `path` into memory.
	pub fn load(path: &Path) -> UnrollResult<Self> {
		let content = std::fs::read_to_string(path)?;
		Ok(Self::parse(&content))
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// 1-indexed line number of the cursor, for diagnostics.
	pub fn line_number(&self) -> usize {
		self.cursor + 1
	}

	pub fn is_at_end(&self) -> bool {
		self.cursor >= self.lines.len()
	}

	/// The line under the cursor, or `None` at end-of-document.
	pub fn current(&self) -> Option<&Line> {
		self.lines.get(self.cursor)
	}

	/// Move the cursor to the next line. Never moves past the end.
	pub fn advance(&mut self) {
		if self.cursor < self.lines.len() {
			self.cursor += 1;
		}
	}
}
