use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::UnrollResult;
use crate::document::LineEnding;

/// Append-only line writer. Output is never revisited once written.
#[derive(Debug)]
pub struct OutputSink<W: Write> {
	writer: W,
	lines: usize,
}

impl<W: Write> OutputSink<W> {
	pub fn new(writer: W) -> Self {
		Self { writer, lines: 0 }
	}

	/// Append `text` followed by `ending`.
	pub fn write_line(&mut self, text: &str, ending: LineEnding) -> UnrollResult<()> {
		self.writer.write_all(text.as_bytes())?;
		self.writer.write_all(ending.as_str().as_bytes())?;
		self.lines += 1;
		Ok(())
	}

	/// Number of lines written so far.
	pub fn lines(&self) -> usize {
		self.lines
	}

	/// Flush buffered output and hand back the underlying writer.
	pub fn finish(mut self) -> UnrollResult<W> {
		self.writer.flush()?;
		Ok(self.writer)
	}
}

impl OutputSink<Vec<u8>> {
	pub fn in_memory() -> Self {
		Self::new(Vec::new())
	}
}

impl OutputSink<BufWriter<NamedTempFile>> {
	/// Create a sink backed by a scratch file in the system temp directory.
	/// The scratch file is deleted when the sink or the [`Scratch`] it
	/// finishes into is dropped, whether or not the run succeeded.
	pub fn scratch() -> UnrollResult<Self> {
		let file = NamedTempFile::new()?;
		tracing::debug!(path = %file.path().display(), "opened scratch file");
		Ok(Self::new(BufWriter::new(file)))
	}

	/// Flush and close the writer, keeping the scratch file for commit.
	pub fn into_scratch(self) -> UnrollResult<Scratch> {
		let writer = self.finish()?;
		let file = writer.into_inner().map_err(|e| e.into_error())?;
		Ok(Scratch { file })
	}
}

/// A fully written scratch file waiting to replace the original document.
#[derive(Debug)]
pub struct Scratch {
	file: NamedTempFile,
}

impl Scratch {
	pub fn path(&self) -> &Path {
		self.file.path()
	}

	/// Read the complete scratch content back into memory.
	pub fn read_back(&mut self) -> UnrollResult<String> {
		let handle = self.file.as_file_mut();
		handle.seek(SeekFrom::Start(0))?;
		let mut content = String::new();
		handle.read_to_string(&mut content)?;
		Ok(content)
	}

	/// Overwrite `target` with the scratch content.
	///
	/// This copies instead of renaming: the scratch file usually lives on a
	/// different filesystem, where `rename` fails with `EXDEV`. The overwrite
	/// is not crash-atomic. A failure part way through the write can leave
	/// `target` truncated.
	pub fn commit(mut self, target: &Path) -> UnrollResult<()> {
		let content = self.read_back()?;
		let mut writer = BufWriter::new(File::create(target)?);
		writer.write_all(content.as_bytes())?;
		writer.flush()?;
		tracing::info!(path = %target.display(), bytes = content.len(), "committed");
		Ok(())
	}
}
