use std::io::Write;

use crate::UnrollOptions;
use crate::UnrollResult;
use crate::document::Document;
use crate::document::Line;
use crate::document::LineEnding;
use crate::expand::expand;
use crate::expand::scan_to_close;
use crate::marker::Marker;
use crate::sink::OutputSink;
use crate::table::Table;
use crate::template::Template;

/// The scanner's current mode. Transitions are driven only by the marker on
/// the line under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	#[default]
	PassThrough,
	CollectingTemplate,
	CollectingTable,
	ExpandingUnroll,
	Done,
}

/// Counters collected over a single run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
	/// Lines in the source document.
	pub lines: usize,
	/// Template lines compiled across all template regions.
	pub templates: usize,
	/// Table regions that were closed and parsed.
	pub tables: usize,
	/// Unroll regions expanded.
	pub unroll_regions: usize,
	/// Lines produced by expansion.
	pub generated_lines: usize,
	/// Original unroll body lines dropped from the output.
	pub discarded_lines: usize,
}

/// Line-scanning state machine. Owns the document, the current mode, and the
/// template set and table most recently defined.
///
/// Each template or table region replaces the previous one wholesale; unroll
/// regions always read whatever is current when they open.
#[derive(Debug)]
pub struct RegionMachine<'a> {
	document: Document,
	options: &'a UnrollOptions,
	mode: Mode,
	/// Set while the cursor is on the marker line that opened the current
	/// region, which is copied but never buffered as content.
	on_opening_line: bool,
	templates: Vec<Template>,
	table: Table,
	stats: RunStats,
}

impl<'a> RegionMachine<'a> {
	pub fn new(document: Document, options: &'a UnrollOptions) -> Self {
		let stats = RunStats {
			lines: document.len(),
			..RunStats::default()
		};

		Self {
			document,
			options,
			mode: Mode::PassThrough,
			on_opening_line: false,
			templates: Vec::new(),
			table: Table::default(),
			stats,
		}
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn cursor(&self) -> usize {
		self.document.cursor()
	}

	pub fn templates(&self) -> &[Template] {
		&self.templates
	}

	pub fn table(&self) -> &Table {
		&self.table
	}

	pub fn stats(&self) -> RunStats {
		self.stats
	}

	/// Process lines until the end of the document.
	pub fn run<W: Write>(mut self, sink: &mut OutputSink<W>) -> UnrollResult<RunStats> {
		while self.step(sink)? != Mode::Done {}
		Ok(self.stats)
	}

	/// Process one unit of work: a single line, or a whole unroll region
	/// body. Returns the mode after the step.
	pub fn step<W: Write>(&mut self, sink: &mut OutputSink<W>) -> UnrollResult<Mode> {
		let Some(line) = self.document.current().cloned() else {
			self.mode = Mode::Done;
			return Ok(self.mode);
		};

		let marker = self.options.markers.detect(&line.text);
		self.transition(marker)?;

		match self.mode {
			Mode::PassThrough => self.copy(&line, sink)?,
			Mode::CollectingTemplate => {
				if !self.on_opening_line {
					let template = Template::compile(&line.text, self.document.line_number())?;
					self.templates.push(template);
					self.stats.templates += 1;
				}
				self.on_opening_line = false;
				self.copy(&line, sink)?;
			}
			Mode::CollectingTable => {
				if !self.on_opening_line {
					self.table.push_row(&line.text);
				}
				self.on_opening_line = false;
				self.copy(&line, sink)?;
			}
			Mode::ExpandingUnroll => self.unroll(&line, sink)?,
			Mode::Done => {}
		}

		Ok(self.mode)
	}

	fn transition(&mut self, marker: Option<Marker>) -> UnrollResult<()> {
		let line = self.document.line_number();

		match marker {
			Some(Marker::TemplateOpen) => {
				tracing::debug!(line, "template region opened");
				self.mode = Mode::CollectingTemplate;
				self.templates.clear();
				self.on_opening_line = true;
			}
			Some(Marker::TableOpen) => {
				tracing::debug!(line, "table region opened");
				self.mode = Mode::CollectingTable;
				self.table = Table::open(line);
				self.on_opening_line = true;
			}
			Some(Marker::UnrollOpen) => {
				tracing::debug!(line, "unroll region opened");
				self.mode = Mode::ExpandingUnroll;
				self.on_opening_line = true;
			}
			Some(Marker::RegionClose) => {
				if self.mode == Mode::CollectingTable {
					self.table.finalize(self.options.delimiter)?;
					self.stats.tables += 1;
					tracing::debug!(
						line,
						opened_at = self.table.opened_at(),
						records = self.table.records().len(),
						"table region closed"
					);
				} else {
					tracing::debug!(line, mode = ?self.mode, "region closed");
				}
				self.mode = Mode::PassThrough;
				self.on_opening_line = false;
			}
			None => {}
		}

		Ok(())
	}

	fn copy<W: Write>(&mut self, line: &Line, sink: &mut OutputSink<W>) -> UnrollResult<()> {
		sink.write_line(&line.text, line.ending)?;
		self.document.advance();
		Ok(())
	}

	/// Copy the opening marker, write the expansion, then skip the original
	/// body. The close marker is left under the cursor for the next step to
	/// copy.
	fn unroll<W: Write>(&mut self, opening: &Line, sink: &mut OutputSink<W>) -> UnrollResult<()> {
		let opened_at = self.document.line_number();
		let records = self.table.records();
		let pending = records.len() * self.templates.len();

		// A final unterminated marker line still needs a break before any
		// generated lines.
		let ending = match opening.ending {
			LineEnding::None if pending > 0 => LineEnding::Lf,
			ending => ending,
		};
		sink.write_line(&opening.text, ending)?;

		let generated_ending = match opening.ending {
			LineEnding::None => LineEnding::Lf,
			ending => ending,
		};
		let generated = expand(&self.templates, records, generated_ending, sink)?;
		self.stats.unroll_regions += 1;
		self.stats.generated_lines += generated;
		tracing::debug!(line = opened_at, generated, "unroll region expanded");

		self.document.advance();
		let body_start = self.document.cursor();
		match scan_to_close(&mut self.document, &self.options.markers) {
			Some(close) => {
				tracing::debug!(line = close + 1, opened_at, "unroll region closed");
			}
			None => {
				tracing::warn!(
					line = opened_at,
					"unroll region is never closed; its body runs to the end of the document"
				);
			}
		}
		self.stats.discarded_lines += self.document.cursor() - body_start;
		self.mode = Mode::PassThrough;
		self.on_opening_line = false;

		Ok(())
	}
}
