use std::collections::HashSet;

use crate::UnrollError;
use crate::UnrollResult;

/// One data row of a table, keyed by the header's field names. Values are
/// never coerced: `1` stays the string `"1"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
	fields: Vec<(String, String)>,
}

impl Record {
	pub fn new(fields: Vec<(String, String)>) -> Self {
		Self { fields }
	}

	pub fn get(&self, name: &str) -> Option<&str> {
		self.fields
			.iter()
			.find(|(field, _)| field == name)
			.map(|(_, value)| value.as_str())
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Iterate over `(field, value)` pairs in header order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.fields
			.iter()
			.map(|(field, value)| (field.as_str(), value.as_str()))
	}
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
	fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
		Self::new(
			iter.into_iter()
				.map(|(field, value)| (field.into(), value.into()))
				.collect(),
		)
	}
}

/// The raw rows of the most recently opened table region and the records
/// derived from them once the region closes.
#[derive(Debug, Clone, Default)]
pub struct Table {
	/// 1-indexed line of the marker that opened this table.
	opened_at: usize,
	rows: Vec<String>,
	records: Vec<Record>,
}

impl Table {
	/// Start a fresh table for a region opened on `line`.
	pub fn open(line: usize) -> Self {
		Self {
			opened_at: line,
			rows: Vec::new(),
			records: Vec::new(),
		}
	}

	/// Buffer a raw row. Surrounding whitespace is trimmed.
	pub fn push_row(&mut self, row: &str) {
		self.rows.push(row.trim().to_string());
	}

	/// Parse the buffered rows into records. The first row is the header.
	pub fn finalize(&mut self, delimiter: u8) -> UnrollResult<()> {
		self.records = parse_records(&self.rows, delimiter, self.opened_at)?;
		Ok(())
	}

	pub fn opened_at(&self) -> usize {
		self.opened_at
	}

	pub fn rows(&self) -> &[String] {
		&self.rows
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}
}

/// Parse delimited rows with header interpretation. Row length mismatches and
/// duplicate header names are reported as table errors located at `line`.
pub fn parse_records(rows: &[String], delimiter: u8, line: usize) -> UnrollResult<Vec<Record>> {
	let table_error = |reason: String| UnrollError::TableParse { line, reason };
	let joined = rows.join("\r\n");
	let mut reader = csv::ReaderBuilder::new()
		.delimiter(delimiter)
		.has_headers(true)
		.flexible(false)
		.from_reader(joined.as_bytes());

	let headers = reader
		.headers()
		.map_err(|e| table_error(e.to_string()))?
		.clone();

	let mut seen = HashSet::new();
	for name in &headers {
		if !seen.insert(name) {
			return Err(table_error(format!("duplicate header `{name}`")));
		}
	}

	let mut records: Vec<Record> = Vec::new();
	for row in reader.records() {
		let row = row.map_err(|e| table_error(e.to_string()))?;
		records.push(headers.iter().zip(row.iter()).collect());
	}

	Ok(records)
}
