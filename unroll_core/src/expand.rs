use std::io::Write;

use crate::UnrollResult;
use crate::document::Document;
use crate::document::LineEnding;
use crate::marker::Marker;
use crate::marker::Markers;
use crate::sink::OutputSink;
use crate::table::Record;
use crate::template::Template;

/// Write the cross product of `records` and `templates` to `sink`, one line
/// per pair. Records form the outer loop, so every template is emitted for
/// the first record before the second record is touched.
///
/// Returns the number of generated lines.
pub fn expand<W: Write>(
	templates: &[Template],
	records: &[Record],
	ending: LineEnding,
	sink: &mut OutputSink<W>,
) -> UnrollResult<usize> {
	let mut written = 0;

	for record in records {
		for template in templates {
			let line = template.render(record)?;
			sink.write_line(&line, ending)?;
			written += 1;
		}
	}

	Ok(written)
}

/// Advance the cursor past the body of an unroll region without copying or
/// buffering anything. Stops on the first line carrying a close marker and
/// leaves the cursor on it, returning its index. Returns `None` when the
/// document ends first.
pub fn scan_to_close(document: &mut Document, markers: &Markers) -> Option<usize> {
	while let Some(line) = document.current() {
		if markers.detect(&line.text) == Some(Marker::RegionClose) {
			return Some(document.cursor());
		}
		document.advance();
	}

	None
}
