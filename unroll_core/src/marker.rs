use crate::UnrollError;
use crate::UnrollResult;
use crate::config::DEFAULT_END_MARKER;
use crate::config::DEFAULT_TABLE_MARKER;
use crate::config::DEFAULT_TEMPLATE_MARKER;
use crate::config::DEFAULT_UNROLL_MARKER;

/// The region boundary a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
	TemplateOpen,
	TableOpen,
	UnrollOpen,
	RegionClose,
}

impl Marker {
	/// Detection priority. A line containing several sentinels resolves to
	/// the first match in this order.
	pub const PRIORITY: [Marker; 4] = [
		Marker::TemplateOpen,
		Marker::TableOpen,
		Marker::UnrollOpen,
		Marker::RegionClose,
	];
}

/// The four sentinel substrings recognized by the scanner.
///
/// Detection is unanchored substring containment with no escaping: a
/// sentinel inside a string literal triggers a transition just like one in a
/// comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
	template: String,
	table: String,
	unroll: String,
	end: String,
}

impl Default for Markers {
	fn default() -> Self {
		Self {
			template: DEFAULT_TEMPLATE_MARKER.to_string(),
			table: DEFAULT_TABLE_MARKER.to_string(),
			unroll: DEFAULT_UNROLL_MARKER.to_string(),
			end: DEFAULT_END_MARKER.to_string(),
		}
	}
}

impl Markers {
	/// Create a detector from custom sentinels. All four must be non-empty
	/// and none may contain another.
	pub fn new(template: &str, table: &str, unroll: &str, end: &str) -> UnrollResult<Self> {
		let sentinels = [
			("template", template),
			("table", table),
			("unroll", unroll),
			("end", end),
		];

		for (name, value) in sentinels {
			if value.is_empty() {
				return Err(UnrollError::InvalidMarkers(format!(
					"the `{name}` marker is empty"
				)));
			}
		}

		// A sentinel inside another would shadow it during detection.
		for (index, (name, value)) in sentinels.iter().enumerate() {
			for (other, candidate) in &sentinels[index + 1..] {
				if candidate == value {
					return Err(UnrollError::InvalidMarkers(format!(
						"the `{name}` and `{other}` markers are both `{value}`"
					)));
				}
				if candidate.contains(value) || value.contains(candidate) {
					return Err(UnrollError::InvalidMarkers(format!(
						"the `{name}` marker `{value}` and the `{other}` marker `{candidate}` \
						 overlap"
					)));
				}
			}
		}

		Ok(Self {
			template: template.to_string(),
			table: table.to_string(),
			unroll: unroll.to_string(),
			end: end.to_string(),
		})
	}

	/// The sentinel literal for a marker kind.
	pub fn sentinel(&self, marker: Marker) -> &str {
		match marker {
			Marker::TemplateOpen => &self.template,
			Marker::TableOpen => &self.table,
			Marker::UnrollOpen => &self.unroll,
			Marker::RegionClose => &self.end,
		}
	}

	/// Report which marker `line` carries, if any.
	pub fn detect(&self, line: &str) -> Option<Marker> {
		Marker::PRIORITY
			.into_iter()
			.find(|marker| line.contains(self.sentinel(*marker)))
	}
}
