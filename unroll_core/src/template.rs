use logos::Logos;

use crate::UnrollError;
use crate::UnrollResult;
use crate::table::Record;

/// Raw tokens produced by logos for a single template line.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum RawToken {
	#[token("{{")]
	EscapedOpen,
	#[token("}}")]
	EscapedClose,
	#[regex(r"\{[^{}]*\}")]
	Placeholder,
	#[token("{")]
	BraceOpen,
	#[token("}")]
	BraceClose,
	#[regex(r"[^{}]+")]
	Text,
}

/// A piece of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	Literal(String),
	Field(String),
}

/// A compiled template line. Placeholders are written `{name}` and resolved
/// against a record's fields when the template is formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
	/// 1-indexed line of the document the template was defined on.
	line: usize,
	segments: Vec<Segment>,
}

impl Template {
	/// Compile the text of a template line. `line` is only used to locate
	/// errors.
	pub fn compile(source: &str, line: usize) -> UnrollResult<Self> {
		let mut segments: Vec<Segment> = Vec::new();
		let syntax_error = |offset: usize, reason: &str| {
			UnrollError::TemplateSyntax {
				line,
				column: source[..offset].chars().count() + 1,
				reason: reason.to_string(),
			}
		};

		for (token, span) in RawToken::lexer(source).spanned() {
			let slice = &source[span.clone()];
			match token {
				Ok(RawToken::Text) => push_literal(&mut segments, slice),
				Ok(RawToken::EscapedOpen) => push_literal(&mut segments, "{"),
				Ok(RawToken::EscapedClose) => push_literal(&mut segments, "}"),
				Ok(RawToken::Placeholder) => {
					let name = slice[1..slice.len() - 1].trim();
					if name.is_empty() {
						return Err(syntax_error(span.start, "empty placeholder `{}`"));
					}
					segments.push(Segment::Field(name.to_string()));
				}
				Ok(RawToken::BraceOpen) => {
					let reason = if source[span.end..].contains('}') {
						"`{` inside a placeholder"
					} else {
						"unclosed `{`"
					};
					return Err(syntax_error(span.start, reason));
				}
				Ok(RawToken::BraceClose) => {
					return Err(syntax_error(span.start, "unmatched `}`"));
				}
				Err(()) => return Err(syntax_error(span.start, "unrecognized input")),
			}
		}

		Ok(Self { line, segments })
	}

	pub fn line(&self) -> usize {
		self.line
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Names of the fields this template substitutes, in order of use.
	pub fn fields(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|segment| {
			match segment {
				Segment::Field(name) => Some(name.as_str()),
				Segment::Literal(_) => None,
			}
		})
	}

	/// Substitute every placeholder with the record's value for that field.
	pub fn render(&self, record: &Record) -> UnrollResult<String> {
		let mut output = String::new();

		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => output.push_str(text),
				Segment::Field(name) => {
					let value = record.get(name).ok_or_else(|| {
						UnrollError::UnknownField {
							line: self.line,
							field: name.clone(),
						}
					})?;
					output.push_str(value);
				}
			}
		}

		Ok(output)
	}
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) {
	if let Some(Segment::Literal(last)) = segments.last_mut() {
		last.push_str(text);
	} else {
		segments.push(Segment::Literal(text.to_string()));
	}
}
