use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum UnrollError {
	#[error(transparent)]
	#[diagnostic(code(unroll::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(unroll::config_parse),
		help("check that unroll.toml is valid TOML with [markers] and/or [table] sections")
	)]
	ConfigParse(String),

	#[error("invalid marker configuration: {0}")]
	#[diagnostic(
		code(unroll::invalid_markers),
		help(
			"the template, table, unroll and end markers must be non-empty and none may contain \
			 another"
		)
	)]
	InvalidMarkers(String),

	#[error("invalid table delimiter `{0}`")]
	#[diagnostic(
		code(unroll::invalid_delimiter),
		help("the table delimiter must be a single ASCII character")
	)]
	InvalidDelimiter(String),

	#[error("malformed template on line {line}, column {column}: {reason}")]
	#[diagnostic(
		code(unroll::template_syntax),
		help("placeholders are written `{{name}}`; use `{{{{` and `}}}}` for literal braces")
	)]
	TemplateSyntax {
		line: usize,
		column: usize,
		reason: String,
	},

	#[error("template on line {line} references unknown field `{field}`")]
	#[diagnostic(
		code(unroll::unknown_field),
		help("add a `{field}` column to the table header or fix the placeholder name")
	)]
	UnknownField { line: usize, field: String },

	#[error("malformed table opened on line {line}: {reason}")]
	#[diagnostic(code(unroll::table_parse))]
	TableParse { line: usize, reason: String },
}

pub type UnrollResult<T> = Result<T, UnrollError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
