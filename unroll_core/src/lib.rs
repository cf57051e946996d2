//! `unroll_core` is the engine behind `comment-unroll`, a comment-driven code
//! generator. A document carries its own template lines and data table inside
//! marker comments, and every unroll region is regenerated in place from the
//! cross product of the two.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Source document
//!   -> Document (split into lines, terminators kept)
//!   -> Marker detection (template / table / unroll / end, by substring)
//!   -> Region machine (copy, buffer templates, buffer table rows)
//!   -> Table finalizer (header row + data rows into records)
//!   -> Unroll expander (records x templates, original body discarded)
//!   -> Scratch file, then copied over the original document
//! ```
//!
//! ## Markers
//!
//! Template and table lines are used whole, so in most languages they sit
//! inside a block comment or string rather than behind a line comment:
//!
//! ```rust
//! use unroll_core::UnrollOptions;
//! use unroll_core::render_str;
//!
//! let source = r#"
//! """
//! ## comment-unroll template
//! let {name} = {value};
//! ## comment-unroll end
//! ## comment-unroll table
//! name,value
//! a,1
//! b,2
//! ## comment-unroll end
//! """
//! ## comment-unroll unroll
//! this body is replaced
//! ## comment-unroll end
//! "#;
//!
//! let rendered = render_str(source, &UnrollOptions::default()).unwrap();
//! assert!(rendered.content.ends_with(
//! 	"# comment-unroll unroll\nlet a = 1;\nlet b = 2;\n# comment-unroll end\n"
//! ));
//! ```
//!
//! The marker literals can be changed in `unroll.toml`, see [`UnrollConfig`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let stats = unroll_core::unroll_file(Path::new("src/generated.py")).unwrap();
//! println!("{} line(s) generated", stats.generated_lines);
//! ```

pub use config::*;
pub use document::*;
pub use engine::*;
pub use error::*;
pub use expand::*;
pub use machine::*;
pub use marker::*;
pub use sink::*;
pub use table::*;
pub use template::*;

pub mod config;
mod document;
mod engine;
#[allow(unused_assignments)]
mod error;
mod expand;
mod machine;
mod marker;
mod sink;
mod table;
mod template;
