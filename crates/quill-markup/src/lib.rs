//! Extended-markdown compiler for the quill blogging platform.
//!
//! Authors write posts in standard Markdown plus a small set of custom
//! inline constructs (em-dash shorthand, captioned figures, call-out
//! cards, image galleries). This crate compiles that dialect to HTML in
//! one deterministic pass.
//!
//! # Architecture
//!
//! Compilation is a three-stage pipeline:
//!
//! 1. **Inline pass** ([`InlinePass`]): a line-oriented scan that
//!    rewrites enabled constructs into fixed HTML fragments, leaving
//!    everything else untouched. Escapes and code spans outrank
//!    construct rules; malformed syntax degrades to literal text.
//! 2. **Block parse**: `pulldown-cmark`, unmodified, over the rewritten
//!    text. The emitted fragments ride through as raw HTML.
//! 3. **Rendering** ([`HtmlRenderer`]): the event stream is serialized
//!    to HTML with raw HTML passing through (post bodies are trusted).
//!
//! Compilation never fails. The only errors live at setup time, when an
//! unknown construct name is requested ([`MarkupError`]).
//!
//! # Example
//!
//! ```
//! use quill_markup::{Compiler, CompilerConfig};
//!
//! let compiler = Compiler::new(CompilerConfig::new().with_all_constructs());
//! let html = compiler.compile("This !-- is endash");
//! assert_eq!(html, "<p>This \u{2014} is endash</p>\n");
//! ```

mod compiler;
pub mod construct;
mod error;
mod fence;
mod renderer;

pub use compiler::{Compiler, CompilerConfig};
pub use construct::{Construct, ConstructKind, InlinePass, RuleSet, RuleSetBuilder};
pub use error::MarkupError;
pub use renderer::{HtmlRenderer, escape_html};
