//! Compiler entry point.
//!
//! [`Compiler`] ties the pipeline together: the inline pass rewrites
//! enabled constructs, the host block parser consumes the rewritten
//! text, and [`HtmlRenderer`](crate::HtmlRenderer) serializes the event
//! stream. Construction is the only fallible step; `compile` always
//! produces output.

use pulldown_cmark::{Options, Parser};

use crate::construct::{ConstructKind, InlinePass, RuleSet};
use crate::error::MarkupError;
use crate::renderer::HtmlRenderer;

/// Configuration for [`Compiler`].
///
/// # Example
///
/// ```
/// use quill_markup::{Compiler, CompilerConfig, ConstructKind};
///
/// let compiler = Compiler::new(
///     CompilerConfig::new()
///         .with_construct(ConstructKind::EmDash)
///         .with_construct(ConstructKind::Figure),
/// );
/// assert!(compiler.compile("a !-- b").contains('\u{2014}'));
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    constructs: Vec<ConstructKind>,
    escape_html: bool,
}

impl CompilerConfig {
    /// Create a configuration with no constructs enabled and raw HTML
    /// passing through.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a construct at the next scan-priority position.
    ///
    /// Enabling the same kind twice keeps its first position.
    #[must_use]
    pub fn with_construct(mut self, kind: ConstructKind) -> Self {
        if !self.constructs.contains(&kind) {
            self.constructs.push(kind);
        }
        self
    }

    /// Enable every construct kind in the default order.
    #[must_use]
    pub fn with_all_constructs(mut self) -> Self {
        for kind in ConstructKind::ALL {
            self = self.with_construct(kind);
        }
        self
    }

    /// Enable constructs by configuration name, in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::UnknownConstruct`] on the first
    /// unrecognized name. Nothing is enabled in that case; setup errors
    /// never leak into a half-configured compiler.
    pub fn with_constructs<I, S>(mut self, names: I) -> Result<Self, MarkupError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self = self.with_construct(ConstructKind::from_name(name.as_ref())?);
        }
        Ok(self)
    }

    /// Escape raw HTML instead of passing it through.
    ///
    /// The blogging platform leaves this off: post bodies are trusted
    /// and may embed literal HTML.
    #[must_use]
    pub fn with_escape_html(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// The enabled construct kinds in scan-priority order.
    #[must_use]
    pub fn constructs(&self) -> &[ConstructKind] {
        &self.constructs
    }
}

/// Extended-markdown to HTML compiler.
///
/// Pure and synchronous: no I/O, no shared mutable state. Once built, a
/// compiler can serve concurrent `compile` calls; the rule set is only
/// ever read.
#[derive(Debug)]
pub struct Compiler {
    pass: InlinePass,
    escape_html: bool,
}

impl Compiler {
    /// Build a compiler from its configuration.
    #[must_use]
    pub fn new(config: CompilerConfig) -> Self {
        let mut rules = RuleSet::builder();
        for kind in config.constructs {
            rules = rules.enable(kind);
        }
        Self {
            pass: InlinePass::new(rules.build()),
            escape_html: config.escape_html,
        }
    }

    /// Whether a construct kind is enabled.
    #[must_use]
    pub fn is_enabled(&self, kind: ConstructKind) -> bool {
        self.pass.rules().is_enabled(kind)
    }

    /// Compile raw author text to HTML.
    ///
    /// Deterministic: the same input and rule set always produce the
    /// same bytes. Never fails; malformed construct syntax degrades to
    /// literal text.
    #[must_use]
    pub fn compile(&self, raw: &str) -> String {
        let prepared = self.pass.process(raw);
        let parser = Parser::new_ext(&prepared, Options::ENABLE_STRIKETHROUGH);
        HtmlRenderer::new(self.escape_html).render(parser)
    }
}
