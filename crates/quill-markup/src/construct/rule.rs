//! Inline rule registry.
//!
//! A [`RuleSet`] is an immutable, ordered sequence of compiled pattern
//! matchers built once by [`RuleSetBuilder`]. Enabling order is scan
//! priority: at a given position the first rule whose pattern matches
//! wins, and the scanner never revisits the decision.
//!
//! Two independently built rule sets share nothing; configuring one can
//! never be observed through the other.

use regex::Regex;

use crate::error::MarkupError;

/// The recognizable custom construct kinds.
///
/// Kinds are enabled independently; disabling one removes its pattern
/// from the scan order without affecting the others' relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConstructKind {
    /// `!--` shorthand for an em-dash.
    EmDash,
    /// `![caption][alt](url)` image with caption.
    Figure,
    /// `!F[text][icon][color][class](url)` call-out card.
    Callout,
    /// `Gallery[url1, url2, ...]` expandable image grid.
    Gallery,
}

impl ConstructKind {
    /// Every construct kind, in the default enabling order.
    pub const ALL: [Self; 4] = [Self::EmDash, Self::Figure, Self::Callout, Self::Gallery];

    /// Stable name used in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EmDash => "emdash",
            Self::Figure => "figure",
            Self::Callout => "callout",
            Self::Gallery => "gallery",
        }
    }

    /// Resolve a configuration name to a kind.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::UnknownConstruct`] for any name that is not
    /// one of `emdash`, `figure`, `callout`, `gallery`. This is the
    /// fail-fast path for misconfiguration; it is never deferred to
    /// compile time.
    pub fn from_name(name: &str) -> Result<Self, MarkupError> {
        match name {
            "emdash" => Ok(Self::EmDash),
            "figure" => Ok(Self::Figure),
            "callout" => Ok(Self::Callout),
            "gallery" => Ok(Self::Gallery),
            other => Err(MarkupError::UnknownConstruct(other.to_owned())),
        }
    }

    /// Pattern over the rest of the line, anchored at the scan cursor.
    ///
    /// Captures are non-greedy: a field containing the construct's own
    /// closing delimiter truncates at the first occurrence. That matches
    /// the historical behavior and is kept deliberately.
    fn pattern(self) -> &'static str {
        match self {
            Self::EmDash => r"^!--",
            Self::Figure => r"^!\[(.*?)\]\[(.*?)\]\((.*?)\)",
            Self::Callout => r"^!F\[(.*?)\]\[(.*?)\]\[(.*?)\]\[(.*?)\]\((.*?)\)",
            Self::Gallery => r"^Gallery\[(.*?)\]",
        }
    }
}

/// A recognized construct with its captured fields.
///
/// Produced by [`RuleSet::match_at`]; consumed by the renderer. The
/// variant set is closed so first-match dispatch stays exhaustive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Construct {
    /// A single em-dash.
    EmDash,
    /// Captioned image.
    Figure {
        caption: String,
        alt: String,
        url: String,
    },
    /// Call-out card ("woo").
    Callout {
        text: String,
        icon: String,
        /// Hex color without the leading `#`.
        color: String,
        /// Extra CSS class, may be empty.
        class: String,
        url: String,
    },
    /// Image grid; URLs in input order, whitespace-trimmed.
    Gallery { urls: Vec<String> },
}

impl Construct {
    /// The kind this construct was recognized as.
    #[must_use]
    pub fn kind(&self) -> ConstructKind {
        match self {
            Self::EmDash => ConstructKind::EmDash,
            Self::Figure { .. } => ConstructKind::Figure,
            Self::Callout { .. } => ConstructKind::Callout,
            Self::Gallery { .. } => ConstructKind::Gallery,
        }
    }
}

/// A single enabled rule: a kind plus its compiled pattern.
#[derive(Debug)]
struct InlineRule {
    kind: ConstructKind,
    pattern: Regex,
}

impl InlineRule {
    fn new(kind: ConstructKind) -> Self {
        Self {
            kind,
            pattern: Regex::new(kind.pattern()).unwrap(),
        }
    }
}

/// Ordered registry of enabled inline rules.
///
/// Built once via [`RuleSet::builder`] and read-only afterwards, so a
/// single set can be shared across concurrent compile calls.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<InlineRule>,
}

impl RuleSet {
    /// Start building a rule set.
    #[must_use]
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// Whether a kind is enabled in this set.
    #[must_use]
    pub fn is_enabled(&self, kind: ConstructKind) -> bool {
        self.rules.iter().any(|r| r.kind == kind)
    }

    /// Number of enabled rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are enabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Try every rule at the start of `text`, in enabling order.
    ///
    /// Returns the first match together with the number of bytes it
    /// consumed. First-match-wins: later rules are not consulted once a
    /// pattern matches, even if they would match a longer span.
    pub(crate) fn match_at(&self, text: &str) -> Option<(Construct, usize)> {
        for rule in &self.rules {
            if let Some(caps) = rule.pattern.captures(text) {
                let end = caps.get(0)?.end();
                let group = |i: usize| caps.get(i).map_or("", |m| m.as_str()).to_owned();
                let construct = match rule.kind {
                    ConstructKind::EmDash => Construct::EmDash,
                    ConstructKind::Figure => Construct::Figure {
                        caption: group(1),
                        alt: group(2),
                        url: group(3),
                    },
                    ConstructKind::Callout => Construct::Callout {
                        text: group(1),
                        icon: group(2),
                        color: group(3),
                        class: group(4),
                        url: group(5),
                    },
                    ConstructKind::Gallery => Construct::Gallery {
                        urls: caps
                            .get(1)
                            .map_or("", |m| m.as_str())
                            .split(',')
                            .map(|url| url.trim().to_owned())
                            .collect(),
                    },
                };
                return Some((construct, end));
            }
        }
        None
    }
}

/// Builder for [`RuleSet`].
///
/// Enabling the same kind twice is a no-op; the first position wins.
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<InlineRule>,
}

impl RuleSetBuilder {
    /// Enable a construct kind at the next priority position.
    #[must_use]
    pub fn enable(mut self, kind: ConstructKind) -> Self {
        if !self.rules.iter().any(|r| r.kind == kind) {
            self.rules.push(InlineRule::new(kind));
        }
        self
    }

    /// Enable a construct by its configuration name.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::UnknownConstruct`] for an unrecognized name.
    pub fn enable_by_name(self, name: &str) -> Result<Self, MarkupError> {
        Ok(self.enable(ConstructKind::from_name(name)?))
    }

    /// Enable every construct kind in the default order.
    #[must_use]
    pub fn enable_all(mut self) -> Self {
        for kind in ConstructKind::ALL {
            self = self.enable(kind);
        }
        self
    }

    /// Finish building; the resulting set is immutable.
    #[must_use]
    pub fn build(self) -> RuleSet {
        RuleSet { rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_roundtrip() {
        for kind in ConstructKind::ALL {
            assert_eq!(ConstructKind::from_name(kind.name()), Ok(kind));
        }
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(
            ConstructKind::from_name("wibble"),
            Err(MarkupError::UnknownConstruct("wibble".to_owned()))
        );
    }

    #[test]
    fn test_empty_set_matches_nothing() {
        let rules = RuleSet::builder().build();
        assert!(rules.is_empty());
        assert!(rules.match_at("!-- text").is_none());
    }

    #[test]
    fn test_enable_is_idempotent() {
        let rules = RuleSet::builder()
            .enable(ConstructKind::EmDash)
            .enable(ConstructKind::EmDash)
            .build();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_emdash_match() {
        let rules = RuleSet::builder().enable(ConstructKind::EmDash).build();
        let (construct, len) = rules.match_at("!-- rest").unwrap();
        assert_eq!(construct, Construct::EmDash);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_match_only_at_position_zero() {
        let rules = RuleSet::builder().enable(ConstructKind::EmDash).build();
        assert!(rules.match_at("a !--").is_none());
    }

    #[test]
    fn test_figure_captures() {
        let rules = RuleSet::builder().enable(ConstructKind::Figure).build();
        let (construct, len) = rules.match_at("![cap][alt text](http://x/y.png)").unwrap();
        assert_eq!(
            construct,
            Construct::Figure {
                caption: "cap".to_owned(),
                alt: "alt text".to_owned(),
                url: "http://x/y.png".to_owned(),
            }
        );
        assert_eq!(len, "![cap][alt text](http://x/y.png)".len());
    }

    #[test]
    fn test_plain_image_is_not_a_figure() {
        let rules = RuleSet::builder().enable(ConstructKind::Figure).build();
        assert!(rules.match_at("![just an image](http://x/y.png)").is_none());
    }

    #[test]
    fn test_callout_captures_empty_class() {
        let rules = RuleSet::builder().enable(ConstructKind::Callout).build();
        let (construct, _) = rules
            .match_at("!F[This is woo][done][FF0000][](https://example.com/)")
            .unwrap();
        assert_eq!(
            construct,
            Construct::Callout {
                text: "This is woo".to_owned(),
                icon: "done".to_owned(),
                color: "FF0000".to_owned(),
                class: String::new(),
                url: "https://example.com/".to_owned(),
            }
        );
    }

    #[test]
    fn test_gallery_urls_trimmed_in_order() {
        let rules = RuleSet::builder().enable(ConstructKind::Gallery).build();
        let (construct, _) = rules.match_at("Gallery[ a.png ,b.png,  c.png]").unwrap();
        assert_eq!(
            construct,
            Construct::Gallery {
                urls: vec!["a.png".to_owned(), "b.png".to_owned(), "c.png".to_owned()],
            }
        );
    }

    #[test]
    fn test_gallery_truncates_at_first_bracket() {
        // A `]` inside the list ends the capture; the rest stays literal.
        let rules = RuleSet::builder().enable(ConstructKind::Gallery).build();
        let (construct, len) = rules.match_at("Gallery[x]y]").unwrap();
        assert_eq!(
            construct,
            Construct::Gallery {
                urls: vec!["x".to_owned()],
            }
        );
        assert_eq!(len, "Gallery[x]".len());
    }

    #[test]
    fn test_partial_syntax_matches_nothing() {
        let rules = RuleSet::builder().enable_all().build();
        assert!(rules.match_at("!F[text][icon]").is_none());
        assert!(rules.match_at("![cap][alt](unclosed").is_none());
    }

    #[test]
    fn test_first_match_wins_in_enabling_order() {
        // Both patterns start with `!` but only one matches `!--`; the
        // registry must still consult them strictly in enabling order.
        let rules = RuleSet::builder()
            .enable(ConstructKind::Figure)
            .enable(ConstructKind::EmDash)
            .build();
        let (construct, _) = rules.match_at("!--").unwrap();
        assert_eq!(construct, Construct::EmDash);
        assert!(rules.is_enabled(ConstructKind::Figure));
    }

    #[test]
    fn test_enable_by_name_unknown_fails_fast() {
        let result = RuleSet::builder().enable_by_name("sparkles");
        assert!(matches!(result, Err(MarkupError::UnknownConstruct(_))));
    }
}
