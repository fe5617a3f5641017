//! Inline scan loop.
//!
//! [`InlinePass`] walks author text left to right, one line at a time,
//! and rewrites recognized constructs into their HTML fragments before
//! the block-level parse sees the text. Everything else passes through
//! byte-for-byte, so the standard Markdown dialect is untouched.
//!
//! Priority at each cursor position, highest first:
//!
//! 1. backslash escapes (the escaped pair is emitted verbatim, so
//!    construct rules never see escaped text);
//! 2. inline code spans (a backtick run through its matching run);
//! 3. enabled construct rules, in enabling order, first match wins;
//! 4. one literal character.
//!
//! The scan is greedy and non-backtracking: once a rule matches, the
//! cursor jumps past the full match and never reconsiders. A malformed
//! or partially written construct falls through case by case to literal
//! characters; the pass cannot fail.

use super::render::render_construct;
use super::rule::RuleSet;
use crate::fence::FenceTracker;

/// The rule-augmented inline pass.
///
/// Holds an immutable [`RuleSet`]; a single pass can serve concurrent
/// callers once built.
#[derive(Debug)]
pub struct InlinePass {
    rules: RuleSet,
}

impl InlinePass {
    /// Create a pass over a built rule set.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// The rule set this pass scans with.
    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Rewrite constructs in `input`, preserving line structure.
    ///
    /// Lines inside fenced code blocks (and the fence markers
    /// themselves) are emitted unchanged.
    #[must_use]
    pub fn process(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut fence = FenceTracker::new();
        let lines: Vec<&str> = input.lines().collect();
        let line_count = lines.len();

        for (idx, line) in lines.iter().enumerate() {
            if fence.update(line) || fence.in_fence() {
                output.push_str(line);
            } else {
                self.scan_line(line, &mut output);
            }
            if idx < line_count - 1 || input.ends_with('\n') {
                output.push('\n');
            }
        }

        output
    }

    /// Scan one line, appending the rewritten text to `out`.
    fn scan_line(&self, line: &str, out: &mut String) {
        let mut rest = line;

        while let Some(first) = rest.chars().next() {
            // Escapes outrank every rule: the pair passes through for
            // the block parser to resolve.
            if first == '\\' {
                if let Some(escaped) = rest[1..].chars().next() {
                    if escaped.is_ascii_punctuation() {
                        let taken = 1 + escaped.len_utf8();
                        out.push_str(&rest[..taken]);
                        rest = &rest[taken..];
                        continue;
                    }
                }
            }

            // Code spans outrank construct rules; their contents are
            // never rewritten.
            if first == '`' {
                let taken = code_span_len(rest);
                out.push_str(&rest[..taken]);
                rest = &rest[taken..];
                continue;
            }

            if let Some((construct, taken)) = self.rules.match_at(rest) {
                out.push_str(&render_construct(&construct));
                rest = &rest[taken..];
                continue;
            }

            out.push(first);
            rest = &rest[first.len_utf8()..];
        }
    }
}

/// Length of the code span starting at a backtick run, or of the bare
/// run when no matching closer exists on the line.
///
/// A closing run must have exactly the opening run's length.
fn code_span_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let open = bytes.iter().take_while(|&&b| b == b'`').count();

    let mut i = open;
    while i < bytes.len() {
        if bytes[i] == b'`' {
            let run = bytes[i..].iter().take_while(|&&b| b == b'`').count();
            if run == open {
                return i + run;
            }
            i += run;
        } else {
            i += 1;
        }
    }
    open
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::construct::rule::ConstructKind;

    fn pass_with_all() -> InlinePass {
        InlinePass::new(RuleSet::builder().enable_all().build())
    }

    #[test]
    fn test_plain_text_unchanged() {
        let pass = pass_with_all();
        assert_eq!(pass.process("nothing to see *here*"), "nothing to see *here*");
    }

    #[test]
    fn test_emdash_rewritten_in_place() {
        let pass = pass_with_all();
        assert_eq!(pass.process("This !-- is endash"), "This \u{2014} is endash");
    }

    #[test]
    fn test_every_token_rewritten() {
        let pass = pass_with_all();
        let out = pass.process("a !-- b !-- c");
        assert_eq!(out.matches('\u{2014}').count(), 2);
    }

    #[test]
    fn test_escape_shields_construct() {
        let pass = pass_with_all();
        let out = pass.process(r"\!-- stays literal");
        assert_eq!(out, r"\!-- stays literal");
    }

    #[test]
    fn test_backslash_before_letter_is_literal() {
        let pass = pass_with_all();
        assert_eq!(pass.process(r"C:\new !--"), "C:\\new \u{2014}");
    }

    #[test]
    fn test_code_span_shields_construct() {
        let pass = pass_with_all();
        assert_eq!(pass.process("use `!--` here"), "use `!--` here");
    }

    #[test]
    fn test_unclosed_backtick_falls_through() {
        let pass = pass_with_all();
        assert_eq!(pass.process("a ` b !--"), "a ` b \u{2014}");
    }

    #[test]
    fn test_double_backtick_span() {
        let pass = pass_with_all();
        assert_eq!(pass.process("``!-- ` !--`` end"), "``!-- ` !--`` end");
    }

    #[test]
    fn test_fenced_block_not_scanned() {
        let pass = pass_with_all();
        let input = "```\n!-- raw\n```\n!-- cooked";
        let out = pass.process(input);
        assert_eq!(out, "```\n!-- raw\n```\n\u{2014} cooked");
    }

    #[test]
    fn test_partial_construct_passes_through() {
        let pass = pass_with_all();
        assert_eq!(pass.process("!F[text][icon]"), "!F[text][icon]");
    }

    #[test]
    fn test_figure_rewritten_midline() {
        let pass = pass_with_all();
        let out = pass.process("see ![cap][alt](u) there");
        assert_eq!(
            out,
            r#"see <figure><img src="u" alt="alt" /><div>cap</div></figure> there"#
        );
    }

    #[test]
    fn test_disabled_rule_ignored() {
        let pass = InlinePass::new(RuleSet::builder().enable(ConstructKind::EmDash).build());
        let out = pass.process("Gallery[a.png] and !--");
        assert_eq!(out, "Gallery[a.png] and \u{2014}");
    }

    #[test]
    fn test_trailing_newline_preserved() {
        let pass = pass_with_all();
        assert_eq!(pass.process("one\ntwo\n"), "one\ntwo\n");
        assert_eq!(pass.process("one\ntwo"), "one\ntwo");
    }

    #[test]
    fn test_multibyte_text_passes_through() {
        let pass = pass_with_all();
        assert_eq!(pass.process("żółć !-- łąka"), "żółć \u{2014} łąka");
    }
}
