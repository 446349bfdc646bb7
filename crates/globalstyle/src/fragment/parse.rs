//! Syntactic validation of CSS text using `cssparser`.
//!
//! Two passes: a token walk that catches bad strings, stray closers and
//! blocks left open, then a rule-level pass over the top-level rule list.
//! The second pass rejects anything that would bleed into the text that
//! follows the fragment, such as a trailing selector with no block.

use std::fmt;

use cssparser::{
    AtRuleParser, BasicParseErrorKind, CowRcStr, ParseError, ParseErrorKind, Parser, ParserInput,
    ParserState, QualifiedRuleParser, SourcePosition, StyleSheetParser, Token,
};

use crate::error::CompositionFault;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SyntaxFault {
    BadString,
    BadUrl,
    UnexpectedCloser(char),
    Unclosed(char),
    MissingSelector,
    Unterminated(String),
}

impl fmt::Display for SyntaxFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxFault::BadString => f.write_str("unterminated string"),
            SyntaxFault::BadUrl => f.write_str("malformed url()"),
            SyntaxFault::UnexpectedCloser(c) => write!(f, "unexpected '{}'", c),
            SyntaxFault::Unclosed(c) => write!(f, "block never closed with '{}'", c),
            SyntaxFault::MissingSelector => f.write_str("block has no selector"),
            SyntaxFault::Unterminated(rule) => write!(f, "'{}' is not terminated with ';'", rule),
        }
    }
}

enum Step {
    Fault(SyntaxFault),
    Block(char),
    Other,
}

/// Checks `css` token by token, then rule by rule.
pub(super) fn check_syntax(css: &str) -> Result<(), CompositionFault> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let origin = parser.position();
    scan(&mut parser, origin).map_err(malformed)?;

    top_level_rules(css).map(|_| ())
}

/// Preludes of the top-level rules of `css`, in source order.
///
/// At-rules keep their `@name`. Fails on the first rule that does not end
/// in a block or, for block-less at-rules, a `;`.
pub(crate) fn top_level_rules(css: &str) -> Result<Vec<String>, CompositionFault> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut shape = RuleShape;
    let mut rules = StyleSheetParser::new(&mut parser, &mut shape);
    let mut preludes = Vec::new();

    while let Some(item) = rules.next() {
        let rule = item.map_err(|(err, _)| malformed(err))?;
        if let RuleEnd::Statement(start) = rule.end {
            if !ends_with_closer(rules.input.slice_from(start), ';') {
                let err = rules
                    .input
                    .new_custom_error(SyntaxFault::Unterminated(rule.prelude));
                return Err(malformed(err));
            }
        }
        preludes.push(rule.prelude);
    }

    Ok(preludes)
}

fn malformed(err: ParseError<'_, SyntaxFault>) -> CompositionFault {
    let detail = match err.kind {
        ParseErrorKind::Custom(fault) => fault.to_string(),
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "rule has no '{...}' block".to_string()
        }
        ParseErrorKind::Basic(kind) => format!("{:?}", kind),
    };
    CompositionFault::Malformed {
        // cssparser lines are zero-based, columns one-based
        line: err.location.line + 1,
        column: err.location.column,
        detail,
    }
}

/// True if `consumed` ends with `close` and that closer is not escaped.
pub(crate) fn ends_with_closer(consumed: &str, close: char) -> bool {
    match consumed.strip_suffix(close) {
        Some(rest) => rest.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 0,
        None => false,
    }
}

/// Returns the absolute end offset of the last token when that token was a
/// block, so the caller can tell whether its own closer was really consumed.
///
/// cssparser closes blocks silently at end of input. A block is only closed
/// for real if the consumed text ends with its unescaped closer and that
/// closer does not belong to the innermost trailing block.
fn scan<'i, 't>(
    parser: &mut Parser<'i, 't>,
    origin: SourcePosition,
) -> Result<Option<usize>, ParseError<'i, SyntaxFault>> {
    let mut last_block_end = None;

    while let Ok(token) = parser.next_including_whitespace_and_comments() {
        let step = match token {
            Token::BadString(_) => Step::Fault(SyntaxFault::BadString),
            Token::BadUrl(_) => Step::Fault(SyntaxFault::BadUrl),
            Token::CloseCurlyBracket => Step::Fault(SyntaxFault::UnexpectedCloser('}')),
            Token::CloseParenthesis => Step::Fault(SyntaxFault::UnexpectedCloser(')')),
            Token::CloseSquareBracket => Step::Fault(SyntaxFault::UnexpectedCloser(']')),
            Token::CurlyBracketBlock => Step::Block('}'),
            Token::ParenthesisBlock | Token::Function(_) => Step::Block(')'),
            Token::SquareBracketBlock => Step::Block(']'),
            _ => Step::Other,
        };

        match step {
            Step::Fault(fault) => {
                return Err(ParseError {
                    kind: ParseErrorKind::Custom(fault),
                    location: parser.current_source_location(),
                })
            }
            Step::Other => last_block_end = None,
            Step::Block(close) => {
                let location = parser.current_source_location();
                let inner_end = parser.parse_nested_block(|nested| scan(nested, origin))?;
                let consumed = parser.slice_from(origin);
                let end = consumed.len();
                if !ends_with_closer(consumed, close) || inner_end == Some(end) {
                    return Err(ParseError {
                        kind: ParseErrorKind::Custom(SyntaxFault::Unclosed(close)),
                        location,
                    });
                }
                last_block_end = Some(end);
            }
        }
    }

    Ok(last_block_end)
}

enum RuleEnd {
    Block,
    /// A block-less at-rule, with the position its text starts at.
    Statement(SourcePosition),
}

struct TopLevelRule {
    prelude: String,
    end: RuleEnd,
}

/// Accepts any prelude and any block contents; only the rule shape matters.
struct RuleShape;

fn skip_rest(input: &mut Parser<'_, '_>) {
    while input.next().is_ok() {}
}

impl<'i> QualifiedRuleParser<'i> for RuleShape {
    type Prelude = String;
    type QualifiedRule = TopLevelRule;
    type Error = SyntaxFault;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<String, ParseError<'i, SyntaxFault>> {
        if input.is_exhausted() {
            return Err(input.new_custom_error(SyntaxFault::MissingSelector));
        }
        let start = input.position();
        skip_rest(input);
        Ok(input.slice_from(start).trim().to_string())
    }

    fn parse_block<'t>(
        &mut self,
        prelude: String,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<TopLevelRule, ParseError<'i, SyntaxFault>> {
        skip_rest(input);
        Ok(TopLevelRule {
            prelude,
            end: RuleEnd::Block,
        })
    }
}

impl<'i> AtRuleParser<'i> for RuleShape {
    type Prelude = String;
    type AtRule = TopLevelRule;
    type Error = SyntaxFault;

    fn parse_prelude<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<String, ParseError<'i, SyntaxFault>> {
        let start = input.position();
        skip_rest(input);
        let rest = input.slice_from(start).trim();
        Ok(format!("@{} {}", name, rest).trim_end().to_string())
    }

    fn rule_without_block(
        &mut self,
        prelude: String,
        start: &ParserState,
    ) -> Result<TopLevelRule, ()> {
        Ok(TopLevelRule {
            prelude,
            end: RuleEnd::Statement(start.position()),
        })
    }

    fn parse_block<'t>(
        &mut self,
        prelude: String,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<TopLevelRule, ParseError<'i, SyntaxFault>> {
        skip_rest(input);
        Ok(TopLevelRule {
            prelude,
            end: RuleEnd::Block,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(css: &str) -> String {
        match check_syntax(css) {
            Err(CompositionFault::Malformed { detail, .. }) => detail,
            other => panic!("expected malformed css, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_rules_and_at_rules() {
        let css = r#"
            @import url(/base.css);
            @font-face { font-family: "Noto Sans KR"; src: url(/fonts/a.woff2) format("woff2"); }
            html, body { height: 100%; }
            a[href] > span:not(.x) { color: rgb(0 0 0 / 50%); }
            @media (min-width: 600px) { .x { margin: 0 } }
            /* comment with } inside */
        "#;
        assert!(check_syntax(css).is_ok());
    }

    #[test]
    fn test_rejects_unclosed_block() {
        assert!(detail(".x { margin: 0").contains("never closed"));
    }

    #[test]
    fn test_rejects_unclosed_outer_block_after_closed_inner() {
        assert!(detail("@media screen { .x { margin: 0 }").contains("'}'"));
    }

    #[test]
    fn test_rejects_unclosed_function() {
        assert!(detail(".x { color: red } f(0").contains("')'"));
    }

    #[test]
    fn test_rejects_escaped_closer_at_end() {
        assert!(detail(".x { a: \\}").contains("never closed"));
    }

    #[test]
    fn test_escaped_backslash_before_closer_is_fine() {
        assert!(check_syntax(".x { content: a\\\\}").is_ok());
    }

    #[test]
    fn test_rejects_curly_closer_inside_function() {
        assert!(detail(".x { color: rgb(0, 0, 0 }").contains("unexpected '}'"));
    }

    #[test]
    fn test_rejects_stray_closer() {
        assert!(detail(".x { margin: 0 } }").contains("unexpected '}'"));
    }

    #[test]
    fn test_rejects_bad_string() {
        assert!(detail(".x { content: \"oops\n }").contains("unterminated string"));
    }

    #[test]
    fn test_rejects_trailing_selector_without_block() {
        assert!(detail(".x{} .y").contains("no '{...}' block"));
    }

    #[test]
    fn test_rejects_top_level_declaration() {
        assert!(detail("margin: 0;").contains("no '{...}' block"));
    }

    #[test]
    fn test_rejects_block_without_selector() {
        assert!(detail("{ margin: 0 }").contains("no selector"));
    }

    #[test]
    fn test_rejects_unterminated_at_rule_statement() {
        assert!(detail("@import url(/base.css)").contains("not terminated"));
    }

    #[test]
    fn test_reports_one_based_line() {
        match check_syntax("a {}\nb {}\n}") {
            Err(CompositionFault::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed css, got {:?}", other),
        }
    }

    #[test]
    fn test_closer_inside_string_is_fine() {
        assert!(check_syntax(r#".x::after { content: "}"; }"#).is_ok());
    }

    #[test]
    fn test_top_level_rules_lists_preludes() {
        let rules = top_level_rules("/* c */ @font-face { a: b }\nhtml,\nbody { c: d }").unwrap();
        assert_eq!(rules, vec!["@font-face", "html,\nbody"]);
    }
}
