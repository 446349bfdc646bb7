//! Color literal and identifier checks.

use cssparser::{ParseError, Parser, ParserInput, Token};

use crate::fragment::ends_with_closer;

const COLOR_FUNCTIONS: &[&str] = &[
    "rgb", "rgba", "hsl", "hsla", "hwb", "lab", "lch", "oklab", "oklch", "color",
];

/// CSS 2 basic color keywords plus the two special values.
const COLOR_KEYWORDS: &[&str] = &[
    "aqua",
    "black",
    "blue",
    "fuchsia",
    "gray",
    "green",
    "lime",
    "maroon",
    "navy",
    "olive",
    "orange",
    "purple",
    "red",
    "silver",
    "teal",
    "white",
    "yellow",
    "transparent",
    "currentcolor",
];

/// Returns true if `value` is a single hex color, color function, or basic
/// color keyword.
pub(crate) fn is_color_literal(value: &str) -> bool {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser.parse_entirely(parse_color).is_ok()
}

fn parse_color<'i>(parser: &mut Parser<'i, '_>) -> Result<(), ParseError<'i, ()>> {
    let start = parser.position();
    let is_function = match parser.next()? {
        Token::Hash(digits) | Token::IDHash(digits) if is_hex_color(digits) => Some(false),
        Token::Ident(name) if COLOR_KEYWORDS.contains(&name.to_ascii_lowercase().as_str()) => {
            Some(false)
        }
        Token::Function(name) if COLOR_FUNCTIONS.contains(&name.to_ascii_lowercase().as_str()) => {
            Some(true)
        }
        _ => None,
    };
    match is_function {
        None => return Err(parser.new_custom_error(())),
        Some(false) => return Ok(()),
        Some(true) => {}
    }
    parser.parse_nested_block(|args| {
        let mut count = 0;
        while let Ok(token) = args.next() {
            if !is_color_argument(token) {
                return Err(args.new_custom_error(()));
            }
            count += 1;
        }
        if count == 0 {
            Err(args.new_custom_error(()))
        } else {
            Ok(())
        }
    })?;
    // cssparser closes a function silently at end of input
    if ends_with_closer(parser.slice_from(start), ')') {
        Ok(())
    } else {
        Err(parser.new_custom_error(()))
    }
}

/// Numbers, percentages, angles, keywords, `,` and `/` separators, and
/// nested functions such as `calc()` or `var()`.
fn is_color_argument(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Number { .. }
            | Token::Percentage { .. }
            | Token::Dimension { .. }
            | Token::Ident(_)
            | Token::Comma
            | Token::Delim('/')
            | Token::Function(_)
    )
}

fn is_hex_color(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Returns true if `name` can be used as a custom property suffix or an id
/// selector without escaping.
pub(crate) fn is_css_ident(name: &str) -> bool {
    let mut bytes = name.bytes();
    match bytes.next() {
        Some(first) if first.is_ascii_alphabetic() || first == b'-' || first == b'_' => {}
        _ => return false,
    }
    bytes.all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
