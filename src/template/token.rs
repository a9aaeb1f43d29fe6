use thiserror::Error;

/// One parsed piece of a version-number template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied through verbatim
    Literal(String),
    /// A `${NAME}` or `${NAME, arg}` substitution token
    Token { name: String, arg: Option<TokenArg> },
}

/// Optional token argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenArg {
    /// Zero-padded minimum width, written as a run of X's: `${BUILDS_TODAY, XXX}`
    Width(usize),
    /// Quoted strftime pattern: `${BUILD_DATE_FORMATTED, "%Y.%m.%d"}`
    Pattern(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unterminated token in template: '{0}'")]
    Unterminated(String),
    #[error("empty token in template")]
    EmptyToken,
    #[error("invalid token name: '{0}'")]
    InvalidName(String),
    #[error("invalid argument for token '{name}': '{arg}' (use a run of X's or a quoted date pattern)")]
    InvalidArgument { name: String, arg: String },
    #[error("invalid date pattern: '{0}'")]
    BadDatePattern(String),
}

/// Parse a version-number template into segments.
///
/// `$` not followed by `{` is literal, so shell-style `$VAR` passes through
/// untouched. An opening `${` without a closing `}` is an error.
pub fn parse_template(template: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '$' || chars.peek().map(|(_, c)| *c) != Some('{') {
            literal.push(c);
            continue;
        }
        chars.next(); // consume '{'

        let rest = &template[pos..];
        let body: String = chars
            .by_ref()
            .map(|(_, c)| c)
            .take_while(|c| *c != '}')
            .collect();
        // take_while consumed the '}' if there was one
        if !rest[2..].contains('}') {
            return Err(TemplateError::Unterminated(rest.to_string()));
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(std::mem::take(&mut literal)));
        }
        segments.push(parse_token(&body)?);
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn parse_token(body: &str) -> Result<Segment, TemplateError> {
    let (name, arg) = match body.split_once(',') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (body.trim(), None),
    };

    if name.is_empty() {
        return Err(TemplateError::EmptyToken);
    }
    if !is_valid_name(name) {
        return Err(TemplateError::InvalidName(name.to_string()));
    }

    let arg = match arg {
        None => None,
        Some(a) => Some(parse_arg(name, a)?),
    };

    Ok(Segment::Token {
        name: name.to_string(),
        arg,
    })
}

fn parse_arg(name: &str, arg: &str) -> Result<TokenArg, TemplateError> {
    if arg.len() >= 2 && arg.starts_with('"') && arg.ends_with('"') {
        return Ok(TokenArg::Pattern(arg[1..arg.len() - 1].to_string()));
    }
    if !arg.is_empty() && arg.chars().all(|c| c == 'X') {
        return Ok(TokenArg::Width(arg.len()));
    }
    Err(TemplateError::InvalidArgument {
        name: name.to_string(),
        arg: arg.to_string(),
    })
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(name: &str, arg: Option<TokenArg>) -> Segment {
        Segment::Token {
            name: name.to_string(),
            arg,
        }
    }

    #[test]
    fn test_parse_plain_literal() {
        let segments = parse_template("1.2.3").unwrap();
        assert_eq!(segments, vec![Segment::Literal("1.2.3".to_string())]);
    }

    #[test]
    fn test_parse_single_token() {
        let segments = parse_template("${BUILDS_TODAY}").unwrap();
        assert_eq!(segments, vec![token("BUILDS_TODAY", None)]);
    }

    #[test]
    fn test_parse_mixed() {
        let segments = parse_template("1.${BUILD_YEAR}.${BUILDS_TODAY}-final").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("1.".to_string()),
                token("BUILD_YEAR", None),
                Segment::Literal(".".to_string()),
                token("BUILDS_TODAY", None),
                Segment::Literal("-final".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_width_argument() {
        let segments = parse_template("${BUILDS_TODAY, XXX}").unwrap();
        assert_eq!(segments, vec![token("BUILDS_TODAY", Some(TokenArg::Width(3)))]);
    }

    #[test]
    fn test_parse_pattern_argument() {
        let segments = parse_template("${BUILD_DATE_FORMATTED, \"%Y.%m.%d\"}").unwrap();
        assert_eq!(
            segments,
            vec![token(
                "BUILD_DATE_FORMATTED",
                Some(TokenArg::Pattern("%Y.%m.%d".to_string()))
            )]
        );
    }

    #[test]
    fn test_dollar_without_brace_is_literal() {
        let segments = parse_template("$HOME/1.0").unwrap();
        assert_eq!(segments, vec![Segment::Literal("$HOME/1.0".to_string())]);
    }

    #[test]
    fn test_trailing_dollar_is_literal() {
        let segments = parse_template("1.0$").unwrap();
        assert_eq!(segments, vec![Segment::Literal("1.0$".to_string())]);
    }

    #[test]
    fn test_unterminated_token() {
        let err = parse_template("1.0.${BUILDS_TODAY").unwrap_err();
        assert_eq!(
            err,
            TemplateError::Unterminated("${BUILDS_TODAY".to_string())
        );
    }

    #[test]
    fn test_empty_token() {
        assert_eq!(parse_template("${}").unwrap_err(), TemplateError::EmptyToken);
    }

    #[test]
    fn test_invalid_name() {
        assert_eq!(
            parse_template("${1BAD}").unwrap_err(),
            TemplateError::InvalidName("1BAD".to_string())
        );
        assert_eq!(
            parse_template("${BAD NAME}").unwrap_err(),
            TemplateError::InvalidName("BAD NAME".to_string())
        );
    }

    #[test]
    fn test_invalid_argument() {
        let err = parse_template("${BUILDS_TODAY, 3}").unwrap_err();
        assert_eq!(
            err,
            TemplateError::InvalidArgument {
                name: "BUILDS_TODAY".to_string(),
                arg: "3".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_template_parses_to_nothing() {
        assert_eq!(parse_template("").unwrap(), vec![]);
    }
}
