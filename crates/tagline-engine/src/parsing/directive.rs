//! The directive grammar: one line, one element.
//!
//! ```text
//! <DEPTH tag #id .class class2 name[] | key="value" key2=value> inline text
//! ```
//!
//! DEPTH is a decimal integer or a run of `<` characters; the two
//! spellings are lexical forms of the same production and the explicit
//! integer takes precedence when both could apply.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("ident pattern"));
static ATTR_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:-]*$").expect("attr key pattern"));

/// Structured form of one directive line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directive {
    pub depth: usize,
    pub tag: String,
    /// Last `#id` token wins when repeated.
    pub id: Option<String>,
    /// Deduplicated, first-appearance order preserved.
    pub classes: Vec<String>,
    /// Literal token text of an `ident[]` token, brackets included.
    pub name: Option<String>,
    /// `key=value` pairs after `|`, in source order; later duplicate keys
    /// overwrite the earlier value in place.
    pub attrs: Vec<(String, String)>,
    /// Text after the closing `>` on the same line.
    pub inline_text: Option<String>,
}

/// Why a line that matched the directive head failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveError {
    MissingClose,
    MissingSeparator,
    MissingTagName,
    BadDepth(String),
    BadTagName(String),
    BadToken(String),
    BadAttribute(String),
}

impl fmt::Display for DirectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveError::MissingClose => write!(f, "missing closing '>'"),
            DirectiveError::MissingSeparator => write!(f, "missing space after depth marker"),
            DirectiveError::MissingTagName => write!(f, "missing tag name"),
            DirectiveError::BadDepth(depth) => write!(f, "bad depth {depth:?}"),
            DirectiveError::BadTagName(tag) => write!(f, "bad tag name {tag:?}"),
            DirectiveError::BadToken(token) => write!(f, "unrecognized token {token:?}"),
            DirectiveError::BadAttribute(key) => write!(f, "bad attribute near {key:?}"),
        }
    }
}

/// Parses one directive line. The caller has already matched the head
/// (`<` + depth marker + whitespace) via the classifier.
pub fn parse_directive(line: &str) -> Result<Directive, DirectiveError> {
    let s = line.trim_start();
    let after_open = s.strip_prefix('<').ok_or(DirectiveError::MissingTagName)?;

    // DEPTH: explicit integer takes precedence over the chevron run.
    let digits = after_open.len()
        - after_open
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .len();
    let (depth, head_start) = if digits > 0 {
        let text = &after_open[..digits];
        let depth = text
            .parse::<usize>()
            .map_err(|_| DirectiveError::BadDepth(text.to_string()))?;
        (depth, 1 + digits)
    } else {
        let chevrons = s.len() - s.trim_start_matches('<').len();
        (chevrons, chevrons)
    };

    let body = &s[head_start..];
    if !body.starts_with([' ', '\t']) {
        return Err(DirectiveError::MissingSeparator);
    }

    let close = find_unquoted(body, '>').ok_or(DirectiveError::MissingClose)?;
    let head = &body[..close];
    let inline = body[close + 1..].trim();

    let (shorthand, attr_src) = match find_unquoted(head, '|') {
        Some(at) => (&head[..at], Some(&head[at + 1..])),
        None => (head, None),
    };

    let mut tokens = shorthand.split_whitespace();
    let tag = tokens.next().ok_or(DirectiveError::MissingTagName)?;
    if !IDENT.is_match(tag) {
        return Err(DirectiveError::BadTagName(tag.to_string()));
    }

    let mut id = None;
    let mut name = None;
    let mut classes: Vec<String> = Vec::new();
    for token in tokens {
        if let Some(rest) = token.strip_prefix('#') {
            if !IDENT.is_match(rest) {
                return Err(DirectiveError::BadToken(token.to_string()));
            }
            id = Some(rest.to_string());
        } else if let Some(rest) = token.strip_prefix('.') {
            if !IDENT.is_match(rest) {
                return Err(DirectiveError::BadToken(token.to_string()));
            }
            push_class(&mut classes, rest);
        } else if let Some(base) = token.strip_suffix("[]") {
            if !IDENT.is_match(base) {
                return Err(DirectiveError::BadToken(token.to_string()));
            }
            name = Some(token.to_string());
        } else if IDENT.is_match(token) {
            // Bare words join the class run; only the first token of a run
            // conventionally carries the `.` prefix.
            push_class(&mut classes, token);
        } else {
            return Err(DirectiveError::BadToken(token.to_string()));
        }
    }

    let mut attrs = Vec::new();
    if let Some(src) = attr_src {
        parse_attrs(src, &mut attrs)?;
    }

    Ok(Directive {
        depth,
        tag: tag.to_string(),
        id,
        classes,
        name,
        attrs,
        inline_text: (!inline.is_empty()).then(|| inline.to_string()),
    })
}

/// Byte offset of the first `target` outside single or double quotes.
fn find_unquoted(s: &str, target: char) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (at, c) in s.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                c if c == target => return Some(at),
                _ => {}
            },
        }
    }
    None
}

fn push_class(classes: &mut Vec<String>, class: &str) {
    if !classes.iter().any(|existing| existing == class) {
        classes.push(class.to_string());
    }
}

/// `key="value"` pairs separated by whitespace or commas, spaces allowed
/// around `=`, values optionally quoted.
fn parse_attrs(src: &str, attrs: &mut Vec<(String, String)>) -> Result<(), DirectiveError> {
    let mut rest = src.trim_start_matches(separator);
    while !rest.is_empty() {
        let key_end = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == ',')
            .unwrap_or(rest.len());
        let key = &rest[..key_end];
        if !ATTR_KEY.is_match(key) {
            return Err(DirectiveError::BadAttribute(key.to_string()));
        }
        rest = rest[key_end..].trim_start();
        let Some(after_eq) = rest.strip_prefix('=') else {
            return Err(DirectiveError::BadAttribute(key.to_string()));
        };
        rest = after_eq.trim_start();

        let value;
        if let Some(quote) = rest.chars().next().filter(|c| *c == '"' || *c == '\'') {
            let inner = &rest[1..];
            let end = inner
                .find(quote)
                .ok_or_else(|| DirectiveError::BadAttribute(key.to_string()))?;
            value = inner[..end].to_string();
            rest = &inner[end + 1..];
        } else {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == ',')
                .unwrap_or(rest.len());
            if end == 0 {
                return Err(DirectiveError::BadAttribute(key.to_string()));
            }
            value = rest[..end].to_string();
            rest = &rest[end..];
        }
        set_attr(attrs, key, value);
        rest = rest.trim_start_matches(separator);
    }
    Ok(())
}

fn separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

fn set_attr(attrs: &mut Vec<(String, String)>, key: &str, value: String) {
    match attrs.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, slot)) => *slot = value,
        None => attrs.push((key.to_string(), value)),
    }
}
