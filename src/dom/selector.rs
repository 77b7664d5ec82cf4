//! CSS selector subset for the simulated document.
//!
//! Supported:
//! - type, universal (`*`), `#id`, `.class`
//! - attributes: `[a]`, `[a=v]`, `[a^=v]`, `[a$=v]`, `[a*=v]`, `[a~=v]`
//! - descendant (whitespace) and child (`>`) combinators
//! - selector lists (`a, b`)
//!
//! Anything else is rejected with [`DomError::UnsupportedSelector`], which is
//! also how config validation catches typos before a page is enhanced.

use super::DomError;
use super::sim::{Dom, NodeId};

/// A parsed selector list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    groups: Vec<Vec<Part>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Step {
    tag: Option<String>,
    universal: bool,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrCondition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Part {
    step: Step,
    // Relation to the part on the left.
    combinator: Option<Combinator>,
}

enum Token {
    Compound(String),
    Child,
}

impl Selector {
    /// Parse a selector list.
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let unsupported = || DomError::UnsupportedSelector(source.to_string());

        let groups = split_groups(source)
            .ok_or_else(unsupported)?
            .into_iter()
            .map(|group| parse_chain(group).ok_or_else(unsupported))
            .collect::<Result<Vec<_>, _>>()?;

        if groups.is_empty() {
            return Err(unsupported());
        }

        Ok(Self {
            source: source.to_string(),
            groups,
        })
    }

    /// The selector text this was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether `node` matches any selector in the list.
    pub(crate) fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        self.groups
            .iter()
            .any(|chain| matches_chain(dom, node, chain))
    }
}

// ============================================================================
// Matching
// ============================================================================

fn matches_chain(dom: &Dom, node: NodeId, parts: &[Part]) -> bool {
    let Some((last, rest)) = parts.split_last() else {
        return false;
    };

    if !matches_step(dom, node, &last.step) {
        return false;
    }
    if rest.is_empty() {
        return true;
    }

    match last.combinator {
        Some(Combinator::Child) => dom
            .parent_element(node)
            .is_some_and(|parent| matches_chain(dom, parent, rest)),
        Some(Combinator::Descendant) | None => {
            let mut current = dom.parent_element(node);
            while let Some(ancestor) = current {
                if matches_chain(dom, ancestor, rest) {
                    return true;
                }
                current = dom.parent_element(ancestor);
            }
            false
        }
    }
}

fn matches_step(dom: &Dom, node: NodeId, step: &Step) -> bool {
    let Some(tag) = dom.tag_name(node) else {
        return false;
    };

    if let Some(expected) = &step.tag
        && expected != tag
    {
        return false;
    }

    if let Some(id) = &step.id
        && dom.attr(node, "id") != Some(id.as_str())
    {
        return false;
    }

    if !step.classes.iter().all(|class| dom.has_class(node, class)) {
        return false;
    }

    step.attrs.iter().all(|cond| matches_attr(dom, node, cond))
}

fn matches_attr(dom: &Dom, node: NodeId, cond: &AttrCondition) -> bool {
    // Substring operators with an empty value never match.
    match cond {
        AttrCondition::Exists { key } => dom.attr(node, key).is_some(),
        AttrCondition::Eq { key, value } => dom.attr(node, key) == Some(value.as_str()),
        AttrCondition::StartsWith { key, value } => {
            !value.is_empty() && dom.attr(node, key).is_some_and(|v| v.starts_with(value.as_str()))
        }
        AttrCondition::EndsWith { key, value } => {
            !value.is_empty() && dom.attr(node, key).is_some_and(|v| v.ends_with(value.as_str()))
        }
        AttrCondition::Contains { key, value } => {
            !value.is_empty() && dom.attr(node, key).is_some_and(|v| v.contains(value.as_str()))
        }
        AttrCondition::Includes { key, value } => {
            !value.is_empty()
                && dom
                    .attr(node, key)
                    .is_some_and(|v| v.split_ascii_whitespace().any(|t| t == value))
        }
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Split a selector list on top-level commas.
fn split_groups(source: &str) -> Option<Vec<&str>> {
    let mut groups = Vec::new();
    let mut quote = None;
    let mut in_bracket = false;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if in_bracket => quote = Some(c),
            '[' => in_bracket = true,
            ']' => in_bracket = false,
            ',' if !in_bracket => {
                groups.push(source[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }

    if quote.is_some() || in_bracket {
        return None;
    }
    groups.push(source[start..].trim());

    if groups.iter().any(|g| g.is_empty()) {
        return None;
    }
    Some(groups)
}

fn tokenize(group: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote = None;
    let mut in_bracket = false;

    let flush = |current: &mut String, tokens: &mut Vec<Token>| {
        if !current.is_empty() {
            tokens.push(Token::Compound(std::mem::take(current)));
        }
    };

    for c in group.chars() {
        if let Some(q) = quote {
            current.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if in_bracket => {
                quote = Some(c);
                current.push(c);
            }
            '[' if in_bracket => return None,
            '[' => {
                in_bracket = true;
                current.push(c);
            }
            ']' => {
                in_bracket = false;
                current.push(c);
            }
            c if in_bracket => current.push(c),
            c if c.is_whitespace() => flush(&mut current, &mut tokens),
            '>' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Child);
            }
            c => current.push(c),
        }
    }

    if quote.is_some() || in_bracket {
        return None;
    }
    flush(&mut current, &mut tokens);
    Some(tokens)
}

fn parse_chain(group: &str) -> Option<Vec<Part>> {
    let mut parts: Vec<Part> = Vec::new();
    let mut pending = None;

    for token in tokenize(group)? {
        match token {
            Token::Compound(text) => {
                let combinator = if parts.is_empty() {
                    None
                } else {
                    Some(pending.take().unwrap_or(Combinator::Descendant))
                };
                parts.push(Part {
                    step: parse_step(&text)?,
                    combinator,
                });
            }
            Token::Child => {
                if parts.is_empty() || pending.is_some() {
                    return None;
                }
                pending = Some(Combinator::Child);
            }
        }
    }

    if pending.is_some() || parts.is_empty() {
        return None;
    }
    Some(parts)
}

fn parse_step(text: &str) -> Option<Step> {
    let mut step = Step::default();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '*' => {
                if step.universal || step.tag.is_some() {
                    return None;
                }
                step.universal = true;
                rest = &rest[1..];
            }
            '#' => {
                let (id, next) = take_ident(&rest[1..])?;
                if step.id.replace(id.to_string()).is_some() {
                    return None;
                }
                rest = next;
            }
            '.' => {
                let (class, next) = take_ident(&rest[1..])?;
                step.classes.push(class.to_string());
                rest = next;
            }
            '[' => {
                let end = rest.find(']')?;
                step.attrs.push(parse_attr(&rest[1..end])?);
                rest = &rest[end + 1..];
            }
            _ => {
                // A type selector must come first.
                if rest.len() != text.len() {
                    return None;
                }
                let (tag, next) = take_ident(rest)?;
                step.tag = Some(tag.to_ascii_lowercase());
                rest = next;
            }
        }
    }

    Some(step)
}

/// Split a leading identifier off `s`.
fn take_ident(s: &str) -> Option<(&str, &str)> {
    let end = s
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()))
        .map_or(s.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}

fn parse_attr(inner: &str) -> Option<AttrCondition> {
    let inner = inner.trim();

    let Some(eq) = inner.find('=') else {
        let (key, rest) = take_ident(inner)?;
        if !rest.is_empty() {
            return None;
        }
        return Some(AttrCondition::Exists {
            key: key.to_ascii_lowercase(),
        });
    };

    let (op, key_end) = match inner[..eq].chars().last() {
        Some(c @ ('^' | '$' | '*' | '~')) => (Some(c), eq - 1),
        _ => (None, eq),
    };

    let key = inner[..key_end].trim();
    let (key_ident, leftover) = take_ident(key)?;
    if !leftover.is_empty() {
        return None;
    }
    let key = key_ident.to_ascii_lowercase();
    let value = unquote(inner[eq + 1..].trim())?;

    Some(match op {
        None => AttrCondition::Eq { key, value },
        Some('^') => AttrCondition::StartsWith { key, value },
        Some('$') => AttrCondition::EndsWith { key, value },
        Some('*') => AttrCondition::Contains { key, value },
        Some(_) => AttrCondition::Includes { key, value },
    })
}

fn unquote(raw: &str) -> Option<String> {
    let mut chars = raw.chars();
    match chars.next() {
        Some(q @ ('"' | '\'')) => {
            let body = raw[1..].strip_suffix(q)?;
            Some(body.to_string())
        }
        Some(_) => {
            let (ident, rest) = take_ident(raw)?;
            rest.is_empty().then(|| ident.to_string())
        }
        None => None,
    }
}
