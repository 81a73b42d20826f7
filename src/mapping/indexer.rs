//! Pattern analysis run once per rule at load time.
//!
//! # Responsibilities
//! - Locate every named placeholder `(?<name>...)` in the raw pattern text
//! - Map each placeholder name to its capture-group number
//! - Split the pattern into a substitution template for forward mapping
//!
//! # Design Decisions
//! - Group numbers come from the compiled regex's own capture-name table,
//!   so anonymous groups may appear anywhere without shifting indices
//! - The textual scan must agree with the compiled table; any disagreement
//!   is a load-time error
//! - Nested placeholders are rejected: the template could not substitute them
//! - The matcher is anchored at both ends (whole-string match)
//! - The empty pattern is valid and matches only the empty path (site root)

use indexmap::IndexMap;
use regex::Regex;
use thiserror::Error;

/// Placeholder replaced by nothing in forward mapping.
pub const CONTEXT_PATH: &str = "contextPath";

/// Placeholder replaced by the URI's current path prefix in forward mapping.
pub const WEBAPP_ROOT: &str = "webAppRoot";

/// Errors raised while analysing a pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid regular expression: {0}")]
    Compile(#[from] regex::Error),

    #[error("unbalanced parenthesis at byte {0}")]
    Unbalanced(usize),

    #[error("unterminated placeholder name at byte {0}")]
    UnterminatedName(usize),

    #[error("placeholder `{inner}` is nested inside placeholder `{outer}`")]
    NestedPlaceholder { outer: String, inner: String },

    #[error("placeholders {scanned:?} disagree with compiled capture names {compiled:?}")]
    PlaceholderMismatch {
        scanned: Vec<String>,
        compiled: Vec<String>,
    },
}

/// What a placeholder resolves to during forward substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// An ordinary request parameter.
    Parameter(String),
    ContextPath,
    WebAppRoot,
}

impl Placeholder {
    fn from_name(name: &str) -> Self {
        match name {
            CONTEXT_PATH => Placeholder::ContextPath,
            WEBAPP_ROOT => Placeholder::WebAppRoot,
            other => Placeholder::Parameter(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Placeholder::Parameter(name) => name,
            Placeholder::ContextPath => CONTEXT_PATH,
            Placeholder::WebAppRoot => WEBAPP_ROOT,
        }
    }
}

/// One piece of the forward-mapping template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Pattern text copied verbatim.
    Literal(String),
    Placeholder(Placeholder),
}

/// Result of analysing one pattern.
#[derive(Debug, Clone)]
pub struct IndexedPattern {
    /// Anchored matcher used by reverse mapping.
    pub matcher: Regex,
    /// Placeholder name → 1-based capture-group number, in order of appearance.
    pub groups: IndexMap<String, usize>,
    /// Literal text and placeholders in order of appearance.
    pub template: Vec<Segment>,
}

/// Location of a placeholder in the raw pattern text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    name: String,
    start: usize,
    end: usize,
}

/// Analyse `pattern` into matcher, group index and template.
pub fn index_pattern(pattern: &str) -> Result<IndexedPattern, PatternError> {
    let spans = scan_placeholders(pattern)?;
    // `(?x)\n` ends a trailing verbose-mode comment; the newline is then whitespace.
    let matcher = Regex::new(&format!("^(?:{}(?x)\n)$", pattern))?;

    let groups: IndexMap<String, usize> = matcher
        .capture_names()
        .enumerate()
        .filter_map(|(index, name)| name.map(|n| (n.to_string(), index)))
        .collect();

    let scanned: Vec<&str> = spans.iter().map(|s| s.name.as_str()).collect();
    if !scanned.iter().copied().eq(groups.keys().map(String::as_str)) {
        return Err(PatternError::PlaceholderMismatch {
            scanned: scanned.iter().map(|s| s.to_string()).collect(),
            compiled: groups.keys().cloned().collect(),
        });
    }

    let template = build_template(pattern, &spans);

    Ok(IndexedPattern {
        matcher,
        groups,
        template,
    })
}

/// Find placeholder spans, skipping escapes and character classes.
fn scan_placeholders(pattern: &str) -> Result<Vec<Span>, PatternError> {
    let bytes = pattern.as_bytes();
    let mut spans = Vec::new();
    // One entry per open group; `Some` for placeholders.
    let mut open: Vec<Option<(String, usize)>> = Vec::new();
    let mut class_depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 2;
                continue;
            }
            b'[' => {
                class_depth += 1;
                i += 1;
                // A leading `]` (after an optional `^`) is literal.
                if class_depth == 1 {
                    if bytes.get(i) == Some(&b'^') {
                        i += 1;
                    }
                    if bytes.get(i) == Some(&b']') {
                        i += 1;
                    }
                }
                continue;
            }
            b']' if class_depth > 0 => class_depth -= 1,
            b'(' if class_depth == 0 => {
                match placeholder_name(pattern, i)? {
                    Some((name, name_end)) => {
                        if let Some(Some((outer, _))) = open.iter().rev().find(|g| g.is_some()) {
                            return Err(PatternError::NestedPlaceholder {
                                outer: outer.clone(),
                                inner: name,
                            });
                        }
                        open.push(Some((name, i)));
                        i = name_end;
                        continue;
                    }
                    None => open.push(None),
                }
            }
            b')' if class_depth == 0 => match open.pop() {
                Some(Some((name, start))) => spans.push(Span {
                    name,
                    start,
                    end: i + 1,
                }),
                Some(None) => {}
                None => return Err(PatternError::Unbalanced(i)),
            },
            _ => {}
        }
        i += 1;
    }

    if let Some(pos) = open.iter().rev().find_map(|g| g.as_ref().map(|(_, start)| *start)) {
        return Err(PatternError::Unbalanced(pos));
    }
    if !open.is_empty() {
        return Err(PatternError::Unbalanced(bytes.len()));
    }

    spans.sort_by_key(|s| s.start);
    Ok(spans)
}

/// If a group opening at `start` is named, return its name and the byte
/// offset just past the closing `>`.
fn placeholder_name(pattern: &str, start: usize) -> Result<Option<(String, usize)>, PatternError> {
    let rest = &pattern[start..];
    let name_start = if rest.starts_with("(?P<") {
        start + 4
    } else if rest.starts_with("(?<") && !rest.starts_with("(?<=") && !rest.starts_with("(?<!") {
        start + 3
    } else {
        return Ok(None);
    };

    match pattern[name_start..].find('>') {
        Some(len) => Ok(Some((
            pattern[name_start..name_start + len].to_string(),
            name_start + len + 1,
        ))),
        None => Err(PatternError::UnterminatedName(start)),
    }
}

fn build_template(pattern: &str, spans: &[Span]) -> Vec<Segment> {
    let mut template = Vec::with_capacity(spans.len() * 2 + 1);
    let mut cursor = 0;

    for span in spans {
        push_literal(&mut template, &pattern[cursor..span.start]);
        template.push(Segment::Placeholder(Placeholder::from_name(&span.name)));
        cursor = span.end;
    }
    push_literal(&mut template, &pattern[cursor..]);

    strip_anchors(&mut template);
    template
}

fn push_literal(template: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        template.push(Segment::Literal(text.to_string()));
    }
}

/// Drop a leading `^` and an unescaped trailing `$`.
fn strip_anchors(template: &mut Vec<Segment>) {
    if let Some(Segment::Literal(text)) = template.first_mut() {
        if let Some(rest) = text.strip_prefix('^') {
            *text = rest.to_string();
        }
    }
    if let Some(Segment::Literal(text)) = template.last_mut() {
        if let Some(rest) = text.strip_suffix('$') {
            let backslashes = rest.bytes().rev().take_while(|b| *b == b'\\').count();
            if backslashes % 2 == 0 {
                *text = rest.to_string();
            }
        }
    }
    template.retain(|s| !matches!(s, Segment::Literal(text) if text.is_empty()));
}
