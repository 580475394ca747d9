//! Compiled path patterns.
//!
//! A template compiles into a single anchored regular expression. Literals
//! are spelled out inside it, each character accepting either its raw form
//! or its percent-encoding, so the engine settles the extent of a regex or
//! wildcard capture against the literals that follow it. Captures get one
//! group each and are post-processed by kind:
//!
//! - single captures are percent-decoded,
//! - wildcard captures are percent-decoded segment by segment and rejoined,
//! - regex captures are returned exactly as they appeared on the wire.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Write;

use regex::Regex;

use crate::error::CompileError;
use crate::segment::{parse_template, Segment};
use crate::tokens::RawTokens;

/// A path template compiled into a matcher.
///
/// Compiled patterns are immutable; matching takes `&self` and has no side
/// effects, so one pattern can serve any number of threads.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("/hello/:to").unwrap();
///
/// let tokens = pattern.matches("/hello/dollar%24").unwrap();
/// assert_eq!(tokens.get("to"), Some("dollar$"));
///
/// assert!(pattern.matches("/hello").is_none());
/// assert!(pattern.matches("/hello/a/b").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    template: String,
    segments: Vec<Segment>,
    /// Regex group holding each segment, parallel to `segments`. Literals
    /// have none.
    groups: Vec<Option<usize>>,
    capture_count: usize,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles a path template.
    pub fn compile(template: &str) -> Result<Self, CompileError> {
        let segments = parse_template(template)?;

        let mut expr = String::from("^");
        let mut groups = Vec::with_capacity(segments.len());
        let mut inner_names = HashSet::new();
        let mut last_regex = None;
        let mut next_group = 1;
        for segment in &segments {
            expr.push('/');
            match segment {
                Segment::Literal(text) => {
                    groups.push(None);
                    push_literal(&mut expr, text);
                }
                Segment::Single(_) => {
                    groups.push(Some(next_group));
                    next_group += 1;
                    expr.push_str("([^/]+)");
                }
                Segment::Wildcard(_) => {
                    groups.push(Some(next_group));
                    next_group += 1;
                    expr.push_str("((?s:.+))");
                }
                Segment::Regex { name, pattern } => {
                    let inner = Regex::new(pattern).map_err(|source| CompileError::InvalidRegex {
                        template: template.to_string(),
                        name: name.clone(),
                        source,
                    })?;
                    for group in inner.capture_names().flatten() {
                        if !inner_names.insert(group.to_string()) {
                            return Err(CompileError::DuplicateRegexGroup {
                                template: template.to_string(),
                                name: name.clone(),
                                group: group.to_string(),
                            });
                        }
                    }
                    groups.push(Some(next_group));
                    // Groups inside the user's pattern shift every later index.
                    next_group += inner.captures_len();
                    last_regex = Some(name.as_str());
                    expr.push_str("((?:");
                    expr.push_str(pattern);
                    expr.push_str("))");
                }
            }
        }
        expr.push('$');

        let regex = Regex::new(&expr).map_err(|source| CompileError::InvalidRegex {
            template: template.to_string(),
            name: last_regex.unwrap_or_default().to_string(),
            source,
        })?;

        let capture_count = segments.iter().filter(|s| s.is_capture()).count();
        tracing::trace!(
            template,
            regex = %regex,
            captures = capture_count,
            "compiled path template"
        );

        Ok(Self {
            template: template.to_string(),
            segments,
            groups,
            capture_count,
            regex,
        })
    }

    /// Matches a raw request path (percent-encoded, without query string).
    ///
    /// Returns the captured tokens in template order, or `None` if the path
    /// does not have this pattern's shape.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<RawTokens> {
        let captures = self.regex.captures(path)?;

        let mut tokens = RawTokens::with_capacity(self.capture_count);
        for (segment, group) in self.segments.iter().zip(&self.groups) {
            let raw = group
                .and_then(|group| captures.get(group))
                .map_or("", |m| m.as_str());
            match segment {
                Segment::Literal(_) => {}
                Segment::Single(name) => tokens.push(name.as_str(), decode_segment(raw)?),
                Segment::Wildcard(name) => tokens.push(name.as_str(), decode_segments(raw)?),
                Segment::Regex { name, .. } => tokens.push(name.as_str(), raw),
            }
        }
        Some(tokens)
    }

    /// Returns true if the path matches this pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.matches(path).is_some()
    }

    /// Returns the template this pattern was compiled from.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the parsed segments in template order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of captures in the template.
    #[must_use]
    pub fn capture_count(&self) -> usize {
        self.capture_count
    }

    /// Iterates over capture names, left to right.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(Segment::capture_name)
    }
}

/// Appends a literal that accepts each character raw or percent-encoded,
/// with either case of hex digit.
fn push_literal(expr: &mut String, text: &str) {
    let mut buf = [0; 4];
    for c in text.chars() {
        expr.push_str("(?:");
        expr.push_str(&regex::escape(c.encode_utf8(&mut buf)));
        expr.push('|');
        for byte in c.encode_utf8(&mut buf).bytes() {
            expr.push('%');
            for digit in format!("{byte:02X}").chars() {
                if digit.is_ascii_alphabetic() {
                    let _ = write!(expr, "[{digit}{}]", digit.to_ascii_lowercase());
                } else {
                    expr.push(digit);
                }
            }
        }
        expr.push(')');
    }
}

/// Percent-decodes one segment. Invalid UTF-8 after decoding is a miss.
fn decode_segment(raw: &str) -> Option<Cow<'_, str>> {
    urlencoding::decode(raw).ok()
}

/// Percent-decodes each `/`-separated segment and rejoins them.
fn decode_segments(raw: &str) -> Option<String> {
    let decoded = raw
        .split('/')
        .map(decode_segment)
        .collect::<Option<Vec<_>>>()?;
    Some(decoded.join("/"))
}
