//! Path template grammar.
//!
//! A template is a `/`-separated list of segments. Each segment is one of:
//!
//! | Syntax | Kind | Matches |
//! |--------|------|---------|
//! | `hello` | [`Segment::Literal`] | exactly that text, after percent-decoding |
//! | `:name` | [`Segment::Single`] | one non-empty segment, percent-decoded |
//! | `*name` | [`Segment::Wildcard`] | one or more trailing segments, percent-decoded |
//! | `$name<re>` | [`Segment::Regex`] | `re` against the raw path text, not decoded |

use std::fmt;

use crate::error::CompileError;

/// One parsed segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Fixed text, compared case-sensitively.
    Literal(String),
    /// Named capture of exactly one path segment.
    Single(String),
    /// Named capture of every remaining path segment.
    Wildcard(String),
    /// Named capture constrained by a regular expression.
    Regex {
        /// Capture name.
        name: String,
        /// The regular expression, as written in the template.
        pattern: String,
    },
}

impl Segment {
    /// Returns the capture name, or `None` for literals.
    #[must_use]
    pub fn capture_name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Single(name) | Self::Wildcard(name) | Self::Regex { name, .. } => Some(name),
        }
    }

    /// Returns true if this segment captures a value.
    #[must_use]
    pub fn is_capture(&self) -> bool {
        self.capture_name().is_some()
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Single(name) => write!(f, ":{name}"),
            Self::Wildcard(name) => write!(f, "*{name}"),
            Self::Regex { name, pattern } => write!(f, "${name}<{pattern}>"),
        }
    }
}

/// Parses a template into its ordered segments.
pub(crate) fn parse_template(template: &str) -> Result<Vec<Segment>, CompileError> {
    let mut rest = template
        .strip_prefix('/')
        .ok_or_else(|| CompileError::MissingLeadingSlash {
            template: template.to_string(),
        })?;

    let mut segments = Vec::new();
    loop {
        let (segment, remainder) = if let Some(body) = rest.strip_prefix('$') {
            parse_regex_segment(template, body)?
        } else {
            let (raw, remainder) = rest.find('/').map_or((rest, ""), |i| rest.split_at(i));
            (parse_plain_segment(template, raw)?, remainder)
        };
        segments.push(segment);

        match remainder.strip_prefix('/') {
            Some(next) => rest = next,
            None => break,
        }
    }

    validate(template, &segments)?;
    Ok(segments)
}

fn parse_plain_segment(template: &str, raw: &str) -> Result<Segment, CompileError> {
    let invalid = || CompileError::InvalidCaptureName {
        template: template.to_string(),
        segment: raw.to_string(),
    };

    if let Some(name) = raw.strip_prefix(':') {
        is_identifier(name)
            .then(|| Segment::Single(name.to_string()))
            .ok_or_else(invalid)
    } else if let Some(name) = raw.strip_prefix('*') {
        is_identifier(name)
            .then(|| Segment::Wildcard(name.to_string()))
            .ok_or_else(invalid)
    } else {
        Ok(Segment::Literal(raw.to_string()))
    }
}

/// Parses `name<pattern>` (the part after `$`), returning the segment and
/// whatever follows the closing `>`.
fn parse_regex_segment<'t>(
    template: &str,
    body: &'t str,
) -> Result<(Segment, &'t str), CompileError> {
    let name_end = body.find(|c: char| c == '<' || c == '/').unwrap_or(body.len());
    let name = &body[..name_end];
    if !is_identifier(name) || !body[name_end..].starts_with('<') {
        let segment_end = body.find('/').unwrap_or(body.len());
        return Err(CompileError::InvalidCaptureName {
            template: template.to_string(),
            segment: format!("${}", &body[..segment_end]),
        });
    }

    let unterminated = || CompileError::UnterminatedRegex {
        template: template.to_string(),
        name: name.to_string(),
    };

    // Nested <...> pairs (named groups) are part of the pattern.
    let pattern_start = name_end + 1;
    let mut depth = 1usize;
    let mut escaped = false;
    let mut pattern_end = None;
    for (i, c) in body[pattern_start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    pattern_end = Some(pattern_start + i);
                    break;
                }
            }
            _ => {}
        }
    }

    let pattern_end = pattern_end.ok_or_else(unterminated)?;
    let pattern = &body[pattern_start..pattern_end];
    if pattern.is_empty() {
        return Err(CompileError::EmptyRegex {
            template: template.to_string(),
            name: name.to_string(),
        });
    }

    let remainder = &body[pattern_end + 1..];
    if !remainder.is_empty() && !remainder.starts_with('/') {
        return Err(unterminated());
    }

    let segment = Segment::Regex {
        name: name.to_string(),
        pattern: pattern.to_string(),
    };
    Ok((segment, remainder))
}

fn validate(template: &str, segments: &[Segment]) -> Result<(), CompileError> {
    let last = segments.len().saturating_sub(1);
    for (i, segment) in segments.iter().enumerate() {
        if let Segment::Wildcard(name) = segment {
            if i != last {
                return Err(CompileError::WildcardNotLast {
                    template: template.to_string(),
                    name: name.clone(),
                });
            }
        }
    }

    let mut seen: Vec<&str> = Vec::with_capacity(segments.len());
    for name in segments.iter().filter_map(Segment::capture_name) {
        if seen.contains(&name) {
            return Err(CompileError::DuplicateCaptureName {
                template: template.to_string(),
                name: name.to_string(),
            });
        }
        seen.push(name);
    }
    Ok(())
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
