//! Registration-time errors.
//!
//! Every failure here is raised while a route is being declared, never while
//! a request is being served. A [`CompileError`] means the DSL call itself
//! has to change.

use thiserror::Error;

/// Error raised when a route cannot be constructed.
///
/// Template grammar problems are detected by the compiler in this crate;
/// the handler-shape variants ([`ArityMismatch`](Self::ArityMismatch) and
/// [`UnsupportedParamType`](Self::UnsupportedParamType)) are raised by the
/// registration DSL once it knows which handler is being attached.
///
/// # Example
///
/// ```rust
/// use wayfinder_router::{CompiledPattern, CompileError};
///
/// let err = CompiledPattern::compile("/files/*path/raw").unwrap_err();
/// assert!(matches!(err, CompileError::WildcardNotLast { .. }));
/// assert!(err.is_template_error());
/// ```
#[derive(Debug, Error)]
pub enum CompileError {
    /// The template does not begin with `/`.
    #[error("path template '{template}' must start with '/'")]
    MissingLeadingSlash {
        /// The offending template.
        template: String,
    },

    /// A capture marker is not followed by a valid identifier.
    #[error("invalid capture '{segment}' in path template '{template}'")]
    InvalidCaptureName {
        /// The offending template.
        template: String,
        /// The segment that failed to parse.
        segment: String,
    },

    /// The same capture name is used twice.
    #[error("capture '{name}' appears more than once in path template '{template}'")]
    DuplicateCaptureName {
        /// The offending template.
        template: String,
        /// The repeated capture name.
        name: String,
    },

    /// A regex capture has an empty pattern (`$name<>`).
    #[error("regex capture '{name}' in path template '{template}' has an empty pattern")]
    EmptyRegex {
        /// The offending template.
        template: String,
        /// The capture name.
        name: String,
    },

    /// A regex capture is missing its closing `>` or is followed by
    /// something other than `/`.
    #[error("regex capture '{name}' in path template '{template}' is not terminated")]
    UnterminatedRegex {
        /// The offending template.
        template: String,
        /// The capture name.
        name: String,
    },

    /// A regex capture's pattern is not a valid regular expression.
    #[error("regex capture '{name}' in path template '{template}' is invalid: {source}")]
    InvalidRegex {
        /// The offending template.
        template: String,
        /// The capture name.
        name: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Two regex captures declare the same inner named group.
    #[error(
        "regex capture '{name}' in path template '{template}' reuses inner group name '{group}'"
    )]
    DuplicateRegexGroup {
        /// The offending template.
        template: String,
        /// The capture whose pattern repeats the group name.
        name: String,
        /// The repeated inner group name.
        group: String,
    },

    /// A wildcard capture is followed by further segments.
    #[error("wildcard capture '*{name}' must be the last segment of path template '{template}'")]
    WildcardNotLast {
        /// The offending template.
        template: String,
        /// The wildcard capture name.
        name: String,
    },

    /// The number of captures differs from the handler's parameter count.
    #[error(
        "path template '{template}' has {captures} capture(s) but the handler takes {params} parameter(s)"
    )]
    ArityMismatch {
        /// The offending template.
        template: String,
        /// Number of captures in the template.
        captures: usize,
        /// Number of handler parameters.
        params: usize,
    },

    /// A handler parameter type has neither a registered binder nor a
    /// binding capability.
    #[error(
        "parameter '{param}' of path template '{template}' has unsupported type {type_name}: no binder registered"
    )]
    UnsupportedParamType {
        /// The offending template.
        template: String,
        /// The capture the parameter is bound to.
        param: String,
        /// The declared parameter type.
        type_name: String,
    },
}

impl CompileError {
    /// Returns true if the error comes from the template grammar rather
    /// than from the handler attached to it.
    #[must_use]
    pub fn is_template_error(&self) -> bool {
        !matches!(
            self,
            Self::ArityMismatch { .. } | Self::UnsupportedParamType { .. }
        )
    }

    /// Returns the template the error refers to.
    #[must_use]
    pub fn template(&self) -> &str {
        match self {
            Self::MissingLeadingSlash { template }
            | Self::InvalidCaptureName { template, .. }
            | Self::DuplicateCaptureName { template, .. }
            | Self::EmptyRegex { template, .. }
            | Self::UnterminatedRegex { template, .. }
            | Self::InvalidRegex { template, .. }
            | Self::DuplicateRegexGroup { template, .. }
            | Self::WildcardNotLast { template, .. }
            | Self::ArityMismatch { template, .. }
            | Self::UnsupportedParamType { template, .. } => template,
        }
    }
}
