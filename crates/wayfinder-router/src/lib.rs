//! Path-template compiler for Wayfinder.
//!
//! This crate turns path templates such as `/hello/:to` into matchers and
//! runs them against raw request paths. It knows nothing about methods,
//! handlers, or parameter types; those live in the `wayfinder` crate.
//!
//! # Template Grammar
//!
//! | Segment | Meaning | Captured value |
//! |---------|---------|----------------|
//! | `hello` | literal | - |
//! | `:to` | one path segment | percent-decoded |
//! | `*rest` | one or more trailing segments (last position only) | percent-decoded, rejoined with `/` |
//! | `$to<[a-z]+>` | regular expression over the raw path text | raw, not decoded |
//!
//! A regex capture sees exactly what the client sent, so a pattern can
//! match literal `%`-escapes.
//!
//! # Example
//!
//! ```rust
//! use wayfinder_router::CompiledPattern;
//!
//! let simple = CompiledPattern::compile("/simple/:to").unwrap();
//! let regex = CompiledPattern::compile("/regex/$to<.*>").unwrap();
//!
//! assert_eq!(simple.matches("/simple/dollar%24").unwrap().get("to"), Some("dollar$"));
//! assert_eq!(regex.matches("/regex/dollar%24").unwrap().get("to"), Some("dollar%24"));
//! ```

mod error;
mod pattern;
mod segment;
mod tokens;

pub use error::CompileError;
pub use pattern::CompiledPattern;
pub use segment::Segment;
pub use tokens::RawTokens;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoding_asymmetry() {
        let simple = CompiledPattern::compile("/simple/:to").unwrap();
        let path = CompiledPattern::compile("/path/*to").unwrap();
        let regex = CompiledPattern::compile("/regex/$to<.*>").unwrap();

        let get = |p: &CompiledPattern, uri: &str| {
            p.matches(uri).unwrap().get("to").map(str::to_string)
        };

        assert_eq!(get(&simple, "/simple/dollar%24"), Some("dollar$".to_string()));
        assert_eq!(get(&path, "/path/dollar%24"), Some("dollar$".to_string()));
        assert_eq!(get(&regex, "/regex/dollar%24"), Some("dollar%24".to_string()));
    }

    #[test]
    fn test_equivalent_encodings_capture_the_same_value() {
        let pattern = CompiledPattern::compile("/hello/:to").unwrap();
        let encoded = pattern.matches("/hello/a%24b").unwrap();
        let plain = pattern.matches("/hello/a$b").unwrap();
        assert_eq!(encoded.get("to"), plain.get("to"));
    }

    #[test]
    fn test_compile_errors_surface_immediately() {
        assert!(CompiledPattern::compile("no-slash").is_err());
        assert!(CompiledPattern::compile("/*rest/more").is_err());
        assert!(CompiledPattern::compile("/$x<(>").is_err());
    }
}
