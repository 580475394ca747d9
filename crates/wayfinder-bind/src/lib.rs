//! # Wayfinder Bind
//!
//! Typed binding of captured path tokens.
//!
//! A route template captures raw strings; handlers declare typed
//! parameters. This crate bridges the two: a [`Binder<T>`] converts one
//! token into a `T`, and the [`BinderRegistry`] maps each parameter type
//! to its binder.
//!
//! ## Built-in Types
//!
//! | Rust type | Type name | Accepts |
//! |-----------|-----------|---------|
//! | `String` | `String` | any token |
//! | `i32` | `Int` | decimal 32-bit integers |
//! | `i64` | `Long` | decimal 64-bit integers |
//! | `f32` | `Float` | decimal floats |
//! | `f64` | `Double` | decimal floats |
//! | `bool` | `Boolean` | `true` / `false`, any case |
//! | `char` | `Char` | exactly one character |
//! | [`uuid::Uuid`] | `UUID` | hyphenated or simple UUIDs |
//!
//! ## Custom Types
//!
//! A type either implements [`PathBindable`], which makes it bindable
//! everywhere, or is registered on a particular [`BinderRegistry`]. When
//! both exist the registry wins.
//!
//! ```rust
//! use wayfinder_bind::{BinderRegistry, PathBindable};
//!
//! #[derive(Debug, PartialEq)]
//! struct Slug(String);
//!
//! impl PathBindable for Slug {
//!     fn bind(_param: &str, token: &str) -> Result<Self, String> {
//!         if token.chars().all(|c| c.is_ascii_lowercase() || c == '-') {
//!             Ok(Slug(token.to_string()))
//!         } else {
//!             Err("not a slug".to_string())
//!         }
//!     }
//! }
//!
//! let registry = BinderRegistry::new();
//! let binder = registry.resolve::<Slug>().unwrap();
//!
//! assert_eq!(binder.bind("post", "hello-world").unwrap(), Slug("hello-world".to_string()));
//! assert_eq!(
//!     binder.bind("post", "Hello").unwrap_err().to_string(),
//!     "Cannot parse parameter post as Slug: not a slug"
//! );
//! ```

mod binder;
mod error;
mod registry;

pub use binder::{Binder, PathBindable, PathParam};
pub use error::BindError;
pub use registry::BinderRegistry;
