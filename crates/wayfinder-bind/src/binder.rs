//! Binders and the parameter-type capabilities.
//!
//! A [`Binder<T>`] turns one captured token into a `T`. Handler parameter
//! types implement [`PathParam`], which names the type for diagnostics and
//! optionally supplies a binder of its own. User-defined types usually
//! implement [`PathBindable`] instead and get [`PathParam`] for free.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::BindError;

type BindFn<T> = dyn Fn(&str, &str) -> Result<T, String> + Send + Sync;

/// Converts a captured token into a typed value.
///
/// The function receives the capture name and the token and returns either
/// the value or a cause message; [`Binder::bind`] wraps a failure into a
/// [`BindError`] carrying the capture name and the binder's type name.
///
/// # Example
///
/// ```rust
/// use wayfinder_bind::Binder;
///
/// let port = Binder::new("Port", |token: &str| {
///     token.parse::<u16>().map_err(|e| e.to_string())
/// });
///
/// assert_eq!(port.bind("port", "8080").unwrap(), 8080);
///
/// let err = port.bind("port", "http").unwrap_err();
/// assert_eq!(err.to_string(), "Cannot parse parameter port as Port: invalid digit found in string");
/// ```
pub struct Binder<T> {
    type_name: &'static str,
    func: Arc<BindFn<T>>,
}

impl<T> Binder<T> {
    /// Creates a binder from a function of the token alone.
    pub fn new<F>(type_name: &'static str, func: F) -> Self
    where
        F: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    {
        Self {
            type_name,
            func: Arc::new(move |_param: &str, token: &str| func(token)),
        }
    }

    /// Creates a binder whose function also receives the capture name.
    pub fn named<F>(type_name: &'static str, func: F) -> Self
    where
        F: Fn(&str, &str) -> Result<T, String> + Send + Sync + 'static,
    {
        Self {
            type_name,
            func: Arc::new(func),
        }
    }

    /// Returns the type name used in bind errors.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Binds `token`, captured under `param`.
    pub fn bind(&self, param: &str, token: &str) -> Result<T, BindError> {
        (self.func)(param, token).map_err(|cause| BindError::new(param, self.type_name, cause))
    }
}

impl<T> Clone for Binder<T> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> fmt::Debug for Binder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binder")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// A type that can appear as a handler parameter.
///
/// Resolution of a binder for `T` first consults the
/// [`BinderRegistry`](crate::BinderRegistry); only when nothing is
/// registered does it fall back to [`PathParam::capability`]. A type with
/// neither is rejected when the route is declared.
///
/// The built-in scalar types implement this trait without a capability
/// and are served by the registry's default binders.
pub trait PathParam: Sized + Send + 'static {
    /// Name used in diagnostics, e.g. `Int` or `Boolean`.
    fn type_name() -> &'static str;

    /// The type's own binder, if it has one.
    fn capability() -> Option<Binder<Self>> {
        None
    }
}

/// Binding capability for user-defined parameter types.
///
/// Implementing this trait is enough to use a type as a handler parameter;
/// no registration is needed.
///
/// # Example
///
/// ```rust
/// use wayfinder_bind::{BinderRegistry, PathBindable};
///
/// struct Tagged(String);
///
/// impl PathBindable for Tagged {
///     fn bind(param: &str, token: &str) -> Result<Self, String> {
///         Ok(Tagged(format!("{param}:{token}")))
///     }
/// }
///
/// let binder = BinderRegistry::new().resolve::<Tagged>().unwrap();
/// assert_eq!(binder.bind("a", "foo").unwrap().0, "a:foo");
/// ```
pub trait PathBindable: Sized + Send + 'static {
    /// Name used in diagnostics. Defaults to the unqualified Rust type name.
    fn type_name() -> &'static str {
        short_type_name::<Self>()
    }

    /// Builds a value from the token captured under `param`.
    fn bind(param: &str, token: &str) -> Result<Self, String>;
}

impl<T: PathBindable> PathParam for T {
    fn type_name() -> &'static str {
        <T as PathBindable>::type_name()
    }

    fn capability() -> Option<Binder<Self>> {
        Some(Binder::named(<T as PathBindable>::type_name(), T::bind))
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}

macro_rules! scalar_param {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl PathParam for $ty {
                fn type_name() -> &'static str {
                    $name
                }
            }
        )*
    };
}

scalar_param! {
    String => "String",
    i32 => "Int",
    i64 => "Long",
    f32 => "Float",
    f64 => "Double",
    bool => "Boolean",
    char => "Char",
    Uuid => "UUID",
}

fn number_format(token: &str) -> String {
    format!("For input string: \"{token}\"")
}

pub(crate) fn bind_string(token: &str) -> Result<String, String> {
    Ok(token.to_string())
}

pub(crate) fn bind_int(token: &str) -> Result<i32, String> {
    token.parse().map_err(|_| number_format(token))
}

pub(crate) fn bind_long(token: &str) -> Result<i64, String> {
    token.parse().map_err(|_| number_format(token))
}

pub(crate) fn bind_float(token: &str) -> Result<f32, String> {
    token.parse().map_err(|_| number_format(token))
}

pub(crate) fn bind_double(token: &str) -> Result<f64, String> {
    token.parse().map_err(|_| number_format(token))
}

pub(crate) fn bind_boolean(token: &str) -> Result<bool, String> {
    if token.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if token.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("should be true or false".to_string())
    }
}

pub(crate) fn bind_char(token: &str) -> Result<char, String> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err("must be exactly one character".to_string()),
    }
}

pub(crate) fn bind_uuid(token: &str) -> Result<Uuid, String> {
    Uuid::parse_str(token).map_err(|e| e.to_string())
}
