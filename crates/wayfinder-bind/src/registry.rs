//! The binder registry.
//!
//! Maps parameter types to their binders. Routes resolve the binder for each
//! handler parameter once, when they are declared; request handling never
//! touches the registry.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::binder::{
    bind_boolean, bind_char, bind_double, bind_float, bind_int, bind_long, bind_string, bind_uuid,
    Binder, PathParam,
};

/// Type-indexed table of binders.
///
/// [`BinderRegistry::new`] comes pre-loaded with binders for `String`,
/// `i32`, `i64`, `f32`, `f64`, `bool`, `char` and [`Uuid`]. Registering a
/// binder for a type that already has one replaces it.
///
/// # Example
///
/// ```rust
/// use wayfinder_bind::BinderRegistry;
///
/// let mut registry = BinderRegistry::new();
/// registry.register::<bool>(|token| match token {
///     "yes" => Ok(true),
///     "no" => Ok(false),
///     _ => Err("should be yes or no".to_string()),
/// });
///
/// let binder = registry.resolve::<bool>().unwrap();
/// assert!(binder.bind("flag", "yes").unwrap());
/// assert!(binder.bind("flag", "true").is_err());
/// ```
#[derive(Clone)]
pub struct BinderRegistry {
    binders: HashMap<TypeId, Arc<dyn Any + Send + Sync>>,
}

impl BinderRegistry {
    /// Creates a registry holding the default binders.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry
            .register_binder(Binder::new(String::type_name(), bind_string))
            .register_binder(Binder::new(i32::type_name(), bind_int))
            .register_binder(Binder::new(i64::type_name(), bind_long))
            .register_binder(Binder::new(f32::type_name(), bind_float))
            .register_binder(Binder::new(f64::type_name(), bind_double))
            .register_binder(Binder::new(bool::type_name(), bind_boolean))
            .register_binder(Binder::new(char::type_name(), bind_char))
            .register_binder(Binder::new(Uuid::type_name(), bind_uuid));
        registry
    }

    /// Creates a registry with no binders at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            binders: HashMap::new(),
        }
    }

    /// Registers a token-only binder for `T`, named after `T::type_name()`.
    pub fn register<T: PathParam>(
        &mut self,
        func: impl Fn(&str) -> Result<T, String> + Send + Sync + 'static,
    ) -> &mut Self {
        self.register_binder(Binder::new(T::type_name(), func))
    }

    /// Registers a prepared binder for `T`.
    pub fn register_binder<T: PathParam>(&mut self, binder: Binder<T>) -> &mut Self {
        self.binders.insert(TypeId::of::<T>(), Arc::new(binder));
        self
    }

    /// Returns the registered binder for `T`, ignoring capabilities.
    #[must_use]
    pub fn lookup<T: PathParam>(&self) -> Option<Binder<T>> {
        self.binders
            .get(&TypeId::of::<T>())
            .and_then(|entry| entry.downcast_ref::<Binder<T>>())
            .cloned()
    }

    /// Resolves the binder for `T`.
    ///
    /// The registry wins over the type's own capability. Returns `None` if
    /// neither provides one.
    #[must_use]
    pub fn resolve<T: PathParam>(&self) -> Option<Binder<T>> {
        self.lookup::<T>().or_else(T::capability)
    }

    /// Returns true if a binder for `T` is registered.
    #[must_use]
    pub fn contains<T: PathParam>(&self) -> bool {
        self.binders.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of registered binders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.binders.len()
    }

    /// Returns true if no binders are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.binders.is_empty()
    }
}

impl Default for BinderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BinderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinderRegistry")
            .field("binders", &self.binders.len())
            .finish()
    }
}
