//! Handler variants and the conversions that produce them.
//!
//! A route's handler is one of four closed variants, one per arity. Each
//! variant owns a closure that already holds the binders for its parameter
//! types, so invoking it only has to bind tokens and call the user function.
//!
//! Plain functions and closures become handlers through [`IntoHandler`]
//! (synchronous) and [`IntoAsyncHandler`] (returning a future). Both are
//! implemented for `Fn()` up to `Fn(A, B, C)` where every parameter type
//! implements [`PathParam`].

use std::fmt;
use std::future::Future;

use wayfinder_bind::{BindError, Binder, BinderRegistry, PathParam};
use wayfinder_router::{CompileError, CompiledPattern, RawTokens};

use crate::dispatch::Dispatch;

/// A handler with no captured parameters.
pub type NullaryCall<R> = Box<dyn Fn() -> Dispatch<R> + Send + Sync>;

/// A handler that binds its parameters from captured tokens.
pub type BoundCall<R> = Box<dyn Fn(&RawTokens) -> Result<Dispatch<R>, BindError> + Send + Sync>;

/// A handler, tagged by the number of parameters it binds.
pub enum Handler<R> {
    /// No parameters.
    Zero(NullaryCall<R>),
    /// One parameter.
    One(BoundCall<R>),
    /// Two parameters.
    Two(BoundCall<R>),
    /// Three parameters.
    Three(BoundCall<R>),
}

impl<R> Handler<R> {
    /// Returns the number of parameters the handler binds.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Zero(_) => 0,
            Self::One(_) => 1,
            Self::Two(_) => 2,
            Self::Three(_) => 3,
        }
    }
}

impl<R> fmt::Debug for Handler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({})", self.arity())
    }
}

/// Resolves binders for a handler's parameters while a route is declared.
#[derive(Debug)]
pub struct ParamResolver<'a> {
    registry: &'a BinderRegistry,
    pattern: &'a CompiledPattern,
}

impl<'a> ParamResolver<'a> {
    pub(crate) fn new(registry: &'a BinderRegistry, pattern: &'a CompiledPattern) -> Self {
        Self { registry, pattern }
    }

    /// Resolves the binder for the parameter at `position`.
    ///
    /// Fails with [`CompileError::UnsupportedParamType`] if `T` has neither
    /// a registered binder nor a binding capability.
    pub fn resolve<T: PathParam>(&self, position: usize) -> Result<Binder<T>, CompileError> {
        self.registry
            .resolve::<T>()
            .ok_or_else(|| CompileError::UnsupportedParamType {
                template: self.pattern.template().to_string(),
                param: self
                    .pattern
                    .capture_names()
                    .nth(position)
                    .unwrap_or_default()
                    .to_string(),
                type_name: T::type_name().to_string(),
            })
    }
}

/// Conversion of a synchronous function into a [`Handler`].
///
/// `Args` is the tuple of parameter types and only serves to tell the
/// implementations apart.
pub trait IntoHandler<Args, R>: Sized {
    /// Type names of the parameters, in declaration order.
    fn param_types() -> Vec<&'static str>;

    /// Resolves the parameter binders and wraps the function.
    fn into_handler(self, resolver: &ParamResolver<'_>) -> Result<Handler<R>, CompileError>;
}

/// Conversion of a future-returning function into a [`Handler`].
pub trait IntoAsyncHandler<Args, R>: Sized {
    /// Type names of the parameters, in declaration order.
    fn param_types() -> Vec<&'static str>;

    /// Resolves the parameter binders and wraps the function.
    fn into_handler(self, resolver: &ParamResolver<'_>) -> Result<Handler<R>, CompileError>;
}

fn bind_at<T>(binder: &Binder<T>, tokens: &RawTokens, index: usize) -> Result<T, BindError> {
    let (name, token) = tokens.get_index(index).unwrap_or_default();
    binder.bind(name, token)
}

impl<F, R> IntoHandler<(), R> for F
where
    F: Fn() -> R + Send + Sync + 'static,
    R: Send + 'static,
{
    fn param_types() -> Vec<&'static str> {
        Vec::new()
    }

    fn into_handler(self, _resolver: &ParamResolver<'_>) -> Result<Handler<R>, CompileError> {
        Ok(Handler::Zero(Box::new(move || Dispatch::Ready(self()))))
    }
}

impl<F, Fut, R> IntoAsyncHandler<(), R> for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: Send + 'static,
{
    fn param_types() -> Vec<&'static str> {
        Vec::new()
    }

    fn into_handler(self, _resolver: &ParamResolver<'_>) -> Result<Handler<R>, CompileError> {
        Ok(Handler::Zero(Box::new(move || Dispatch::Pending(Box::pin(self())))))
    }
}

// Binding happens left to right inside the argument list, so the first
// failing binder returns before later ones run.
macro_rules! impl_handlers {
    ($variant:ident; $($ty:ident $binder:ident $index:tt),+) => {
        impl<F, R, $($ty,)+> IntoHandler<($($ty,)+), R> for F
        where
            F: Fn($($ty),+) -> R + Send + Sync + 'static,
            $($ty: PathParam,)+
            R: Send + 'static,
        {
            fn param_types() -> Vec<&'static str> {
                vec![$($ty::type_name()),+]
            }

            fn into_handler(
                self,
                resolver: &ParamResolver<'_>,
            ) -> Result<Handler<R>, CompileError> {
                $(let $binder = resolver.resolve::<$ty>($index)?;)+
                Ok(Handler::$variant(Box::new(
                    move |tokens: &RawTokens| -> Result<Dispatch<R>, BindError> {
                        Ok(Dispatch::Ready(self($(bind_at(&$binder, tokens, $index)?),+)))
                    },
                )))
            }
        }

        impl<F, Fut, R, $($ty,)+> IntoAsyncHandler<($($ty,)+), R> for F
        where
            F: Fn($($ty),+) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = R> + Send + 'static,
            $($ty: PathParam,)+
            R: Send + 'static,
        {
            fn param_types() -> Vec<&'static str> {
                vec![$($ty::type_name()),+]
            }

            fn into_handler(
                self,
                resolver: &ParamResolver<'_>,
            ) -> Result<Handler<R>, CompileError> {
                $(let $binder = resolver.resolve::<$ty>($index)?;)+
                Ok(Handler::$variant(Box::new(
                    move |tokens: &RawTokens| -> Result<Dispatch<R>, BindError> {
                        let fut = self($(bind_at(&$binder, tokens, $index)?),+);
                        Ok(Dispatch::Pending(Box::pin(fut)))
                    },
                )))
            }
        }
    };
}

impl_handlers!(One; A a 0);
impl_handlers!(Two; A a 0, B b 1);
impl_handlers!(Three; A a 0, B b 1, C c 2);
