// src/runtime/native.rs
//! Method bodies supplied by the host program.

use std::fmt;
use std::sync::Arc;

use crate::errors::RuntimeError;
use crate::runtime::{Instance, Value};
use crate::sema::Registry;

type BodyFn = dyn Fn(&Registry, &Arc<Instance>, &[Value]) -> Result<Value, RuntimeError> + Send + Sync;

/// A callable method body. The receiver is supplied per call, so one body
/// serves every class it is bound to.
#[derive(Clone)]
pub struct NativeFn(Arc<BodyFn>);

impl NativeFn {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Registry, &Arc<Instance>, &[Value]) -> Result<Value, RuntimeError>
            + Send
            + Sync
            + 'static,
    {
        NativeFn(Arc::new(f))
    }

    /// A body that ignores its receiver and returns `value`.
    pub fn constant(value: Value) -> Self {
        NativeFn::new(move |_, _, _| Ok(value.clone()))
    }

    /// A body that returns its receiver.
    pub fn returning_self() -> Self {
        NativeFn::new(|_, receiver, _| Ok(Value::Instance(receiver.clone())))
    }

    pub fn call(
        &self,
        registry: &Registry,
        receiver: &Arc<Instance>,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        (self.0)(registry, receiver, args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeFn").field(&Arc::as_ptr(&self.0)).finish()
    }
}
