// src/runtime/mod.rs
pub mod dispatch;
pub mod global;
pub mod instance;
pub mod native;
pub mod value;

pub use dispatch::{MethodOrigin, ResolvedMethod};
pub use instance::Instance;
pub use native::NativeFn;
pub use value::Value;
