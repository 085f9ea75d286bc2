// src/sema/mod.rs
pub mod candidate;
pub mod class_builder;
pub mod class_registry;
pub mod conformance;
pub mod decl;
pub mod default_binder;
pub mod interface_builder;
pub mod interface_registry;
pub mod lower;
pub mod membership;
pub mod registry;
pub mod types;

pub use candidate::{Candidate, MethodSource, VisibleMethod};
pub use class_registry::{BoundDefault, ClassDef, ClassRegistry, FieldDef, MethodDef};
pub use conformance::{Conformance, ConformanceCache, Mismatch, MismatchReason};
pub use decl::{Annotation, ClassDecl, FieldDecl, InterfaceDecl, MethodDecl, ParamDecl};
pub use interface_registry::{FieldRequirement, InterfaceDef, InterfaceRegistry, Signature};
pub use lower::{LowerError, LoweredProgram, lower_program};
pub use registry::{Registry, TypeDef};
pub use types::{Decorator, Param, Params, ReturnKind, TypeAnnotation, TypeDefKind};
