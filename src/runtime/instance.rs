// src/runtime/instance.rs

use rustc_hash::FxHashMap;

use crate::identity::TypeDefId;
use crate::runtime::Value;

/// An instance of a declared class. Fields are fixed at construction.
#[derive(Debug, Clone)]
pub struct Instance {
    class: TypeDefId,
    fields: FxHashMap<String, Value>,
}

impl Instance {
    pub fn new(class: TypeDefId) -> Self {
        Self {
            class,
            fields: FxHashMap::default(),
        }
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn class(&self) -> TypeDefId {
        self.class
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
