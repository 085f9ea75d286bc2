// src/sema/membership.rs
//
// The subclass/instance queries. `is_subclass` is redirected to the
// structural matcher whenever the target is an interface; `bases` and
// `is_instance` stay purely nominal.

use crate::identity::TypeDefId;
use crate::runtime::Value;
use crate::sema::Registry;
use crate::sema::types::TypeDefKind;

impl Registry {
    /// Subclass query.
    ///
    /// For an interface target this answers structural conformance and
    /// ignores declared inheritance entirely. For a class target it is the
    /// ordinary reflexive nominal check. Unknown ids answer false.
    pub fn is_subclass(&self, class: TypeDefId, target: TypeDefId) -> bool {
        match self.kind(target) {
            Some(TypeDefKind::Interface) => self.conforms_to(class, target),
            Some(TypeDefKind::Class) => class == target || self.bases(class, target),
            None => false,
        }
    }

    /// [`Registry::is_subclass`] by type name.
    pub fn is_subclass_by_name(&self, class: &str, target: &str) -> bool {
        match (self.type_by_name(class), self.type_by_name(target)) {
            (Some(class), Some(target)) => self.is_subclass(class, target),
            _ => false,
        }
    }

    /// Nominal inheritance: true when `parent` appears anywhere in the
    /// declared base chain of `class`. Never consults structure.
    pub fn bases(&self, class: TypeDefId, parent: TypeDefId) -> bool {
        let Some(def) = self.classes.get(class) else {
            return false;
        };
        def.bases
            .iter()
            .any(|&base| base == parent || self.bases(base, parent))
    }

    /// Instance query. Nominal only: an instance of a class that merely
    /// conforms to an interface is not an instance of that interface.
    pub fn is_instance(&self, value: &Value, target: TypeDefId) -> bool {
        value.as_instance().is_some_and(|instance| {
            instance.class() == target || self.bases(instance.class(), target)
        })
    }
}
