// src/sema/class_builder.rs
//
// Declaration pass for classes. Classes that list an interface as a base get
// the interface defaults bound at this point; nothing else about a class is
// derived eagerly.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::errors::DeclarationError;
use crate::identity::TypeDefId;
use crate::sema::Registry;
use crate::sema::class_registry::{ClassDef, FieldDef, MethodDef};
use crate::sema::decl::ClassDecl;
use crate::sema::types::TypeDefKind;

impl Registry {
    /// Declare a class. Bases must already be declared.
    #[tracing::instrument(skip(self, decl), fields(class = %decl.name))]
    pub fn declare_class(&mut self, decl: ClassDecl) -> Result<TypeDefId, DeclarationError> {
        let name = self.names.intern(&decl.name);
        if self.is_declared(name) {
            return Err(DeclarationError::DuplicateType { name: decl.name });
        }

        let mut bases: SmallVec<[TypeDefId; 2]> = SmallVec::new();
        for base in &decl.bases {
            let Some(base_id) = self.type_by_name(base) else {
                return Err(DeclarationError::UnknownBase {
                    class: decl.name.clone(),
                    base: base.clone(),
                });
            };
            if bases.contains(&base_id) {
                return Err(DeclarationError::DuplicateBase {
                    name: decl.name.clone(),
                    base: base.clone(),
                });
            }
            bases.push(base_id);
        }

        let mut seen = FxHashSet::default();
        for method in &decl.methods {
            if !seen.insert(method.name.as_str()) {
                return Err(DeclarationError::DuplicateMethod {
                    type_name: decl.name.clone(),
                    method: method.name.clone(),
                });
            }
        }
        for field in &decl.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(DeclarationError::DuplicateField {
                    type_name: decl.name.clone(),
                    field: field.name.clone(),
                });
            }
        }

        let id = self.allocate(name, TypeDefKind::Class);
        let mut class = ClassDef::new(id, name, bases);
        for field in decl.fields {
            let field = FieldDef {
                name: self.names.intern(&field.name),
                annotation: self.intern_annotation(&field.annotation),
                value: field.value,
            };
            class.add_field(field);
        }
        for method in decl.methods {
            if method.is_marked_default() {
                tracing::warn!(method = %method.name, "'default' has no effect on a class method");
            }
            let method = MethodDef {
                name: self.names.intern(&method.name),
                params: self.intern_params(&method.params),
                returns: method.returns.as_ref().map(|ann| self.intern_annotation(ann)),
                decorators: method.decorators.into_iter().collect(),
                body: method.body,
            };
            class.add_method(method);
        }

        self.bind_defaults(&mut class);
        tracing::debug!(
            ?id,
            fields = class.fields.len(),
            methods = class.methods.len(),
            bound_defaults = class.bound_defaults.len(),
            "declared class"
        );
        self.classes.register(class);
        Ok(id)
    }
}
