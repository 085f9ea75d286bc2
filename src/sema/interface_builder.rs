// src/sema/interface_builder.rs
//
// Declaration pass for interfaces: validate the declaration, classify every
// method's return annotation and register the finished definition.

use rustc_hash::FxHashSet;

use crate::errors::DeclarationError;
use crate::identity::TypeDefId;
use crate::sema::Registry;
use crate::sema::decl::{Annotation, InterfaceDecl, MethodDecl};
use crate::sema::interface_registry::{FieldRequirement, InterfaceDef, Signature};
use crate::sema::types::{Decorator, ReturnKind, TypeDefKind};

impl Registry {
    /// Declare an interface.
    ///
    /// The whole declaration is validated before anything is registered, so a
    /// failed declaration leaves the registry unchanged.
    #[tracing::instrument(skip(self, decl), fields(interface = %decl.name))]
    pub fn declare_interface(&mut self, decl: InterfaceDecl) -> Result<TypeDefId, DeclarationError> {
        validate_interface(&decl)?;
        let name = self.names.intern(&decl.name);
        if self.is_declared(name) {
            return Err(DeclarationError::DuplicateType { name: decl.name });
        }

        let id = self.allocate(name, TypeDefKind::Interface);
        let fields: Vec<FieldRequirement> = decl
            .fields
            .iter()
            .map(|field| {
                if field.value.is_some() {
                    tracing::debug!(field = %field.name, "discarding value of interface field");
                }
                FieldRequirement {
                    name: self.names.intern(&field.name),
                    kind: self.classify(&decl.name, id, &field.annotation),
                }
            })
            .collect();
        let mut signatures = Vec::with_capacity(decl.methods.len());
        for method in decl.methods {
            let signature = self.build_signature(&decl.name, id, method);
            tracing::trace!(
                method = %self.names.resolve(signature.name),
                return_kind = ?signature.return_kind,
                is_default = signature.is_default(),
                "signature"
            );
            signatures.push(signature);
        }

        tracing::debug!(
            ?id,
            fields = fields.len(),
            signatures = signatures.len(),
            "declared interface"
        );
        self.interfaces.register(InterfaceDef {
            id,
            name,
            fields,
            signatures,
        });
        Ok(id)
    }

    fn build_signature(&mut self, interface_name: &str, id: TypeDefId, method: MethodDecl) -> Signature {
        let is_default = method.is_marked_default();
        let return_kind = match &method.returns {
            Some(annotation) => self.classify(interface_name, id, annotation),
            // Rejected by validate_interface.
            None => ReturnKind::Concrete(self.names.primitives.nil),
        };
        if !is_default && method.body.is_some() {
            tracing::debug!(method = %method.name, "discarding body of non-default method");
        }
        Signature {
            name: self.names.intern(&method.name),
            params: self.intern_params(&method.params),
            return_kind,
            default: if is_default { method.body } else { None },
        }
    }

    /// Classify an annotation written inside interface `interface_name`.
    fn classify(
        &mut self,
        interface_name: &str,
        id: TypeDefId,
        annotation: &Annotation,
    ) -> ReturnKind {
        match annotation {
            Annotation::SelfType => ReturnKind::SelfType,
            Annotation::Named(ty) if ty == interface_name => ReturnKind::InterfaceType(id),
            Annotation::Named(ty) => ReturnKind::Concrete(self.names.intern(ty)),
        }
    }
}

fn validate_interface(decl: &InterfaceDecl) -> Result<(), DeclarationError> {
    if let Some(base) = decl.bases.first() {
        return Err(DeclarationError::InvalidInterfaceBase {
            interface: decl.name.clone(),
            base: base.clone(),
        });
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

    for method in &decl.methods {
        if method.returns.is_none() {
            return Err(DeclarationError::MissingReturnType {
                interface: decl.name.clone(),
                method: method.name.clone(),
            });
        }
        if !method.is_marked_default() {
            continue;
        }
        if let Some(outer) = method.decorators.first()
            && *outer != Decorator::Default
        {
            return Err(DeclarationError::DefaultNotOutermost {
                interface: decl.name.clone(),
                method: method.name.clone(),
                outer: outer.to_string(),
            });
        }
        if method.body.is_none() {
            return Err(DeclarationError::MissingDefaultBody {
                interface: decl.name.clone(),
                method: method.name.clone(),
            });
        }
    }
    Ok(())
}
