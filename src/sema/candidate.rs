// src/sema/candidate.rs
//
// Read-only view of a class as the matcher sees it: its fields and methods
// plus those inherited from class bases, in resolution order. Bound defaults
// appear too, tagged with the interface that supplied them.

use rustc_hash::FxHashSet;

use crate::identity::{NameId, TypeDefId};
use crate::sema::Registry;
use crate::sema::class_registry::FieldDef;
use crate::sema::types::{Param, TypeAnnotation};

/// Where a visible method comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSource {
    Declared,
    /// A default bound from this interface.
    Default(TypeDefId),
}

/// A method as the matcher sees it.
#[derive(Debug, Clone, Copy)]
pub struct VisibleMethod<'r> {
    /// The class that declares the method, or that the default is bound to.
    pub owner: TypeDefId,
    pub name: NameId,
    pub params: &'r [Param],
    pub returns: Option<TypeAnnotation>,
    pub source: MethodSource,
}

impl VisibleMethod<'_> {
    fn same_shape(&self, other: &VisibleMethod<'_>) -> bool {
        self.returns == other.returns
            && self.params.len() == other.params.len()
            && self
                .params
                .iter()
                .zip(other.params)
                .all(|(x, y)| x.name == y.name)
    }
}

/// Members visible on a class, in resolution order.
#[derive(Debug, Clone)]
pub struct Candidate<'r> {
    pub class: TypeDefId,
    fields: Vec<(TypeDefId, &'r FieldDef)>,
    methods: Vec<VisibleMethod<'r>>,
}

impl<'r> Candidate<'r> {
    /// The visible method of this name.
    pub fn method(&self, name: NameId) -> Option<VisibleMethod<'r>> {
        self.methods.iter().find(|method| method.name == name).copied()
    }

    /// The visible field of this name, with the class that declares it.
    pub fn field(&self, name: NameId) -> Option<(TypeDefId, &'r FieldDef)> {
        self.fields
            .iter()
            .find(|(_, field)| field.name == name)
            .copied()
    }

    pub fn methods(&self) -> impl Iterator<Item = &VisibleMethod<'r>> + '_ {
        self.methods.iter()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'r FieldDef> + '_ {
        self.fields.iter().map(|(_, field)| *field)
    }

    /// Number of visible members.
    pub fn len(&self) -> usize {
        self.fields.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Superset check: every member of `other` appears here with the same
    /// shape. Methods compare parameter names and return annotation, fields
    /// compare annotation.
    pub fn contains(&self, other: &Candidate<'_>) -> bool {
        let methods = other.methods().all(|theirs| {
            self.method(theirs.name)
                .is_some_and(|ours| ours.same_shape(theirs))
        });
        methods
            && other.fields().all(|theirs| {
                self.field(theirs.name)
                    .is_some_and(|(_, ours)| ours.annotation == theirs.annotation)
            })
    }

    /// Both views expose exactly the same member shapes.
    pub fn same_shape(&self, other: &Candidate<'_>) -> bool {
        self.len() == other.len() && self.contains(other)
    }
}

impl Registry {
    /// Build the candidate view of a class. `None` for interfaces and
    /// unknown ids.
    pub fn candidate(&self, class: TypeDefId) -> Option<Candidate<'_>> {
        self.classes.get(class)?;
        let mut view = Candidate {
            class,
            fields: Vec::new(),
            methods: Vec::new(),
        };
        let mut seen = FxHashSet::default();
        self.collect_members(class, &mut seen, &mut view);
        Some(view)
    }

    /// Same walk as method dispatch: own members, then bound defaults, then
    /// bases depth-first. The first member of a name hides later ones.
    fn collect_members<'r>(
        &'r self,
        class: TypeDefId,
        seen: &mut FxHashSet<NameId>,
        out: &mut Candidate<'r>,
    ) {
        let Some(def) = self.classes.get(class) else {
            return;
        };
        for field in &def.fields {
            if seen.insert(field.name) {
                out.fields.push((class, field));
            }
        }
        for method in &def.methods {
            if seen.insert(method.name) {
                out.methods.push(VisibleMethod {
                    owner: class,
                    name: method.name,
                    params: &method.params,
                    returns: method.returns,
                    source: MethodSource::Declared,
                });
            }
        }
        for name in def.bound_default_names() {
            let Some(bound) = def.bound_default(name) else {
                continue;
            };
            if seen.insert(name) {
                out.methods.push(VisibleMethod {
                    owner: class,
                    name,
                    params: &bound.params,
                    returns: Some(bound.returns),
                    source: MethodSource::Default(bound.interface),
                });
            }
        }
        for &base in &def.bases {
            self.collect_members(base, seen, out);
        }
    }
}
