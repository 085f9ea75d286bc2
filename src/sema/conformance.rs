// src/sema/conformance.rs
//
// Structural conformance of a class to an interface.
//
// A class conforms when, for every signature of the interface, it has a
// visible method of that name whose parameter names match and whose return
// annotation satisfies the signature's return kind:
//
// - `SelfType`: the annotation is `Self`. Naming a concrete type, even the
//   class's own name, does not count.
// - `InterfaceType(I)`: the annotation names `I`, or names a class that
//   itself conforms to `I`.
// - `Concrete(T)`: the annotation names exactly `T`.
//
// Visible methods include defaults bound from other interfaces. A default
// bound from the interface under test never counts as an implementation of
// it; a missing default-flagged method is instead satisfied only for classes
// that nominally inherit the interface.
//
// Required fields are checked the same way against the class's visible
// fields, with the field annotation standing in for the return annotation.

use std::fmt;
use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::identity::TypeDefId;
use crate::sema::Registry;
use crate::sema::candidate::{Candidate, MethodSource};
use crate::sema::interface_registry::{FieldRequirement, InterfaceDef, Signature};
use crate::sema::types::{ReturnKind, TypeAnnotation, TypeDefKind, display_params};

/// Why one signature was not satisfied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchReason {
    /// No member of that name on the candidate.
    Missing,
    ReturnType { expected: String, found: String },
    FieldType { expected: String, found: String },
    Parameters { expected: String, found: String },
    /// The query target is not an interface.
    NotAnInterface,
    /// The candidate is not a class.
    NotAClass,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// Method or field name, or the offending type name for the
    /// non-member reasons.
    pub method: String,
    pub reason: MismatchReason,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            MismatchReason::Missing => write!(f, "'{}' is missing", self.method),
            MismatchReason::ReturnType { expected, found } => write!(
                f,
                "'{}' returns {}, expected {}",
                self.method, found, expected
            ),
            MismatchReason::FieldType { expected, found } => write!(
                f,
                "'{}' has type {}, expected {}",
                self.method, found, expected
            ),
            MismatchReason::Parameters { expected, found } => write!(
                f,
                "'{}' takes {}, expected {}",
                self.method, found, expected
            ),
            MismatchReason::NotAnInterface => write!(f, "'{}' is not an interface", self.method),
            MismatchReason::NotAClass => write!(f, "'{}' is not a class", self.method),
        }
    }
}

/// Outcome of one conformance query. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conformance {
    pub candidate: TypeDefId,
    pub interface: TypeDefId,
    /// In signature declaration order; empty when the candidate conforms.
    pub failures: Vec<Mismatch>,
}

impl Conformance {
    pub fn is_conforming(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure(&self, method: &str) -> Option<&Mismatch> {
        self.failures.iter().find(|m| m.method == method)
    }
}

/// Memoized top-level verdicts keyed by (candidate, interface).
///
/// Cleared whenever a type is declared, because annotations resolve names
/// lazily and a new declaration can change what a name denotes.
#[derive(Debug, Default)]
pub struct ConformanceCache {
    verdicts: RwLock<FxHashMap<(TypeDefId, TypeDefId), bool>>,
}

impl ConformanceCache {
    pub fn get(&self, candidate: TypeDefId, interface: TypeDefId) -> Option<bool> {
        let guard = self.verdicts.read().unwrap_or_else(PoisonError::into_inner);
        guard.get(&(candidate, interface)).copied()
    }

    pub fn insert(&self, candidate: TypeDefId, interface: TypeDefId, verdict: bool) {
        let mut guard = self.verdicts.write().unwrap_or_else(PoisonError::into_inner);
        guard.insert((candidate, interface), verdict);
    }

    pub fn clear(&mut self) {
        self.verdicts
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.verdicts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pairs currently being evaluated. A pair met again while on this stack
/// is treated as not conforming, so a class can never satisfy an
/// `InterfaceType` signature by naming itself.
type InProgress = Vec<(TypeDefId, TypeDefId)>;

impl Registry {
    /// Decide whether `candidate` structurally conforms to `interface`, with
    /// diagnostics for every unsatisfied signature.
    #[tracing::instrument(skip(self), fields(candidate = %self.type_name(candidate), interface = %self.type_name(interface)))]
    pub fn conforms(&self, candidate: TypeDefId, interface: TypeDefId) -> Conformance {
        let failures = match self.kind(interface) {
            Some(TypeDefKind::Interface) => {
                let mut in_progress = InProgress::new();
                self.evaluate(candidate, interface, &mut in_progress)
            }
            _ => vec![Mismatch {
                method: self.type_name(interface).to_string(),
                reason: MismatchReason::NotAnInterface,
            }],
        };
        let result = Conformance {
            candidate,
            interface,
            failures,
        };
        self.cache
            .insert(candidate, interface, result.is_conforming());
        tracing::debug!(conforms = result.is_conforming(), "conformance");
        result
    }

    /// Boolean form of [`Registry::conforms`], answered from the cache when
    /// possible.
    pub fn conforms_to(&self, candidate: TypeDefId, interface: TypeDefId) -> bool {
        if let Some(verdict) = self.cache.get(candidate, interface) {
            return verdict;
        }
        self.conforms(candidate, interface).is_conforming()
    }

    fn evaluate(
        &self,
        candidate: TypeDefId,
        interface: TypeDefId,
        in_progress: &mut InProgress,
    ) -> Vec<Mismatch> {
        // Only the interface itself passes as its own candidate.
        if candidate == interface {
            return Vec::new();
        }
        let Some(iface) = self.interfaces.get(interface) else {
            return vec![Mismatch {
                method: self.type_name(interface).to_string(),
                reason: MismatchReason::NotAnInterface,
            }];
        };
        let Some(view) = self.candidate(candidate) else {
            return vec![Mismatch {
                method: self.type_name(candidate).to_string(),
                reason: MismatchReason::NotAClass,
            }];
        };

        in_progress.push((candidate, interface));
        let nominal = self.bases(candidate, interface);
        let mut failures: Vec<Mismatch> = iface
            .fields
            .iter()
            .filter_map(|field| self.check_field(&view, iface, field, in_progress))
            .collect();
        failures.extend(
            iface
                .signatures
                .iter()
                .filter_map(|sig| self.check_signature(&view, iface, sig, nominal, in_progress)),
        );
        in_progress.pop();
        failures
    }

    fn check_signature(
        &self,
        candidate: &Candidate<'_>,
        iface: &InterfaceDef,
        sig: &Signature,
        nominal: bool,
        in_progress: &mut InProgress,
    ) -> Option<Mismatch> {
        let method_name = self.names.resolve(sig.name).to_string();
        let found = candidate
            .method(sig.name)
            .filter(|method| method.source != MethodSource::Default(iface.id));
        let Some(method) = found else {
            if sig.is_default() && nominal {
                tracing::trace!(method = %method_name, "satisfied by bound default");
                return None;
            }
            return Some(Mismatch {
                method: method_name,
                reason: MismatchReason::Missing,
            });
        };

        let names_match = sig.params.len() == method.params.len()
            && sig
                .params
                .iter()
                .zip(method.params)
                .all(|(expected, found)| expected.name == found.name);
        if !names_match {
            return Some(Mismatch {
                method: method_name,
                reason: MismatchReason::Parameters {
                    expected: display_params(&sig.params, &self.names),
                    found: display_params(method.params, &self.names),
                },
            });
        }

        if self.return_matches(candidate.class, sig.return_kind, method.returns, in_progress) {
            tracing::trace!(method = %method_name, source = ?method.source, "signature satisfied");
            return None;
        }
        Some(Mismatch {
            method: method_name,
            reason: MismatchReason::ReturnType {
                expected: self.display_return_kind(iface, sig.return_kind),
                found: method
                    .returns
                    .map(|ann| ann.display(&self.names))
                    .unwrap_or_else(|| "<unannotated>".to_string()),
            },
        })
    }

    fn check_field(
        &self,
        candidate: &Candidate<'_>,
        iface: &InterfaceDef,
        requirement: &FieldRequirement,
        in_progress: &mut InProgress,
    ) -> Option<Mismatch> {
        let field_name = self.names.resolve(requirement.name).to_string();
        let Some((_, field)) = candidate.field(requirement.name) else {
            return Some(Mismatch {
                method: field_name,
                reason: MismatchReason::Missing,
            });
        };
        if self.return_matches(
            candidate.class,
            requirement.kind,
            Some(field.annotation),
            in_progress,
        ) {
            return None;
        }
        Some(Mismatch {
            method: field_name,
            reason: MismatchReason::FieldType {
                expected: self.display_return_kind(iface, requirement.kind),
                found: field.annotation.display(&self.names),
            },
        })
    }

    fn return_matches(
        &self,
        candidate: TypeDefId,
        expected: ReturnKind,
        found: Option<TypeAnnotation>,
        in_progress: &mut InProgress,
    ) -> bool {
        let Some(found) = found else {
            return false;
        };
        match (expected, found) {
            (ReturnKind::SelfType, TypeAnnotation::SelfType) => true,
            (ReturnKind::SelfType, TypeAnnotation::Named(_)) => false,
            (ReturnKind::Concrete(expected), TypeAnnotation::Named(name)) => expected == name,
            (ReturnKind::Concrete(_), TypeAnnotation::SelfType) => false,
            (ReturnKind::InterfaceType(interface), TypeAnnotation::SelfType) => {
                self.conforms_nested(candidate, interface, in_progress)
            }
            (ReturnKind::InterfaceType(interface), TypeAnnotation::Named(name)) => {
                match self.type_by_name_id(name) {
                    Some(id) if id == interface => true,
                    Some(id) if self.classes.contains(id) => {
                        self.conforms_nested(id, interface, in_progress)
                    }
                    _ => false,
                }
            }
        }
    }

    fn conforms_nested(
        &self,
        candidate: TypeDefId,
        interface: TypeDefId,
        in_progress: &mut InProgress,
    ) -> bool {
        if in_progress.contains(&(candidate, interface)) {
            return false;
        }
        if let Some(verdict) = self.cache.get(candidate, interface) {
            return verdict;
        }
        // Nested verdicts depend on the pairs still in progress, so they are
        // not cached.
        self.evaluate(candidate, interface, in_progress).is_empty()
    }

    fn display_return_kind(&self, iface: &InterfaceDef, kind: ReturnKind) -> String {
        match kind {
            ReturnKind::SelfType => "Self".to_string(),
            ReturnKind::InterfaceType(_) => self.names.resolve(iface.name).to_string(),
            ReturnKind::Concrete(name) => self.names.resolve(name).to_string(),
        }
    }
}
