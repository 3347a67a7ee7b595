//! Builds the object environment (attributes visible per class) and
//! the method environment (method signatures visible per class,
//! including inherited ones) from a frozen class table.

use crate::context::{ClassTable, MethodSignature, Ty};
use dashmap::DashMap;

/// Flat `(class, method) -> signature` table. Backed by `DashMap`
/// purely as an interning map here (the analyzer itself is
/// single-threaded); a plain `HashMap` would do just as well, but this
/// keeps the lookup API identical should a future caller want to query
/// it concurrently with codegen.
#[derive(Debug, Default)]
pub struct MethodEnvironment {
    table: DashMap<(String, String), MethodSignature>,
}

impl MethodEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, class: String, signature: MethodSignature) {
        self.table.insert((class, signature.name.clone()), signature);
    }

    pub fn get(&self, class: &str, method: &str) -> Option<MethodSignature> {
        self.table.get(&(class.to_string(), method.to_string())).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Fills in inherited method entries for every class in `classes`.
/// Expects `env` to already hold each class's *own* signatures (as
/// installed by `builtins::install` and `methods::register`); for
/// every class and every ancestor method name not already present for
/// that class, copies the nearest ancestor's signature down, keeping
/// its `defining_class` unchanged.
pub fn build_method_environment(classes: &ClassTable, env: &MethodEnvironment) {
    for class_name in classes.names_in_order() {
        for ancestor in classes.ancestors(class_name) {
            if ancestor == *class_name {
                continue;
            }
            let Some(ancestor_ctx) = classes.get(&ancestor) else { continue };
            for method_name in &ancestor_ctx.methods {
                if env.get(class_name, method_name).is_some() {
                    continue;
                }
                if let Some(sig) = env.get(&ancestor, method_name) {
                    env.insert(class_name.clone(), sig);
                }
            }
        }
    }
}

/// The object environment for one class: every attribute visible from
/// `Object` down to this class (root-first), followed by the implicit
/// `self` binding. Stored as an ordered list because identifier lookup
/// must see the nearest (last) binding first and because declaration
/// order is observable in object layout downstream.
pub fn build_object_environment(classes: &ClassTable, class_name: &str) -> Vec<(String, Ty)> {
    let mut chain = classes.ancestors(class_name);
    chain.reverse(); // root-first
    let mut env = Vec::new();
    for ancestor in chain {
        if let Some(ctx) = classes.get(&ancestor) {
            for (name, ty) in &ctx.attributes {
                env.push((name.clone(), ty.clone()));
            }
        }
    }
    env.push(("self".to_string(), Ty::class(class_name)));
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ClassContext;

    fn table_with_inherited_method() -> ClassTable {
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new("Object", None));
        let mut a = ClassContext::new("A", Some("Object".to_string()));
        a.methods.push("f".to_string());
        a.attributes.push(("x".to_string(), Ty::class("Int")));
        classes.insert(a);
        let b = ClassContext::new("B", Some("A".to_string()));
        classes.insert(b);
        classes
    }

    #[test]
    fn object_environment_is_root_first_with_self_last() {
        let classes = table_with_inherited_method();
        let env = build_object_environment(&classes, "B");
        assert_eq!(env[0].0, "x");
        assert_eq!(env.last().unwrap().0, "self");
        assert_eq!(env.last().unwrap().1, Ty::class("B"));
    }

    #[test]
    fn method_environment_inherits_ancestor_methods() {
        let classes = table_with_inherited_method();
        let env = MethodEnvironment::new();
        env.insert(
            "A".to_string(),
            MethodSignature {
                name: "f".to_string(),
                return_type: Ty::class("Int"),
                formals: vec![],
                defining_class: "A".to_string(),
            },
        );
        build_method_environment(&classes, &env);
        let resolved = env.get("B", "f").expect("inherited from A");
        assert_eq!(resolved.defining_class, "A");
    }
}
