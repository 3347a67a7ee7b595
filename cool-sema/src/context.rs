//! Class graph representation, the `SELF_TYPE` sentinel, and the
//! subtype / least-upper-bound relations over the inheritance tree.

use std::collections::HashMap;

pub const OBJECT: &str = "Object";
pub const IO: &str = "IO";
pub const INT: &str = "Int";
pub const STRING: &str = "String";
pub const BOOL: &str = "Bool";
pub const SELF_TYPE_NAME: &str = "SELF_TYPE";

/// A declared type: either a concrete class name or the `SELF_TYPE`
/// sentinel. `SELF_TYPE` is never stored as a plain string inside a
/// `Ty::Class` — comparisons resolve it against the enclosing class
/// explicitly, so accidental string-equality bugs can't reintroduce it
/// as a real class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ty {
    Class(String),
    SelfType,
    /// Stands in for a sub-expression whose own check already failed;
    /// comparisons against `Unknown` always succeed so errors do not
    /// cascade.
    Unknown,
}

impl Ty {
    pub fn class(name: impl Into<String>) -> Self {
        Ty::Class(name.into())
    }

    pub fn is_self_type(&self) -> bool {
        matches!(self, Ty::SelfType)
    }

    /// Resolves `SELF_TYPE` to the name of the enclosing class; leaves
    /// concrete class names untouched.
    pub fn resolve(&self, enclosing: &str) -> String {
        match self {
            Ty::Class(name) => name.clone(),
            Ty::SelfType => enclosing.to_string(),
            Ty::Unknown => enclosing.to_string(),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Ty::Class(name) => name.clone(),
            Ty::SelfType => SELF_TYPE_NAME.to_string(),
            Ty::Unknown => "<unknown>".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClassContext {
    pub name: String,
    pub parent: Option<String>,
    /// Declaration order, root-first when later assembled into an
    /// object environment; this class's own attributes only.
    pub attributes: Vec<(String, Ty)>,
    /// Names of methods declared directly on this class (not
    /// inherited); full signatures live in the method environment.
    pub methods: Vec<String>,
    pub line: u32,
    pub column: u32,
}

impl ClassContext {
    pub fn new(name: impl Into<String>, parent: Option<String>) -> Self {
        Self {
            name: name.into(),
            parent,
            attributes: Vec::new(),
            methods: Vec::new(),
            line: 0,
            column: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    pub name: String,
    pub return_type: Ty,
    pub formals: Vec<(String, Ty)>,
    /// The class whose declaration actually supplied this signature;
    /// differs from the lookup class for inherited methods. Codegen
    /// needs this to place dispatch-table slots.
    pub defining_class: String,
}

/// The frozen class graph: every class (built-in and user), keyed by
/// name, plus the registration order used for deterministic traversal.
#[derive(Debug, Clone, Default)]
pub struct ClassTable {
    classes: HashMap<String, ClassContext>,
    order: Vec<String>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, ctx: ClassContext) {
        self.order.push(ctx.name.clone());
        self.classes.insert(ctx.name.clone(), ctx);
    }

    pub fn get(&self, name: &str) -> Option<&ClassContext> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassContext> {
        self.classes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn names_in_order(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Walks from `name` up to (and including) `Object`, stopping
    /// early if a parent link is missing (e.g. the class's own parent
    /// failed to resolve). Used by both cycle detection and subtyping.
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = Some(name.to_string());
        let mut seen = std::collections::HashSet::new();
        while let Some(class_name) = current {
            if !seen.insert(class_name.clone()) {
                break; // cyclic; caller handles cycle reporting separately
            }
            chain.push(class_name.clone());
            current = self.get(&class_name).and_then(|c| c.parent.clone());
        }
        chain
    }

    /// `T <= U`: is `u` an ancestor of (or equal to) `t`?
    pub fn is_subtype(&self, t: &str, u: &str) -> bool {
        if t == u {
            return true;
        }
        self.ancestors(t).iter().any(|ancestor| ancestor == u)
    }

    /// Nearest common ancestor of `t` and `u` in the inheritance tree.
    /// Always terminates at `Object` because every class's ancestor
    /// chain ends there.
    pub fn lub(&self, t: &str, u: &str) -> String {
        if t == u {
            return t.to_string();
        }
        let t_chain = self.ancestors(t);
        let u_chain: std::collections::HashSet<_> = self.ancestors(u).into_iter().collect();
        t_chain
            .into_iter()
            .find(|candidate| u_chain.contains(candidate))
            .unwrap_or_else(|| OBJECT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ClassTable {
        let mut table = ClassTable::new();
        table.insert(ClassContext::new(OBJECT, None));
        table.insert(ClassContext::new("A", Some(OBJECT.to_string())));
        table.insert(ClassContext::new("B", Some("A".to_string())));
        table.insert(ClassContext::new("C", Some("A".to_string())));
        table
    }

    #[test]
    fn subtype_walks_parent_chain() {
        let table = sample_table();
        assert!(table.is_subtype("B", "A"));
        assert!(table.is_subtype("B", OBJECT));
        assert!(!table.is_subtype("A", "B"));
    }

    #[test]
    fn lub_finds_nearest_common_ancestor() {
        let table = sample_table();
        assert_eq!(table.lub("B", "C"), "A");
        assert_eq!(table.lub("B", "B"), "B");
    }

    #[test]
    fn lub_with_object_is_object() {
        let table = sample_table();
        assert_eq!(table.lub("B", OBJECT), OBJECT);
    }
}
