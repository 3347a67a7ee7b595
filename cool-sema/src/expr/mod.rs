//! Expression type checking: the largest single piece of the
//! analyzer. Each expression variant is handled by exactly one
//! function, grouped by concern across sibling modules; [`ExprContext`]
//! carries everything a handler needs (the frozen class graph, the
//! method environment, the enclosing class's name for `SELF_TYPE`
//! resolution, the mutable object-environment scope stack, and the
//! diagnostic sink).

mod control;
mod dispatch;
mod identifiers;
mod let_case;
mod literals;
mod operators;

use crate::context::{ClassTable, Ty};
use crate::environment::MethodEnvironment;
use cool_ast::Expression;
use cool_diagnostics::DiagnosticEngine;

pub struct ExprContext<'a> {
    pub classes: &'a ClassTable,
    pub methods: &'a MethodEnvironment,
    pub class_name: String,
    pub scope: Vec<(String, Ty)>,
    pub diagnostics: &'a mut DiagnosticEngine,
    pub filename: Option<String>,
}

impl<'a> ExprContext<'a> {
    pub fn new(
        classes: &'a ClassTable,
        methods: &'a MethodEnvironment,
        class_name: String,
        scope: Vec<(String, Ty)>,
        diagnostics: &'a mut DiagnosticEngine,
        filename: Option<String>,
    ) -> Self {
        Self {
            classes,
            methods,
            class_name,
            scope,
            diagnostics,
            filename,
        }
    }

    pub fn push_binding(&mut self, name: String, ty: Ty) {
        self.scope.push((name, ty));
    }

    pub fn pop_binding(&mut self) {
        self.scope.pop();
    }

    /// Tail-first lookup: the most recently pushed binding with this
    /// name wins, matching lexical shadowing.
    pub fn lookup(&self, name: &str) -> Option<Ty> {
        self.scope.iter().rev().find(|(n, _)| n == name).map(|(_, ty)| ty.clone())
    }

    /// `T <= U` with `SELF_TYPE` resolved against the enclosing class
    /// on *both* sides before comparison. Used by every rule except
    /// attribute-initializer compatibility.
    pub fn conforms_self_aware(&self, t: &Ty, u: &Ty) -> bool {
        if matches!(t, Ty::Unknown) || matches!(u, Ty::Unknown) {
            return true;
        }
        let t_name = t.resolve(&self.class_name);
        let u_name = u.resolve(&self.class_name);
        self.classes.is_subtype(&t_name, &u_name)
    }

    /// Plain subtype check with no `SELF_TYPE` resolution on either
    /// side: if either side is literally `SELF_TYPE`, it participates
    /// in the comparison as itself, never as the enclosing class. Used
    /// only for attribute-initializer compatibility, deliberately
    /// preserving the asymmetry with method-body checking.
    pub fn conforms_plain(&self, t: &Ty, u: &Ty) -> bool {
        if matches!(t, Ty::Unknown) || matches!(u, Ty::Unknown) {
            return true;
        }
        match (t, u) {
            (Ty::SelfType, Ty::SelfType) => true,
            (Ty::Class(t_name), Ty::Class(u_name)) => self.classes.is_subtype(t_name, u_name),
            _ => false,
        }
    }

    /// Least upper bound of two types, resolving `SELF_TYPE` against
    /// the enclosing class first; `if`/`case` results are always a
    /// concrete class, never `SELF_TYPE` itself.
    pub fn lub(&self, t: &Ty, u: &Ty) -> Ty {
        if matches!(t, Ty::Unknown) {
            return u.clone();
        }
        if matches!(u, Ty::Unknown) {
            return t.clone();
        }
        let t_name = t.resolve(&self.class_name);
        let u_name = u.resolve(&self.class_name);
        Ty::class(self.classes.lub(&t_name, &u_name))
    }

    pub fn type_exists(&self, name: &str) -> bool {
        name == crate::context::SELF_TYPE_NAME || self.classes.contains(name)
    }
}

pub fn check_expression(ctx: &mut ExprContext, expr: &Expression) -> Ty {
    match expr {
        Expression::IntLiteral(..) | Expression::StringLiteral(..) | Expression::BoolLiteral(..) => {
            literals::check_literal(ctx, expr)
        }
        Expression::Paren(inner) => check_expression(ctx, inner),
        Expression::Ident(tok) => identifiers::check_ident(ctx, tok),
        Expression::Assign(name, value) => identifiers::check_assign(ctx, name, value),
        Expression::New(type_tok) => literals::check_new(ctx, type_tok),
        Expression::IsVoid(inner) => {
            check_expression(ctx, inner);
            Ty::class(crate::context::BOOL)
        }
        Expression::Not(inner) => operators::check_not(ctx, inner),
        Expression::Neg(inner) => operators::check_neg(ctx, inner),
        Expression::Add(l, r) => operators::check_arith(ctx, l, r),
        Expression::Sub(l, r) => operators::check_arith(ctx, l, r),
        Expression::Mul(l, r) => operators::check_arith(ctx, l, r),
        Expression::Div(l, r) => operators::check_arith(ctx, l, r),
        Expression::Lt(l, r) => operators::check_cmp(ctx, l, r),
        Expression::Le(l, r) => operators::check_cmp(ctx, l, r),
        Expression::Eq(l, r) => operators::check_eq(ctx, l, r),
        Expression::If { predicate, then_branch, else_branch } => control::check_if(ctx, predicate, then_branch, else_branch),
        Expression::While { predicate, body } => control::check_while(ctx, predicate, body),
        Expression::Block(exprs) => control::check_block(ctx, exprs),
        Expression::Let { inits, body } => let_case::check_let(ctx, inits, body),
        Expression::Case { scrutinee, branches } => let_case::check_case(ctx, scrutinee, branches),
        Expression::Dispatch { method, args } => dispatch::check_dispatch(ctx, method, args),
        Expression::StaticDispatch { receiver, static_type, method, args } => {
            dispatch::check_static_dispatch(ctx, receiver, static_type, method, args)
        }
        Expression::Error(_) => Ty::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ClassContext, OBJECT};
    use cool_diagnostics::DiagnosticEngine;

    fn base_classes() -> ClassTable {
        let mut classes = ClassTable::new();
        classes.insert(ClassContext::new(OBJECT, None));
        classes.insert(ClassContext::new("Int", Some(OBJECT.to_string())));
        classes.insert(ClassContext::new("A", Some(OBJECT.to_string())));
        classes.insert(ClassContext::new("B", Some("A".to_string())));
        classes
    }

    #[test]
    fn scope_push_pop_preserves_invariant() {
        let classes = base_classes();
        let methods = MethodEnvironment::new();
        let mut diagnostics = DiagnosticEngine::new();
        let mut ctx = ExprContext::new(&classes, &methods, "A".to_string(), vec![], &mut diagnostics, None);
        let before = ctx.scope.len();
        ctx.push_binding("x".to_string(), Ty::class("Int"));
        assert_eq!(ctx.lookup("x"), Some(Ty::class("Int")));
        ctx.pop_binding();
        assert_eq!(ctx.scope.len(), before);
        assert_eq!(ctx.lookup("x"), None);
    }

    #[test]
    fn self_aware_conformance_resolves_self_type() {
        let classes = base_classes();
        let methods = MethodEnvironment::new();
        let mut diagnostics = DiagnosticEngine::new();
        let ctx = ExprContext::new(&classes, &methods, "B".to_string(), vec![], &mut diagnostics, None);
        assert!(ctx.conforms_self_aware(&Ty::SelfType, &Ty::class("A")));
        assert!(!ctx.conforms_self_aware(&Ty::class("A"), &Ty::SelfType));
    }

    #[test]
    fn plain_conformance_never_resolves_self_type() {
        let classes = base_classes();
        let methods = MethodEnvironment::new();
        let mut diagnostics = DiagnosticEngine::new();
        let ctx = ExprContext::new(&classes, &methods, "B".to_string(), vec![], &mut diagnostics, None);
        assert!(!ctx.conforms_plain(&Ty::SelfType, &Ty::class("A")));
        assert!(ctx.conforms_plain(&Ty::SelfType, &Ty::SelfType));
    }
}
