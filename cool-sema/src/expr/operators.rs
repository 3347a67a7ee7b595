use super::{check_expression, ExprContext};
use crate::context::{Ty, BOOL, INT, STRING};
use cool_ast::Expression;
use cool_diagnostics::{error_codes, Span, Stage};

pub fn check_not(ctx: &mut ExprContext, inner: &Expression) -> Ty {
    let inner_ty = check_expression(ctx, inner);
    if !matches!(inner_ty, Ty::Unknown) && inner_ty != Ty::class(BOOL) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_NOT_REQUIRES_BOOL,
            format!("Argument of 'not' has type {} instead of Bool", inner_ty.display()),
            Span::new(ctx.filename.clone(), inner.anchor().line, inner.anchor().column),
        );
    }
    Ty::class(BOOL)
}

pub fn check_neg(ctx: &mut ExprContext, inner: &Expression) -> Ty {
    let inner_ty = check_expression(ctx, inner);
    if !matches!(inner_ty, Ty::Unknown) && inner_ty != Ty::class(INT) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_NEG_REQUIRES_INT,
            format!("Argument of '~' has type {} instead of Int", inner_ty.display()),
            Span::new(ctx.filename.clone(), inner.anchor().line, inner.anchor().column),
        );
    }
    Ty::class(INT)
}

/// `+ - * /` all share this rule: both operands must be `Int`; the
/// result is always `Int` even when an operand already failed its own
/// check, so arithmetic never itself suppresses downstream checks.
pub fn check_arith(ctx: &mut ExprContext, lhs: &Expression, rhs: &Expression) -> Ty {
    let lhs_ty = check_expression(ctx, lhs);
    let rhs_ty = check_expression(ctx, rhs);
    if !matches!(lhs_ty, Ty::Unknown) && lhs_ty != Ty::class(INT) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_ARITH_REQUIRES_INT,
            format!("non-Int argument: {}", lhs_ty.display()),
            Span::new(ctx.filename.clone(), lhs.anchor().line, lhs.anchor().column),
        );
    }
    if !matches!(rhs_ty, Ty::Unknown) && rhs_ty != Ty::class(INT) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_ARITH_REQUIRES_INT,
            format!("non-Int argument: {}", rhs_ty.display()),
            Span::new(ctx.filename.clone(), rhs.anchor().line, rhs.anchor().column),
        );
    }
    Ty::class(INT)
}

/// `<` and `<=` share this rule exactly; `<=` is not routed through
/// the `<` handler, it simply has the same body, so the two remain
/// independently maintainable.
pub fn check_cmp(ctx: &mut ExprContext, lhs: &Expression, rhs: &Expression) -> Ty {
    let lhs_ty = check_expression(ctx, lhs);
    let rhs_ty = check_expression(ctx, rhs);
    if !matches!(lhs_ty, Ty::Unknown) && lhs_ty != Ty::class(INT) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_CMP_REQUIRES_INT,
            format!("non-Int argument: {}", lhs_ty.display()),
            Span::new(ctx.filename.clone(), lhs.anchor().line, lhs.anchor().column),
        );
    }
    if !matches!(rhs_ty, Ty::Unknown) && rhs_ty != Ty::class(INT) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_CMP_REQUIRES_INT,
            format!("non-Int argument: {}", rhs_ty.display()),
            Span::new(ctx.filename.clone(), rhs.anchor().line, rhs.anchor().column),
        );
    }
    Ty::class(BOOL)
}

pub fn check_eq(ctx: &mut ExprContext, lhs: &Expression, rhs: &Expression) -> Ty {
    let lhs_ty = check_expression(ctx, lhs);
    let rhs_ty = check_expression(ctx, rhs);
    let primitives = [Ty::class(INT), Ty::class(STRING), Ty::class(BOOL)];
    let lhs_primitive = primitives.contains(&lhs_ty);
    let rhs_primitive = primitives.contains(&rhs_ty);
    if (lhs_primitive || rhs_primitive) && lhs_ty != rhs_ty && !matches!(lhs_ty, Ty::Unknown) && !matches!(rhs_ty, Ty::Unknown) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_EQ_INCOMPARABLE,
            format!(
                "Comparison between incomparable types {} and {}",
                lhs_ty.display(),
                rhs_ty.display()
            ),
            Span::new(ctx.filename.clone(), lhs.anchor().line, lhs.anchor().column),
        );
    }
    Ty::class(BOOL)
}
