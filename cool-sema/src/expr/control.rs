use super::{check_expression, ExprContext};
use crate::context::{Ty, BOOL, OBJECT};
use cool_ast::Expression;
use cool_diagnostics::{error_codes, Span, Stage};

pub fn check_if(ctx: &mut ExprContext, predicate: &Expression, then_branch: &Expression, else_branch: &Expression) -> Ty {
    let pred_ty = check_expression(ctx, predicate);
    if !matches!(pred_ty, Ty::Unknown) && pred_ty != Ty::class(BOOL) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_IF_REQUIRES_BOOL,
            format!("Predicate of 'if' has type {} instead of Bool", pred_ty.display()),
            Span::new(ctx.filename.clone(), predicate.anchor().line, predicate.anchor().column),
        );
    }
    let then_ty = check_expression(ctx, then_branch);
    let else_ty = check_expression(ctx, else_branch);
    ctx.lub(&then_ty, &else_ty)
}

pub fn check_while(ctx: &mut ExprContext, predicate: &Expression, body: &Expression) -> Ty {
    let pred_ty = check_expression(ctx, predicate);
    if !matches!(pred_ty, Ty::Unknown) && pred_ty != Ty::class(BOOL) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_WHILE_REQUIRES_BOOL,
            format!("Predicate of 'while' has type {} instead of Bool", pred_ty.display()),
            Span::new(ctx.filename.clone(), predicate.anchor().line, predicate.anchor().column),
        );
    }
    check_expression(ctx, body);
    Ty::class(OBJECT)
}

pub fn check_block(ctx: &mut ExprContext, exprs: &[Expression]) -> Ty {
    let mut result = Ty::class(OBJECT);
    for expr in exprs {
        result = check_expression(ctx, expr);
    }
    result
}
