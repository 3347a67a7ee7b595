use super::ExprContext;
use crate::context::{Ty, BOOL, INT, SELF_TYPE_NAME, STRING};
use cool_ast::{Expression, Token};
use cool_diagnostics::{error_codes, Span, Stage};

pub fn check_literal(_ctx: &mut ExprContext, expr: &Expression) -> Ty {
    match expr {
        Expression::IntLiteral(..) => Ty::class(INT),
        Expression::StringLiteral(..) => Ty::class(STRING),
        Expression::BoolLiteral(..) => Ty::class(BOOL),
        _ => unreachable!("check_literal called on a non-literal expression"),
    }
}

pub fn check_new(ctx: &mut ExprContext, type_tok: &Token) -> Ty {
    if type_tok.value == SELF_TYPE_NAME {
        return Ty::SelfType;
    }
    if !ctx.type_exists(&type_tok.value) {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_NEW_UNKNOWN_TYPE,
            format!("'new' used with undefined class {}", type_tok.value),
            Span::new(ctx.filename.clone(), type_tok.line, type_tok.column),
        );
        return Ty::Unknown;
    }
    Ty::class(type_tok.value.clone())
}
