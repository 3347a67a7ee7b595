use super::{check_expression, ExprContext};
use crate::context::Ty;
use cool_ast::{Expression, Token};
use cool_diagnostics::{error_codes, fuzzy, Span, Stage};

pub fn check_ident(ctx: &mut ExprContext, tok: &Token) -> Ty {
    match ctx.lookup(&tok.value) {
        Some(ty) => ty,
        None => {
            let known: Vec<&str> = ctx.scope.iter().map(|(n, _)| n.as_str()).collect();
            let mut message = format!("Undefined identifier {}", tok.value);
            if let Some(suggestion) = fuzzy::find_similar(&tok.value, known) {
                message.push_str(&format!(" (did you mean {suggestion}?)"));
            }
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_UNDEFINED_IDENTIFIER,
                message,
                Span::new(ctx.filename.clone(), tok.line, tok.column),
            );
            Ty::Unknown
        }
    }
}

pub fn check_assign(ctx: &mut ExprContext, name: &Token, value: &Expression) -> Ty {
    if name.value == "self" {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_ASSIGN_TO_SELF,
            "Cannot assign to self",
            Span::new(ctx.filename.clone(), name.line, name.column),
        );
        // still type-check the RHS so later errors in it are reported
        return check_expression(ctx, value);
    }

    let value_ty = check_expression(ctx, value);
    match ctx.lookup(&name.value) {
        Some(declared_ty) => {
            if !ctx.conforms_self_aware(&value_ty, &declared_ty) {
                ctx.diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_ASSIGN_INCOMPATIBLE,
                    format!(
                        "Type {} of assigned expression is incompatible with declared type {} of identifier {}",
                        value_ty.display(),
                        declared_ty.display(),
                        name.value
                    ),
                    Span::new(ctx.filename.clone(), name.line, name.column),
                );
            }
            // Result type is type(e), except when e's own check already
            // failed, in which case the declared type of the assigned-to
            // identifier stands in so errors don't cascade.
            if matches!(value_ty, Ty::Unknown) {
                declared_ty
            } else {
                value_ty
            }
        }
        None => {
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_UNDEFINED_IDENTIFIER,
                format!("Undefined identifier {}", name.value),
                Span::new(ctx.filename.clone(), name.line, name.column),
            );
            Ty::Unknown
        }
    }
}
