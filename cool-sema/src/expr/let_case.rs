use super::{check_expression, ExprContext};
use crate::context::{Ty, SELF_TYPE_NAME};
use cool_ast::{CaseBranch, Expression, LetInit};
use cool_diagnostics::{error_codes, Span, Stage};

pub fn check_let(ctx: &mut ExprContext, inits: &[LetInit], body: &Expression) -> Ty {
    let mut pushed = 0usize;
    for init in inits {
        let span = Span::new(ctx.filename.clone(), init.name.line, init.name.column);
        if init.name.value == "self" {
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_LET_SELF_BINDING,
                "'let' cannot bind self",
                span.clone(),
            );
        }
        if !ctx.type_exists(&init.type_.value) {
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_LET_UNKNOWN_TYPE,
                format!("Class {} of let-bound identifier {} is undefined", init.type_.value, init.name.value),
                span.clone(),
            );
        }
        let declared_ty = if init.type_.value == SELF_TYPE_NAME {
            Ty::SelfType
        } else if ctx.type_exists(&init.type_.value) {
            Ty::class(init.type_.value.clone())
        } else {
            Ty::Unknown
        };

        if let Some(value) = &init.value {
            let value_ty = check_expression(ctx, value);
            if !ctx.conforms_self_aware(&value_ty, &declared_ty) {
                ctx.diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_LET_INIT_INCOMPATIBLE,
                    format!(
                        "Type {} of initialization expression of identifier {} is incompatible with declared type {}",
                        value_ty.display(),
                        init.name.value,
                        declared_ty.display()
                    ),
                    span,
                );
            }
        }

        ctx.push_binding(init.name.value.clone(), declared_ty);
        pushed += 1;
    }

    let result = check_expression(ctx, body);
    for _ in 0..pushed {
        ctx.pop_binding();
    }
    result
}

pub fn check_case(ctx: &mut ExprContext, scrutinee: &Expression, branches: &[CaseBranch]) -> Ty {
    check_expression(ctx, scrutinee);
    let mut result: Option<Ty> = None;
    for branch in branches {
        let span = Span::new(ctx.filename.clone(), branch.name.line, branch.name.column);
        if branch.name.value == "self" {
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_CASE_SELF_BINDING,
                "'case' branch cannot bind self",
                span.clone(),
            );
        }
        if branch.type_.value == SELF_TYPE_NAME {
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_CASE_SELF_TYPE_BRANCH,
                "'case' branch cannot be declared with type SELF_TYPE",
                span.clone(),
            );
        } else if !ctx.classes.contains(&branch.type_.value) {
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_CASE_UNKNOWN_TYPE,
                format!("Class {} of case branch is undefined", branch.type_.value),
                span,
            );
        }

        let branch_ty = if ctx.classes.contains(&branch.type_.value) {
            Ty::class(branch.type_.value.clone())
        } else {
            Ty::Unknown
        };
        ctx.push_binding(branch.name.value.clone(), branch_ty);
        let body_ty = check_expression(ctx, &branch.body);
        ctx.pop_binding();

        result = Some(match result {
            Some(acc) => ctx.lub(&acc, &body_ty),
            None => body_ty,
        });
    }
    result.unwrap_or(Ty::Unknown)
}
