use super::{check_expression, ExprContext};
use crate::context::{Ty, SELF_TYPE_NAME};
use cool_ast::{Expression, Token};
use cool_diagnostics::{error_codes, Span, Stage};

/// Checks a call's arity and argument conformance against `sig`,
/// reporting at most one diagnostic per bad argument and continuing
/// to check the rest. Returns the method's declared return type, with
/// `SELF_TYPE` resolved against `receiver_ty` (the static type of the
/// dispatch receiver) rather than the enclosing class, since a
/// `SELF_TYPE`-returning method called on `e` yields `e`'s own type,
/// not the caller's.
fn check_call(
    ctx: &mut ExprContext,
    method_tok: &Token,
    args: &[Expression],
    sig: &crate::context::MethodSignature,
    receiver_ty: &Ty,
    lookup_class: &str,
) -> Ty {
    let arg_types: Vec<Ty> = args.iter().map(|arg| check_expression(ctx, arg)).collect();

    if arg_types.len() != sig.formals.len() {
        ctx.diagnostics.error(
            Stage::Semantic,
            error_codes::E_DISPATCH_ARITY,
            format!(
                "Method {} of class {} called with wrong number of arguments",
                method_tok.value, lookup_class
            ),
            Span::new(ctx.filename.clone(), method_tok.line, method_tok.column),
        );
    } else {
        for (arg_ty, (formal_name, formal_ty)) in arg_types.iter().zip(sig.formals.iter()) {
            if !ctx.conforms_self_aware(arg_ty, formal_ty) {
                ctx.diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_DISPATCH_ARG_INCOMPATIBLE,
                    format!(
                        "In call to method {} of class {}, actual type {} of formal parameter {} is incompatible with declared type {}",
                        method_tok.value,
                        lookup_class,
                        arg_ty.display(),
                        formal_name,
                        formal_ty.display()
                    ),
                    Span::new(ctx.filename.clone(), method_tok.line, method_tok.column),
                );
            }
        }
    }

    if sig.return_type.is_self_type() {
        receiver_ty.clone()
    } else {
        sig.return_type.clone()
    }
}

/// Self-dispatch: `method(args)` with an implicit `self` receiver.
pub fn check_dispatch(ctx: &mut ExprContext, method: &Token, args: &[Expression]) -> Ty {
    let class_name = ctx.class_name.clone();
    match ctx.methods.get(&class_name, &method.value) {
        Some(sig) => check_call(ctx, method, args, &sig, &Ty::SelfType, &class_name),
        None => {
            for arg in args {
                check_expression(ctx, arg);
            }
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_DISPATCH_UNDEFINED_METHOD,
                format!("Undefined method {} in class {}", method.value, class_name),
                Span::new(ctx.filename.clone(), method.line, method.column),
            );
            Ty::Unknown
        }
    }
}

/// Dispatch through an explicit receiver, with or without an explicit
/// `@T` static-type annotation. When `static_type` is absent this
/// covers ordinary `e.m(args)` dynamic dispatch as well; when present
/// it is the `e@T.m(args)` form.
pub fn check_static_dispatch(
    ctx: &mut ExprContext,
    receiver: &Expression,
    static_type: &Option<Token>,
    method: &Token,
    args: &[Expression],
) -> Ty {
    let receiver_ty = check_expression(ctx, receiver);

    let lookup_class = match static_type {
        Some(type_tok) => {
            if type_tok.value == SELF_TYPE_NAME {
                ctx.diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_STATIC_DISPATCH_SELF_TYPE,
                    "Type of static dispatch cannot be SELF_TYPE",
                    Span::new(ctx.filename.clone(), type_tok.line, type_tok.column),
                );
                for arg in args {
                    check_expression(ctx, arg);
                }
                return Ty::Unknown;
            }
            if !ctx.classes.contains(&type_tok.value) {
                ctx.diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_STATIC_DISPATCH_UNKNOWN_TYPE,
                    format!("Static dispatch to undefined class {}", type_tok.value),
                    Span::new(ctx.filename.clone(), type_tok.line, type_tok.column),
                );
                for arg in args {
                    check_expression(ctx, arg);
                }
                return Ty::Unknown;
            }
            if !ctx.conforms_self_aware(&receiver_ty, &Ty::class(type_tok.value.clone())) {
                ctx.diagnostics.error(
                    Stage::Semantic,
                    error_codes::E_STATIC_DISPATCH_NOT_ANCESTOR,
                    format!(
                        "Type {} of static dispatch is not a superclass of {}",
                        type_tok.value,
                        receiver_ty.display()
                    ),
                    Span::new(ctx.filename.clone(), type_tok.line, type_tok.column),
                );
            }
            type_tok.value.clone()
        }
        // Implicit target: resolve SELF_TYPE against the enclosing
        // class to get a concrete lookup key, since SELF_TYPE itself
        // is never a registered class.
        None => receiver_ty.resolve(&ctx.class_name),
    };

    match ctx.methods.get(&lookup_class, &method.value) {
        Some(sig) => check_call(ctx, method, args, &sig, &receiver_ty, &lookup_class),
        None => {
            for arg in args {
                check_expression(ctx, arg);
            }
            ctx.diagnostics.error(
                Stage::Semantic,
                error_codes::E_DISPATCH_UNDEFINED_METHOD,
                format!("Undefined method {} in class {}", method.value, lookup_class),
                Span::new(ctx.filename.clone(), method.line, method.column),
            );
            Ty::Unknown
        }
    }
}
