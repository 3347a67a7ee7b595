//! Stage-banded diagnostic codes. Bands leave room to grow each stage
//! independently without colliding with the next one.

// L0001-L0099: lexer
pub const L_UNTERMINATED_STRING: &str = "L0001";
pub const L_STRING_CONTAINS_NULL: &str = "L0002";
pub const L_STRING_SPANS_LINES: &str = "L0003";
pub const L_EOF_IN_COMMENT: &str = "L0004";
pub const L_UNMATCHED_COMMENT_CLOSE: &str = "L0005";
pub const L_INVALID_CHARACTER: &str = "L0006";

// P0001-P0099: parser
pub const P_UNEXPECTED_TOKEN: &str = "P0001";
pub const P_UNEXPECTED_EOF: &str = "P0002";

// S0001-S0399: semantic / class well-formedness
pub const E_CLASS_ILLEGAL_NAME: &str = "S0001";
pub const E_CLASS_REDEFINED: &str = "S0002";
pub const E_CLASS_ILLEGAL_PARENT: &str = "S0003";
pub const E_CLASS_UNDEFINED_PARENT: &str = "S0004";
pub const E_INHERITANCE_CYCLE: &str = "S0005";
pub const E_ATTRIBUTE_ILLEGAL_NAME: &str = "S0010";
pub const E_ATTRIBUTE_REDEFINED: &str = "S0011";
pub const E_ATTRIBUTE_UNKNOWN_TYPE: &str = "S0012";
pub const E_ATTRIBUTE_REDEFINES_INHERITED: &str = "S0013";
pub const E_METHOD_REDEFINED: &str = "S0020";
pub const E_FORMAL_ILLEGAL_NAME: &str = "S0021";
pub const E_FORMAL_ILLEGAL_TYPE: &str = "S0022";
pub const E_FORMAL_DUPLICATE: &str = "S0023";
pub const E_FORMAL_UNKNOWN_TYPE: &str = "S0024";
pub const E_METHOD_UNKNOWN_RETURN_TYPE: &str = "S0025";
pub const E_OVERRIDE_ARITY: &str = "S0030";
pub const E_OVERRIDE_FORMAL_TYPE: &str = "S0031";
pub const E_OVERRIDE_RETURN_TYPE: &str = "S0032";

// S0400-S0699: expression type checking
pub const E_UNDEFINED_IDENTIFIER: &str = "S0040";
pub const E_ASSIGN_TO_SELF: &str = "S0041";
pub const E_ASSIGN_INCOMPATIBLE: &str = "S0042";
pub const E_NEW_UNKNOWN_TYPE: &str = "S0043";
pub const E_NOT_REQUIRES_BOOL: &str = "S0044";
pub const E_NEG_REQUIRES_INT: &str = "S0045";
pub const E_ARITH_REQUIRES_INT: &str = "S0046";
pub const E_CMP_REQUIRES_INT: &str = "S0047";
pub const E_EQ_INCOMPARABLE: &str = "S0048";
pub const E_IF_REQUIRES_BOOL: &str = "S0049";
pub const E_WHILE_REQUIRES_BOOL: &str = "S0050";
pub const E_LET_SELF_BINDING: &str = "S0051";
pub const E_LET_UNKNOWN_TYPE: &str = "S0052";
pub const E_LET_INIT_INCOMPATIBLE: &str = "S0053";
pub const E_CASE_SELF_BINDING: &str = "S0054";
pub const E_CASE_SELF_TYPE_BRANCH: &str = "S0055";
pub const E_CASE_UNKNOWN_TYPE: &str = "S0056";
pub const E_DISPATCH_UNDEFINED_METHOD: &str = "S0060";
pub const E_DISPATCH_ARITY: &str = "S0061";
pub const E_DISPATCH_ARG_INCOMPATIBLE: &str = "S0062";
pub const E_STATIC_DISPATCH_SELF_TYPE: &str = "S0063";
pub const E_STATIC_DISPATCH_UNKNOWN_TYPE: &str = "S0064";
pub const E_STATIC_DISPATCH_NOT_ANCESTOR: &str = "S0065";
pub const E_ATTR_INIT_INCOMPATIBLE: &str = "S0070";
pub const E_METHOD_BODY_INCOMPATIBLE: &str = "S0071";

// W0001-W9999: warnings
pub const W_UNUSED_VARIABLE: &str = "W0001";
