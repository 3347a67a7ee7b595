use super::Parser;
use cool_ast::Token as AstToken;
use cool_lexer::TokenKind;

impl<'src> Parser<'src> {
    /// A type name is any `TypeId` lexeme; `SELF_TYPE` lexes the same
    /// way and is disambiguated later by `cool-sema`.
    pub(crate) fn parse_type_name(&mut self) -> Option<AstToken> {
        self.expect(TokenKind::TypeId, "a type name").map(|l| l.token)
    }

    pub(crate) fn parse_object_name(&mut self) -> Option<AstToken> {
        self.expect(TokenKind::ObjectId, "an identifier").map(|l| l.token)
    }
}
