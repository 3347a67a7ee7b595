use super::Parser;
use cool_ast::{Attribute, Class, Formal, Method};
use cool_lexer::TokenKind;

impl<'src> Parser<'src> {
    pub(crate) fn parse_class(&mut self) -> Option<Class> {
        self.expect(TokenKind::Class, "'class'")?;
        let name = self.parse_type_name()?;
        let superclass = if self.check(TokenKind::Inherits) {
            self.advance();
            self.parse_type_name()
        } else {
            None
        };
        self.expect(TokenKind::LBrace, "'{'")?;

        let mut attributes = Vec::new();
        let mut methods = Vec::new();
        while !self.check(TokenKind::RBrace) && self.peek().is_some() {
            match self.parse_feature() {
                Some(Feature::Attribute(attr)) => attributes.push(attr),
                Some(Feature::Method(method)) => methods.push(method),
                None => self.synchronize(),
            }
            if self.check(TokenKind::Semi) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RBrace, "'}'")?;

        Some(Class {
            name,
            superclass,
            attributes,
            methods,
        })
    }

    fn parse_feature(&mut self) -> Option<Feature> {
        let name = self.parse_object_name()?;
        if self.check(TokenKind::LParen) {
            self.advance();
            let mut formals = Vec::new();
            while !self.check(TokenKind::RParen) {
                let formal_name = self.parse_object_name()?;
                self.expect(TokenKind::Colon, "':'")?;
                let formal_type = self.parse_type_name()?;
                formals.push(Formal {
                    name: formal_name,
                    type_: formal_type,
                });
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RParen, "')'")?;
            self.expect(TokenKind::Colon, "':'")?;
            let return_type = self.parse_type_name()?;
            self.expect(TokenKind::LBrace, "'{'")?;
            let body = self.parse_expression();
            self.expect(TokenKind::RBrace, "'}'")?;
            Some(Feature::Method(Method {
                name,
                formals,
                return_type,
                body,
            }))
        } else {
            self.expect(TokenKind::Colon, "':'")?;
            let type_ = self.parse_type_name()?;
            let value = if self.check(TokenKind::Assign) {
                self.advance();
                Some(self.parse_expression())
            } else {
                None
            };
            Some(Feature::Attribute(Attribute { name, type_, value }))
        }
    }
}

enum Feature {
    Attribute(Attribute),
    Method(Method),
}
