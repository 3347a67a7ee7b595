use super::Parser;
use cool_ast::{CaseBranch, Expression, LetInit};
use cool_lexer::TokenKind;

impl<'src> Parser<'src> {
    pub(crate) fn parse_expression(&mut self) -> Expression {
        self.parse_assign()
    }

    fn parse_assign(&mut self) -> Expression {
        if self.check(TokenKind::ObjectId) {
            if let Some(next) = self.tokens_peek_next_kind() {
                if next == TokenKind::Assign {
                    let name = self.advance().expect("checked ObjectId").token;
                    self.advance(); // '<-'
                    let value = self.parse_assign();
                    return Expression::Assign(name, Box::new(value));
                }
            }
        }
        self.parse_not()
    }

    fn tokens_peek_next_kind(&self) -> Option<TokenKind> {
        self.peek_ahead(1)
    }

    fn parse_not(&mut self) -> Expression {
        if self.check(TokenKind::Not) {
            self.advance();
            let inner = self.parse_not();
            return Expression::Not(Box::new(inner));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Expression {
        let lhs = self.parse_additive();
        match self.peek_kind() {
            Some(TokenKind::Lt) => {
                self.advance();
                let rhs = self.parse_additive();
                Expression::Lt(Box::new(lhs), Box::new(rhs))
            }
            Some(TokenKind::Le) => {
                self.advance();
                let rhs = self.parse_additive();
                Expression::Le(Box::new(lhs), Box::new(rhs))
            }
            Some(TokenKind::Eq) => {
                self.advance();
                let rhs = self.parse_additive();
                Expression::Eq(Box::new(lhs), Box::new(rhs))
            }
            _ => lhs,
        }
    }

    fn parse_additive(&mut self) -> Expression {
        let mut lhs = self.parse_multiplicative();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Plus) => {
                    self.advance();
                    let rhs = self.parse_multiplicative();
                    lhs = Expression::Add(Box::new(lhs), Box::new(rhs));
                }
                Some(TokenKind::Minus) => {
                    self.advance();
                    let rhs = self.parse_multiplicative();
                    lhs = Expression::Sub(Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        lhs
    }

    fn parse_multiplicative(&mut self) -> Expression {
        let mut lhs = self.parse_isvoid();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Star) => {
                    self.advance();
                    let rhs = self.parse_isvoid();
                    lhs = Expression::Mul(Box::new(lhs), Box::new(rhs));
                }
                Some(TokenKind::Slash) => {
                    self.advance();
                    let rhs = self.parse_isvoid();
                    lhs = Expression::Div(Box::new(lhs), Box::new(rhs));
                }
                _ => break,
            }
        }
        lhs
    }

    fn parse_isvoid(&mut self) -> Expression {
        if self.check(TokenKind::IsVoid) {
            self.advance();
            let inner = self.parse_isvoid();
            return Expression::IsVoid(Box::new(inner));
        }
        self.parse_neg()
    }

    fn parse_neg(&mut self) -> Expression {
        if self.check(TokenKind::Tilde) {
            self.advance();
            let inner = self.parse_neg();
            return Expression::Neg(Box::new(inner));
        }
        self.parse_dispatch()
    }

    fn parse_dispatch(&mut self) -> Expression {
        let mut expr = self.parse_primary();
        loop {
            match self.peek_kind() {
                Some(TokenKind::Dot) => {
                    self.advance();
                    let method = match self.parse_object_name() {
                        Some(tok) => tok,
                        None => return self.error_expression(),
                    };
                    let args = self.parse_call_args();
                    expr = Expression::StaticDispatch {
                        receiver: Box::new(expr),
                        static_type: None,
                        method,
                        args,
                    };
                }
                Some(TokenKind::At) => {
                    self.advance();
                    let static_type = self.parse_type_name();
                    self.expect(TokenKind::Dot, "'.'");
                    let method = match self.parse_object_name() {
                        Some(tok) => tok,
                        None => return self.error_expression(),
                    };
                    let args = self.parse_call_args();
                    expr = Expression::StaticDispatch {
                        receiver: Box::new(expr),
                        static_type,
                        method,
                        args,
                    };
                }
                _ => break,
            }
        }
        expr
    }

    fn parse_call_args(&mut self) -> Vec<Expression> {
        let mut args = Vec::new();
        if self.expect(TokenKind::LParen, "'('").is_none() {
            return args;
        }
        while !self.check(TokenKind::RParen) && self.peek().is_some() {
            args.push(self.parse_expression());
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'");
        args
    }

    fn parse_primary(&mut self) -> Expression {
        match self.peek_kind() {
            Some(TokenKind::IntLiteral) => {
                let tok = self.advance().expect("checked IntLiteral").token;
                let value = tok.value.parse::<i64>().unwrap_or(0);
                Expression::IntLiteral(tok, value)
            }
            Some(TokenKind::StringLiteral) => {
                let tok = self.advance().expect("checked StringLiteral").token;
                let value = tok.value.clone();
                Expression::StringLiteral(tok, value)
            }
            Some(TokenKind::True) => {
                let tok = self.advance().expect("checked True").token;
                Expression::BoolLiteral(tok, true)
            }
            Some(TokenKind::False) => {
                let tok = self.advance().expect("checked False").token;
                Expression::BoolLiteral(tok, false)
            }
            Some(TokenKind::ObjectId) => {
                let tok = self.advance().expect("checked ObjectId").token;
                if self.check(TokenKind::LParen) {
                    let args = self.parse_call_args();
                    Expression::Dispatch { method: tok, args }
                } else {
                    Expression::Ident(tok)
                }
            }
            Some(TokenKind::New) => {
                self.advance();
                match self.parse_type_name() {
                    Some(tok) => Expression::New(tok),
                    None => self.error_expression(),
                }
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let inner = self.parse_expression();
                self.expect(TokenKind::RParen, "')'");
                Expression::Paren(Box::new(inner))
            }
            Some(TokenKind::LBrace) => self.parse_block(),
            Some(TokenKind::If) => self.parse_if(),
            Some(TokenKind::While) => self.parse_while(),
            Some(TokenKind::Let) => self.parse_let(),
            Some(TokenKind::Case) => self.parse_case(),
            _ => self.error_expression(),
        }
    }

    fn parse_block(&mut self) -> Expression {
        self.expect(TokenKind::LBrace, "'{'");
        let mut exprs = Vec::new();
        while !self.check(TokenKind::RBrace) && self.peek().is_some() {
            exprs.push(self.parse_expression());
            self.expect(TokenKind::Semi, "';'");
        }
        self.expect(TokenKind::RBrace, "'}'");
        Expression::Block(exprs)
    }

    fn parse_if(&mut self) -> Expression {
        self.advance();
        let predicate = self.parse_expression();
        self.expect(TokenKind::Then, "'then'");
        let then_branch = self.parse_expression();
        self.expect(TokenKind::Else, "'else'");
        let else_branch = self.parse_expression();
        self.expect(TokenKind::Fi, "'fi'");
        Expression::If {
            predicate: Box::new(predicate),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    fn parse_while(&mut self) -> Expression {
        self.advance();
        let predicate = self.parse_expression();
        self.expect(TokenKind::Loop, "'loop'");
        let body = self.parse_expression();
        self.expect(TokenKind::Pool, "'pool'");
        Expression::While {
            predicate: Box::new(predicate),
            body: Box::new(body),
        }
    }

    fn parse_let(&mut self) -> Expression {
        self.advance();
        let mut inits = Vec::new();
        loop {
            let name = match self.parse_object_name() {
                Some(tok) => tok,
                None => return self.error_expression(),
            };
            self.expect(TokenKind::Colon, "':'");
            let type_ = match self.parse_type_name() {
                Some(tok) => tok,
                None => return self.error_expression(),
            };
            let value = if self.check(TokenKind::Assign) {
                self.advance();
                Some(self.parse_expression())
            } else {
                None
            };
            inits.push(LetInit { name, type_, value });
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.expect(TokenKind::In, "'in'");
        let body = self.parse_expression();
        Expression::Let {
            inits,
            body: Box::new(body),
        }
    }

    fn parse_case(&mut self) -> Expression {
        self.advance();
        let scrutinee = self.parse_expression();
        self.expect(TokenKind::Of, "'of'");
        let mut branches = Vec::new();
        while !self.check(TokenKind::Esac) && self.peek().is_some() {
            let name = match self.parse_object_name() {
                Some(tok) => tok,
                None => break,
            };
            self.expect(TokenKind::Colon, "':'");
            let type_ = match self.parse_type_name() {
                Some(tok) => tok,
                None => break,
            };
            self.expect(TokenKind::DArrow, "'=>'");
            let body = self.parse_expression();
            self.expect(TokenKind::Semi, "';'");
            branches.push(CaseBranch {
                name,
                type_,
                body: Box::new(body),
            });
        }
        self.expect(TokenKind::Esac, "'esac'");
        Expression::Case {
            scrutinee: Box::new(scrutinee),
            branches,
        }
    }
}
