// # ========================= START OF THE GRAMMAR =========================
//
// # Upper case names (IDENTIFIER, NUMBER) denote token types, quoted strings
// # denote keywords or punctuation. Keywords are written in Turkish:
// #   'eğer' (if), 'aksi takdirde' (else), 'için' (for), 'iken' (while),
// #   'yazdır' (print).
// #
// # e1 e2    Match e1, then match e2.
// # e1 | e2  Match e1 or e2.
// # [ e ]    Optionally match e.
// # e*       Match zero or more occurrences of e.

use tracing::{debug, instrument};

use super::ast::*;
use super::error::{ArithmeticFault, Error};
use super::tokenizer::{Token, TokenType as TT};

const END_OF_INPUT: &str = "end of input";

/// Parses a whole token sequence into a [`Program`]. The first token that
/// does not fit the grammar aborts parsing.
#[instrument(level = "debug", skip_all, fields(tokens = input.len()))]
pub fn parse(input: &[Token]) -> Result<Program, Error> {
    let mut parser = Parser {
        tokens: input,
        current: 0,
        program: Program::default(),
    };
    let body = parser.file_()?;
    debug!(statements = body.len(), "parsed");
    parser.program.set_body(body);
    Ok(parser.program)
}

struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    program: Program,
}

impl<'a> Parser<'a> {
    // # STARTING RULE
    // # =============
    // file: statement*
    fn file_(&mut self) -> Result<Block, Error> {
        let mut block = vec![];
        while !self.is_at_end() {
            block.push(self.statement()?);
        }
        Ok(block)
    }

    // # STATEMENTS
    // # ==========

    // statement: if_stmt | for_stmt | while_stmt | print_stmt | assignment
    fn statement(&mut self) -> Result<StmtId, Error> {
        let statement = match self.peek_type() {
            Some(TT::IF) => self.if_stmt()?,
            Some(TT::FOR) => self.for_stmt()?,
            Some(TT::WHILE) => self.while_stmt()?,
            Some(TT::PRINT) => self.print_stmt()?,
            Some(TT::IDENTIFIER) => self.assignment()?,
            _ => return Err(self.unexpected()),
        };
        Ok(self.program.push_statement(statement))
    }

    // assignment: IDENTIFIER '=' expression ';'
    fn assignment(&mut self) -> Result<Statement, Error> {
        let (name, value) = self.assignment_head()?;
        self.consume(TT::SEMICOLON)?;
        Ok(Statement::Assignment(name, value))
    }

    fn assignment_head(&mut self) -> Result<(Name, ExprId), Error> {
        let name = Name::new(self.consume(TT::IDENTIFIER)?.lexeme);
        self.consume(TT::ASSIGN)?;
        let value = self.expression()?;
        Ok((name, value))
    }

    // print_stmt: 'yazdır' '(' expression ')' ';'
    fn print_stmt(&mut self) -> Result<Statement, Error> {
        self.consume(TT::PRINT)?;
        self.consume(TT::LPAREN)?;
        let value = self.expression()?;
        self.consume(TT::RPAREN)?;
        self.consume(TT::SEMICOLON)?;
        Ok(Statement::Print(value))
    }

    // if_stmt: 'eğer' '(' expression ')' block ['aksi takdirde' block]
    fn if_stmt(&mut self) -> Result<Statement, Error> {
        self.consume(TT::IF)?;
        let condition = self.condition()?;
        let then_block = self.block()?;
        let else_block = if self.match_(TT::ELSE) {
            Some(self.block()?)
        } else {
            None
        };
        Ok(Statement::If(condition, then_block, else_block))
    }

    // while_stmt: 'iken' '(' expression ')' block
    fn while_stmt(&mut self) -> Result<Statement, Error> {
        self.consume(TT::WHILE)?;
        let condition = self.condition()?;
        let body = self.block()?;
        Ok(Statement::While(condition, body))
    }

    // for_stmt:
    //     | 'için' '(' assignment [';'] expression ';' IDENTIFIER '=' expression [';'] ')' block
    fn for_stmt(&mut self) -> Result<Statement, Error> {
        self.consume(TT::FOR)?;
        self.consume(TT::LPAREN)?;
        let initializer = self.assignment()?;
        let initializer = self.program.push_statement(initializer);
        self.match_(TT::SEMICOLON);
        let condition = self.expression()?;
        self.consume(TT::SEMICOLON)?;
        let (name, value) = self.assignment_head()?;
        self.match_(TT::SEMICOLON);
        let increment = self
            .program
            .push_statement(Statement::Assignment(name, value));
        self.consume(TT::RPAREN)?;
        let body = self.block()?;
        Ok(Statement::For(initializer, condition, increment, body))
    }

    // block: '{' statement* '}'
    fn block(&mut self) -> Result<Block, Error> {
        self.consume(TT::LBRACE)?;
        let mut block = vec![];
        while !self.check(TT::RBRACE) && !self.is_at_end() {
            block.push(self.statement()?);
        }
        self.consume(TT::RBRACE)?;
        Ok(block)
    }

    // '(' expression ')'
    fn condition(&mut self) -> Result<ExprId, Error> {
        self.consume(TT::LPAREN)?;
        let condition = self.expression()?;
        self.consume(TT::RPAREN)?;
        Ok(condition)
    }

    // # EXPRESSIONS
    // # ===========

    // expression: term (('+' | '-' | '==' | '!=' | '<' | '>' | '<=' | '>=') term)*
    fn expression(&mut self) -> Result<ExprId, Error> {
        let mut lhs = self.term()?;
        while let Some(op) = self.peek_type().and_then(Operator::additive) {
            self.advance();
            let rhs = self.term()?;
            lhs = self
                .program
                .push_expression(Expression::BinaryOperation(op, lhs, rhs));
        }
        Ok(lhs)
    }

    // term: factor (('*' | '/' | '%') factor)*
    fn term(&mut self) -> Result<ExprId, Error> {
        let mut lhs = self.factor()?;
        while let Some(op) = self.peek_type().and_then(Operator::multiplicative) {
            self.advance();
            let rhs = self.factor()?;
            lhs = self
                .program
                .push_expression(Expression::BinaryOperation(op, lhs, rhs));
        }
        Ok(lhs)
    }

    // factor: IDENTIFIER | NUMBER | '(' expression ')'
    fn factor(&mut self) -> Result<ExprId, Error> {
        match self.peek_type() {
            Some(TT::IDENTIFIER) => {
                let name = Name::new(self.consume(TT::IDENTIFIER)?.lexeme);
                Ok(self.program.push_expression(Expression::Name(name)))
            }
            Some(TT::NUMBER) => {
                let token = self.consume(TT::NUMBER)?;
                let value = token
                    .lexeme
                    .parse::<i64>()
                    .map_err(|_| ArithmeticFault::Overflow)?;
                Ok(self.program.push_expression(Expression::Number(value)))
            }
            Some(TT::LPAREN) => self.condition(),
            _ => Err(self.unexpected()),
        }
    }

    // # TOKEN HELPERS
    // # =============

    fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    fn peek_type(&self) -> Option<TT> {
        self.tokens.get(self.current).map(|token| token.typ)
    }

    fn check(&self, typ: TT) -> bool {
        self.peek_type() == Some(typ)
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn match_(&mut self, typ: TT) -> bool {
        if self.check(typ) {
            self.advance();
            return true;
        }
        false
    }

    fn consume(&mut self, typ: TT) -> Result<Token, Error> {
        let tokens = self.tokens;
        match tokens.get(self.current) {
            Some(token) if token.typ == typ => {
                self.advance();
                Ok(token.clone())
            }
            Some(token) => Err(Error::expected(typ, token)),
            None => Err(Error::expected(typ, END_OF_INPUT)),
        }
    }

    fn unexpected(&self) -> Error {
        match self.tokens.get(self.current) {
            Some(token) => Error::unexpected(token),
            None => Error::unexpected(END_OF_INPUT),
        }
    }
}
