use super::ast::{BinaryOp, ElifBranch, Expression, FunctionDef, Statement, UnaryOp};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Recursive-descent parser producing a [`FunctionDef`] from a token stream
///
/// Accepts exactly one function. The `def` keyword is optional so that both
/// `def run(x, y):` and the shorthand `run(x, y):` parse; a source that does
/// not start with a function header at all is a malformed-input error, not a
/// syntax error, because there is no recognized entry point to analyze.
///
/// Block bodies may be indented in the usual way or written inline after the
/// colon with `;` separating statements.
pub struct FuncParser {
    tokens: Vec<Token>,
    current: usize,
}

impl FuncParser {
    /// Creates a parser over the given token stream
    pub fn new(tokens: Vec<Token>) -> Self {
        FuncParser { tokens, current: 0 }
    }

    /// Parses the token stream into a single function definition
    pub fn parse(&mut self) -> Result<FunctionDef> {
        self.skip_newlines();

        if self.check(&TokenKind::Def) {
            self.advance();
        }

        let name = match self.peek().kind.clone() {
            TokenKind::Identifier(name) if self.peek_ahead(1).kind == TokenKind::LeftParen => {
                self.advance();
                name
            }
            _ => {
                return Err(Error::malformed(
                    "no function definition found in submitted code",
                ))
            }
        };

        self.expect(&TokenKind::LeftParen, "'('")?;
        let params = self.parse_params()?;
        self.expect(&TokenKind::RightParen, "')'")?;
        self.expect(&TokenKind::Colon, "':'")?;

        let body = self.parse_block()?;

        self.skip_newlines();
        if !self.check(&TokenKind::Eof) {
            return Err(self.error_here("unexpected input after function body"));
        }

        Ok(FunctionDef { name, params, body })
    }

    fn parse_params(&mut self) -> Result<Vec<String>> {
        let mut params = Vec::new();
        if self.check(&TokenKind::RightParen) {
            return Ok(params);
        }
        loop {
            match self.peek().kind.clone() {
                TokenKind::Identifier(name) => {
                    self.advance();
                    params.push(name);
                }
                _ => return Err(self.error_here("expected parameter name")),
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(params)
    }

    /// Parses a suite after a colon: either an indented block or an inline
    /// `;`-separated statement list on the same line
    fn parse_block(&mut self) -> Result<Vec<Statement>> {
        if self.check(&TokenKind::Newline) {
            self.advance();
            self.skip_newlines();
            self.expect(&TokenKind::Indent, "an indented block")?;

            let mut statements = Vec::new();
            loop {
                if self.check(&TokenKind::Newline) {
                    self.advance();
                    continue;
                }
                if self.check(&TokenKind::Dedent) || self.check(&TokenKind::Eof) {
                    break;
                }
                statements.push(self.parse_statement()?);
            }
            if self.check(&TokenKind::Dedent) {
                self.advance();
            }
            if statements.is_empty() {
                return Err(self.error_here("empty block"));
            }
            Ok(statements)
        } else {
            self.parse_inline_suite()
        }
    }

    fn parse_inline_suite(&mut self) -> Result<Vec<Statement>> {
        let mut statements = vec![self.parse_statement()?];
        while self.check(&TokenKind::Semicolon) {
            self.advance();
            if self.check(&TokenKind::Newline) || self.check(&TokenKind::Eof) {
                break;
            }
            statements.push(self.parse_statement()?);
        }
        if self.check(&TokenKind::Newline) {
            self.advance();
        }
        Ok(statements)
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek().kind {
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Pass => {
                self.advance();
                self.end_simple_statement();
                Ok(Statement::Pass)
            }
            _ => self.parse_assignment_or_expression(),
        }
    }

    fn parse_if(&mut self) -> Result<Statement> {
        self.advance(); // if
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Colon, "':'")?;
        let then_body = self.parse_block()?;

        let mut elif_branches = Vec::new();
        loop {
            self.skip_newlines_before(&TokenKind::Elif);
            if !self.check(&TokenKind::Elif) {
                break;
            }
            self.advance();
            let condition = self.parse_expression()?;
            self.expect(&TokenKind::Colon, "':'")?;
            let body = self.parse_block()?;
            elif_branches.push(ElifBranch { condition, body });
        }

        self.skip_newlines_before(&TokenKind::Else);
        let else_body = if self.check(&TokenKind::Else) {
            self.advance();
            self.expect(&TokenKind::Colon, "':'")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            then_body,
            elif_branches,
            else_body,
        })
    }

    fn parse_while(&mut self) -> Result<Statement> {
        self.advance(); // while
        let condition = self.parse_expression()?;
        self.expect(&TokenKind::Colon, "':'")?;
        let body = self.parse_block()?;
        Ok(Statement::While { condition, body })
    }

    fn parse_for(&mut self) -> Result<Statement> {
        self.advance(); // for
        let variable = match self.peek().kind.clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                name
            }
            _ => return Err(self.error_here("expected loop variable name")),
        };
        self.expect(&TokenKind::In, "'in'")?;
        let iterable = self.parse_expression()?;
        self.expect(&TokenKind::Colon, "':'")?;
        let body = self.parse_block()?;
        Ok(Statement::For {
            variable,
            iterable,
            body,
        })
    }

    fn parse_return(&mut self) -> Result<Statement> {
        self.advance(); // return
        let value = if self.at_statement_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.end_simple_statement();
        Ok(Statement::Return { value })
    }

    fn parse_assignment_or_expression(&mut self) -> Result<Statement> {
        if let TokenKind::Identifier(target) = self.peek().kind.clone() {
            if self.peek_ahead(1).kind == TokenKind::Assign {
                self.advance(); // identifier
                self.advance(); // =
                let value = self.parse_expression()?;
                self.end_simple_statement();
                return Ok(Statement::Assign { target, value });
            }
        }
        let expr = self.parse_expression()?;
        self.end_simple_statement();
        Ok(Statement::Expression(expr))
    }

    // Expressions, lowest precedence first.

    fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> Result<Expression> {
        let mut expr = self.parse_and()?;
        while self.check(&TokenKind::Or) {
            self.advance();
            let right = self.parse_and()?;
            expr = Expression::Binary {
                op: BinaryOp::Or,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_and(&mut self) -> Result<Expression> {
        let mut expr = self.parse_not()?;
        while self.check(&TokenKind::And) {
            self.advance();
            let right = self.parse_not()?;
            expr = Expression::Binary {
                op: BinaryOp::And,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_not(&mut self) -> Result<Expression> {
        if self.check(&TokenKind::Not) {
            self.advance();
            let operand = self.parse_not()?;
            return Ok(Expression::Unary {
                op: UnaryOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expression> {
        let left = self.parse_additive()?;

        let op = match self.peek().kind {
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::NotEq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::LtEq => BinaryOp::LtEq,
            TokenKind::GtEq => BinaryOp::GtEq,
            _ => return Ok(left),
        };
        self.advance();
        let right = self.parse_additive()?;

        // Comparisons are non-associative; `a < b < c` is rejected rather
        // than silently dropping a comparator.
        if matches!(
            self.peek().kind,
            TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::LtEq
                | TokenKind::GtEq
        ) {
            return Err(self.error_here("chained comparisons are not supported"));
        }

        Ok(Expression::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    fn parse_additive(&mut self) -> Result<Expression> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            expr = Expression::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> Result<Expression> {
        let mut expr = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            expr = Expression::Binary {
                op,
                left: Box::new(expr),
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expression> {
        if self.check(&TokenKind::Minus) {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expression::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(operand),
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek().kind.clone() {
            TokenKind::Integer(value) => {
                self.advance();
                Ok(Expression::IntLiteral(value))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expression::BoolLiteral(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expression::BoolLiteral(false))
            }
            TokenKind::String(value) => {
                self.advance();
                Ok(Expression::StringLiteral(value))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.check(&TokenKind::LeftParen) {
                    self.advance();
                    let args = self.parse_args()?;
                    self.expect(&TokenKind::RightParen, "')'")?;
                    Ok(Expression::Call {
                        function: name,
                        args,
                    })
                } else {
                    Ok(Expression::Variable(name))
                }
            }
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RightParen, "')'")?;
                Ok(expr)
            }
            _ => Err(self.error_here("expected an expression")),
        }
    }

    fn parse_args(&mut self) -> Result<Vec<Expression>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RightParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(args)
    }

    // Token stream helpers.

    fn peek(&self) -> &Token {
        &self.tokens[self.current.min(self.tokens.len() - 1)]
    }

    fn peek_ahead(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn advance(&mut self) -> &Token {
        let index = self.current;
        if self.current < self.tokens.len() - 1 {
            self.current += 1;
        }
        &self.tokens[index]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.peek().kind == kind
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(&format!("expected {}", expected)))
        }
    }

    fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    /// Skips newline tokens only if `kind` follows them, so that statement
    /// boundaries are preserved when the lookahead fails
    fn skip_newlines_before(&mut self, kind: &TokenKind) {
        let mut lookahead = 0;
        while self.peek_ahead(lookahead).kind == TokenKind::Newline {
            lookahead += 1;
        }
        if &self.peek_ahead(lookahead).kind == kind {
            for _ in 0..lookahead {
                self.advance();
            }
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Dedent | TokenKind::Eof
        )
    }

    /// Consumes a trailing newline after a simple statement, leaving
    /// semicolons and dedents for the caller
    fn end_simple_statement(&mut self) {
        if self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn error_here(&self, message: &str) -> Error {
        let token = self.peek();
        let got = if token.lexeme.is_empty() {
            format!("{:?}", token.kind)
        } else {
            format!("'{}'", token.lexeme)
        };
        Error::SyntaxError {
            line: token.line,
            col: token.column,
            message: format!("{}, got {}", message, got),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Scanner;

    fn parse(source: &str) -> Result<FunctionDef> {
        let tokens = Scanner::new(source).scan_tokens()?;
        FuncParser::new(tokens).parse()
    }

    #[test]
    fn parses_indented_function() {
        let function = parse(
            "def run(x, y):\n    z = x + y\n    if z < 0:\n        return False\n    return True\n",
        )
        .unwrap();

        assert_eq!(function.name, "run");
        assert_eq!(function.params, vec!["x", "y"]);
        assert_eq!(function.body.len(), 3);
        assert!(matches!(function.body[0], Statement::Assign { .. }));
        assert!(matches!(function.body[1], Statement::If { .. }));
        assert!(matches!(function.body[2], Statement::Return { .. }));
    }

    #[test]
    fn parses_inline_function_with_semicolons() {
        let function = parse("run(x, y): z = x + y; if z < 0: return False; return True").unwrap();

        assert_eq!(function.params, vec!["x", "y"]);
        assert!(matches!(function.body[0], Statement::Assign { .. }));
        assert!(matches!(function.body[1], Statement::If { .. }));
    }

    #[test]
    fn def_keyword_is_optional() {
        assert!(parse("run(x): return x").is_ok());
        assert!(parse("def run(x): return x").is_ok());
    }

    #[test]
    fn parses_elif_and_else() {
        let function = parse(
            "def classify(n):\n    if n < 0:\n        return 0\n    elif n > 100:\n        return 1\n    else:\n        return 2\n",
        )
        .unwrap();

        match &function.body[0] {
            Statement::If {
                elif_branches,
                else_body,
                ..
            } => {
                assert_eq!(elif_branches.len(), 1);
                assert!(else_body.is_some());
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn parses_loops_and_calls() {
        let function = parse(
            "def run(n):\n    for i in items:\n        n = step(n, i)\n    while n > 0:\n        n = n - 1\n    return n\n",
        )
        .unwrap();

        assert!(matches!(function.body[0], Statement::For { .. }));
        assert!(matches!(function.body[1], Statement::While { .. }));
    }

    #[test]
    fn source_without_function_is_malformed_input() {
        let err = parse("x = 1\ny = 2\n").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn empty_source_is_malformed_input() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn chained_comparison_is_a_syntax_error() {
        let err = parse("def run(x): if 0 < x < 10: return x").unwrap_err();
        assert!(matches!(err, Error::SyntaxError { .. }));
    }

    #[test]
    fn trailing_garbage_is_a_syntax_error() {
        let err = parse("def run(x): return x\ndef other(y): return y\n").unwrap_err();
        assert!(matches!(err, Error::SyntaxError { .. }));
    }

    #[test]
    fn unary_minus_and_precedence() {
        let function = parse("def run(x): z = -x * 2 + 1").unwrap();
        match &function.body[0] {
            Statement::Assign { value, .. } => {
                assert_eq!(value.to_string(), "(((-x) * 2) + 1)");
            }
            other => panic!("expected assignment, got {:?}", other),
        }
    }
}
