use crate::dag::{Dag, DagExpr, NodeId};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLoc {
    pub line: usize,
    pub col: usize,
}

impl SourceLoc {
    pub fn new(line: usize, col: usize) -> Self {
        SourceLoc { line, col }
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Tokenizer or parser failure, located at line:col in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadError {
    pub message: String,
    pub loc: SourceLoc,
}

impl ReadError {
    fn new(message: impl Into<String>, loc: SourceLoc) -> Self {
        ReadError {
            message: message.into(),
            loc,
        }
    }
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "syntax error at {}: {}", self.loc, self.message)
    }
}

impl std::error::Error for ReadError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
}

#[derive(Debug, Clone, PartialEq)]
struct TokenWithLoc {
    token: Token,
    loc: SourceLoc,
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    fn get_loc(&self) -> SourceLoc {
        SourceLoc::new(self.line, self.col)
    }

    fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current();
        if let Some(ch) = c {
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.current() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_number(&mut self) -> Result<Token, ReadError> {
        let loc = self.get_loc();
        let mut text = String::new();

        while let Some(c) = self.current() {
            if c.is_ascii_digit() {
                text.push(c);
                self.advance();
            } else {
                break;
            }
        }

        if self.current() == Some('.') {
            text.push('.');
            self.advance();
            let mut saw_digit = false;
            while let Some(c) = self.current() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                    saw_digit = true;
                } else {
                    break;
                }
            }
            if !saw_digit {
                return Err(ReadError::new("expected digit after decimal point", loc));
            }
        }

        if matches!(self.current(), Some('e') | Some('E')) {
            text.push('e');
            self.advance();
            if matches!(self.current(), Some('+') | Some('-')) {
                if let Some(sign) = self.advance() {
                    text.push(sign);
                }
            }
            let mut saw_digit = false;
            while let Some(c) = self.current() {
                if c.is_ascii_digit() {
                    text.push(c);
                    self.advance();
                    saw_digit = true;
                } else {
                    break;
                }
            }
            if !saw_digit {
                return Err(ReadError::new("expected digit in exponent", loc));
            }
        }

        let value: f64 = text
            .parse()
            .map_err(|_| ReadError::new(format!("invalid numeric literal '{}'", text), loc))?;
        if !value.is_finite() {
            return Err(ReadError::new(
                format!("numeric literal '{}' out of range", text),
                loc,
            ));
        }
        Ok(Token::Number(value))
    }

    fn tokenize(mut self) -> Result<(Vec<TokenWithLoc>, SourceLoc), ReadError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let loc = self.get_loc();
            let token = match self.current() {
                None => break,
                Some(c) if c.is_ascii_digit() || c == '.' => self.read_number()?,
                Some('+') => {
                    self.advance();
                    Token::Plus
                }
                Some('-') => {
                    self.advance();
                    Token::Minus
                }
                Some('*') => {
                    self.advance();
                    Token::Star
                }
                Some('/') => {
                    self.advance();
                    Token::Slash
                }
                Some('(') => {
                    self.advance();
                    Token::LeftParen
                }
                Some(')') => {
                    self.advance();
                    Token::RightParen
                }
                Some(c) => {
                    return Err(ReadError::new(format!("unexpected character '{}'", c), loc));
                }
            };
            tokens.push(TokenWithLoc { token, loc });
        }
        Ok((tokens, self.get_loc()))
    }
}

struct Parser {
    tokens: Vec<TokenWithLoc>,
    pos: usize,
    end_loc: SourceLoc,
    dag: Dag,
}

impl Parser {
    fn new(tokens: Vec<TokenWithLoc>, end_loc: SourceLoc) -> Self {
        Parser {
            tokens,
            pos: 0,
            end_loc,
            dag: Dag::new(),
        }
    }

    fn peek(&self) -> Option<&TokenWithLoc> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<TokenWithLoc> {
        let tok = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        tok
    }

    fn here(&self) -> SourceLoc {
        self.peek().map(|t| t.loc).unwrap_or(self.end_loc)
    }

    // expr := term (('+' | '-') term)*
    fn parse_expr(&mut self) -> Result<NodeId, ReadError> {
        let mut node = self.parse_term()?;
        while let Some(tok) = self.peek() {
            let op = match tok.token {
                Token::Plus => DagExpr::Add,
                Token::Minus => DagExpr::Subtract,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            node = self.dag.push(op(node, rhs));
        }
        Ok(node)
    }

    // term := factor (('*' | '/') factor)*
    fn parse_term(&mut self) -> Result<NodeId, ReadError> {
        let mut node = self.parse_factor()?;
        while let Some(tok) = self.peek() {
            let op = match tok.token {
                Token::Star => DagExpr::Multiply,
                Token::Slash => DagExpr::Divide,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_factor()?;
            node = self.dag.push(op(node, rhs));
        }
        Ok(node)
    }

    // factor := '-' factor | '(' expr ')' | number
    fn parse_factor(&mut self) -> Result<NodeId, ReadError> {
        let loc = self.here();
        match self.advance() {
            Some(TokenWithLoc {
                token: Token::Number(value),
                ..
            }) => Ok(self.dag.push(DagExpr::Value(value))),
            Some(TokenWithLoc {
                token: Token::Minus,
                ..
            }) => {
                let operand = self.parse_factor()?;
                Ok(self.dag.push(DagExpr::Negate(operand)))
            }
            Some(TokenWithLoc {
                token: Token::LeftParen,
                loc: open_loc,
            }) => {
                let node = self.parse_expr()?;
                match self.advance() {
                    Some(TokenWithLoc {
                        token: Token::RightParen,
                        ..
                    }) => Ok(node),
                    _ => Err(ReadError::new("unclosed parenthesis", open_loc)),
                }
            }
            Some(tok) => Err(ReadError::new(
                format!("expected expression, found {:?}", tok.token),
                tok.loc,
            )),
            None => Err(ReadError::new("unexpected end of input", loc)),
        }
    }
}

/// Parse expression text into a DAG. Blank input yields a DAG with no root;
/// the caller decides whether that is an error.
pub fn read_expression(input: &str) -> Result<Dag, ReadError> {
    let (tokens, end_loc) = Lexer::new(input).tokenize()?;
    if tokens.is_empty() {
        return Ok(Dag::new());
    }

    let mut parser = Parser::new(tokens, end_loc);
    let root = parser.parse_expr()?;
    if let Some(tok) = parser.peek() {
        return Err(ReadError::new(
            format!("unexpected trailing input {:?}", tok.token),
            tok.loc,
        ));
    }

    let mut dag = parser.dag;
    dag.set_root(root);
    Ok(dag)
}
