use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number,
    Str,
    Ident,
    Var,
    If,
    Else,
    While,
    For,
    True,
    False,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semi,
    Comma,
    Dot,
    AmpAmp,
    PipePipe,
    EqEq,
    EqEqEq,
    BangEq,
    BangEqEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Eq,
    PlusEq,
    MinusEq,
    PlusPlus,
    MinusMinus,
    Bang,
    Eof,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim source text. For string literals this is the content between
    /// the quotes.
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Start of the first comment in this token's leading trivia. Comments are
    /// skipped, but their position still counts as a statement's effective
    /// start for the top-level adjacency heuristic.
    pub comment_start: Option<usize>,
}

pub(crate) fn line_col_at(text: &str, pos: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in text.char_indices() {
        if i >= pos {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

struct Lexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn error_at(&self, pos: usize, found: char) -> ParseError {
        let (line, column) = line_col_at(self.text, pos);
        ParseError::UnexpectedChar { found, line, column }
    }

    /// Skips whitespace and comments, returning the start of the first comment
    /// encountered, if any.
    fn skip_trivia(&mut self) -> Result<Option<usize>, ParseError> {
        let mut comment_start = None;
        loop {
            match self.peek() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.pos += 1;
                }
                Some(b'/') if self.peek_at(1) == Some(b'/') => {
                    comment_start.get_or_insert(self.pos);
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                Some(b'/') if self.peek_at(1) == Some(b'*') => {
                    let start = self.pos;
                    comment_start.get_or_insert(start);
                    self.pos += 2;
                    loop {
                        match self.peek() {
                            Some(b'*') if self.peek_at(1) == Some(b'/') => {
                                self.pos += 2;
                                break;
                            }
                            Some(_) => self.pos += 1,
                            None => {
                                let (line, column) = line_col_at(self.text, start);
                                return Err(ParseError::UnterminatedComment { line, column });
                            }
                        }
                    }
                }
                _ => return Ok(comment_start),
            }
        }
    }

    fn lex_number(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        self.token(TokenKind::Number, start)
    }

    fn lex_ident(&mut self) -> Token {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
        {
            self.pos += 1;
        }
        let kind = match &self.text[start..self.pos] {
            // `let` and `const` declare the same way `var` does for this subset.
            "var" | "let" | "const" => TokenKind::Var,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "for" => TokenKind::For,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            _ => TokenKind::Ident,
        };
        self.token(kind, start)
    }

    fn lex_string(&mut self, quote: u8) -> Result<Token, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let content_start = self.pos;
        loop {
            match self.peek() {
                Some(b) if b == quote => {
                    let content = self.text[content_start..self.pos].to_string();
                    self.pos += 1;
                    return Ok(Token {
                        kind: TokenKind::Str,
                        text: content,
                        start,
                        end: self.pos,
                        comment_start: None,
                    });
                }
                Some(b'\\') => self.pos += 2,
                Some(b'\n') | None => {
                    let (line, column) = line_col_at(self.text, start);
                    return Err(ParseError::UnterminatedString { line, column });
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            text: self.text[start..self.pos].to_string(),
            start,
            end: self.pos,
            comment_start: None,
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let comment_start = self.skip_trivia()?;
        let start = self.pos;
        let Some(b) = self.peek() else {
            let mut tok = self.token(TokenKind::Eof, start);
            tok.comment_start = comment_start;
            return Ok(tok);
        };

        let mut tok = match b {
            b'0'..=b'9' => self.lex_number(),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.lex_ident(),
            b'\'' | b'"' => self.lex_string(b)?,
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'{' => self.single(TokenKind::LBrace),
            b'}' => self.single(TokenKind::RBrace),
            b';' => self.single(TokenKind::Semi),
            b',' => self.single(TokenKind::Comma),
            b'.' => self.single(TokenKind::Dot),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'^' => self.single(TokenKind::Caret),
            b'&' => {
                if self.peek_at(1) == Some(b'&') {
                    self.double(TokenKind::AmpAmp)
                } else {
                    return Err(self.error_at(start, '&'));
                }
            }
            b'|' => {
                if self.peek_at(1) == Some(b'|') {
                    self.double(TokenKind::PipePipe)
                } else {
                    return Err(self.error_at(start, '|'));
                }
            }
            b'=' => match (self.peek_at(1), self.peek_at(2)) {
                (Some(b'='), Some(b'=')) => self.triple(TokenKind::EqEqEq),
                (Some(b'='), _) => self.double(TokenKind::EqEq),
                _ => self.single(TokenKind::Eq),
            },
            b'!' => match (self.peek_at(1), self.peek_at(2)) {
                (Some(b'='), Some(b'=')) => self.triple(TokenKind::BangEqEq),
                (Some(b'='), _) => self.double(TokenKind::BangEq),
                _ => self.single(TokenKind::Bang),
            },
            b'<' => {
                if self.peek_at(1) == Some(b'=') {
                    self.double(TokenKind::LtEq)
                } else {
                    self.single(TokenKind::Lt)
                }
            }
            b'>' => {
                if self.peek_at(1) == Some(b'=') {
                    self.double(TokenKind::GtEq)
                } else {
                    self.single(TokenKind::Gt)
                }
            }
            b'+' => match self.peek_at(1) {
                Some(b'+') => self.double(TokenKind::PlusPlus),
                Some(b'=') => self.double(TokenKind::PlusEq),
                _ => self.single(TokenKind::Plus),
            },
            b'-' => match self.peek_at(1) {
                Some(b'-') => self.double(TokenKind::MinusMinus),
                Some(b'=') => self.double(TokenKind::MinusEq),
                _ => self.single(TokenKind::Minus),
            },
            other => {
                let ch = self.text[start..].chars().next().unwrap_or(other as char);
                return Err(self.error_at(start, ch));
            }
        };
        tok.comment_start = comment_start;
        Ok(tok)
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 1;
        self.token(kind, start)
    }

    fn double(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 2;
        self.token(kind, start)
    }

    fn triple(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.pos += 3;
        self.token(kind, start)
    }
}

/// Tokenizes the whole input, appending a trailing `Eof` token.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(text);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
