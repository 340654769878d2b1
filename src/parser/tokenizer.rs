use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

use const_format::concatcp;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use super::error::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub(crate) typ: TokenType,
    pub(crate) lexeme: String,
}

impl Token {
    pub fn new(typ: TokenType, lexeme: impl Into<String>) -> Self {
        Self {
            typ,
            lexeme: lexeme.into(),
        }
    }
    pub fn typ(&self) -> TokenType {
        self.typ
    }
    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}('{}')", self.typ, self.lexeme)
    }
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TokenType {
    IF,
    ELSE,
    FOR,
    WHILE,
    PRINT,
    BEGIN,
    END,
    VAR,
    FUNC,
    RETURN,
    IDENTIFIER,
    NUMBER,
    TRUE,
    FALSE,
    NULL,
    ASSIGN,
    PLUS,
    MINUS,
    MULT,
    DIV,
    MOD,
    EQ,
    NE,
    LT,
    GT,
    LE,
    GE,
    AND,
    OR,
    NOT,
    LPAREN,
    RPAREN,
    LBRACE,
    RBRACE,
    SEMICOLON,
    COMMA,
}

const EQ: (&str, TokenType) = ("==", TokenType::EQ);
const NE: (&str, TokenType) = ("!=", TokenType::NE);
const LE: (&str, TokenType) = ("<=", TokenType::LE);
const GE: (&str, TokenType) = (">=", TokenType::GE);
const AND: (&str, TokenType) = ("&&", TokenType::AND);
const OR: (&str, TokenType) = ("||", TokenType::OR);
const ASSIGN: (&str, TokenType) = ("=", TokenType::ASSIGN);
const PLUS: (&str, TokenType) = ("+", TokenType::PLUS);
const MINUS: (&str, TokenType) = ("-", TokenType::MINUS);
const MULT: (&str, TokenType) = ("*", TokenType::MULT);
const DIV: (&str, TokenType) = ("/", TokenType::DIV);
const MOD: (&str, TokenType) = ("%", TokenType::MOD);
const LT: (&str, TokenType) = ("<", TokenType::LT);
const GT: (&str, TokenType) = (">", TokenType::GT);
const NOT: (&str, TokenType) = ("!", TokenType::NOT);
const LPAREN: (&str, TokenType) = ("(", TokenType::LPAREN);
const RPAREN: (&str, TokenType) = (")", TokenType::RPAREN);
const LBRACE: (&str, TokenType) = ("{", TokenType::LBRACE);
const RBRACE: (&str, TokenType) = ("}", TokenType::RBRACE);
const SEMICOLON: (&str, TokenType) = (";", TokenType::SEMICOLON);
const COMMA: (&str, TokenType) = (",", TokenType::COMMA);

// Two-character operators come first so that `<=` never splits into `<` `=`.
const SIMPLE_TOKENS: [(&str, TokenType); 21] = [
    EQ, NE, LE, GE, AND, OR, ASSIGN, PLUS, MINUS, MULT, DIV, MOD, LT, GT, NOT, LPAREN, RPAREN,
    LBRACE, RBRACE, SEMICOLON, COMMA,
];

const S_WHITESPACE: &str = r"^\s+";
const S_DIGITS: &str = r"[0-9]+";
const S_NAME_START: &str = r"[\p{L}_]";
const S_NAME_CONTINUE: &str = r"[\p{L}0-9_]";
const S_NUMBER: &str = concatcp!("^", S_DIGITS);
const S_NAME: &str = concatcp!("^", S_NAME_START, S_NAME_CONTINUE, "*");

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(S_WHITESPACE).expect("Error compiling regex."));
static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(S_NUMBER).expect("Error compiling regex."));
static NAME: Lazy<Regex> = Lazy::new(|| Regex::new(S_NAME).expect("Error compiling regex."));

const ELSE_HEAD: &str = "aksi";
const ELSE_TAIL: &str = "takdirde";
const ELSE_FULL: &str = "aksi takdirde";

/// Reserved words, looked up by exact (case-sensitive) match.
#[derive(Clone, Debug)]
pub struct Keywords(HashMap<&'static str, TokenType>);

impl Keywords {
    pub fn turkish() -> Self {
        let table = HashMap::from([
            ("eğer", TokenType::IF),
            (ELSE_HEAD, TokenType::ELSE),
            (ELSE_TAIL, TokenType::ELSE),
            (ELSE_FULL, TokenType::ELSE),
            ("için", TokenType::FOR),
            ("iken", TokenType::WHILE),
            ("yazdır", TokenType::PRINT),
            ("başla", TokenType::BEGIN),
            ("bitir", TokenType::END),
            ("değişken", TokenType::VAR),
            ("fonksiyon", TokenType::FUNC),
            ("dön", TokenType::RETURN),
            ("doğru", TokenType::TRUE),
            ("yanlış", TokenType::FALSE),
            ("boş", TokenType::NULL),
        ]);
        Self(table)
    }
    pub fn get(&self, word: &str) -> Option<TokenType> {
        self.0.get(word).copied()
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::turkish()
    }
}

/// Turns source text into tokens. Input can arrive in pieces (one line at a
/// time in the REPL); `tokenize` reports whether a `(` or `{` is still open.
#[derive(Debug)]
pub struct Tokenizer {
    keywords: Keywords,
    tokens: Vec<Token>,
    nesting: isize,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self::with_keywords(Keywords::default())
    }
    pub fn with_keywords(keywords: Keywords) -> Self {
        Self {
            keywords,
            tokens: vec![],
            nesting: 0,
        }
    }
    pub fn tokenize(&mut self, input: impl Iterator<Item = String>) -> ParserState {
        for line in input {
            if let Err(err) = self.tokenize_line(line.as_str()) {
                return ParserState::Error(err);
            }
        }
        if self.nesting > 0 {
            return ParserState::ContinuationNeeded;
        }
        ParserState::Ok
    }
    pub fn finalize(self) -> Vec<Token> {
        debug!(count = self.tokens.len(), "tokenized");
        self.tokens
    }
    fn tokenize_line(&mut self, line: &str) -> Result<(), Error> {
        let mut start = 0;
        while start < line.len() {
            let rest = &line[start..];
            if let Some(m) = WHITESPACE.find(rest) {
                start += m.end();
                continue;
            }
            if let Some(m) = NUMBER.find(rest) {
                self.push(TokenType::NUMBER, m.as_str());
                start += m.end();
                continue;
            }
            if let Some(m) = NAME.find(rest) {
                self.push_word(m.as_str());
                start += m.end();
                continue;
            }
            match SIMPLE_TOKENS
                .iter()
                .find(|(lexeme, _)| rest.starts_with(*lexeme))
            {
                Some(&(lexeme, typ)) => {
                    self.push(typ, lexeme);
                    start += lexeme.len();
                }
                None => return Err(Error::UnknownToken(rest.chars().take(1).collect())),
            }
        }
        Ok(())
    }

    fn push_word(&mut self, word: &str) {
        // "aksi takdirde" is one keyword written as two words.
        if word == ELSE_TAIL {
            if let Some(last) = self.tokens.last_mut() {
                if last.typ == TokenType::ELSE && last.lexeme == ELSE_HEAD {
                    last.lexeme = ELSE_FULL.to_string();
                    return;
                }
            }
        }
        let typ = self.keywords.get(word).unwrap_or(TokenType::IDENTIFIER);
        self.push(typ, word);
    }

    fn push(&mut self, typ: TokenType, lexeme: &str) {
        match typ {
            TokenType::LPAREN | TokenType::LBRACE => self.nesting += 1,
            TokenType::RPAREN | TokenType::RBRACE => self.nesting -= 1,
            _ => {}
        }
        let token = Token::new(typ, lexeme);
        trace!(%token, "push");
        self.tokens.push(token);
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn tokenize_string(input: &str) -> Result<Vec<Token>, Error> {
    let mut tokenizer = Tokenizer::new();
    match tokenizer.tokenize(input.lines().map(str::to_string)) {
        ParserState::Error(err) => Err(err),
        ParserState::Ok | ParserState::ContinuationNeeded => Ok(tokenizer.finalize()),
    }
}

pub fn tokenize_file<P>(path: P) -> Result<Vec<Token>, Error>
where
    P: AsRef<Path>,
{
    let file_error = |source| Error::File {
        path: path.as_ref().to_path_buf(),
        source,
    };
    let lines = read_lines(&path)
        .and_then(|lines| lines.collect::<io::Result<Vec<String>>>())
        .map_err(file_error)?;
    let mut tokenizer = Tokenizer::new();
    match tokenizer.tokenize(lines.into_iter()) {
        ParserState::Error(err) => Err(err),
        ParserState::Ok | ParserState::ContinuationNeeded => Ok(tokenizer.finalize()),
    }
}

fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

#[derive(Debug)]
pub enum ParserState {
    Ok,
    ContinuationNeeded,
    Error(Error),
}
