use std::io::Write;
use std::path::Path;

mod config;
pub use config::{Config, ForLoop};

mod parser;
pub use parser::tokenizer::{tokenize_file, Keywords, ParserState, Token, TokenType, Tokenizer};
pub use parser::{
    parse, tokenize_string, ArithmeticFault, Block, Error, ExprId, Expression, Name, Operator,
    Program, Statement, StmtId,
};

mod symbol_table;
pub use symbol_table::SymbolTable;

mod interpreter;
pub use interpreter::Interpreter;

/// Tokenizes, parses and runs `source` on `interpreter`.
pub fn run_source<W: Write>(source: &str, interpreter: &mut Interpreter<W>) -> Result<(), Error> {
    let tokens = tokenize_string(source)?;
    let program = parse(&tokens)?;
    interpreter.run(&program)
}

pub fn run_file<W, P>(path: P, interpreter: &mut Interpreter<W>) -> Result<(), Error>
where
    W: Write,
    P: AsRef<Path>,
{
    let tokens = tokenize_file(path)?;
    let program = parse(&tokens)?;
    interpreter.run(&program)
}
