mod ast;
mod error;
mod grammar;
pub mod tokenizer;

pub use ast::*;
pub use error::{ArithmeticFault, Error};
pub use grammar::parse;
pub use tokenizer::tokenize_string;
