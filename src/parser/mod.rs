//! Scanner for inline meta-annotations in rich-text templates

pub mod ast;
mod grammar;
pub mod lexer;

pub use ast::*;
pub use grammar::{is_key_char, scan};
