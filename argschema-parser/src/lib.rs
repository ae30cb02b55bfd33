#![no_std]

#[macro_use]
mod fmt;

pub mod lexer;
pub mod marshaler;
pub mod parser;
pub mod schema;

pub use lexer::Tokens;
pub use marshaler::{Marshaler, Value};
pub use parser::{Args, Error};
pub use schema::Kind;
