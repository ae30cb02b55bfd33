//! argschema, a `no_std` schema-driven argument parser for constrained systems.
//!
//! A schema such as `"v,o*,p#,d[*],e&"` declares single-character flags and the type of their
//! values. See [`parser::schema`] for the list of type suffixes.
#![no_std]
#![deny(missing_docs)]

pub use argschema_macros as macros;
pub use argschema_parser as parser;

pub use macros::schema;
pub use parser::{Args, Error, Kind};
