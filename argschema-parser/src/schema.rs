//! A compiler turning a schema string into a table of marshalers.
//!
//! A schema is a comma-separated list of elements. Each element is a flag character followed
//! by a type suffix:
//!
//! | Suffix | Kind          |
//! |--------|---------------|
//! | (none) | boolean       |
//! | `*`    | string        |
//! | `#`    | integer       |
//! | `##`   | double        |
//! | `[*]`  | string list   |
//! | `&`    | string map    |
//!
//! For instance, `"v,o*,p#"` declares a boolean `-v`, a string `-o` and an integer `-p`.

use core::fmt;
use core::str::Split;

use heapless::LinearMap;

use crate::marshaler::Marshaler;
use crate::parser::Error;

/// Separator between schema elements.
pub const SEPARATOR: char = ',';

/// Type of the value attached to a flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Kind {
    /// Boolean, set by the presence of the flag alone.
    Boolean,

    /// String, taken verbatim from the next argument.
    Str,

    /// 32-bit signed integer.
    Integer,

    /// Double precision floating-point number.
    Double,

    /// Ordered list of strings, one per occurrence of the flag.
    StrList,

    /// Map of `key=value` pairs, one per occurrence of the flag.
    StrMap,
}

impl Kind {
    /// All the kinds, in schema suffix order.
    pub const ALL: [Kind; 6] = [
        Kind::Boolean,
        Kind::Str,
        Kind::Integer,
        Kind::Double,
        Kind::StrList,
        Kind::StrMap,
    ];

    /// Resolve a kind from its schema suffix. Only exact matches are accepted.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "" => Some(Kind::Boolean),
            "*" => Some(Kind::Str),
            "#" => Some(Kind::Integer),
            "##" => Some(Kind::Double),
            "[*]" => Some(Kind::StrList),
            "&" => Some(Kind::StrMap),
            _ => None,
        }
    }

    /// The schema suffix of the kind.
    pub fn suffix(self) -> &'static str {
        match self {
            Kind::Boolean => "",
            Kind::Str => "*",
            Kind::Integer => "#",
            Kind::Double => "##",
            Kind::StrList => "[*]",
            Kind::StrMap => "&",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Boolean => "boolean",
            Kind::Str => "string",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::StrList => "string list",
            Kind::StrMap => "string map",
        };

        f.write_str(name)
    }
}

/// Look-up table from flag character to its marshaler.
pub type Table<'a, const FLAGS: usize, const VALUES: usize> =
    LinearMap<char, Marshaler<'a, VALUES>, FLAGS>;

/// Iterate over the entries declared by a schema.
pub fn entries(schema: &str) -> Entries<'_> {
    Entries {
        elements: schema.split(SEPARATOR),
    }
}

/// An iterator over schema entries.
///
/// Elements are trimmed. Empty or blank elements (e.g. in `"x,,y"` or `"x, ,y"`) are skipped.
#[derive(Clone, Debug)]
pub struct Entries<'a> {
    elements: Split<'a, char>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = Result<(char, Kind), Error<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        for element in self.elements.by_ref() {
            let mut chars = element.trim().chars();

            let Some(id) = chars.next() else {
                continue;
            };

            return Some(parse_element(id, chars.as_str()));
        }

        None
    }
}

fn parse_element(id: char, tail: &str) -> Result<(char, Kind), Error<'_>> {
    if !id.is_alphabetic() {
        return Err(Error::InvalidArgumentName(id));
    }

    Kind::from_suffix(tail)
        .map(|kind| (id, kind))
        .ok_or(Error::InvalidArgumentFormat { id, tail })
}

/// Compile a schema into a table of marshalers holding default values.
///
/// A flag declared more than once keeps its last declaration.
pub fn compile<'a, const FLAGS: usize, const VALUES: usize>(
    schema: &'a str,
) -> Result<Table<'a, FLAGS, VALUES>, Error<'a>> {
    let mut table = Table::new();

    for entry in entries(schema) {
        let (id, kind) = entry?;
        trace!("schema entry {} as {}", id, kind);

        if table.insert(id, Marshaler::new(kind)).is_err() {
            return Err(Error::OutOfMemory);
        }
    }

    Ok(table)
}
