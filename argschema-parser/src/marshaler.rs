//! Marshalers extracting typed values out of the arguments following a flag.

use heapless::{LinearMap, Vec};

use crate::parser::Error;
use crate::schema::Kind;

/// Separator between the key and the value of a map entry (e.g. `key=value`).
pub const PAIR_SEPARATOR: char = '=';

/// Value held by a marshaler. Strings are borrowed from the command line.
#[derive(Clone, Debug, PartialEq)]
pub enum Value<'a, const VALUES: usize> {
    /// Boolean, `false` unless the flag is present.
    Boolean(bool),

    /// String, empty unless set.
    Str(&'a str),

    /// Integer, zero unless set.
    Integer(i32),

    /// Double, zero unless set.
    Double(f64),

    /// List of strings in order of occurrence.
    StrList(Vec<&'a str, VALUES>),

    /// Map of strings. A repeated key overwrites the previous value.
    StrMap(LinearMap<&'a str, &'a str, VALUES>),
}

impl<const VALUES: usize> Value<'_, VALUES> {
    /// Create the default value of the given kind.
    pub fn default_for(kind: Kind) -> Self {
        match kind {
            Kind::Boolean => Value::Boolean(false),
            Kind::Str => Value::Str(""),
            Kind::Integer => Value::Integer(0),
            Kind::Double => Value::Double(0.0),
            Kind::StrList => Value::StrList(Vec::new()),
            Kind::StrMap => Value::StrMap(LinearMap::new()),
        }
    }

    /// Kind of the value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Str(_) => Kind::Str,
            Value::Integer(_) => Kind::Integer,
            Value::Double(_) => Kind::Double,
            Value::StrList(_) => Kind::StrList,
            Value::StrMap(_) => Kind::StrMap,
        }
    }
}

/// Failure of a marshaler. It does not know its flag, see [`Fault::at`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault<'a> {
    /// There is no argument left to read the value from.
    Missing,

    /// The argument cannot be parsed as a number.
    Invalid(&'a str),

    /// The argument is not a `key=value` pair.
    Malformed(&'a str),

    /// No space left for another value.
    Full,
}

impl<'a> Fault<'a> {
    /// Attach the flag to the fault.
    pub fn at(self, id: char) -> Error<'a> {
        match self {
            Fault::Missing => Error::MissingValue(id),
            Fault::Invalid(value) => Error::InvalidFormat { id, value },
            Fault::Malformed(value) => Error::MalformedMap { id, value },
            Fault::Full => Error::TooManyValues(id),
        }
    }
}

/// Defines a `Marshaler`, holding the value of one flag and whether it has been seen.
#[derive(Clone, Debug)]
pub struct Marshaler<'a, const VALUES: usize> {
    value: Value<'a, VALUES>,
    present: bool,
}

impl<'a, const VALUES: usize> Marshaler<'a, VALUES> {
    /// Create a marshaler holding the default value of the given kind.
    pub fn new(kind: Kind) -> Self {
        Marshaler {
            value: Value::default_for(kind),
            present: false,
        }
    }

    /// Kind of the marshaled value.
    #[inline(always)]
    pub fn kind(&self) -> Kind {
        self.value.kind()
    }

    /// Check if the flag has been seen on the command line.
    #[inline(always)]
    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Current value, or the default one if the flag has not been seen.
    #[inline(always)]
    pub fn value(&self) -> &Value<'a, VALUES> {
        &self.value
    }

    /// Read the value from the arguments following the flag and return how many of them were
    /// consumed. Booleans consume nothing, every other kind consumes exactly one argument.
    ///
    /// The next argument is taken as is, even when it starts with the flag marker.
    pub fn set(&mut self, rest: &'a [&'a str]) -> Result<usize, Fault<'a>> {
        self.present = true;

        match &mut self.value {
            Value::Boolean(value) => {
                *value = true;
                return Ok(0);
            }

            Value::Str(value) => *value = next(rest)?,

            Value::Integer(value) => {
                let arg = next(rest)?;
                *value = arg.parse().map_err(|_| Fault::Invalid(arg))?;
            }

            Value::Double(value) => {
                let arg = next(rest)?;
                *value = arg.parse().map_err(|_| Fault::Invalid(arg))?;
            }

            Value::StrList(values) => {
                values.push(next(rest)?).map_err(|_| Fault::Full)?;
            }

            Value::StrMap(pairs) => {
                let arg = next(rest)?;
                let (key, value) = arg.split_once(PAIR_SEPARATOR).ok_or(Fault::Malformed(arg))?;
                pairs.insert(key, value).map_err(|_| Fault::Full)?;
            }
        }

        Ok(1)
    }
}

#[inline(always)]
fn next<'a>(rest: &[&'a str]) -> Result<&'a str, Fault<'a>> {
    rest.first().copied().ok_or(Fault::Missing)
}
