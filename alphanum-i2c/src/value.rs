use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Anything the wing can be asked to show or to fill with.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
        }
    }
}

/// Parses command-line style input: booleans first, then integers, then
/// floats. Anything else is kept as text.
impl FromStr for Value {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(b) = trimmed.parse::<bool>() {
            return Ok(Value::Bool(b));
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Ok(Value::Integer(n));
        }
        match trimmed.parse::<f64>() {
            Ok(x) if x.is_finite() => Ok(Value::Float(x)),
            _ => Ok(Value::Text(s.to_owned())),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Text(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Text(text)
    }
}

impl From<&String> for Value {
    fn from(text: &String) -> Self {
        Value::Text(text.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

macro_rules! integer_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Integer(n as i64)
                }
            }
        )*
    };
}

integer_value!(i8, i16, i32, i64, u8, u16, u32);

// Widths that may not fit an i64. Anything that large is far too wide for
// the display anyway, so it is kept as a float and rejected as an overflow.
macro_rules! wide_integer_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer)
                }
            }
        )*
    };
}

wide_integer_value!(u64, usize, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_integer_width_converts() {
        assert_eq!(Value::from(42u64), Value::Integer(42));
        assert_eq!(Value::from("abc".len()), Value::Integer(3));
        assert_eq!(Value::from(-7isize), Value::Integer(-7));
        assert_eq!(Value::from(u64::MAX), Value::Float(u64::MAX as f64));
    }

    #[test]
    fn parses_booleans_before_numbers() {
        assert_eq!("true".parse::<Value>(), Ok(Value::Bool(true)));
        assert_eq!("false".parse::<Value>(), Ok(Value::Bool(false)));
    }

    #[test]
    fn parses_integers_and_floats() {
        assert_eq!("1234".parse::<Value>(), Ok(Value::Integer(1234)));
        assert_eq!("-12".parse::<Value>(), Ok(Value::Integer(-12)));
        assert_eq!("3.14".parse::<Value>(), Ok(Value::Float(3.14)));
    }

    #[test]
    fn everything_else_is_text() {
        assert_eq!("ABCD".parse::<Value>(), Ok(Value::Text("ABCD".into())));
        assert_eq!("on".parse::<Value>(), Ok(Value::Text("on".into())));
        // "inf" and "NaN" parse as f64 but can never be shown as numbers
        assert_eq!("inf".parse::<Value>(), Ok(Value::Text("inf".into())));
    }

    #[test]
    fn bools_render_like_words() {
        assert_eq!(Value::Bool(true).to_string(), "True");
        assert_eq!(Value::Bool(false).to_string(), "False");
    }

    #[test]
    fn conversions() {
        assert_eq!(Value::from(42u8), Value::Integer(42));
        assert_eq!(Value::from(-7i32), Value::Integer(-7));
        assert_eq!(Value::from(0.5f32), Value::Float(0.5));
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(1).as_bool(), None);
    }
}
