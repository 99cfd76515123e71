//! RFC 8949 diagnostic notation for data trees.
//!
//! Used for tracing and debugging only; nothing parses it back. The grammar
//! is still fixed so output can be compared against golden strings:
//!
//! - `42`, `-7`
//! - `h'DEADBEEF'` (uppercase hex), `h''`
//! - `[]`, `[_ 1, 2, 3]`
//! - `{}`, `{_ 1: h'AA', 2: h'BB'}`
//! - `121([_ 42])`, `122([])`, and `102([_ 200, [_ ...]])` for large indices

use std::fmt;

use crate::canonical::{constr_tag, TAG_GENERAL_CONSTR};
use crate::data::{Data, ToData};

/// Render a typed value's data tree in diagnostic notation.
pub fn diagnostic<T: ToData + ?Sized>(value: &T) -> String {
    value.as_data().to_string()
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Data::Int(n) => write!(f, "{}", n),
            Data::Bytes(b) => write!(f, "h'{}'", hex::encode_upper(b)),
            Data::List(items) => write_list(f, items),
            Data::Map(entries) => {
                if entries.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{_ ")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Data::Constr { index, fields } => match constr_tag(*index) {
                Some(tag) => {
                    write!(f, "{}(", tag)?;
                    write_list(f, fields)?;
                    f.write_str(")")
                }
                None => {
                    write!(f, "{}([_ {}, ", TAG_GENERAL_CONSTR, index)?;
                    write_list(f, fields)?;
                    f.write_str("])")
                }
            },
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Data]) -> fmt::Result {
    if items.is_empty() {
        return f.write_str("[]");
    }
    f.write_str("[_ ")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}
