//! The self-describing data tree that typed values erase to.
//!
//! [`Data`] is the universal on-the-wire shape: integers, byte strings,
//! lists, maps, and constructor applications. Typed values convert through
//! [`ToData`] and [`FromData`]; the canonical byte form lives in
//! [`canonical`](crate::canonical) and [`decode`](crate::decode).

use std::borrow::Cow;

use num_bigint::BigInt;

use crate::dict::Dict;

/// A node of the data tree.
///
/// Maps are plain pair lists at this layer: no ordering or uniqueness is
/// enforced, and equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Data {
    /// Constructor `index` applied to `fields`.
    Constr { index: u64, fields: Vec<Data> },
    Map(Vec<(Data, Data)>),
    List(Vec<Data>),
    Int(BigInt),
    Bytes(Vec<u8>),
}

impl Data {
    pub fn constr(index: u64, fields: Vec<Data>) -> Self {
        Data::Constr { index, fields }
    }

    pub fn int(n: impl Into<BigInt>) -> Self {
        Data::Int(n.into())
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Data::Bytes(b.as_ref().to_vec())
    }

    pub fn list(items: Vec<Data>) -> Self {
        Data::List(items)
    }

    pub fn map(entries: Vec<(Data, Data)>) -> Self {
        Data::Map(entries)
    }

    pub fn as_int(&self) -> Option<&BigInt> {
        match self {
            Data::Int(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Data::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Data]> {
        match self {
            Data::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(Data, Data)]> {
        match self {
            Data::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Constructor index and fields, if this is a constructor application.
    pub fn as_constr(&self) -> Option<(u64, &[Data])> {
        match self {
            Data::Constr { index, fields } => Some((*index, fields)),
            _ => None,
        }
    }
}

/// Conversion of a typed value into its data tree.
pub trait ToData {
    fn to_data(&self) -> Data;

    /// The data tree, borrowed when `self` already is one.
    fn as_data(&self) -> Cow<'_, Data> {
        Cow::Owned(self.to_data())
    }
}

/// Conversion of a data tree back into a typed value. Returns `None` when the
/// tree does not have the expected shape.
pub trait FromData: Sized {
    fn from_data(data: &Data) -> Option<Self>;
}

impl ToData for Data {
    fn to_data(&self) -> Data {
        self.clone()
    }

    fn as_data(&self) -> Cow<'_, Data> {
        Cow::Borrowed(self)
    }
}

impl FromData for Data {
    fn from_data(data: &Data) -> Option<Self> {
        Some(data.clone())
    }
}

impl ToData for BigInt {
    fn to_data(&self) -> Data {
        Data::Int(self.clone())
    }
}

impl FromData for BigInt {
    fn from_data(data: &Data) -> Option<Self> {
        data.as_int().cloned()
    }
}

impl ToData for i64 {
    fn to_data(&self) -> Data {
        Data::Int(BigInt::from(*self))
    }
}

impl FromData for i64 {
    fn from_data(data: &Data) -> Option<Self> {
        data.as_int().and_then(|n| i64::try_from(n).ok())
    }
}

impl ToData for u64 {
    fn to_data(&self) -> Data {
        Data::Int(BigInt::from(*self))
    }
}

impl FromData for u64 {
    fn from_data(data: &Data) -> Option<Self> {
        data.as_int().and_then(|n| u64::try_from(n).ok())
    }
}

/// `False` is constructor 0, `True` constructor 1, both without fields.
impl ToData for bool {
    fn to_data(&self) -> Data {
        Data::constr(u64::from(*self), Vec::new())
    }
}

impl FromData for bool {
    fn from_data(data: &Data) -> Option<Self> {
        match data.as_constr()? {
            (0, []) => Some(false),
            (1, []) => Some(true),
            _ => None,
        }
    }
}

/// `Some(x)` is constructor 0 with one field, `None` constructor 1.
impl<T: ToData> ToData for Option<T> {
    fn to_data(&self) -> Data {
        match self {
            Some(value) => Data::constr(0, vec![value.to_data()]),
            None => Data::constr(1, Vec::new()),
        }
    }
}

impl<T: FromData> FromData for Option<T> {
    fn from_data(data: &Data) -> Option<Self> {
        match data.as_constr()? {
            (0, [value]) => T::from_data(value).map(Some),
            (1, []) => Some(None),
            _ => None,
        }
    }
}

impl<T: ToData> ToData for Vec<T> {
    fn to_data(&self) -> Data {
        Data::List(self.iter().map(ToData::to_data).collect())
    }
}

impl<T: FromData> FromData for Vec<T> {
    fn from_data(data: &Data) -> Option<Self> {
        data.as_list()?.iter().map(T::from_data).collect()
    }
}

/// Pairs erase to two-element lists.
impl<A: ToData, B: ToData> ToData for (A, B) {
    fn to_data(&self) -> Data {
        Data::List(vec![self.0.to_data(), self.1.to_data()])
    }
}

impl<A: FromData, B: FromData> FromData for (A, B) {
    fn from_data(data: &Data) -> Option<Self> {
        match data.as_list()? {
            [a, b] => Some((A::from_data(a)?, B::from_data(b)?)),
            _ => None,
        }
    }
}

impl<K: ToData, V: ToData> ToData for Dict<K, V> {
    fn to_data(&self) -> Data {
        Data::Map(self.iter().map(|(k, v)| (k.to_data(), v.to_data())).collect())
    }
}

/// Keys must arrive strictly ascending; anything else is rejected rather
/// than re-sorted.
impl<K: FromData + Ord, V: FromData> FromData for Dict<K, V> {
    fn from_data(data: &Data) -> Option<Self> {
        let pairs = data
            .as_map()?
            .iter()
            .map(|(k, v)| Some((K::from_data(k)?, V::from_data(v)?)))
            .collect::<Option<Vec<_>>>()?;
        Dict::from_ascending_pairs(pairs).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_is_borrowed_not_copied() {
        let data = Data::list(vec![Data::int(1), Data::bytes(b"ab")]);
        assert!(matches!(data.as_data(), Cow::Borrowed(d) if std::ptr::eq(d, &data)));

        let binding = vec![1i64, 2];
        let owned = binding.as_data();
        assert!(matches!(owned, Cow::Owned(_)));
        assert_eq!(*owned, Data::list(vec![Data::int(1), Data::int(2)]));
    }

    #[test]
    fn test_option_layout() {
        assert_eq!(Some(42i64).to_data(), Data::constr(0, vec![Data::int(42)]));
        assert_eq!(None::<i64>.to_data(), Data::constr(1, vec![]));
        assert_eq!(Option::<i64>::from_data(&Data::constr(0, vec![Data::int(7)])), Some(Some(7)));
        assert_eq!(Option::<i64>::from_data(&Data::constr(1, vec![])), Some(None));
        assert_eq!(Option::<i64>::from_data(&Data::constr(2, vec![])), None);
    }

    #[test]
    fn test_bool_layout() {
        assert_eq!(false.to_data(), Data::constr(0, vec![]));
        assert_eq!(true.to_data(), Data::constr(1, vec![]));
        assert_eq!(bool::from_data(&Data::constr(1, vec![])), Some(true));
        assert_eq!(bool::from_data(&Data::constr(1, vec![Data::int(0)])), None);
    }

    #[test]
    fn test_integer_range_checks() {
        assert_eq!(u64::from_data(&Data::int(-1)), None);
        assert_eq!(i64::from_data(&Data::int(-1)), Some(-1));
        assert_eq!(i64::from_data(&Data::Int(BigInt::from(u64::MAX))), None);
    }

    #[test]
    fn test_list_and_pair() {
        let value = vec![(1i64, 2u64), (3, 4)];
        let data = value.to_data();
        assert_eq!(Vec::<(i64, u64)>::from_data(&data), Some(value));
        assert_eq!(Vec::<i64>::from_data(&Data::bytes([1u8, 2])), None);
    }

    #[test]
    fn test_dict_from_data_requires_ascending_keys() {
        let sorted = Data::map(vec![
            (Data::int(1), Data::int(10)),
            (Data::int(2), Data::int(20)),
        ]);
        let dict = Dict::<i64, i64>::from_data(&sorted).unwrap();
        assert_eq!(dict.get(&2), Some(&20));
        assert_eq!(dict.to_data(), sorted);

        let unsorted = Data::map(vec![
            (Data::int(2), Data::int(20)),
            (Data::int(1), Data::int(10)),
        ]);
        assert_eq!(Dict::<i64, i64>::from_data(&unsorted), None);
    }
}
