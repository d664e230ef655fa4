// src/domain/nullable.rs

//! A scalar that may be SQL NULL.
//!
//! `Nullable<T>` keeps the presence flag next to the value so a column that is
//! NULL in the store is `null` in JSON, and a column that holds `0` or `""`
//! stays `0` or `""`. The same type is used to scan rows and to serialize
//! responses, so both directions share one definition of "absent".

use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Nullable<T> {
    value: T,
    present: bool,
}

pub type NullInt64 = Nullable<i64>;
pub type NullString = Nullable<String>;

impl<T: Default> Nullable<T> {
    /// An absent value. The underlying scalar is `T::default()`.
    pub fn null() -> Self {
        Self {
            value: T::default(),
            present: false,
        }
    }
}

impl<T> Nullable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            present: true,
        }
    }

    pub fn is_null(&self) -> bool {
        !self.present
    }

    pub fn as_option(&self) -> Option<&T> {
        self.present.then_some(&self.value)
    }
}

#[cfg(test)]
impl<T> Nullable<T> {
    /// The underlying scalar. For an absent value this is the zero value, not data.
    pub fn raw(&self) -> &T {
        &self.value
    }

    pub fn into_option(self) -> Option<T> {
        self.present.then_some(self.value)
    }
}

#[cfg(test)]
impl<T: Default> Nullable<T> {
    /// Decode a JSON document into `self`.
    ///
    /// On malformed input the value is reset to absent and the parse error is returned.
    pub fn decode_json(&mut self, json: &str) -> Result<(), serde_json::Error>
    where
        T: for<'de> Deserialize<'de>,
    {
        match serde_json::from_str::<Self>(json) {
            Ok(decoded) => {
                *self = decoded;
                Ok(())
            }
            Err(e) => {
                *self = Self::null();
                Err(e)
            }
        }
    }
}

impl<T: Default> From<Option<T>> for Nullable<T> {
    fn from(opt: Option<T>) -> Self {
        opt.map_or_else(Self::null, Self::new)
    }
}

impl<T: FromSql + Default> FromSql for Nullable<T> {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Null => Ok(Self::null()),
            other => T::column_result(other).map(Self::new),
        }
    }
}

impl<T: ToSql> ToSql for Nullable<T> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        if self.is_null() {
            Ok(ToSqlOutput::Owned(Value::Null))
        } else {
            self.value.to_sql()
        }
    }
}

impl<T: Serialize> Serialize for Nullable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_option() {
            Some(value) => value.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de, T> Deserialize<'de> for Nullable<T>
where
    T: Deserialize<'de> + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}
