//! Record shapes: fixed, named, ordered field lists describing one kind of
//! expected result row.
//!
//! Shapes are declared statically with [`record!`](crate::record!) and never
//! discovered at runtime. The declared field order is the order in which
//! columns are pulled from a row and displayed in expected-result tables.

use std::fmt::Debug;

use sqlquiz_fixture::{Row, Value, ValueKind};

use crate::reconcile::ReconcileError;

/// One declared field: the result column it is pulled from and its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub column: &'static str,
    pub kind: ValueKind,
    pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Shape {
    pub fn columns(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|f| f.column)
    }
}

/// A value record built from one result row.
pub trait Record: Sized + Clone + PartialEq + Debug {
    const SHAPE: Shape;

    /// Builds a record from the row's columns, in declared field order.
    fn from_row(row: &Row<'_>) -> Result<Self, ReconcileError>;

    /// Field values in declared order, for display.
    fn values(&self) -> Vec<Value>;
}

/// Conversion from a result cell into a record field.
pub trait FromValue: Sized {
    const KIND: ValueKind;
    const NULLABLE: bool = false;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for i64 {
    const KIND: ValueKind = ValueKind::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const KIND: ValueKind = ValueKind::Real;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Real(r) => Some(*r),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl FromValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(s) => Some(s.clone()),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Declares a record struct together with its static [`Shape`].
///
/// ```
/// sqlquiz_grader::record! {
///     pub struct MusicianRow {
///         musician_id: i64 => "MusicianId",
///         musician_name: String => "MusicianName",
///     }
/// }
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($field:ident : $ty:ty => $column:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(pub $field: $ty),+
        }

        impl $crate::record::Record for $name {
            const SHAPE: $crate::record::Shape = $crate::record::Shape {
                name: stringify!($name),
                fields: &[$($crate::record::Field {
                    column: $column,
                    kind: <$ty as $crate::record::FromValue>::KIND,
                    nullable: <$ty as $crate::record::FromValue>::NULLABLE,
                }),+],
            };

            fn from_row(
                row: &$crate::Row<'_>,
            ) -> ::std::result::Result<Self, $crate::reconcile::ReconcileError> {
                Ok(Self {
                    $($field: $crate::reconcile::pull::<$ty>(row, $column)?),+
                })
            }

            fn values(&self) -> ::std::vec::Vec<$crate::Value> {
                vec![$($crate::Value::from(::std::clone::Clone::clone(&self.$field))),+]
            }
        }
    };
}
