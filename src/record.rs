//! Record shape description
//!
//! A [`Record`] enumerates its fields to a [`FieldVisitor`]: scalar leaves arrive as a
//! [`Field`] carrying the field name, the optional override key and a typed mutable
//! [`Slot`]; embedded records arrive through [`FieldVisitor::visit_nested`]. Implementations
//! are normally generated with [`env_record!`](crate::env_record).

use std::collections::{BTreeMap, HashMap};

/// A caller-defined configuration structure whose fields can be walked.
pub trait Record {
    /// Present every declared field to `visitor`, in declaration order.
    fn visit_fields<V: FieldVisitor>(&mut self, visitor: &mut V) -> Result<(), V::Error>;
}

/// Receives the fields of a [`Record`] during a walk.
pub trait FieldVisitor {
    type Error;

    /// Called for every scalar (non-record) field.
    fn visit_scalar(&mut self, field: Field<'_>) -> Result<(), Self::Error>;

    /// Called for every directly embedded record.
    fn visit_nested<R: Record>(&mut self, name: &'static str, record: &mut R)
        -> Result<(), Self::Error>;
}

/// A scalar field as seen by a visitor
#[derive(Debug)]
pub struct Field<'a> {
    /// Field identifier as declared on the struct
    pub name: &'static str,
    /// Override key; `None` means the environment never touches this field
    pub key: Option<&'static str>,
    /// Typed access to the field value
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// An empty key is the same as no key.
    pub fn new(name: &'static str, key: Option<&'static str>, slot: Slot<'a>) -> Self {
        let key = key.filter(|key| !key.is_empty());
        Self { name, key, slot }
    }
}

/// Typed mutable reference to a field value
#[derive(Debug)]
pub enum Slot<'a> {
    Str(&'a mut String),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Isize(&'a mut isize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    Usize(&'a mut usize),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Bool(&'a mut bool),
    /// A kind the override engine cannot coerce (sequence, map, option, ...)
    Unsupported(&'static str),
}

impl Slot<'_> {
    /// Short name of the field kind, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Slot::Str(_) => "string",
            Slot::I8(_) => "i8",
            Slot::I16(_) => "i16",
            Slot::I32(_) => "i32",
            Slot::I64(_) => "i64",
            Slot::Isize(_) => "isize",
            Slot::U8(_) => "u8",
            Slot::U16(_) => "u16",
            Slot::U32(_) => "u32",
            Slot::U64(_) => "u64",
            Slot::Usize(_) => "usize",
            Slot::F32(_) => "f32",
            Slot::F64(_) => "f64",
            Slot::Bool(_) => "bool",
            Slot::Unsupported(kind) => *kind,
        }
    }
}

/// Conversion from a field to its [`Slot`].
pub trait IntoSlot {
    fn slot(&mut self) -> Slot<'_>;
}

macro_rules! scalar_slot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoSlot for $ty {
                fn slot(&mut self) -> Slot<'_> {
                    Slot::$variant(self)
                }
            }
        )*
    };
}

scalar_slot! {
    String => Str,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
}

impl<T> IntoSlot for Vec<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("sequence")
    }
}

impl<K, V, S> IntoSlot for HashMap<K, V, S> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("map")
    }
}

impl<K, V> IntoSlot for BTreeMap<K, V> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("map")
    }
}

impl<T> IntoSlot for Option<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("option")
    }
}

impl<T: ?Sized> IntoSlot for Box<T> {
    fn slot(&mut self) -> Slot<'_> {
        Slot::Unsupported("box")
    }
}

/// Implement [`Record`] for a struct from its field list.
///
/// Each entry is one of:
/// - `field = "KEY"`: scalar field overridable through `<PREFIX>_KEY` (`field = ""`
///   opts out, like a bare `field`)
/// - `field`: scalar field the environment never touches
/// - `nested field`: embedded record, walked with the same prefix
///
/// ```
/// use tiercfg::env_record;
///
/// #[derive(Default)]
/// struct Server {
///     host: String,
///     port: u16,
///     timeout: u64,
/// }
///
/// #[derive(Default)]
/// struct AppConfig {
///     server: Server,
/// }
///
/// env_record!(Server {
///     host = "SERVER_HOST",
///     port = "SERVER_PORT",
///     timeout,
/// });
///
/// env_record!(AppConfig { nested server });
/// ```
#[macro_export]
macro_rules! env_record {
    (@field $this:ident, $visitor:ident;) => {};
    (@field $this:ident, $visitor:ident; nested $name:ident $(, $($rest:tt)*)?) => {
        $visitor.visit_nested(::std::stringify!($name), &mut $this.$name)?;
        $crate::env_record!(@field $this, $visitor; $($($rest)*)?);
    };
    (@field $this:ident, $visitor:ident; $name:ident = $key:literal $(, $($rest:tt)*)?) => {
        $visitor.visit_scalar($crate::record::Field::new(
            ::std::stringify!($name),
            ::std::option::Option::Some($key),
            $crate::record::IntoSlot::slot(&mut $this.$name),
        ))?;
        $crate::env_record!(@field $this, $visitor; $($($rest)*)?);
    };
    (@field $this:ident, $visitor:ident; $name:ident $(, $($rest:tt)*)?) => {
        $visitor.visit_scalar($crate::record::Field::new(
            ::std::stringify!($name),
            ::std::option::Option::None,
            $crate::record::IntoSlot::slot(&mut $this.$name),
        ))?;
        $crate::env_record!(@field $this, $visitor; $($($rest)*)?);
    };
    ($ty:ty { $($body:tt)* }) => {
        impl $crate::record::Record for $ty {
            fn visit_fields<V: $crate::record::FieldVisitor>(
                &mut self,
                visitor: &mut V,
            ) -> ::std::result::Result<(), V::Error> {
                $crate::env_record!(@field self, visitor; $($body)*);
                ::std::result::Result::Ok(())
            }
        }
    };
}
