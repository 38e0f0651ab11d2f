//! Environment Override Engine
//!
//! Walks a [`Record`] depth-first in declaration order. Every scalar field that declares an
//! override key is looked up as `<PREFIX>_<KEY>` in an [`EnvSource`]; a present value is
//! parsed according to the field's kind and written into the field. Fields without a key
//! are never touched, whatever the environment contains. Nested records are walked with
//! the same prefix, so nesting never contributes to the variable name.
//!
//! The walk stops at the first value that cannot be coerced. Overrides applied before the
//! failing field stay applied.

use crate::env::{env_key, EnvSource};
use crate::error::{OverrideError, ScalarError};
use crate::record::{Field, FieldVisitor, Record, Slot};
use std::str::FromStr;
use tracing::{debug, trace};

/// Apply environment overrides to `record` using the normalized `prefix`.
pub fn apply_overrides<R, E>(record: &mut R, prefix: &str, env: &E) -> Result<(), OverrideError>
where
    R: Record,
    E: EnvSource + ?Sized,
{
    let mut walker = OverrideWalker {
        prefix,
        env,
        applied: 0,
    };
    record.visit_fields(&mut walker)?;
    debug!(prefix, applied = walker.applied, "Environment overrides applied");
    Ok(())
}

/// A tagged field and the environment variable that overrides it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideBinding {
    pub field: &'static str,
    pub variable: String,
}

/// List the environment variables `record` responds to under `prefix`, in walk order.
///
/// Two bindings may share a variable when distinct fields declare the same key; both
/// fields then read the same value.
pub fn override_bindings<R: Record>(record: &mut R, prefix: &str) -> Vec<OverrideBinding> {
    let mut collector = BindingCollector {
        prefix,
        bindings: Vec::new(),
    };
    match record.visit_fields(&mut collector) {
        Ok(()) => collector.bindings,
        Err(never) => match never {},
    }
}

struct OverrideWalker<'a, E: ?Sized> {
    prefix: &'a str,
    env: &'a E,
    applied: usize,
}

impl<E: EnvSource + ?Sized> FieldVisitor for OverrideWalker<'_, E> {
    type Error = OverrideError;

    fn visit_scalar(&mut self, field: Field<'_>) -> Result<(), OverrideError> {
        let Some(key) = field.key else {
            trace!(field = field.name, "No override key, leaving field as is");
            return Ok(());
        };

        let variable = env_key(self.prefix, key);
        let Some(value) = self.env.lookup(&variable) else {
            trace!(field = field.name, variable = %variable, "Override variable not set");
            return Ok(());
        };

        match set_slot(field.slot, &value) {
            Ok(()) => {
                self.applied += 1;
                debug!(field = field.name, variable = %variable, "Applied environment override");
                Ok(())
            }
            Err(SetError::Parse(source)) => Err(OverrideError::Parse {
                field: field.name,
                variable,
                value,
                source,
            }),
            Err(SetError::Unsupported(kind)) => Err(OverrideError::UnsupportedKind {
                field: field.name,
                variable,
                kind,
            }),
        }
    }

    fn visit_nested<R: Record>(&mut self, name: &'static str, record: &mut R) -> Result<(), OverrideError> {
        trace!(record = name, "Descending into nested record");
        record.visit_fields(self)
    }
}

struct BindingCollector<'a> {
    prefix: &'a str,
    bindings: Vec<OverrideBinding>,
}

impl FieldVisitor for BindingCollector<'_> {
    type Error = std::convert::Infallible;

    fn visit_scalar(&mut self, field: Field<'_>) -> Result<(), Self::Error> {
        if let Some(key) = field.key {
            self.bindings.push(OverrideBinding {
                field: field.name,
                variable: env_key(self.prefix, key),
            });
        }
        Ok(())
    }

    fn visit_nested<R: Record>(&mut self, _name: &'static str, record: &mut R) -> Result<(), Self::Error> {
        record.visit_fields(self)
    }
}

enum SetError {
    Parse(ScalarError),
    Unsupported(&'static str),
}

impl From<ScalarError> for SetError {
    fn from(err: ScalarError) -> Self {
        SetError::Parse(err)
    }
}

fn set_slot(slot: Slot<'_>, value: &str) -> Result<(), SetError> {
    match slot {
        Slot::Str(v) => *v = value.to_string(),
        Slot::I8(v) => *v = parse_number(value)?,
        Slot::I16(v) => *v = parse_number(value)?,
        Slot::I32(v) => *v = parse_number(value)?,
        Slot::I64(v) => *v = parse_number(value)?,
        Slot::Isize(v) => *v = parse_number(value)?,
        Slot::U8(v) => *v = parse_number(value)?,
        Slot::U16(v) => *v = parse_number(value)?,
        Slot::U32(v) => *v = parse_number(value)?,
        Slot::U64(v) => *v = parse_number(value)?,
        Slot::Usize(v) => *v = parse_number(value)?,
        Slot::F32(v) => *v = parse_f32(value)?,
        Slot::F64(v) => *v = parse_number(value)?,
        Slot::Bool(v) => *v = parse_bool(value)?,
        Slot::Unsupported(kind) => return Err(SetError::Unsupported(kind)),
    }
    Ok(())
}

/// Base-10 integer or decimal/scientific float, range-checked for the target width.
fn parse_number<T>(value: &str) -> Result<T, ScalarError>
where
    T: FromStr,
    ScalarError: From<T::Err>,
{
    Ok(value.parse::<T>()?)
}

/// Finite decimals too large for `f32` are rejected instead of saturating to infinity.
fn parse_f32(value: &str) -> Result<f32, ScalarError> {
    let narrow: f32 = value.parse()?;
    if narrow.is_infinite() && value.parse::<f64>()?.is_finite() {
        return Err(ScalarError::FloatRange(value.to_string()));
    }
    Ok(narrow)
}

/// Parse the canonical boolean literals.
pub fn parse_bool(value: &str) -> Result<bool, ScalarError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(ScalarError::Bool(other.to_string())),
    }
}
