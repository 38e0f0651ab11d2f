//! Merge rules for applying a decoded config file onto an existing record.
//!
//! The record is serialized to a tree, the file tree is laid over it and the result is
//! deserialized back in place. Mappings merge key by key; any other file value replaces the
//! record value; an explicit `null` in the file leaves the record value alone. Keys the
//! record does not know are ignored unless the record's own serde attributes say otherwise.
//!
//! The tree is a [`serde_yaml::Value`] so non-finite floats survive the round trip.
//!
//! Only serialized fields carry their prior value through the merge. A field the record
//! does not serialize (`#[serde(skip)]`, or `skip_serializing_if` when it fires) is rebuilt
//! from its serde default whenever a config file is present.

use crate::error::MergeError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;

/// Lay `file` over the current contents of `record`.
pub fn merge_into<T>(record: &mut T, file: Value) -> Result<(), MergeError>
where
    T: Serialize + DeserializeOwned,
{
    if file.is_null() {
        return Ok(());
    }

    let mut base = serde_yaml::to_value(&*record).map_err(MergeError::Serialize)?;
    merge_values(&mut base, file);

    *record = serde_yaml::from_value(base).map_err(MergeError::Deserialize)?;
    Ok(())
}

/// Deep-merge `overlay` into `base`.
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        if !value.is_null() {
                            base.insert(key, value);
                        }
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
