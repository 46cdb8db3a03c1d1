use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::value::DynamicValue;

/// Deserialize a config tree into `T`, with the failing field's path in
/// the error.
pub fn from_value_with_path<T: DeserializeOwned>(value: &DynamicValue) -> Result<T> {
    let json = serde_json::Value::from(value.clone());
    serde_path_to_error::deserialize::<_, T>(json).map_err(|err| {
        let path = err.path().to_string();
        Error::Bind { path, message: err.into_inner().to_string() }
    })
}
