use serde_json::Value;

/// Failure to turn an input into a JSON value.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for types that can be read as a JSON document.
///
/// Implemented for JSON strings (`&str`, `String`), raw bytes (`&[u8]`),
/// file paths (`Path`, `PathBuf`, with the `std` feature), and
/// `serde_json::Value`. Used both for instance data and for constraint
/// schema documents.
pub trait JsonInput {
    /// Convert this input into a `serde_json::Value`.
    fn to_json_value(&self) -> Result<Value, InputError>;
}

impl JsonInput for Value {
    fn to_json_value(&self) -> Result<Value, InputError> {
        Ok(self.clone())
    }
}

impl JsonInput for str {
    fn to_json_value(&self) -> Result<Value, InputError> {
        Ok(serde_json::from_str(self)?)
    }
}

impl JsonInput for String {
    fn to_json_value(&self) -> Result<Value, InputError> {
        self.as_str().to_json_value()
    }
}

impl JsonInput for [u8] {
    fn to_json_value(&self) -> Result<Value, InputError> {
        Ok(serde_json::from_slice(self)?)
    }
}

#[cfg(feature = "std")]
impl JsonInput for std::path::Path {
    fn to_json_value(&self) -> Result<Value, InputError> {
        let content = std::fs::read_to_string(self)?;
        content.as_str().to_json_value()
    }
}

#[cfg(feature = "std")]
impl JsonInput for std::path::PathBuf {
    fn to_json_value(&self) -> Result<Value, InputError> {
        self.as_path().to_json_value()
    }
}
