//! Where execution output and request state go.
//!
//! The engine never touches stdout or any transport directly; everything
//! flows through an [`ExecutionSink`]. Production hosts back it with a
//! response stream, tests with [`BufferSink`].

use std::fmt;

use rustc_hash::FxHashMap;

/// A failure reported by the sink itself (broken pipe, full buffer, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkError {
    pub message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        SinkError {
            message: message.into(),
        }
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(e: std::io::Error) -> Self {
        SinkError::new(e.to_string())
    }
}

/// The engine's view of its host: an output channel plus three string
/// parameter namespaces and a mime type.
///
/// Request parameters are read-only; persistent and temporary parameters
/// are mutable. A `None` return from the getters means the name is absent,
/// and the caller supplies its own default.
pub trait ExecutionSink {
    /// Append text to the output.
    fn write(&mut self, text: &str) -> Result<(), SinkError>;

    /// Append raw bytes to the output.
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError>;

    fn parameter(&self, name: &str) -> Option<String>;

    fn persistent_parameter(&self, name: &str) -> Option<String>;
    fn set_persistent_parameter(&mut self, name: &str, value: &str);
    fn remove_persistent_parameter(&mut self, name: &str);

    fn temporary_parameter(&self, name: &str) -> Option<String>;
    fn set_temporary_parameter(&mut self, name: &str, value: &str);
    fn remove_temporary_parameter(&mut self, name: &str);

    /// Record the mime type of the response being produced.
    fn set_mime_type(&mut self, mime_type: &str);
}

/// An in-memory sink that captures everything written to it.
#[derive(Debug, Default)]
pub struct BufferSink {
    pub output: String,
    parameters: FxHashMap<String, String>,
    persistent: FxHashMap<String, String>,
    temporary: FxHashMap<String, String>,
    pub mime_type: Option<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        BufferSink::default()
    }

    /// Seed a read-only request parameter.
    pub fn with_parameter(mut self, name: &str, value: &str) -> Self {
        self.parameters.insert(name.to_string(), value.to_string());
        self
    }

    /// Seed a persistent parameter.
    pub fn with_persistent_parameter(mut self, name: &str, value: &str) -> Self {
        self.persistent.insert(name.to_string(), value.to_string());
        self
    }
}

impl ExecutionSink for BufferSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.output.push_str(text);
        Ok(())
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.output.push_str(&String::from_utf8_lossy(bytes));
        Ok(())
    }

    fn parameter(&self, name: &str) -> Option<String> {
        self.parameters.get(name).cloned()
    }

    fn persistent_parameter(&self, name: &str) -> Option<String> {
        self.persistent.get(name).cloned()
    }

    fn set_persistent_parameter(&mut self, name: &str, value: &str) {
        self.persistent.insert(name.to_string(), value.to_string());
    }

    fn remove_persistent_parameter(&mut self, name: &str) {
        self.persistent.remove(name);
    }

    fn temporary_parameter(&self, name: &str) -> Option<String> {
        self.temporary.get(name).cloned()
    }

    fn set_temporary_parameter(&mut self, name: &str, value: &str) {
        self.temporary.insert(name.to_string(), value.to_string());
    }

    fn remove_temporary_parameter(&mut self, name: &str) {
        self.temporary.remove(name);
    }

    fn set_mime_type(&mut self, mime_type: &str) {
        self.mime_type = Some(mime_type.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::{BufferSink, ExecutionSink};
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_accumulate_in_order() {
        let mut sink = BufferSink::new();
        sink.write("a").unwrap_or_default();
        sink.write("bc").unwrap_or_default();
        sink.write_bytes(b"d").unwrap_or_default();
        assert_eq!(sink.output, "abcd");
    }

    #[test]
    fn request_parameters_are_read_only_seeds() {
        let sink = BufferSink::new().with_parameter("broj", "4");
        assert_eq!(sink.parameter("broj"), Some("4".to_string()));
        assert_eq!(sink.parameter("other"), None);
    }

    #[test]
    fn persistent_and_temporary_namespaces_are_disjoint() {
        let mut sink = BufferSink::new();
        sink.set_persistent_parameter("n", "1");
        sink.set_temporary_parameter("n", "2");
        assert_eq!(sink.persistent_parameter("n"), Some("1".to_string()));
        assert_eq!(sink.temporary_parameter("n"), Some("2".to_string()));
        sink.remove_persistent_parameter("n");
        assert_eq!(sink.persistent_parameter("n"), None);
        assert_eq!(sink.temporary_parameter("n"), Some("2".to_string()));
    }

    #[test]
    fn mime_type_records_last_value() {
        let mut sink = BufferSink::new();
        assert_eq!(sink.mime_type, None);
        sink.set_mime_type("text/plain");
        sink.set_mime_type("text/html");
        assert_eq!(sink.mime_type, Some("text/html".to_string()));
    }
}
