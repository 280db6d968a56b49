use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by the file mutation endpoints.
///
/// The backend answers with a loose JSON object; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ack {
    pub success: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
    /// Files removed by a delete call.
    pub deleted_file: Vec<String>,
}

impl Ack {
    /// The most descriptive text the backend supplied, if any.
    pub fn summary(&self) -> Option<&str> {
        self.success
            .as_deref()
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }
}
