use serde::{Deserialize, Deserializer, Serialize};

/// Whether a prediction input file is currently present server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileState {
    pub exists: bool,
    /// The backend sends `""` when no file exists; that is normalised to `None`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub filename: Option<String>,
}

impl FileState {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn present(filename: impl Into<String>) -> Self {
        Self {
            exists: true,
            filename: Some(filename.into()),
        }
    }

    /// Filename to show or download as; empty when none is known.
    pub fn display_name(&self) -> &str {
        self.filename.as_deref().unwrap_or("")
    }
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filename_is_none() {
        let state: FileState = serde_json::from_str(r#"{"filename":"","exists":false}"#).unwrap();
        assert_eq!(state, FileState::missing());
    }

    #[test]
    fn missing_filename_field_is_none() {
        let state: FileState = serde_json::from_str(r#"{"exists":false}"#).unwrap();
        assert!(state.filename.is_none());
    }

    #[test]
    fn present_file_round_trips() {
        let state: FileState =
            serde_json::from_str(r#"{"filename":"rooms.parquet","exists":true}"#).unwrap();
        assert_eq!(state, FileState::present("rooms.parquet"));
        assert_eq!(state.display_name(), "rooms.parquet");
    }
}
