use serde::{Deserialize, Serialize};

/// Metadata for a photo or document attached to a report.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub file_name: String,
    pub path: String,
    pub content_type: String,
    pub size: u64,
}

impl Attachment {
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}
