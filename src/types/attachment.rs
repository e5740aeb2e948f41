use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Attachment {
    pub id: String,
    pub title: String,
    pub url: Option<String>,
    pub subtitle: Option<String>,
    pub created_at: String,
}
