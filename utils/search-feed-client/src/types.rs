//! Wire types of the search API.

use osc_streamer::FeedResult;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub statuses: Vec<Status>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Status {
    pub id: u64,
    pub text: String,
    pub user: User,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct User {
    pub screen_name: String,
}

impl From<Status> for FeedResult {
    fn from(status: Status) -> Self {
        FeedResult {
            id: status.id,
            text: status.text,
            source_label: status.user.screen_name,
            created_at: status.created_at,
        }
    }
}
