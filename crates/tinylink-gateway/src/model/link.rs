use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tinylink_core::{CreateLink, Link};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl From<CreateLinkRequest> for CreateLink {
    fn from(request: CreateLinkRequest) -> Self {
        CreateLink {
            url: request.url.unwrap_or_default(),
            code: request.code,
        }
    }
}

/// The wire shape of a link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub total_clicks: u64,
    pub last_clicked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code.into(),
            url: link.target_url,
            total_clicks: link.total_clicks,
            last_clicked_at: link.last_clicked_at,
            created_at: link.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListLinksResponse {
    pub links: Vec<LinkResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteLinkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
