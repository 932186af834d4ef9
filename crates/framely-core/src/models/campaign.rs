use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! resource_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map($name)
            }
        }
    };
}

resource_id!(
    /// Server-assigned campaign identifier
    CampaignId
);
resource_id!(
    /// Server-assigned frame identifier
    FrameId
);
resource_id!(PosterId);

/// Campaign record as returned by the admin API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: CampaignId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub frame_count: Option<u32>,
}

impl Campaign {
    /// Public link visitors use to open this campaign.
    pub fn share_url(&self, user_site_url: &str) -> String {
        share_url(user_site_url, &self.slug)
    }
}

/// Build the public URL of a campaign slug on the user-facing site.
pub fn share_url(user_site_url: &str, slug: &str) -> String {
    format!(
        "{}/{}",
        user_site_url.trim_end_matches('/'),
        slug.trim_start_matches('/')
    )
}

/// Response of the create-campaign call. Only the id is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedCampaign {
    pub id: CampaignId,
}

/// GET /campaigns/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CampaignListResponse {
    #[serde(default)]
    pub campaigns: Vec<Campaign>,
}

/// Overlay image attached to a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub id: FrameId,
    pub name: String,
    #[serde(default)]
    pub frame_url: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
}

/// GET /campaign/{id}/frames/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameListResponse {
    #[serde(default)]
    pub frames: Vec<Frame>,
}

/// Background image attached to a campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poster {
    pub id: PosterId,
    pub name: String,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub is_default: Option<bool>,
}
