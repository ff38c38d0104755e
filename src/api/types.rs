use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Generic API response wrapper
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
#[serde(bound(serialize = "T: serde::Serialize"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub includes: Option<Includes>,
}

/// Response containing a single object (e.g. GET /2/tweet/:id).
pub type SingleResponse<T> = ApiResponse<T>;

/// Response containing a list of objects (e.g. GET /tweets).
pub type ListResponse<T> = ApiResponse<Vec<T>>;

// ---------------------------------------------------------------------------
// Tweet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub author_id: String,
    pub username: String,
    pub text: String,
    /// RFC 3339 timestamp as sent by the backend. Kept as a raw string so a
    /// malformed value degrades to a placeholder at render time instead of
    /// failing deserialization.
    #[serde(default)]
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Other related entities the backend may attach to `includes`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub options: Vec<PollOption>,
    pub voting_status: String,
    pub end_datetime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollOption {
    pub position: u32,
    pub label: String,
    pub votes: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Response metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Option<Vec<User>>,
    #[serde(default)]
    pub places: Option<Vec<Place>>,
    #[serde(default)]
    pub polls: Option<Vec<Poll>>,
    #[serde(default)]
    pub topics: Option<Vec<Topic>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}
