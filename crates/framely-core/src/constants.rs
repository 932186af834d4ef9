//! Shared constants

/// Maximum number of files accepted per batch kind (frames or posters).
pub const MAX_BATCH_FILES: usize = 10;

/// Prefix of every admin endpoint on the resource API.
pub const API_PREFIX: &str = "/api/admin";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_USER_SITE_URL: &str = "http://localhost:5173";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_TOKEN_FILE: &str = ".framely-token";

/// Media type prefix a candidate file must carry to be accepted.
pub const IMAGE_MEDIA_TYPE_PREFIX: &str = "image/";
