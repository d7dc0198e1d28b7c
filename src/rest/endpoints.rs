//! REST API endpoint constants and path builders.

use url::Url;

use crate::error::UnbError;

/// Base URL for the UnbelievaBoat API.
pub const UNB_BASE_URL: &str = "https://unbelievable.pizza/api/v1";

/// The API root, used for health checks.
pub const ROOT: &str = "";

// Only the path of this URL is kept.
const SEGMENT_HOST: &str = "http://localhost/";

/// Path of a single user's balance in a guild.
///
/// Each id is percent-encoded as one path segment, so `/`, `?` and `#`
/// cannot change the request target.
pub fn user_balance(guild_id: &str, user_id: &str) -> Result<String, UnbError> {
    path(&["guilds", guild_id, "users", user_id])
}

/// Path of a guild's leaderboard.
pub fn leaderboard(guild_id: &str) -> Result<String, UnbError> {
    path(&["guilds", guild_id, "users"])
}

fn path(segments: &[&str]) -> Result<String, UnbError> {
    let mut url = Url::parse(SEGMENT_HOST)?;
    url.path_segments_mut()
        .map_err(|_| UnbError::Url(url::ParseError::SetHostOnCannotBeABaseUrl))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}
