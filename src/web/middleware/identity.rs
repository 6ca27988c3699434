use std::collections::HashMap;

/// The user a request acts as.
///
/// Resolved once per request and handed to every operation. Today the value
/// comes straight from the `userId` query parameter, which is not verified;
/// swapping in a real credential only touches [`CallerIdentity::from_query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: i64,
}

impl CallerIdentity {
    /// `userId` from the query string, or `default_user_id` when it is absent
    /// or not an integer.
    pub fn from_query(query: &HashMap<String, String>, default_user_id: i64) -> Self {
        let user_id = parse_id_param(query, "userId").unwrap_or(default_user_id);
        Self { user_id }
    }
}

pub fn parse_id_param(query: &HashMap<String, String>, key: &str) -> Option<i64> {
    query.get(key).and_then(|raw| raw.trim().parse().ok())
}
