//! Sidebar search matching

use super::entities::Session;

/// Sessions whose title contains `query`, case-insensitively.
///
/// A blank query matches every session. Order is preserved.
pub fn filter_sessions<'a>(sessions: &'a [Session], query: &str) -> Vec<&'a Session> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return sessions.iter().collect();
    }
    sessions
        .iter()
        .filter(|s| s.title.to_lowercase().contains(&needle))
        .collect()
}
