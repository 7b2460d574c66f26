//! Unique identifiers so concurrent tests never share players.

use ulid::Ulid;

/// `{prefix}-{ulid}`
///
/// ```
/// use tilegame_test_support::unique_helpers::unique_player_id;
///
/// let a = unique_player_id("alice");
/// let b = unique_player_id("alice");
/// assert_ne!(a, b);
/// assert!(a.starts_with("alice-"));
/// ```
pub fn unique_player_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}
