//! Domain constants

/// Zones a chat channel or report can be scoped to.
///
/// Mirrors the fixed set of states the backend partitions chat history by.
pub const ZONES: &[&str] = &["Lagos", "Abuja", "Kano"];

/// Zone assigned to profiles created through the bootstrap fallback.
pub const DEFAULT_ZONE: &str = "Lagos";

/// Backend table holding chat messages.
pub const CHAT_TABLE: &str = "chat_history";

/// Backend table holding application profiles.
pub const PROFILES_TABLE: &str = "profiles";

/// Storage bucket for profile pictures.
pub const AVATAR_BUCKET: &str = "avatars";

/// Returns true when `zone` is one of the known zones.
pub fn is_known_zone(zone: &str) -> bool {
    ZONES.contains(&zone)
}
