pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

/// Label of the data channel the initiator opens for game traffic.
pub const GAME_CHANNEL_LABEL: &str = "game";

/// Path prefix of deep links that join or create a room on page load.
pub const ROOM_LINK_PREFIX: &str = "/game/room/";

/// Room id carried by a deep-link path, if any.
pub fn room_id_from_path(path: &str) -> Option<&str> {
    path.strip_prefix(ROOM_LINK_PREFIX)
        .filter(|room_id| !room_id.is_empty())
}
