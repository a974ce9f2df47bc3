//! Player data structure and the fixed avatar icon set.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in game records and lookups).
pub type PlayerId = Uuid;

/// Fixed avatar icon set. Purely cosmetic; unknown ids render as `user`.
pub const AVATARS: [&str; 9] = [
    "bull_1", "bull_2", "bull_3", "bull_4", "bull_5", "bull_6", "bull_7", "bull_8", "user",
];

/// Fallback avatar id for players whose avatar is not in [`AVATARS`].
pub const DEFAULT_AVATAR: &str = "user";

/// A player in the roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name, unique (case-insensitive) across the roster.
    pub pseudo: String,
    /// Id into [`AVATARS`].
    pub avatar: String,
    /// Inactive players keep their history but are not offered for new games.
    pub is_active: bool,
}

impl Player {
    /// Create an active player with the given pseudo and avatar.
    pub fn new(pseudo: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            pseudo: pseudo.into(),
            avatar: avatar.into(),
            is_active: true,
        }
    }

    /// Create an active player with a randomly picked avatar.
    pub fn with_random_avatar(pseudo: impl Into<String>) -> Self {
        let avatar = AVATARS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(DEFAULT_AVATAR);
        Self::new(pseudo, avatar)
    }

    /// Avatar id to render: the player's own if known, else the fallback.
    pub fn avatar_or_default(&self) -> &str {
        if AVATARS.contains(&self.avatar.as_str()) {
            &self.avatar
        } else {
            DEFAULT_AVATAR
        }
    }
}
