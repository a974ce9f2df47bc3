//! Tracker: the in-memory store for the roster and the game history.

use crate::models::game::{resolve_games, GameData, GameRecord, ScoreEntry};
use crate::models::player::{Player, PlayerId};
use chrono::NaiveDate;
use std::collections::HashSet;
use std::io::Read;

/// Errors that can occur during roster and game operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TrackerError {
    /// A player with this pseudo already exists (pseudos are unique, case-insensitive).
    DuplicatePseudo,
    /// Pseudo is empty after trimming.
    EmptyPseudo,
    /// Player not found in the roster.
    PlayerNotFound(PlayerId),
    /// Player appears in at least one recorded game and cannot be deleted.
    PlayerHasGames(PlayerId),
    /// A game needs at least two participants.
    NotEnoughPlayers,
    /// Scores are penalty points and cannot go below zero.
    NegativeScore(i32),
    /// The same player appears twice in one game's score entries.
    DuplicateParticipant(PlayerId),
    /// A CSV row could not be parsed.
    InvalidCsv(String),
}

impl std::fmt::Display for TrackerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerError::DuplicatePseudo => write!(f, "A player with this pseudo already exists"),
            TrackerError::EmptyPseudo => write!(f, "Pseudo must not be empty"),
            TrackerError::PlayerNotFound(_) => write!(f, "Player not found"),
            TrackerError::PlayerHasGames(_) => {
                write!(f, "Player has recorded games; deactivate them instead")
            }
            TrackerError::NotEnoughPlayers => write!(f, "A game needs at least 2 players"),
            TrackerError::NegativeScore(score) => {
                write!(f, "Scores cannot be negative (got {})", score)
            }
            TrackerError::DuplicateParticipant(_) => {
                write!(f, "A player cannot appear twice in one game")
            }
            TrackerError::InvalidCsv(msg) => write!(f, "Invalid CSV: {}", msg),
        }
    }
}

impl std::error::Error for TrackerError {}

/// Roster plus game history. All stats views are computed from a snapshot of
/// this state; nothing derived is stored back.
#[derive(Clone, Debug, Default)]
pub struct Tracker {
    players: Vec<Player>,
    /// Newest first.
    games: Vec<GameRecord>,
}

impl Tracker {
    /// Empty tracker: no players, no games.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full roster, in insertion order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Game history joined against the current roster, newest first.
    pub fn games(&self) -> Vec<GameData> {
        resolve_games(&self.players, &self.games)
    }

    /// Look up a player by id.
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    fn pseudo_taken(&self, pseudo: &str, except: Option<PlayerId>) -> bool {
        self.players
            .iter()
            .any(|p| Some(p.id) != except && p.pseudo.eq_ignore_ascii_case(pseudo))
    }

    /// Add a player. Pseudos are trimmed and must be unique (case-insensitive)
    /// across active and inactive players; with no avatar given, one is picked
    /// at random from the fixed set.
    pub fn add_player(
        &mut self,
        pseudo: impl Into<String>,
        avatar: Option<&str>,
    ) -> Result<&Player, TrackerError> {
        let pseudo = pseudo.into();
        let pseudo = pseudo.trim();
        if pseudo.is_empty() {
            return Err(TrackerError::EmptyPseudo);
        }
        if self.pseudo_taken(pseudo, None) {
            return Err(TrackerError::DuplicatePseudo);
        }
        let player = match avatar {
            Some(avatar) => Player::new(pseudo, avatar),
            None => Player::with_random_avatar(pseudo),
        };
        self.players.push(player);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Update a player's pseudo and/or avatar. Past games are untouched; they
    /// render the new pseudo/avatar since games reference players by id.
    pub fn update_player(
        &mut self,
        id: PlayerId,
        pseudo: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<&Player, TrackerError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TrackerError::PlayerNotFound(id))?;
        if let Some(pseudo) = pseudo {
            let pseudo = pseudo.trim();
            if pseudo.is_empty() {
                return Err(TrackerError::EmptyPseudo);
            }
            if self.pseudo_taken(pseudo, Some(id)) {
                return Err(TrackerError::DuplicatePseudo);
            }
        }
        let player = &mut self.players[idx];
        if let Some(pseudo) = pseudo {
            player.pseudo = pseudo.trim().to_string();
        }
        if let Some(avatar) = avatar {
            player.avatar = avatar.to_string();
        }
        Ok(player)
    }

    /// Activate or deactivate a player. Inactive players keep their history
    /// and stay in all stats; they are just not offered for new games.
    pub fn set_player_active(&mut self, id: PlayerId, active: bool) -> Result<(), TrackerError> {
        let player = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(TrackerError::PlayerNotFound(id))?;
        player.is_active = active;
        Ok(())
    }

    /// Remove a player from the roster. Blocked while any game references the
    /// player; deactivate instead to hide them from new games.
    pub fn delete_player(&mut self, id: PlayerId) -> Result<(), TrackerError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == id)
            .ok_or(TrackerError::PlayerNotFound(id))?;
        let referenced = self
            .games
            .iter()
            .any(|g| g.scores.iter().any(|e| e.player_id == id));
        if referenced {
            return Err(TrackerError::PlayerHasGames(id));
        }
        self.players.remove(idx);
        Ok(())
    }

    /// Record a finished game: one cumulative score per participant.
    ///
    /// Requires at least two distinct, known players, and scores must not be
    /// negative (penalty points only go up). Winner and loser are
    /// derived from the scores (first strict minimum / maximum in entry
    /// order). The new game is prepended, keeping the history newest-first.
    pub fn record_game(
        &mut self,
        date: NaiveDate,
        entries: Vec<ScoreEntry>,
    ) -> Result<&GameRecord, TrackerError> {
        if entries.len() < 2 {
            return Err(TrackerError::NotEnoughPlayers);
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if entry.score < 0 {
                return Err(TrackerError::NegativeScore(entry.score));
            }
            if self.get_player(entry.player_id).is_none() {
                return Err(TrackerError::PlayerNotFound(entry.player_id));
            }
            if !seen.insert(entry.player_id) {
                return Err(TrackerError::DuplicateParticipant(entry.player_id));
            }
        }
        self.games.insert(0, GameRecord::new(date, entries));
        Ok(&self.games[0])
    }

    /// Bulk roster import from CSV rows of `pseudo` or `pseudo,avatar`.
    /// Rows apply the same rules as [`Tracker::add_player`]; returns the
    /// number of players imported. Fails on the first bad row, leaving the
    /// rows before it applied.
    pub fn import_players_csv(&mut self, reader: impl Read) -> Result<usize, TrackerError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut imported = 0;
        for row in csv_reader.records() {
            let row = row.map_err(|e| TrackerError::InvalidCsv(e.to_string()))?;
            let pseudo = row
                .get(0)
                .ok_or_else(|| TrackerError::InvalidCsv("missing pseudo column".to_string()))?;
            let avatar = row.get(1).map(str::trim).filter(|a| !a.is_empty());
            self.add_player(pseudo, avatar)?;
            imported += 1;
        }
        Ok(imported)
    }
}
