//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index of a player. Seats are assigned in registration order and
//! define the round-robin turn order.
//!
//! ## PlayerMap
//!
//! Per-seat data storage backed by `Vec` for O(1) access.
//!
//! ## Roster
//!
//! The caller-facing player names, mapped to seats.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat of a player at the table.
///
/// Seat indices are 0-based: the first registered player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping at `player_count`.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count) as u8)
    }

    /// Iterate over all seats for a game with `player_count` players.
    ///
    /// ```
    /// use rummy_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use rummy_engine::core::{PlayerId, PlayerMap};
///
/// let mut sizes: PlayerMap<usize> = PlayerMap::with_value(2, 14);
/// sizes[PlayerId::new(1)] = 11;
/// assert_eq!(sizes[PlayerId::new(0)], 14);
/// assert_eq!(sizes[PlayerId::new(1)], 11);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        let data = PlayerId::all(player_count).map(factory).collect();
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a seat's data, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a seat's data mutably, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Append a new seat and return its id.
    pub fn push(&mut self, value: T) -> PlayerId {
        self.data.push(value);
        PlayerId((self.data.len() - 1) as u8)
    }

    /// Remove a seat. Later seats shift down by one.
    pub fn remove(&mut self, player: PlayerId) -> Option<T> {
        (player.index() < self.data.len()).then(|| self.data.remove(player.index()))
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over the stored values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Registered player names in seat order.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    names: Vec<String>,
    seats: FxHashMap<String, PlayerId>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check whether a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.seats.contains_key(name)
    }

    /// Seat of a registered player.
    #[must_use]
    pub fn seat(&self, name: &str) -> Option<PlayerId> {
        self.seats.get(name).copied()
    }

    /// Name seated at `player`.
    #[must_use]
    pub fn name(&self, player: PlayerId) -> Option<&str> {
        self.names.get(player.index()).map(String::as_str)
    }

    /// Register a name at the next free seat.
    ///
    /// Returns `None` if the name is already taken.
    pub fn push(&mut self, name: impl Into<String>) -> Option<PlayerId> {
        let name = name.into();
        if self.seats.contains_key(&name) {
            return None;
        }
        let seat = PlayerId(self.names.len() as u8);
        self.seats.insert(name.clone(), seat);
        self.names.push(name);
        Some(seat)
    }

    /// Unregister a name. Later seats shift down by one.
    pub fn remove(&mut self, name: &str) -> Option<PlayerId> {
        let seat = self.seats.remove(name)?;
        self.names.remove(seat.index());
        for (i, n) in self.names.iter().enumerate().skip(seat.index()) {
            self.seats.insert(n.clone(), PlayerId(i as u8));
        }
        Some(seat)
    }

    /// Names in seat order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
