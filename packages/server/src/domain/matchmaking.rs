//! Matchmaking aggregate: waiting pool + match registry.
//!
//! All methods are synchronous and run to completion, so holding the
//! aggregate behind a single lock makes every operation atomic. In particular
//! `Matchmaker::find_match` scores, selects, removes both users from the pool
//! and records the match in one step; a candidate can never be consumed twice.
//!
//! Invariant: a user is in the pool XOR in the registry XOR in neither.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::{
    entity::{Match, MatchFound, UserProfile, WaitingEntry},
    error::MatchingError,
    scoring::compatibility_score,
    value_object::{Timestamp, UserId},
};

/// Users currently seeking a partner, kept in join order.
///
/// Entries are keyed by a join sequence number, so iteration follows join
/// order, and `index` maps each user to their key for lookups and removal.
#[derive(Debug, Clone, Default)]
pub struct WaitingPool {
    entries: BTreeMap<u64, WaitingEntry>,
    index: HashMap<UserId, u64>,
    next_seq: u64,
}

impl WaitingPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.index.contains_key(user_id)
    }

    pub fn get(&self, user_id: &UserId) -> Option<&WaitingEntry> {
        let seq = self.index.get(user_id)?;
        self.entries.get(seq)
    }

    /// Insert an entry. A duplicate is rejected, never overwritten.
    pub fn insert(&mut self, entry: WaitingEntry) -> Result<(), MatchingError> {
        if self.contains(&entry.user_id) {
            return Err(MatchingError::AlreadyWaiting);
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.index.insert(entry.user_id.clone(), seq);
        self.entries.insert(seq, entry);
        Ok(())
    }

    pub fn remove(&mut self, user_id: &UserId) -> Option<WaitingEntry> {
        let seq = self.index.remove(user_id)?;
        self.entries.remove(&seq)
    }

    /// Entries in join order.
    pub fn entries(&self) -> impl Iterator<Item = &WaitingEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Active pairings, stored once per participant.
#[derive(Debug, Clone, Default)]
pub struct MatchRegistry {
    by_user: HashMap<UserId, Match>,
}

impl MatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, user_id: &UserId) -> bool {
        self.by_user.contains_key(user_id)
    }

    pub fn get(&self, user_id: &UserId) -> Option<&Match> {
        self.by_user.get(user_id)
    }

    /// Record a match under both participants.
    ///
    /// Fails without inserting anything if either user is already matched.
    pub fn record(&mut self, m: Match) -> Result<(), MatchingError> {
        if self.contains(&m.user_a) || self.contains(&m.user_b) {
            return Err(MatchingError::ConflictingMatch);
        }
        self.by_user.insert(m.user_a.clone(), m.clone());
        self.by_user.insert(m.user_b.clone(), m);
        Ok(())
    }

    /// Remove both sides of `user_id`'s match and return it.
    pub fn end(&mut self, user_id: &UserId) -> Result<Match, MatchingError> {
        let m = self
            .by_user
            .remove(user_id)
            .ok_or(MatchingError::NoActiveMatch)?;
        if let Some(partner) = m.partner_of(user_id) {
            self.by_user.remove(partner);
        }
        Ok(m)
    }

    /// One entry per match, oldest first (ties by match id).
    pub fn list_active(&self) -> Vec<Match> {
        let mut seen = HashSet::new();
        let mut matches: Vec<Match> = self
            .by_user
            .values()
            .filter(|m| seen.insert(m.id.clone()))
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        matches
    }

    pub fn len(&self) -> usize {
        self.by_user.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}

/// Pick the best partner for `requester` among `candidates`.
///
/// Only scores strictly greater than 0 qualify, and a later candidate replaces
/// the current best only with a strictly higher score, so ties go to the
/// candidate that comes first (the earliest joiner for pool order).
pub fn select_best_candidate<'a>(
    requester: &UserProfile,
    candidates: impl IntoIterator<Item = &'a WaitingEntry>,
) -> Option<(&'a WaitingEntry, u32)> {
    let mut best: Option<(&'a WaitingEntry, u32)> = None;
    for candidate in candidates {
        if candidate.user_id == requester.id {
            continue;
        }
        let score = compatibility_score(requester, &candidate.profile);
        let best_score = best.map_or(0, |(_, s)| s);
        if score > best_score {
            best = Some((candidate, score));
        }
    }
    best
}

/// The matchmaking state: one waiting pool and one match registry.
#[derive(Debug, Clone, Default)]
pub struct Matchmaker {
    pool: WaitingPool,
    registry: MatchRegistry,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check that `user_id` is neither waiting nor matched.
    pub fn ensure_can_join(&self, user_id: &UserId) -> Result<(), MatchingError> {
        if self.pool.contains(user_id) {
            return Err(MatchingError::AlreadyWaiting);
        }
        if self.registry.contains(user_id) {
            return Err(MatchingError::AlreadyMatched);
        }
        Ok(())
    }

    pub fn join(&mut self, profile: UserProfile, joined_at: Timestamp) -> Result<(), MatchingError> {
        self.ensure_can_join(&profile.id)?;
        self.pool.insert(WaitingEntry::new(profile, joined_at))
    }

    /// Leave the pool. Returns whether the user was waiting.
    pub fn leave(&mut self, user_id: &UserId) -> bool {
        self.pool.remove(user_id).is_some()
    }

    pub fn find_match(&mut self, user_id: &UserId, now: Timestamp) -> Result<MatchFound, MatchingError> {
        let requester = self.pool.get(user_id).ok_or(MatchingError::NotWaiting)?;

        let (partner_id, score) = select_best_candidate(&requester.profile, self.pool.entries())
            .map(|(entry, score)| (entry.user_id.clone(), score))
            .ok_or(MatchingError::NoMatch)?;

        let m = Match::new(user_id.clone(), partner_id.clone(), now);
        if self.registry.contains(&m.user_a) || self.registry.contains(&m.user_b) {
            return Err(MatchingError::ConflictingMatch);
        }

        self.pool.remove(user_id);
        self.pool.remove(&partner_id);
        let match_id = m.id.clone();
        self.registry.record(m)?;

        Ok(MatchFound {
            match_id,
            partner_id,
            score,
        })
    }

    pub fn end_match(&mut self, user_id: &UserId) -> Result<Match, MatchingError> {
        self.registry.end(user_id)
    }

    pub fn current_match(&self, user_id: &UserId) -> Option<&Match> {
        self.registry.get(user_id)
    }

    pub fn is_waiting(&self, user_id: &UserId) -> bool {
        self.pool.contains(user_id)
    }

    pub fn is_matched(&self, user_id: &UserId) -> bool {
        self.registry.contains(user_id)
    }

    pub fn waiting_entries(&self) -> impl Iterator<Item = &WaitingEntry> {
        self.pool.entries()
    }

    pub fn active_matches(&self) -> Vec<Match> {
        self.registry.list_active()
    }
}
