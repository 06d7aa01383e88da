//! Per-button event counts.
//!
//! A `CountBoard` keeps one live count query per distinct button code plus
//! a live query on the button list. Any change on either side recomputes
//! the whole snapshot; there is no incremental update.

use crate::core::repository::Repository;
use crate::db::watch::LiveQuery;
use crate::errors::AppResult;
use crate::models::event_button::EventButton;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountSnapshot {
    /// code → number of events logged with that code
    pub counts: BTreeMap<i32, i64>,
    pub total: i64,
}

impl CountSnapshot {
    pub fn has_events(&self) -> bool {
        self.total > 0
    }

    pub fn count_for(&self, code: i32) -> i64 {
        self.counts.get(&code).copied().unwrap_or(0)
    }
}

pub struct CountBoard {
    buttons_query: LiveQuery<Vec<EventButton>>,
    buttons: Vec<EventButton>,
    // code → (live query, last value)
    sources: BTreeMap<i32, (LiveQuery<i64>, i64)>,
    snapshot: CountSnapshot,
}

impl CountBoard {
    pub fn new(repo: &Repository) -> Self {
        Self {
            buttons_query: repo.watch_buttons(),
            buttons: Vec::new(),
            sources: BTreeMap::new(),
            snapshot: CountSnapshot::default(),
        }
    }

    /// Build a board and compute its first snapshot.
    pub fn load(repo: &Repository) -> AppResult<Self> {
        let mut board = Self::new(repo);
        board.refresh(repo)?;
        Ok(board)
    }

    pub fn buttons(&self) -> &[EventButton] {
        &self.buttons
    }

    pub fn snapshot(&self) -> &CountSnapshot {
        &self.snapshot
    }

    /// Pull pending changes. Returns the new snapshot when something moved,
    /// `None` otherwise.
    pub fn refresh(&mut self, repo: &Repository) -> AppResult<Option<&CountSnapshot>> {
        let mut dirty = false;

        // 1️⃣ button set changed → rebuild the fan-in
        if let Some(buttons) = self.buttons_query.poll(repo.conn())? {
            self.rebuild_sources(repo, &buttons);
            self.buttons = buttons;
            dirty = true;
        }

        // 2️⃣ poll every count source
        for (query, value) in self.sources.values_mut() {
            if let Some(n) = query.poll(repo.conn())? {
                if *value != n {
                    dirty = true;
                }
                *value = n;
            }
        }

        if !dirty {
            return Ok(None);
        }

        // 3️⃣ recompute everything
        let counts: BTreeMap<i32, i64> = self
            .sources
            .iter()
            .map(|(code, (_, value))| (*code, *value))
            .collect();
        let total = counts.values().sum();
        self.snapshot = CountSnapshot { counts, total };

        Ok(Some(&self.snapshot))
    }

    /// One source per distinct code. Sources for codes that are still
    /// present are kept; the rest are dropped.
    fn rebuild_sources(&mut self, repo: &Repository, buttons: &[EventButton]) {
        let mut next = BTreeMap::new();
        for b in buttons {
            if next.contains_key(&b.code) {
                continue;
            }
            let entry = match self.sources.remove(&b.code) {
                Some(existing) => existing,
                None => (repo.watch_event_count(b.code), 0),
            };
            next.insert(b.code, entry);
        }
        self.sources = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::NewEvent;
    use crate::models::fix::Fix;

    fn setup() -> Repository {
        let mut repo = Repository::open_in_memory().unwrap();
        repo.ensure_default_buttons().unwrap();
        repo
    }

    fn tap(repo: &mut Repository, code: i32) -> i64 {
        let b = repo.find_button(code).unwrap().unwrap();
        repo.save_event(NewEvent::from_tap(&b, Fix::default()))
            .unwrap()
            .id
    }

    #[test]
    fn first_refresh_lists_every_button_with_zero() {
        let repo = setup();
        let board = CountBoard::load(&repo).unwrap();
        let snap = board.snapshot();

        assert_eq!(snap.counts.len(), 6);
        assert!(snap.counts.values().all(|c| *c == 0));
        assert_eq!(snap.total, 0);
        assert!(!snap.has_events());
    }

    #[test]
    fn total_equals_taps_minus_deletions() {
        let mut repo = setup();
        let mut board = CountBoard::load(&repo).unwrap();

        let mut ids = Vec::new();
        for code in [1, 1, 2, 6, 6, 6, 3] {
            ids.push(tap(&mut repo, code));
        }
        let snap = board.refresh(&repo).unwrap().unwrap().clone();
        assert_eq!(snap.total, 7);
        assert_eq!(snap.count_for(6), 3);

        repo.delete_event(ids[0]).unwrap();
        repo.delete_event(ids[4]).unwrap();
        let snap = board.refresh(&repo).unwrap().unwrap();
        assert_eq!(snap.total, 5);
        assert_eq!(snap.count_for(1), 1);
        assert_eq!(snap.count_for(6), 2);
    }

    #[test]
    fn refresh_without_changes_is_quiet() {
        let repo = setup();
        let mut board = CountBoard::load(&repo).unwrap();
        assert!(board.refresh(&repo).unwrap().is_none());
    }

    #[test]
    fn new_button_joins_the_board() {
        let mut repo = setup();
        let mut board = CountBoard::load(&repo).unwrap();

        repo.save_button(&EventButton::new(7, "Extra", 0xFF6D4C41))
            .unwrap();
        tap(&mut repo, 7);

        let snap = board.refresh(&repo).unwrap().unwrap();
        assert_eq!(snap.counts.len(), 7);
        assert_eq!(snap.count_for(7), 1);
        assert_eq!(board.buttons().len(), 7);
    }

    #[test]
    fn removed_button_leaves_the_total() {
        let mut repo = setup();
        tap(&mut repo, 2);
        tap(&mut repo, 4);
        let mut board = CountBoard::load(&repo).unwrap();
        assert_eq!(board.snapshot().total, 2);

        let b = repo.find_button(4).unwrap().unwrap();
        repo.delete_button(&b).unwrap();

        let snap = board.refresh(&repo).unwrap().unwrap();
        assert_eq!(snap.total, 1);
        assert!(!snap.counts.contains_key(&4));
        // the event itself is still stored
        assert_eq!(repo.total_event_count().unwrap(), 2);
    }

    #[test]
    fn duplicate_codes_share_one_count() {
        let mut repo = setup();
        repo.save_button(&EventButton::new(1, "Event 1 bis", 0xFF546E7A))
            .unwrap();
        tap(&mut repo, 1);

        let board = CountBoard::load(&repo).unwrap();
        assert_eq!(board.snapshot().counts.len(), 6);
        assert_eq!(board.snapshot().total, 1);
    }
}
