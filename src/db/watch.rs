//! Table change notifications and live queries.
//!
//! Each table owns a generation counter published through a
//! `tokio::sync::watch` channel. Writers bump the counter after their
//! statement (or transaction) has committed; a `LiveQuery` re-runs its SQL
//! only when the generation of the table it reads has moved.
//!
//! Only writes that go through the same `ChangeFeed` are observed.

use crate::errors::AppResult;
use rusqlite::Connection;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Events,
    Buttons,
}

pub struct ChangeFeed {
    events: watch::Sender<u64>,
    buttons: watch::Sender<u64>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self {
            events: watch::Sender::new(0),
            buttons: watch::Sender::new(0),
        }
    }

    fn sender(&self, table: Table) -> &watch::Sender<u64> {
        match table {
            Table::Events => &self.events,
            Table::Buttons => &self.buttons,
        }
    }

    /// Signal that `table` changed. Works with or without subscribers.
    pub fn notify(&self, table: Table) {
        self.sender(table).send_modify(|generation| *generation += 1);
    }

    pub fn subscribe(&self, table: Table) -> watch::Receiver<u64> {
        self.sender(table).subscribe()
    }

    pub fn generation(&self, table: Table) -> u64 {
        *self.sender(table).borrow()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

type Fetch<T> = Box<dyn Fn(&Connection) -> AppResult<T> + Send>;

/// A query bound to the change feed of one table.
pub struct LiveQuery<T> {
    rx: watch::Receiver<u64>,
    fetch: Fetch<T>,
    primed: bool,
}

impl<T> LiveQuery<T> {
    pub fn new<F>(rx: watch::Receiver<u64>, fetch: F) -> Self
    where
        F: Fn(&Connection) -> AppResult<T> + Send + 'static,
    {
        Self {
            rx,
            fetch: Box::new(fetch),
            primed: false,
        }
    }

    /// `Some(value)` on the first poll and after every change of the
    /// underlying table, `None` when nothing moved since the last poll.
    pub fn poll(&mut self, conn: &Connection) -> AppResult<Option<T>> {
        // A closed channel means the feed is gone: nothing can change anymore.
        let changed = self.rx.has_changed().unwrap_or(false);
        if self.primed && !changed {
            return Ok(None);
        }

        let _ = self.rx.borrow_and_update();
        self.primed = true;
        (self.fetch)(conn).map(Some)
    }

    /// Run the query unconditionally.
    pub fn current(&self, conn: &Connection) -> AppResult<T> {
        (self.fetch)(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_fires_once_then_on_change() {
        let conn = Connection::open_in_memory().unwrap();
        let feed = ChangeFeed::new();
        let mut q = LiveQuery::new(feed.subscribe(Table::Events), |_| Ok(42));

        assert_eq!(q.poll(&conn).unwrap(), Some(42));
        assert_eq!(q.poll(&conn).unwrap(), None);

        feed.notify(Table::Events);
        assert_eq!(q.poll(&conn).unwrap(), Some(42));
        assert_eq!(q.poll(&conn).unwrap(), None);
    }

    #[test]
    fn other_table_does_not_wake_query() {
        let conn = Connection::open_in_memory().unwrap();
        let feed = ChangeFeed::new();
        let mut q = LiveQuery::new(feed.subscribe(Table::Buttons), |_| Ok(()));
        q.poll(&conn).unwrap();

        feed.notify(Table::Events);
        assert_eq!(q.poll(&conn).unwrap(), None);
        assert_eq!(feed.generation(Table::Events), 1);
        assert_eq!(feed.generation(Table::Buttons), 0);
    }

    #[test]
    fn several_changes_collapse_into_one_refresh() {
        let conn = Connection::open_in_memory().unwrap();
        let feed = ChangeFeed::new();
        let mut q = LiveQuery::new(feed.subscribe(Table::Events), |_| Ok(1));
        q.poll(&conn).unwrap();

        feed.notify(Table::Events);
        feed.notify(Table::Events);
        assert!(q.poll(&conn).unwrap().is_some());
        assert!(q.poll(&conn).unwrap().is_none());
    }
}
