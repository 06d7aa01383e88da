//! Repository over the local store.
//!
//! Translates rows into domain objects, hands out live queries, and keeps
//! every multi-statement write inside a single `IMMEDIATE` transaction.
//! The change feed is bumped only after the commit succeeded.

use crate::db::events::EventOrder;
use crate::db::pool::DbPool;
use crate::db::watch::{ChangeFeed, LiveQuery, Table};
use crate::db::{buttons, events, initialize::init_db};
use crate::errors::{AppError, AppResult};
use crate::models::event::{Event, NewEvent};
use crate::models::event_button::{EventButton, default_buttons};
use rusqlite::{Connection, TransactionBehavior};

pub struct Repository {
    pool: DbPool,
    feed: ChangeFeed,
}

impl Repository {
    /// Open (and migrate) the database file at `path`.
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Self::from_pool(pool)
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let pool = DbPool::open_in_memory()?;
        Self::from_pool(pool)
    }

    pub fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            feed: ChangeFeed::new(),
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    // ------------------------------------------------
    // Events
    // ------------------------------------------------

    /// Store a new event. The display index (max + 1, or 1 on an empty
    /// table) is drawn inside the same transaction as the insert.
    pub fn save_event(&mut self, new: NewEvent) -> AppResult<Event> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let index = events::max_index(&tx)?.map_or(1, |m| m + 1);
        let id = events::insert_event(&tx, &new, index)?;
        tx.commit()?;

        self.feed.notify(Table::Events);

        Ok(Event {
            id,
            event_index: index,
            event_code: new.event_code,
            event_name: new.event_name,
            timestamp: new.timestamp,
            latitude: new.fix.latitude,
            longitude: new.fix.longitude,
            accuracy: new.fix.accuracy,
            note: new.note,
            photo_paths: new.photo_paths,
        })
    }

    pub fn events(&self, order: EventOrder) -> AppResult<Vec<Event>> {
        events::list_events(self.conn(), order)
    }

    /// Live list of all events, most recently inserted first.
    pub fn watch_events(&self) -> LiveQuery<Vec<Event>> {
        LiveQuery::new(self.feed.subscribe(Table::Events), |conn| {
            events::list_events(conn, EventOrder::Newest)
        })
    }

    pub fn find_event(&self, id: i64) -> AppResult<Option<Event>> {
        events::find_event(self.conn(), id)
    }

    pub fn next_index(&self) -> AppResult<i64> {
        Ok(events::max_index(self.conn())?.map_or(1, |m| m + 1))
    }

    /// Most recent event by timestamp.
    pub fn last_event(&self) -> AppResult<Option<Event>> {
        Ok(events::list_events(self.conn(), EventOrder::Latest)?
            .into_iter()
            .next())
    }

    /// Rewrite one event in place, keyed by id.
    pub fn update_event(&mut self, ev: &Event) -> AppResult<()> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if events::update_event(&tx, ev)? == 0 {
            return Err(AppError::EventNotFound(ev.id));
        }
        tx.commit()?;

        self.feed.notify(Table::Events);
        Ok(())
    }

    /// Append a photo reference to one event. Read and write happen in one
    /// transaction, so concurrent writers on other events are never lost.
    pub fn add_photo(&mut self, event_id: i64, photo_path: &str) -> AppResult<Event> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let mut ev = events::find_event(&tx, event_id)?.ok_or(AppError::EventNotFound(event_id))?;
        ev.photo_paths.push(photo_path.to_string());
        events::set_photo_paths(&tx, event_id, &ev.photo_paths)?;
        tx.commit()?;

        self.feed.notify(Table::Events);
        Ok(ev)
    }

    /// Returns `false` when no event had that id.
    pub fn delete_event(&mut self, id: i64) -> AppResult<bool> {
        let n = events::delete_event(self.conn(), id)?;
        if n > 0 {
            self.feed.notify(Table::Events);
        }
        Ok(n > 0)
    }

    pub fn delete_all_events(&mut self) -> AppResult<usize> {
        let n = events::delete_all_events(self.conn())?;
        self.feed.notify(Table::Events);
        Ok(n)
    }

    pub fn event_count(&self, code: i32) -> AppResult<i64> {
        events::count_by_code(self.conn(), code)
    }

    pub fn total_event_count(&self) -> AppResult<i64> {
        events::count_all(self.conn())
    }

    pub fn watch_event_count(&self, code: i32) -> LiveQuery<i64> {
        LiveQuery::new(self.feed.subscribe(Table::Events), move |conn| {
            events::count_by_code(conn, code)
        })
    }

    pub fn watch_total_count(&self) -> LiveQuery<i64> {
        LiveQuery::new(self.feed.subscribe(Table::Events), events::count_all)
    }

    // ------------------------------------------------
    // Buttons
    // ------------------------------------------------

    pub fn buttons(&self) -> AppResult<Vec<EventButton>> {
        buttons::list_buttons(self.conn())
    }

    /// Live list of buttons ordered by code.
    pub fn watch_buttons(&self) -> LiveQuery<Vec<EventButton>> {
        LiveQuery::new(self.feed.subscribe(Table::Buttons), buttons::list_buttons)
    }

    pub fn find_button(&self, code: i32) -> AppResult<Option<EventButton>> {
        buttons::find_by_code(self.conn(), code)
    }

    pub fn button_count(&self) -> AppResult<i64> {
        buttons::count_buttons(self.conn())
    }

    /// Insert-or-replace a single button, returns its id.
    pub fn save_button(&mut self, button: &EventButton) -> AppResult<i64> {
        let id = buttons::insert_button(self.conn(), button)?;
        self.feed.notify(Table::Buttons);
        Ok(id)
    }

    /// Bulk insert-or-replace by id.
    pub fn save_buttons(&mut self, list: &[EventButton]) -> AppResult<()> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        buttons::insert_buttons(&tx, list)?;
        tx.commit()?;

        self.feed.notify(Table::Buttons);
        Ok(())
    }

    pub fn update_button(&mut self, button: &EventButton) -> AppResult<bool> {
        let n = buttons::update_button(self.conn(), button)?;
        if n > 0 {
            self.feed.notify(Table::Buttons);
        }
        Ok(n > 0)
    }

    /// Make `list` the complete button set, atomically.
    pub fn replace_buttons(&mut self, list: &[EventButton]) -> AppResult<()> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        buttons::delete_all_buttons(&tx)?;
        buttons::insert_buttons(&tx, list)?;
        tx.commit()?;

        self.feed.notify(Table::Buttons);
        Ok(())
    }

    pub fn delete_button(&mut self, button: &EventButton) -> AppResult<bool> {
        let n = buttons::delete_button(self.conn(), button.id)?;
        if n > 0 {
            self.feed.notify(Table::Buttons);
        }
        Ok(n > 0)
    }

    pub fn delete_all_buttons(&mut self) -> AppResult<usize> {
        let n = buttons::delete_all_buttons(self.conn())?;
        self.feed.notify(Table::Buttons);
        Ok(n)
    }

    /// Seed the default set when (and only when) the button table is empty.
    /// Returns whether seeding happened.
    pub fn ensure_default_buttons(&mut self) -> AppResult<bool> {
        let tx = self
            .pool
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if buttons::count_buttons(&tx)? > 0 {
            return Ok(false);
        }
        buttons::insert_buttons(&tx, &default_buttons())?;
        tx.commit()?;

        self.feed.notify(Table::Buttons);
        Ok(true)
    }

    /// Drop every button and restore the six defaults.
    pub fn reset_default_buttons(&mut self) -> AppResult<()> {
        self.replace_buttons(&default_buttons())
    }
}
