//! Per-variant query lifecycle.
//!
//! Each query variant (text search, image upload) has its own [`Query`]:
//! at most one request in flight, plus the last result or error. Starting a
//! request bumps a ticket; an outcome carrying an older ticket is dropped.

#[cfg(test)]
#[path = "query_test.rs"]
mod query_test;

use crate::backend::{QueryError, QueryResponse};
use crate::message::BugResult;

/// Which of the two independent lifecycles a [`Query`] tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    Text,
    Image,
}

/// Identifies one started request of a [`Query`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Query<T> {
    kind: QueryKind,
    in_flight: Option<Ticket>,
    issued: u64,
    result: Option<T>,
    error: Option<QueryError>,
}

pub type TextQuery = Query<Vec<BugResult>>;
pub type ImageQuery = Query<QueryResponse>;

impl<T> Query<T> {
    #[must_use]
    pub fn new(kind: QueryKind) -> Self {
        Self { kind, in_flight: None, issued: 0, result: None, error: None }
    }

    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    /// Start a request. Returns `None` while another request of this
    /// variant is still pending.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.in_flight.is_some() {
            return None;
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        self.in_flight = Some(ticket);
        self.error = None;
        Some(ticket)
    }

    /// Record the outcome of the request identified by `ticket`. Returns
    /// `false` (and changes nothing) if that request is no longer the one
    /// in flight.
    pub fn settle(&mut self, ticket: Ticket, outcome: &Result<T, QueryError>) -> bool
    where
        T: Clone,
    {
        if self.in_flight != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        match outcome {
            Ok(value) => {
                self.result = Some(value.clone());
                self.error = None;
            }
            Err(e) => self.error = Some(e.clone()),
        }
        true
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&QueryError> {
        self.error.as_ref()
    }
}
