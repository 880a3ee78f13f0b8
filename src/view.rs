// SPDX-License-Identifier: PMPL-1.0-or-later

//! The greeter view model shared by every front end.
//!
//! Owns the [`Session`] and runs IP lookups on a worker thread. Lookup results
//! come back over a channel and are only applied in [`GreeterView::poll`],
//! which front ends call from their UI thread before drawing.

use crate::i18n::{Language, Revision};
use crate::ip::{IpLookup, LookupError};
use crate::session::{FetchTicket, GreeterError, Session, SubmitOutcome};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

type LookupMessage = (FetchTicket, Result<String, LookupError>);

pub struct GreeterView {
    session: Session,
    lookup: Arc<dyn IpLookup>,
    tx: Sender<LookupMessage>,
    rx: Receiver<LookupMessage>,
    in_flight: usize,
}

impl GreeterView {
    /// `ip_enabled` is ignored by revisions that never look up the IP.
    pub fn new(revision: Revision, ip_enabled: bool, lookup: Arc<dyn IpLookup>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            session: Session::new(revision, ip_enabled),
            lookup,
            tx,
            rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn update_name(&mut self, value: impl Into<String>) {
        self.session.update_name(value);
    }

    pub fn name_mut(&mut self) -> &mut String {
        self.session.name_mut()
    }

    pub fn select_language(&mut self, language: Language) -> Result<(), GreeterError> {
        self.session.select_language(language)
    }

    pub fn cycle_language(&mut self, step: isize) {
        self.session.cycle_language(step);
    }

    /// Show the greeting and, when the session asks for it, start a lookup
    /// without waiting for it.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.session.submit();
        if let SubmitOutcome::ShownWithLookup(ticket) = outcome {
            self.dispatch(ticket);
        }
        outcome
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Apply every lookup result that has arrived. Returns `true` if the
    /// session changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Ok((ticket, result)) = self.rx.try_recv() {
            changed |= self.receive(ticket, result);
        }
        changed
    }

    /// Block until every dispatched lookup has reported or `timeout` passes.
    /// Used by the one-shot command; interactive front ends use [`poll`](Self::poll).
    pub fn wait_for_lookups(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok((ticket, result)) => {
                    self.receive(ticket, result);
                }
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        true
    }

    /// See [`Session::abandon_lookup`].
    pub fn abandon_lookup(&mut self) -> bool {
        self.session.abandon_lookup()
    }

    pub fn lookups_in_flight(&self) -> usize {
        self.in_flight
    }

    fn receive(&mut self, ticket: FetchTicket, result: Result<String, LookupError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.session.apply_lookup(ticket, result)
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        let lookup = Arc::clone(&self.lookup);
        let tx = self.tx.clone();
        self.in_flight += 1;
        debug!(?ticket, "dispatching IP lookup");
        thread::spawn(move || {
            let result = lookup.lookup();
            // The view may be gone by now; nothing left to update then.
            let _ = tx.send((ticket, result));
        });
    }
}
