// SPDX-License-Identifier: PMPL-1.0-or-later

//! Session state of one greeting cycle.
//!
//! `Input --submit (name non-empty)--> Greeting --reset--> Input`
//!
//! Every submit and reset starts a new generation. An IP lookup carries the
//! generation it was started under in its [`FetchTicket`]; results from an
//! older generation are dropped so a late answer cannot leak into the next
//! cycle.

use crate::i18n::{Language, Revision};
use crate::ip::{LookupError, IP_FALLBACK};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Input,
    Greeting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpStatus {
    /// No lookup for this cycle (none requested, or the revision has none).
    Idle,
    Pending,
    Resolved(String),
    /// Lookup failed; displayed as [`IP_FALLBACK`].
    Unavailable,
}

impl IpStatus {
    /// Text for the IP line, or `None` while nothing should be shown.
    pub fn display(&self) -> Option<&str> {
        match self {
            IpStatus::Idle => None,
            IpStatus::Pending => Some("Fetching IP…"),
            IpStatus::Resolved(addr) => Some(addr.as_str()),
            IpStatus::Unavailable => Some(IP_FALLBACK),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GreeterError {
    #[error("{language} is not offered by the {revision} catalog")]
    UnsupportedLanguage {
        language: Language,
        revision: Revision,
    },
}

/// Token tying an IP lookup to the cycle that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing changed: empty name, or already on the greeting screen.
    Rejected,
    Shown,
    /// Greeting is shown and the caller should run one lookup for this ticket.
    ShownWithLookup(FetchTicket),
}

/// What the greeting screen displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GreetingCard {
    pub language: Language,
    pub greeting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_label: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Session {
    revision: Revision,
    ip_enabled: bool,
    name: String,
    language: Language,
    screen: Screen,
    ip: IpStatus,
    generation: u64,
}

impl Session {
    /// Fresh session on the input screen. `ip_enabled` has no effect on
    /// revisions without an IP lookup.
    pub fn new(revision: Revision, ip_enabled: bool) -> Self {
        Self {
            revision,
            ip_enabled: ip_enabled && revision.looks_up_ip(),
            name: String::new(),
            language: Language::English,
            screen: Screen::Input,
            ip: IpStatus::Idle,
            generation: 0,
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn ip(&self) -> &IpStatus {
        &self.ip
    }

    pub fn ip_enabled(&self) -> bool {
        self.ip_enabled
    }

    pub fn is_greeting_shown(&self) -> bool {
        self.screen == Screen::Greeting
    }

    /// Whether the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.screen == Screen::Input && !self.name.is_empty()
    }

    pub fn update_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Mutable access for text widgets that edit in place.
    pub fn name_mut(&mut self) -> &mut String {
        &mut self.name
    }

    pub fn select_language(&mut self, language: Language) -> Result<(), GreeterError> {
        if !self.revision.offers(language) {
            return Err(GreeterError::UnsupportedLanguage {
                language,
                revision: self.revision,
            });
        }
        self.language = language;
        Ok(())
    }

    /// Move the picker selection by `step` positions, wrapping around.
    pub fn cycle_language(&mut self, step: isize) {
        let catalog = self.revision.languages();
        let current = catalog
            .iter()
            .position(|lang| *lang == self.language)
            .unwrap_or(0) as isize;
        let len = catalog.len() as isize;
        let next = (current + step).rem_euclid(len) as usize;
        self.language = catalog[next];
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.can_submit() {
            return SubmitOutcome::Rejected;
        }
        self.generation += 1;
        self.screen = Screen::Greeting;
        debug!(
            language = %self.language,
            generation = self.generation,
            "showing greeting"
        );
        if self.ip_enabled {
            self.ip = IpStatus::Pending;
            SubmitOutcome::ShownWithLookup(FetchTicket {
                generation: self.generation,
            })
        } else {
            self.ip = IpStatus::Idle;
            SubmitOutcome::Shown
        }
    }

    pub fn reset(&mut self) {
        self.generation += 1;
        self.screen = Screen::Input;
        self.name.clear();
        self.language = Language::English;
        self.ip = IpStatus::Idle;
        debug!(generation = self.generation, "session reset");
    }

    /// Record the outcome of a lookup. Returns `false` when the ticket is
    /// stale and the result was discarded.
    pub fn apply_lookup(&mut self, ticket: FetchTicket, result: Result<String, LookupError>) -> bool {
        if ticket.generation != self.generation || self.screen != Screen::Greeting {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale IP lookup"
            );
            return false;
        }
        self.ip = match result {
            Ok(addr) => IpStatus::Resolved(addr),
            Err(err) => {
                warn!(error = %err, "IP lookup failed");
                IpStatus::Unavailable
            }
        };
        true
    }

    /// Give up on the outstanding lookup: show the fallback and drop any
    /// result that still arrives. Returns `false` if nothing was pending.
    pub fn abandon_lookup(&mut self) -> bool {
        if self.screen != Screen::Greeting || self.ip != IpStatus::Pending {
            return false;
        }
        self.generation += 1;
        self.ip = IpStatus::Unavailable;
        warn!(generation = self.generation, "IP lookup abandoned");
        true
    }

    pub fn render_greeting(&self) -> String {
        self.revision.greeting(self.language, &self.name)
    }

    pub fn render_from_label(&self) -> &'static str {
        self.revision.from_label(self.language)
    }

    pub fn flag(&self) -> Option<&'static str> {
        self.revision.flag(self.language)
    }

    /// Snapshot of the greeting screen, `None` on the input screen.
    pub fn card(&self) -> Option<GreetingCard> {
        if self.screen != Screen::Greeting {
            return None;
        }
        let ip = self.ip.display().map(str::to_string);
        Some(GreetingCard {
            language: self.language,
            greeting: self.render_greeting(),
            flag: self.flag(),
            from_label: (self.revision.shows_from_label()
                && matches!(self.ip, IpStatus::Resolved(_) | IpStatus::Unavailable))
                .then(|| self.render_from_label()),
            ip,
        })
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Revision::default(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket_of(outcome: SubmitOutcome) -> FetchTicket {
        match outcome {
            SubmitOutcome::ShownWithLookup(ticket) => ticket,
            other => panic!("expected a lookup ticket, got {:?}", other),
        }
    }

    #[test]
    fn starts_on_input_screen_in_english() {
        let session = Session::default();
        assert_eq!(session.screen(), Screen::Input);
        assert_eq!(session.language(), Language::English);
        assert_eq!(session.name(), "");
        assert_eq!(session.ip(), &IpStatus::Idle);
        assert!(!session.can_submit());
    }

    #[test]
    fn empty_name_submit_is_a_no_op() {
        let mut session = Session::default();
        session.select_language(Language::German).unwrap();
        assert_eq!(session.submit(), SubmitOutcome::Rejected);
        assert_eq!(session.screen(), Screen::Input);
        assert_eq!(session.language(), Language::German);
        assert_eq!(session.ip(), &IpStatus::Idle);
    }

    #[test]
    fn submit_without_ip_revision_just_shows() {
        let mut session = Session::new(Revision::Flags, true);
        session.update_name("Anne");
        assert_eq!(session.submit(), SubmitOutcome::Shown);
        assert!(session.is_greeting_shown());
        assert_eq!(session.ip(), &IpStatus::Idle);
    }

    #[test]
    fn submit_with_ip_marks_pending() {
        let mut session = Session::default();
        session.update_name("Maria");
        ticket_of(session.submit());
        assert!(session.is_greeting_shown());
        assert_eq!(session.ip(), &IpStatus::Pending);
    }

    #[test]
    fn second_submit_is_rejected() {
        let mut session = Session::default();
        session.update_name("Maria");
        ticket_of(session.submit());
        assert_eq!(session.submit(), SubmitOutcome::Rejected);
    }

    #[test]
    fn failed_lookup_shows_fallback() {
        let mut session = Session::default();
        session.update_name("Maria");
        let ticket = ticket_of(session.submit());
        assert!(session.apply_lookup(ticket, Err(LookupError::Status(503))));
        assert_eq!(session.ip(), &IpStatus::Unavailable);
        assert_eq!(session.ip().display(), Some(IP_FALLBACK));
    }

    #[test]
    fn reset_restores_defaults_and_clears_ip() {
        let mut session = Session::default();
        session.update_name("Maria");
        session.select_language(Language::Spanish).unwrap();
        let ticket = ticket_of(session.submit());
        session.apply_lookup(ticket, Ok("198.51.100.4".to_string()));
        session.reset();
        assert_eq!(session.name(), "");
        assert_eq!(session.language(), Language::English);
        assert_eq!(session.screen(), Screen::Input);
        assert_eq!(session.ip(), &IpStatus::Idle);
    }

    #[test]
    fn late_result_after_reset_is_discarded() {
        let mut session = Session::default();
        session.update_name("Maria");
        let stale = ticket_of(session.submit());
        session.reset();
        assert!(!session.apply_lookup(stale, Ok("198.51.100.4".to_string())));
        assert_eq!(session.ip(), &IpStatus::Idle);

        // Even once the next cycle is on screen.
        session.update_name("Lena");
        let fresh = ticket_of(session.submit());
        assert!(!session.apply_lookup(stale, Ok("198.51.100.4".to_string())));
        assert_eq!(session.ip(), &IpStatus::Pending);
        assert!(session.apply_lookup(fresh, Ok("203.0.113.9".to_string())));
        assert_eq!(session.ip(), &IpStatus::Resolved("203.0.113.9".to_string()));
    }

    #[test]
    fn language_outside_catalog_is_refused() {
        let mut session = Session::new(Revision::Localized, true);
        let err = session.select_language(Language::Zulu).unwrap_err();
        assert_eq!(
            err,
            GreeterError::UnsupportedLanguage {
                language: Language::Zulu,
                revision: Revision::Localized,
            }
        );
        assert_eq!(session.language(), Language::English);
    }

    #[test]
    fn cycling_wraps_in_both_directions() {
        let mut session = Session::new(Revision::Basic, false);
        session.cycle_language(-1);
        assert_eq!(session.language(), Language::Zulu);
        session.cycle_language(1);
        assert_eq!(session.language(), Language::English);
        session.cycle_language(2);
        assert_eq!(session.language(), Language::Spanish);
    }

    #[test]
    fn ip_disabled_on_network_revision() {
        let mut session = Session::new(Revision::Network, false);
        assert!(!session.ip_enabled());
        session.update_name("Sipho");
        assert_eq!(session.submit(), SubmitOutcome::Shown);
    }

    #[test]
    fn card_only_on_greeting_screen() {
        let mut session = Session::default();
        session.update_name("Maria");
        assert!(session.card().is_none());
        session.select_language(Language::Spanish).unwrap();
        let ticket = ticket_of(session.submit());
        session.apply_lookup(ticket, Ok("192.0.2.1".to_string()));
        let card = session.card().unwrap();
        assert_eq!(card.greeting, "¡Hola, Maria!");
        assert_eq!(card.flag, Some("🇪🇸"));
        assert_eq!(card.from_label, Some("Desde"));
        assert_eq!(card.ip.as_deref(), Some("192.0.2.1"));
    }

    #[test]
    fn pending_ip_has_no_from_label() {
        let mut session = Session::default();
        session.update_name("Maria");
        session.select_language(Language::Spanish).unwrap();
        ticket_of(session.submit());
        let card = session.card().unwrap();
        assert_eq!(card.ip.as_deref(), Some("Fetching IP…"));
        assert_eq!(card.from_label, None);
    }

    #[test]
    fn abandoned_lookup_shows_fallback_and_ignores_late_result() {
        let mut session = Session::default();
        session.update_name("Maria");
        session.select_language(Language::Spanish).unwrap();
        let ticket = ticket_of(session.submit());
        assert!(session.abandon_lookup());
        assert!(!session.abandon_lookup());
        let card = session.card().unwrap();
        assert_eq!(card.ip.as_deref(), Some(IP_FALLBACK));
        assert_eq!(card.from_label, Some("Desde"));

        assert!(!session.apply_lookup(ticket, Ok("192.0.2.1".to_string())));
        assert_eq!(session.ip(), &IpStatus::Unavailable);
    }

    #[test]
    fn abandon_is_a_no_op_on_input_screen() {
        let mut session = Session::default();
        assert!(!session.abandon_lookup());
        assert_eq!(session.ip(), &IpStatus::Idle);
    }

    #[test]
    fn card_json_omits_absent_fields() {
        let mut session = Session::new(Revision::Basic, true);
        session.update_name("Thabo");
        session.select_language(Language::Zulu).unwrap();
        session.submit();
        let json = serde_json::to_value(session.card().unwrap()).unwrap();
        assert_eq!(json["greeting"], "Sawubona Thabo");
        assert_eq!(json["language"], "Zulu");
        assert!(json.get("flag").is_none());
        assert!(json.get("ip").is_none());
    }
}
