// SPDX-License-Identifier: PMPL-1.0-or-later

//! Interactive hosts for the greeter view, plus the one-shot printer

pub mod gui;
pub mod tui;

use crate::session::{GreetingCard, SubmitOutcome};
use crate::view::GreeterView;
use anyhow::{bail, Result};
use colored::*;
use std::time::Duration;

pub use gui::GreeterGui;
pub use tui::GreeterTui;

/// Upper bound for the one-shot command; interactive hosts never wait.
pub const ONE_SHOT_LOOKUP_WAIT: Duration = Duration::from_secs(35);

/// Run a single submit cycle without a UI and return the greeting card.
pub fn greet_once(view: &mut GreeterView) -> Result<GreetingCard> {
    greet_once_within(view, ONE_SHOT_LOOKUP_WAIT)
}

/// [`greet_once`] with an explicit bound on the lookup wait. A lookup still
/// running at the deadline is abandoned and reported as unavailable.
pub fn greet_once_within(view: &mut GreeterView, wait: Duration) -> Result<GreetingCard> {
    if view.submit() == SubmitOutcome::Rejected {
        bail!("a non-empty name is required");
    }
    if !view.wait_for_lookups(wait) {
        tracing::warn!(?wait, "IP lookup still running; giving up on it");
        view.abandon_lookup();
    }
    match view.session().card() {
        Some(card) => Ok(card),
        None => bail!("greeting screen was not reached"),
    }
}

/// Human-readable rendering of a card, one item per line.
pub fn format_card(card: &GreetingCard) -> String {
    let mut out = String::new();
    if let Some(flag) = card.flag {
        out.push_str(flag);
        out.push('\n');
    }
    out.push_str(&card.greeting.bold().to_string());
    if let Some(ip) = &card.ip {
        out.push('\n');
        if let Some(label) = card.from_label {
            out.push_str(label);
            out.push(' ');
        }
        out.push_str(ip);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Language, Revision};
    use crate::ip::{IpLookup, LookupError, IP_FALLBACK};
    use std::sync::mpsc::{self, Receiver};
    use std::sync::{Arc, Mutex};

    struct Refused;

    impl IpLookup for Refused {
        fn lookup(&self) -> Result<String, LookupError> {
            Err(LookupError::Status(502))
        }
    }

    /// Never answers while the sender half is alive.
    struct Stuck(Mutex<Receiver<()>>);

    impl IpLookup for Stuck {
        fn lookup(&self) -> Result<String, LookupError> {
            let rx = self.0.lock().map_err(|_| LookupError::EmptyBody)?;
            let _ = rx.recv();
            Ok("192.0.2.99".to_string())
        }
    }

    #[test]
    fn greet_once_gives_up_on_a_stuck_lookup() {
        let (_hold, rx) = mpsc::channel();
        let mut view = GreeterView::new(Revision::Localized, true, Arc::new(Stuck(Mutex::new(rx))));
        view.update_name("Maria");
        view.select_language(Language::Spanish).unwrap();
        let card = greet_once_within(&mut view, Duration::from_millis(50)).unwrap();
        assert_eq!(card.greeting, "¡Hola, Maria!");
        assert_eq!(card.ip.as_deref(), Some(IP_FALLBACK));
        assert_eq!(card.from_label, Some("Desde"));
        assert!(!format_card(&card).contains("Fetching"));
    }

    #[test]
    fn greet_once_requires_a_name() {
        let mut view = GreeterView::new(Revision::Localized, true, Arc::new(Refused));
        assert!(greet_once(&mut view).is_err());
    }

    #[test]
    fn greet_once_waits_for_the_lookup() {
        let mut view = GreeterView::new(Revision::Localized, true, Arc::new(Refused));
        view.update_name("Lena");
        view.select_language(Language::German).unwrap();
        let card = greet_once(&mut view).unwrap();
        assert_eq!(card.greeting, "Hallo, Lena!");
        assert_eq!(card.from_label, Some("Von"));
        assert_eq!(card.ip.as_deref(), Some("Could not fetch IP"));
    }

    #[test]
    fn format_card_orders_flag_greeting_ip() {
        let card = GreetingCard {
            language: Language::French,
            greeting: "Bonjour, Anne!".to_string(),
            flag: Some("🇫🇷"),
            from_label: Some("De"),
            ip: Some("192.0.2.8".to_string()),
        };
        let text = format_card(&card);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "🇫🇷");
        assert!(lines[1].contains("Bonjour, Anne!"));
        assert_eq!(lines[2], "De 192.0.2.8");
    }
}
