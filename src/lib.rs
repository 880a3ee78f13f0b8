// SPDX-License-Identifier: PMPL-1.0-or-later

//! Greeter — a single-screen localized hello.
//!
//! The user types a name, picks a language, and gets a greeting back,
//! optionally with a flag and the caller's public IP address.
//!
//! LAYERS:
//! 1. **i18n**: closed language set and the per-revision greeting, flag and
//!    "from" tables.
//! 2. **session**: the two-screen state machine (`Input` ⇄ `Greeting`).
//! 3. **view**: owns the session and runs the IP lookup off the UI thread.
//! 4. **frontend**: terminal and desktop hosts for the view.

pub mod config;
pub mod frontend;
pub mod i18n;
pub mod ip;
pub mod logging;
pub mod session;
pub mod view;

pub use i18n::{Language, Revision};
pub use session::{GreetingCard, Screen, Session};
pub use view::GreeterView;
