// SPDX-License-Identifier: PMPL-1.0-or-later

//! Greeting catalog for the greeter.
//!
//! The component went through four revisions, each with its own closed set of
//! languages and its own presentation extras:
//!
//! | Revision    | Languages                                        | Flag | IP | From |
//! |-------------|--------------------------------------------------|------|----|------|
//! | `basic`     | English, German, Spanish, isiXhosa, Zulu         |      |    |      |
//! | `flags`     | English, German, Spanish, isiXhosa, Zulu, French | ✓    |    |      |
//! | `network`   | English, German, Spanish, isiXhosa, French       | ✓    | ✓  |      |
//! | `localized` | English, German, Spanish, isiXhosa, French       | ✓    | ✓  | ✓    |
//!
//! All tables are embedded at compile time. Lookups fall back to the English
//! entry (or a neutral glyph for flags) when a language has no row, so a miss
//! never panics and never returns an empty string.

mod catalog;
mod language;

pub use catalog::{Revision, NAME_PLACEHOLDER, NEUTRAL_FLAG};
pub use language::Language;
