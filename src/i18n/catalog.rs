// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-revision greeting, flag and "from" tables.
//!
//! ## Adding a new language
//!
//! 1. Add a variant to [`Language`]
//! 2. Add rows to `PLAIN_GREETINGS` / `PUNCTUATED_GREETINGS`, `FLAGS` and `FROM_LABELS`
//! 3. Add it to the `languages()` list of each revision that should offer it

use super::Language;
use serde::Serialize;

/// Substitution point inside a greeting template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Shown when a language has no flag row.
pub const NEUTRAL_FLAG: &str = "🏳️";

const DEFAULT_FROM_LABEL: &str = "From";

/// One historical snapshot of the greeter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Revision {
    /// Name and greeting only.
    Basic,
    /// Adds French and a flag next to the greeting.
    Flags,
    /// Drops Zulu and shows the caller's public IP.
    Network,
    /// Adds a localized "From" label in front of the IP.
    Localized,
}

impl Revision {
    pub fn all() -> &'static [Revision] {
        &[
            Revision::Basic,
            Revision::Flags,
            Revision::Network,
            Revision::Localized,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Revision::Basic => "basic",
            Revision::Flags => "flags",
            Revision::Network => "network",
            Revision::Localized => "localized",
        }
    }

    /// The picker catalog, in display order.
    pub fn languages(&self) -> &'static [Language] {
        match self {
            Revision::Basic => &[
                Language::English,
                Language::German,
                Language::Spanish,
                Language::IsiXhosa,
                Language::Zulu,
            ],
            Revision::Flags => &[
                Language::English,
                Language::German,
                Language::Spanish,
                Language::IsiXhosa,
                Language::Zulu,
                Language::French,
            ],
            Revision::Network | Revision::Localized => &[
                Language::English,
                Language::German,
                Language::Spanish,
                Language::IsiXhosa,
                Language::French,
            ],
        }
    }

    pub fn offers(&self, language: Language) -> bool {
        self.languages().contains(&language)
    }

    pub fn shows_flag(&self) -> bool {
        !matches!(self, Revision::Basic)
    }

    pub fn looks_up_ip(&self) -> bool {
        matches!(self, Revision::Network | Revision::Localized)
    }

    pub fn shows_from_label(&self) -> bool {
        matches!(self, Revision::Localized)
    }

    /// Greeting template for `language`.
    ///
    /// Languages outside this revision's catalog get the English template.
    pub fn template(&self, language: Language) -> &'static str {
        let table = match self {
            Revision::Basic => PLAIN_GREETINGS,
            _ => PUNCTUATED_GREETINGS,
        };
        let language = if self.offers(language) {
            language
        } else {
            Language::English
        };
        lookup(table, language).unwrap_or(table[0].1)
    }

    /// Fill the template's placeholder with `name`.
    pub fn greeting(&self, language: Language, name: &str) -> String {
        self.template(language).replacen(NAME_PLACEHOLDER, name, 1)
    }

    /// Flag glyph, or `None` when this revision shows no flags.
    pub fn flag(&self, language: Language) -> Option<&'static str> {
        self.shows_flag().then(|| flag_from(FLAGS, language))
    }

    pub fn from_label(&self, language: Language) -> &'static str {
        lookup(FROM_LABELS, language).unwrap_or(DEFAULT_FROM_LABEL)
    }
}

impl Default for Revision {
    fn default() -> Self {
        Revision::Localized
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn lookup(table: &'static [(Language, &'static str)], language: Language) -> Option<&'static str> {
    table
        .iter()
        .find(|(lang, _)| *lang == language)
        .map(|&(_, value)| value)
}

fn flag_from(table: &'static [(Language, &'static str)], language: Language) -> &'static str {
    lookup(table, language).unwrap_or(NEUTRAL_FLAG)
}

// First row of each greeting table is the default.

const PLAIN_GREETINGS: &[(Language, &str)] = &[
    (Language::English, "Hello {name}"),
    (Language::German, "Hallo {name}"),
    (Language::Spanish, "Hola {name}"),
    (Language::IsiXhosa, "Molo {name}"),
    (Language::Zulu, "Sawubona {name}"),
];

const PUNCTUATED_GREETINGS: &[(Language, &str)] = &[
    (Language::English, "Hello, {name}!"),
    (Language::German, "Hallo, {name}!"),
    (Language::Spanish, "¡Hola, {name}!"),
    (Language::IsiXhosa, "Molo, {name}!"),
    (Language::Zulu, "Sawubona, {name}!"),
    (Language::French, "Bonjour, {name}!"),
];

const FLAGS: &[(Language, &str)] = &[
    (Language::English, "🇬🇧"),
    (Language::German, "🇩🇪"),
    (Language::Spanish, "🇪🇸"),
    (Language::IsiXhosa, "🇿🇦"),
    (Language::Zulu, "🇿🇦"),
    (Language::French, "🇫🇷"),
];

const FROM_LABELS: &[(Language, &str)] = &[
    (Language::English, "From"),
    (Language::German, "Von"),
    (Language::Spanish, "Desde"),
    (Language::IsiXhosa, "Ukusuka"),
    (Language::French, "De"),
];
