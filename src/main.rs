// SPDX-License-Identifier: PMPL-1.0-or-later

//! greeter: say hello in the user's language, with a flag and their public IP

use anyhow::{Context, Result};
use clap::Parser;
use greeter::config::{Cli, Commands, GreeterConfig};
use greeter::frontend::{self, GreeterGui, GreeterTui};
use greeter::logging;
use serde::Serialize;

#[derive(Serialize)]
struct LanguageRow {
    name: &'static str,
    code: &'static str,
    greeting: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    flag: Option<&'static str>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = GreeterConfig::from(&cli);
    logging::init(&config.log)?;
    tracing::debug!(?config, "starting");

    match cli.command {
        None | Some(Commands::Tui) => {
            let mut view = config.build_view();
            GreeterTui::run(&mut view)?;
        }

        Some(Commands::Gui) => {
            GreeterGui::run(config.build_view())?;
        }

        Some(Commands::Greet { name, lang, json }) => {
            let mut view = config.build_view();
            view.update_name(name);
            view.select_language(lang)?;
            let card = frontend::greet_once(&mut view)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                println!("{}", frontend::format_card(&card));
            }
        }

        Some(Commands::Languages { json }) => {
            let rows: Vec<LanguageRow> = config
                .revision
                .languages()
                .iter()
                .map(|lang| LanguageRow {
                    name: lang.name(),
                    code: lang.code(),
                    greeting: config.revision.template(*lang).to_string(),
                    flag: config.revision.flag(*lang),
                })
                .collect();
            if json {
                let out = serde_json::to_string_pretty(&rows)
                    .context("failed to serialise language list")?;
                println!("{}", out);
            } else {
                println!("Revision: {}", config.revision);
                for row in &rows {
                    match row.flag {
                        Some(flag) => println!("  {} {:<9} ({})  {}", flag, row.name, row.code, row.greeting),
                        None => println!("  {:<9} ({})  {}", row.name, row.code, row.greeting),
                    }
                }
            }
        }
    }

    Ok(())
}
