// SPDX-License-Identifier: PMPL-1.0-or-later

//! Terminal front end for the greeter

use crate::session::{Screen, Session};
use crate::view::GreeterView;
use anyhow::Result;
use colored::*;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, ClearType},
};
use std::io::{stdout, Write};
use std::time::Duration;

pub struct GreeterTui;

impl GreeterTui {
    pub fn run(view: &mut GreeterView) -> Result<()> {
        terminal::enable_raw_mode()?;
        let result = Self::run_inner(view);
        let show = execute!(stdout(), cursor::Show);
        let raw = terminal::disable_raw_mode();
        restore_order(result, show, raw)
    }

    fn run_inner(view: &mut GreeterView) -> Result<()> {
        let mut stdout = stdout();
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            cursor::Hide
        )?;
        let mut dirty = true;

        loop {
            dirty |= view.poll();
            if dirty {
                Self::render(&mut stdout, view.session())?;
                dirty = false;
            }

            if !event::poll(Duration::from_millis(200))? {
                continue;
            }
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) = event::read()?
            else {
                continue;
            };
            if kind == KeyEventKind::Release {
                continue;
            }
            if code == KeyCode::Esc
                || (code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL))
            {
                break;
            }
            dirty = true;

            match view.session().screen() {
                Screen::Input => match code {
                    KeyCode::Enter => {
                        view.submit();
                    }
                    KeyCode::Tab | KeyCode::Right => view.cycle_language(1),
                    KeyCode::BackTab | KeyCode::Left => view.cycle_language(-1),
                    KeyCode::Backspace => {
                        view.name_mut().pop();
                    }
                    KeyCode::Char(c) => view.name_mut().push(c),
                    _ => dirty = false,
                },
                Screen::Greeting => match code {
                    KeyCode::Enter | KeyCode::Char('r') => view.reset(),
                    KeyCode::Char('q') => break,
                    _ => dirty = false,
                },
            }
        }

        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }

    fn render(stdout: &mut impl Write, session: &Session) -> Result<()> {
        execute!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        let lines = match session.screen() {
            Screen::Input => input_lines(session),
            Screen::Greeting => greeting_lines(session),
        };
        // Raw mode does not translate \n into a carriage return.
        for line in lines {
            write!(stdout, "{}\r\n", line)?;
        }
        stdout.flush()?;
        Ok(())
    }
}

/// The session error outranks any failure to restore the terminal.
fn restore_order(result: Result<()>, show: std::io::Result<()>, raw: std::io::Result<()>) -> Result<()> {
    result?;
    show?;
    raw?;
    Ok(())
}

fn input_lines(session: &Session) -> Vec<String> {
    let mut lines = vec![
        "Enter your name:".bold().to_string(),
        format!("  > {}{}", session.name(), "_".dimmed()),
        String::new(),
        "Choose language:".bold().to_string(),
    ];

    let picker: Vec<String> = session
        .revision()
        .languages()
        .iter()
        .map(|lang| {
            if *lang == session.language() {
                format!("[{}]", lang.name()).green().bold().to_string()
            } else {
                format!(" {} ", lang.name()).normal().to_string()
            }
        })
        .collect();
    lines.push(format!("  {}", picker.join(" ")));
    lines.push(String::new());

    let button = if session.can_submit() {
        " Say Hello ".on_blue().white().bold()
    } else {
        " Say Hello ".on_bright_black().white()
    };
    lines.push(format!("  {}", button));
    lines.push(String::new());
    lines.push(
        "Controls: type your name, [Tab/→] Next language, [Shift+Tab/←] Prev, [Enter] Say Hello, [Esc] Quit"
            .dimmed()
            .to_string(),
    );
    lines
}

fn greeting_lines(session: &Session) -> Vec<String> {
    let Some(card) = session.card() else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    if let Some(flag) = card.flag {
        lines.push(format!("  {}", flag));
    }
    lines.push(format!("  {}", card.greeting.bold().cyan()));
    if let Some(ip) = &card.ip {
        let ip_line = match card.from_label {
            Some(label) => format!("{} {}", label, ip),
            None => ip.clone(),
        };
        lines.push(format!("  {}", ip_line.dimmed()));
    }
    lines.push(String::new());
    lines.push(format!("  {}", " Try Again ".on_blue().white().bold()));
    lines.push(String::new());
    lines.push(
        "Controls: [Enter/r] Try Again, [q/Esc] Quit"
            .dimmed()
            .to_string(),
    );
    lines
}
