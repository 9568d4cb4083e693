use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use agenda_interaction::{AI_DISABLED_MESSAGE, ChatSession};

use crate::render;

/// Slash commands understood by the REPL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Clear,
    Events,
    Help,
    Quit,
}

impl Command {
    const ALL: [Command; 4] = [Command::Clear, Command::Events, Command::Help, Command::Quit];

    fn name(self) -> &'static str {
        match self {
            Command::Clear => "/clear",
            Command::Events => "/events",
            Command::Help => "/help",
            Command::Quit => "/quit",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Command::Clear => "recommencer la conversation",
            Command::Events => "afficher les événements chargés",
            Command::Help => "afficher cette aide",
            Command::Quit => "quitter",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "quit" | "exit" | "/exit" => Some(Command::Quit),
            _ => Self::ALL.into_iter().find(|cmd| cmd.name() == word),
        }
    }

    /// Command names extending `prefix`, in table order.
    fn completions(prefix: &str) -> impl Iterator<Item = &'static str> + '_ {
        Self::ALL
            .into_iter()
            .map(Command::name)
            .filter(move |name| prefix.starts_with('/') && name.starts_with(prefix))
    }
}

/// rustyline helper completing and hinting the [`Command`] table.
struct CliHelper;

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = Command::completions(&line[..pos])
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match Command::parse(line.trim()) {
            Some(_) => Owned(line.bright_cyan().to_string()),
            None => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let prefix = &line[..pos];
        Command::completions(prefix)
            .find(|name| name.len() > prefix.len())
            .map(|name| name[prefix.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// What the REPL should do with one input line.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Skip,
    Command(Command),
    Unknown(&'a str),
    Query(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Input::Skip;
    }
    match Command::parse(trimmed) {
        Some(cmd) => Input::Command(cmd),
        None if trimmed.starts_with('/') => Input::Unknown(trimmed),
        None => Input::Query(trimmed),
    }
}

fn print_help() {
    println!("{}", "Commandes :".bright_black());
    for cmd in Command::ALL {
        println!("{}", format!("  {:<8} {}", cmd.name(), cmd.summary()).bright_black());
    }
    println!();
}

fn print_greeting(session: &ChatSession) {
    if let Some(turn) = session.history().turns().first() {
        render::print_answer(&turn.content);
    }
}

/// Runs the interactive conversation until the user quits.
pub async fn run(mut session: ChatSession) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== Agenda Orléans Métropole ===".bright_magenta().bold());
    println!("{}", "Tapez '/help' pour l'aide ou 'quit' pour quitter.".bright_black());
    println!();
    if !session.ai_enabled() {
        println!("{}", AI_DISABLED_MESSAGE.yellow());
        println!();
    }
    print_greeting(&session);

    loop {
        match rl.readline(">> ") {
            Ok(line) => match parse_input(&line) {
                Input::Skip => continue,
                Input::Command(Command::Quit) => {
                    println!("{}", "À bientôt !".bright_green());
                    break;
                }
                Input::Command(Command::Clear) => {
                    session.clear();
                    print_greeting(&session);
                }
                Input::Command(Command::Events) => {
                    let corpus = session.corpus().await.to_vec();
                    render::print_events(&corpus, session.diagnostic());
                }
                Input::Command(Command::Help) => print_help(),
                Input::Unknown(cmd) => {
                    println!("{}", format!("Commande inconnue : {cmd}").bright_black());
                }
                Input::Query(query) => {
                    let _ = rl.add_history_entry(query);
                    println!("{}", format!("> {query}").green());
                    let answer = session.ask(query).await;
                    render::print_answer(&answer);
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C détecté. Tapez 'quit' pour quitter.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "À bientôt !".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
