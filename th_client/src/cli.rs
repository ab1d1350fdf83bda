//! Line-oriented front end.
//!
//! Reads one command per line, runs it to completion, then prints the
//! tournaments page as text.

use crate::{
    commands::{ClientCommand, Target, parse_command},
    presentation::{card_text, status_text},
};
use async_trait::async_trait;
use std::{
    io::Write,
    sync::{Arc, Mutex},
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader, Lines},
    sync::Mutex as AsyncMutex,
};
use tournament_hub::{
    Prompt, StoreHandle, Tournament, TournamentThunks, TournamentsSelector, TournamentsView,
    interaction,
};

pub const HELP: &str = "\
list [QUERY]
        Fetch tournaments, optionally filtered by QUERY.
search QUERY
        Fetch tournaments whose name, organizer or game match QUERY.
create [NAME]
        Create a tournament. Asks for a name when none is given.
        NAME may be quoted; a blank quoted name cancels.
edit #N|ID [NAME]
        Rename a tournament. Asks for a name when none is given.
remove #N|ID
        Remove a tournament after confirmation.
retry
        Fetch all tournaments again.
help
        Print this help.
quit
        Exit.
";

type SharedLines<R> = Arc<AsyncMutex<Lines<BufReader<R>>>>;
type SharedOutput = Arc<Mutex<Box<dyn Write + Send>>>;

fn write_out(out: &SharedOutput, text: &str) -> std::io::Result<()> {
    let mut out = out.lock().unwrap_or_else(|e| e.into_inner());
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Prompt answered on the same input as the commands
pub struct LinePrompt<R> {
    lines: SharedLines<R>,
    out: SharedOutput,
}

impl<R> LinePrompt<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn read_answer(&self, message: &str) -> Option<String> {
        if let Err(e) = write_out(&self.out, &format!("{message} ")) {
            tracing::warn!(error = %e, "Failed to write prompt");
        }
        match self.lines.lock().await.next_line().await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read answer");
                None
            }
        }
    }
}

#[async_trait]
impl<R> Prompt for LinePrompt<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn ask_text(&self, message: &str) -> Option<String> {
        self.read_answer(message).await
    }

    async fn confirm(&self, message: &str) -> bool {
        self.read_answer(&format!("{message} [y/N]"))
            .await
            .is_some_and(|answer| matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

pub struct Cli<R> {
    lines: SharedLines<R>,
    out: SharedOutput,
    prompt: LinePrompt<R>,
    store: StoreHandle,
    thunks: TournamentThunks,
    selector: TournamentsSelector,
}

impl<R> Cli<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new<W>(input: R, output: W, store: StoreHandle, thunks: TournamentThunks) -> Self
    where
        W: Write + Send + 'static,
    {
        let lines = Arc::new(AsyncMutex::new(BufReader::new(input).lines()));
        let out: SharedOutput = Arc::new(Mutex::new(Box::new(output)));
        let prompt = LinePrompt {
            lines: Arc::clone(&lines),
            out: Arc::clone(&out),
        };

        Self {
            lines,
            out,
            prompt,
            store,
            thunks,
            selector: TournamentsSelector::new(),
        }
    }

    fn say(&self, text: &str) -> std::io::Result<()> {
        write_out(&self.out, &format!("{text}\n"))
    }

    /// Run until `quit` or end of input
    pub async fn run(self) -> anyhow::Result<()> {
        self.say("Type 'help' to see available commands.")?;
        self.thunks.fetch_tournaments(None).await;
        self.show().await?;

        loop {
            write_out(&self.out, "> ")?;
            let Some(line) = self.lines.lock().await.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match parse_command(&line) {
                Ok(ClientCommand::Quit) => break,
                Ok(command) => {
                    tracing::debug!(?command, "Running command");
                    self.execute(command).await?;
                }
                Err(e) => self.say(&e.to_string())?,
            }
        }

        Ok(())
    }

    async fn execute(&self, command: ClientCommand) -> anyhow::Result<()> {
        match command {
            ClientCommand::List(query) => {
                self.thunks.fetch_tournaments(query.as_deref()).await;
            }
            ClientCommand::Search(query) => {
                self.thunks.fetch_tournaments(Some(&query)).await;
            }
            ClientCommand::Retry => self.thunks.fetch_tournaments(None).await,
            ClientCommand::Create(name) => match name {
                Some(name) => match interaction::accept_name(Some(name)) {
                    Some(name) => self.thunks.create_new_tournament(&name).await,
                    None => {
                        self.say("Cancelled.")?;
                        return Ok(());
                    }
                },
                None => {
                    if !interaction::create_tournament(&self.prompt, &self.thunks).await {
                        self.say("Cancelled.")?;
                        return Ok(());
                    }
                }
            },
            ClientCommand::Edit { target, name } => {
                let Some(tournament) = self.find(&target) else {
                    return self.not_found(&target);
                };
                match name {
                    Some(name) => match interaction::accept_name(Some(name)) {
                        Some(name) => self.thunks.rename_tournament(&tournament, &name).await,
                        None => {
                            self.say("Cancelled.")?;
                            return Ok(());
                        }
                    },
                    None => {
                        if !interaction::edit_tournament(&self.prompt, &self.thunks, &tournament)
                            .await
                        {
                            self.say("Cancelled.")?;
                            return Ok(());
                        }
                    }
                }
            }
            ClientCommand::Remove(target) => {
                let Some(tournament) = self.find(&target) else {
                    return self.not_found(&target);
                };
                if !interaction::remove_tournament(&self.prompt, &self.thunks, &tournament.id).await
                {
                    self.say("Cancelled.")?;
                    return Ok(());
                }
            }
            ClientCommand::Help => {
                write_out(&self.out, HELP)?;
                return Ok(());
            }
            ClientCommand::Quit => return Ok(()),
        }

        self.show().await
    }

    fn find(&self, target: &Target) -> Option<Tournament> {
        let tournaments = self.selector.select_tournaments(&self.store.state());
        target.resolve(&tournaments).cloned()
    }

    fn not_found(&self, target: &Target) -> anyhow::Result<()> {
        self.say(&format!("No tournament matches '{target}'."))?;
        Ok(())
    }

    /// Print the page for the current state
    async fn show(&self) -> anyhow::Result<()> {
        self.store.flush().await?;
        let view = self.selector.select_view(&self.store.state());

        if let Some(text) = status_text(&view) {
            self.say(text)?;
        }
        match view {
            TournamentsView::Error => self.say("Type 'retry' to try again.")?,
            TournamentsView::Grid(tournaments) => {
                for (idx, tournament) in tournaments.iter().enumerate() {
                    self.say(&card_text(idx + 1, tournament))?;
                }
            }
            _ => {}
        }

        Ok(())
    }
}
