use std::fmt;
use tournament_hub::{Tournament, TournamentId};

/// How a command refers to a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the last printed list, written `#N`
    Index(usize),
    /// Tournament id as sent by the server
    Id(TournamentId),
}

impl Target {
    /// Find the targeted tournament in `tournaments`.
    pub fn resolve<'a>(&self, tournaments: &'a [Tournament]) -> Option<&'a Tournament> {
        match self {
            Self::Index(idx) => tournaments.get(idx.checked_sub(1)?),
            Self::Id(id) => tournaments.iter().find(|t| &t.id == id),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(idx) => write!(f, "#{idx}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Commands accepted in CLI mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    /// Fetch tournaments, optionally filtered
    List(Option<String>),
    /// Fetch tournaments matching a query
    Search(String),
    /// Create a tournament; prompts when no name is given
    Create(Option<String>),
    /// Rename a tournament; prompts when no name is given
    Edit { target: Target, name: Option<String> },
    /// Remove a tournament after confirmation
    Remove(Target),
    /// Re-run the fetch without a query
    Retry,
    Help,
    Quit,
}

/// Errors that can occur during command parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing but whitespace was entered.
    EmptyCommand,
    /// Search command missing its query.
    SearchMissingQuery,
    /// Edit or remove command missing the tournament.
    MissingTarget(&'static str),
    /// Invalid `#N` index.
    InvalidIndex(String),
    /// Command that takes no arguments was given some.
    UnexpectedArguments(&'static str),
    /// Unrecognized command.
    UnrecognizedCommand(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCommand => write!(f, "Empty command. Type 'help' to see available commands"),
            Self::SearchMissingQuery => {
                write!(f, "Search requires a query (e.g., 'search spring cup')")
            }
            Self::MissingTarget(cmd) => write!(
                f,
                "'{cmd}' requires a tournament number or id (e.g., '{cmd} #1' or '{cmd} 42')"
            ),
            Self::InvalidIndex(value) => write!(
                f,
                "Invalid tournament number '{value}'. Must be a positive number (e.g., '#1')"
            ),
            Self::UnexpectedArguments(cmd) => write!(f, "'{cmd}' takes no arguments"),
            Self::UnrecognizedCommand(cmd) => write!(
                f,
                "Unrecognized command '{cmd}'. Type 'help' to see available commands"
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a line of user input into a [`ClientCommand`].
///
/// # Examples
///
/// ```
/// use th_client::commands::{parse_command, ClientCommand, Target};
///
/// assert_eq!(parse_command("retry"), Ok(ClientCommand::Retry));
/// assert_eq!(
///     parse_command("edit #2 Spring Cup"),
///     Ok(ClientCommand::Edit {
///         target: Target::Index(2),
///         name: Some("Spring Cup".to_string()),
///     })
/// );
/// ```
pub fn parse_command(input: &str) -> Result<ClientCommand, ParseError> {
    let trimmed = input.trim();
    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    match command.to_lowercase().as_str() {
        "" => Err(ParseError::EmptyCommand),
        "list" | "ls" => Ok(ClientCommand::List(non_empty(rest))),
        "search" => non_empty(rest)
            .map(ClientCommand::Search)
            .ok_or(ParseError::SearchMissingQuery),
        "create" | "new" => Ok(ClientCommand::Create(name_arg(rest))),
        "edit" | "rename" => {
            let (target, name) = split_target("edit", rest)?;
            Ok(ClientCommand::Edit {
                target,
                name: name_arg(name),
            })
        }
        "remove" | "rm" | "delete" => {
            let (target, extra) = split_target("remove", rest)?;
            if !extra.is_empty() {
                return Err(ParseError::UnexpectedArguments("remove"));
            }
            Ok(ClientCommand::Remove(target))
        }
        "retry" => no_arguments("retry", rest, ClientCommand::Retry),
        "help" | "?" => no_arguments("help", rest, ClientCommand::Help),
        "quit" | "exit" | "q" => no_arguments("quit", rest, ClientCommand::Quit),
        _ => Err(ParseError::UnrecognizedCommand(command.to_string())),
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Name argument with one pair of surrounding quotes removed.
///
/// A quoted name is kept even when blank so the caller can reject it.
fn name_arg(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let unquoted = ['"', '\'']
        .into_iter()
        .find_map(|quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value);
    Some(unquoted.to_string())
}

fn no_arguments(
    cmd: &'static str,
    rest: &str,
    command: ClientCommand,
) -> Result<ClientCommand, ParseError> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(ParseError::UnexpectedArguments(cmd))
    }
}

/// Split "TARGET [rest]" off the arguments
fn split_target<'a>(cmd: &'static str, args: &'a str) -> Result<(Target, &'a str), ParseError> {
    let (raw, rest) = match args.split_once(char::is_whitespace) {
        Some((raw, rest)) => (raw, rest.trim()),
        None => (args, ""),
    };

    if raw.is_empty() {
        return Err(ParseError::MissingTarget(cmd));
    }

    let target = match raw.strip_prefix('#') {
        Some(idx) => match idx.parse::<usize>() {
            Ok(idx) if idx > 0 => Target::Index(idx),
            _ => return Err(ParseError::InvalidIndex(idx.to_string())),
        },
        None => Target::Id(raw.to_string()),
    };

    Ok((target, rest))
}
