//! Line-oriented command parser for the terminal shell.
//!
//! Each input line maps to zero or more [`Event`]s; the mapping is pure so the
//! whole interaction surface is testable without a terminal.

use super::handler::Event;
use super::modes::{SortDirection, SortKey};
use super::routes::Route;
use thiserror::Error;

/// Why a line could not be turned into events.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command `{0}`. Type `help` for a list of commands.")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line.
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands or missing arguments.
///
/// ```
/// use movieflix::app::{parse_command, Event, SortKey};
///
/// assert_eq!(parse_command("sort year").unwrap(), vec![Event::ClickSort(SortKey::Year)]);
/// assert!(parse_command("dance").is_err());
/// ```
pub fn parse_command(line: &str) -> Result<Vec<Event>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(vec![]);
    }

    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(c, r)| (c, r.trim()));
    let args: Vec<&str> = rest.split_whitespace().collect();

    let events = match command.to_ascii_lowercase().as_str() {
        "search" | "s" => vec![Event::QueryChanged(rest.to_string()), Event::SubmitSearch],
        "filter" | "f" => vec![Event::QueryChanged(rest.to_string())],
        "trending" => vec![Event::LoadTrending],
        "genre" | "g" => {
            if rest.is_empty() || rest.eq_ignore_ascii_case("clear") {
                vec![Event::ClearGenres]
            } else {
                vec![Event::ToggleGenre(rest.to_string())]
            }
        }
        "sort" => {
            let key: SortKey = rest
                .parse()
                .map_err(|_| CommandError::Usage("sort rating|year|title|none"))?;
            if key == SortKey::None {
                vec![Event::ClearSort]
            } else {
                vec![Event::ClickSort(key)]
            }
        }
        "dir" => {
            let direction: SortDirection = rest
                .parse()
                .map_err(|_| CommandError::Usage("dir asc|desc"))?;
            vec![Event::SetSortDirection(direction)]
        }
        "open" | "o" => {
            let position = rest
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(CommandError::Usage("open <n>  (n is the number shown next to the movie)"))?;
            vec![Event::OpenMovie(position - 1)]
        }
        "go" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("go <path>"));
            }
            let path = if rest.starts_with('/') {
                rest.to_string()
            } else {
                format!("/{rest}")
            };
            vec![Event::Navigate(Route::parse(&path))]
        }
        "home" | "back" => vec![Event::Navigate(Route::Home)],
        "stats" | "analytics" => vec![Event::Navigate(Route::Analytics)],
        "login" => match args.as_slice() {
            [] => vec![Event::Navigate(Route::Login)],
            [email, password] => vec![Event::SubmitLogin {
                email: (*email).to_string(),
                password: (*password).to_string(),
            }],
            _ => return Err(CommandError::Usage("login <email> <password>")),
        },
        "signup" => match args.as_slice() {
            [] => vec![Event::Navigate(Route::SignUp)],
            [email, password, confirm] | [email, password, confirm, _] => vec![Event::SubmitSignUp {
                email: (*email).to_string(),
                password: (*password).to_string(),
                confirm_password: (*confirm).to_string(),
                agree_to_terms: args
                    .get(3)
                    .is_some_and(|a| matches!(a.to_ascii_lowercase().as_str(), "agree" | "--agree" | "yes")),
            }],
            _ => return Err(CommandError::Usage("signup <email> <password> <confirm> agree")),
        },
        "forgot" => match args.as_slice() {
            [] => vec![Event::Navigate(Route::ForgotPassword)],
            [email, new_password, confirm] => vec![Event::SubmitForgotPassword {
                email: (*email).to_string(),
                new_password: (*new_password).to_string(),
                confirm_password: (*confirm).to_string(),
            }],
            _ => return Err(CommandError::Usage("forgot <email> <new-password> <confirm>")),
        },
        "logout" => vec![Event::Logout],
        "export" => vec![Event::ExportCsv],
        "theme" => vec![Event::ToggleTheme],
        "help" | "?" => vec![Event::ShowHelp],
        "quit" | "exit" | "q" => vec![Event::Quit],
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_keeps_full_text() {
        assert_eq!(
            parse_command("search  the dark knight ").unwrap(),
            vec![Event::QueryChanged("the dark knight".into()), Event::SubmitSearch]
        );
    }

    #[test]
    fn test_empty_line_is_noop() {
        assert_eq!(parse_command("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_filter_without_text_clears() {
        assert_eq!(parse_command("filter").unwrap(), vec![Event::QueryChanged(String::new())]);
    }

    #[test]
    fn test_genre_and_sort() {
        assert_eq!(parse_command("genre sci fi").unwrap(), vec![Event::ToggleGenre("sci fi".into())]);
        assert_eq!(parse_command("genre").unwrap(), vec![Event::ClearGenres]);
        assert_eq!(parse_command("sort none").unwrap(), vec![Event::ClearSort]);
        assert_eq!(
            parse_command("dir asc").unwrap(),
            vec![Event::SetSortDirection(SortDirection::Ascending)]
        );
        assert_eq!(
            parse_command("sort popularity"),
            Err(CommandError::Usage("sort rating|year|title|none"))
        );
    }

    #[test]
    fn test_open_is_one_based() {
        assert_eq!(parse_command("open 3").unwrap(), vec![Event::OpenMovie(2)]);
        assert!(parse_command("open 0").is_err());
        assert!(parse_command("open x").is_err());
    }

    #[test]
    fn test_navigation() {
        assert_eq!(parse_command("go analytics").unwrap(), vec![Event::Navigate(Route::Analytics)]);
        assert_eq!(
            parse_command("go /movie/tt42").unwrap(),
            vec![Event::Navigate(Route::MovieDetails("tt42".into()))]
        );
        assert_eq!(parse_command("login").unwrap(), vec![Event::Navigate(Route::Login)]);
    }

    #[test]
    fn test_signup_agreement_flag() {
        let events = parse_command("signup a@b.co pw pw agree").unwrap();
        assert!(matches!(&events[0], Event::SubmitSignUp { agree_to_terms: true, .. }));

        let events = parse_command("signup a@b.co pw pw").unwrap();
        assert!(matches!(&events[0], Event::SubmitSignUp { agree_to_terms: false, .. }));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(parse_command("dance"), Err(CommandError::Unknown("dance".into())));
    }
}
