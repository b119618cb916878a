//! Line-oriented commands read from the terminal.

use std::str::FromStr;
use thiserror::Error;

/// Commands typed by the player, one per line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Click at a horizontal screen coordinate in pixels
    Click(f64),
    /// Select a tile directly by index
    Tile(usize),
    Reset,
    /// Print the game state as JSON
    State,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty command")]
    Empty,

    #[error("unknown command `{0}`")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("`{0}` is not a number")]
    InvalidNumber(String),

    #[error("too many arguments for `{0}`")]
    TrailingInput(&'static str),
}

fn single_arg<'a, T: FromStr>(
    name: &'static str,
    mut args: impl Iterator<Item = &'a str>,
) -> Result<T, InputError> {
    let raw = args.next().ok_or(InputError::MissingArgument(name))?;
    if args.next().is_some() {
        return Err(InputError::TrailingInput(name));
    }
    raw.parse()
        .map_err(|_| InputError::InvalidNumber(raw.to_string()))
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(InputError::Empty)?;

        match command.to_ascii_lowercase().as_str() {
            "click" | "c" => single_arg("click", words).map(Command::Click),
            "tile" | "t" => single_arg("tile", words).map(Command::Tile),
            "reset" | "r" => Ok(Command::Reset),
            "state" => Ok(Command::State),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(InputError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("click 125".parse::<Command>(), Ok(Command::Click(125.0)));
        assert_eq!("  c 12.5 ".parse::<Command>(), Ok(Command::Click(12.5)));
        assert_eq!("tile 3".parse::<Command>(), Ok(Command::Tile(3)));
        assert_eq!("RESET".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("state".parse::<Command>(), Ok(Command::State));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(InputError::Empty));
        assert_eq!(
            "flip 2".parse::<Command>(),
            Err(InputError::Unknown("flip".into()))
        );
        assert_eq!(
            "click".parse::<Command>(),
            Err(InputError::MissingArgument("click"))
        );
        assert_eq!(
            "tile -1".parse::<Command>(),
            Err(InputError::InvalidNumber("-1".into()))
        );
        assert_eq!(
            "tile 1 2".parse::<Command>(),
            Err(InputError::TrailingInput("tile"))
        );
    }
}
