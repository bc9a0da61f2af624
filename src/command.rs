use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("{0} requires an argument")]
    MissingArgument(&'static str),
    #[error("invalid index for {command}: {value:?}")]
    InvalidIndex { command: &'static str, value: String },
    #[error("{command} takes no argument, got {value:?}")]
    UnexpectedArgument { command: &'static str, value: String },
}

/// One line of a session script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Type(String),    // append text
    Edit(String),    // replace the whole text
    Undo,
    Redo,
    Mark,            // toggle snapshot marker on the newest entry
    JumpUndo(usize),
    JumpRedo(usize),
    Clear,
    Show,
    Replay,          // rewind, then redo step by step printing the text
}

impl Command {
    /// Parse a script line. Blank lines and `#` comments yield `None`.
    ///
    /// The keyword ends at the first whitespace char. Text arguments are
    /// taken verbatim after that one separator, so `type  World` types
    /// " World". Commands without arguments reject anything after them.
    pub fn parse(input: &str) -> Result<Option<Self>, ParseError> {
        let line = input.trim_end_matches(|c| c == '\r' || c == '\n');
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let line = line.trim_start();
        let (keyword, arg) = match line.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((idx, sep)) => (&line[..idx], Some(&line[idx + sep.len_utf8()..])),
            None => (line, None),
        };

        let cmd = match keyword {
            "type" => Command::Type(Self::text_arg("type", arg)?),
            "edit" => Command::Edit(arg.unwrap_or_default().to_string()),
            "undo" | "u" => Self::bare("undo", arg, Command::Undo)?,
            "redo" | "r" => Self::bare("redo", arg, Command::Redo)?,
            "mark" => Self::bare("mark", arg, Command::Mark)?,
            "jump-undo" => Command::JumpUndo(Self::index_arg("jump-undo", arg)?),
            "jump-redo" => Command::JumpRedo(Self::index_arg("jump-redo", arg)?),
            "clear" => Self::bare("clear", arg, Command::Clear)?,
            "show" => Self::bare("show", arg, Command::Show)?,
            "replay" => Self::bare("replay", arg, Command::Replay)?,
            _ => return Err(ParseError::Unknown(trimmed.to_string())),
        };
        Ok(Some(cmd))
    }

    /// Accept `cmd` only if nothing but whitespace follows the keyword
    fn bare(command: &'static str, arg: Option<&str>, cmd: Command) -> Result<Command, ParseError> {
        match arg.map(str::trim) {
            Some(value) if !value.is_empty() => Err(ParseError::UnexpectedArgument {
                command,
                value: value.to_string(),
            }),
            _ => Ok(cmd),
        }
    }

    fn text_arg(command: &'static str, arg: Option<&str>) -> Result<String, ParseError> {
        match arg {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(ParseError::MissingArgument(command)),
        }
    }

    fn index_arg(command: &'static str, arg: Option<&str>) -> Result<usize, ParseError> {
        let value = arg.map(str::trim).ok_or(ParseError::MissingArgument(command))?;
        value.parse().map_err(|_| ParseError::InvalidIndex {
            command,
            value: value.to_string(),
        })
    }
}
