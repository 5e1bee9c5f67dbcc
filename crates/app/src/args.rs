use std::fmt;

use trivia_core::model::{CategoryId, QuestionId};

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { name: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { name } => write!(f, "missing <{name}>"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- play       [--category <id>]");
    eprintln!("  cargo run -p app -- list       [--page <n>] [--per-page <n>]");
    eprintln!("  cargo run -p app -- search     <term>");
    eprintln!("  cargo run -p app -- category   <id>");
    eprintln!("  cargo run -p app -- categories");
    eprintln!(
        "  cargo run -p app -- add        --question <text> --answer <text> --category <id> [--difficulty <1-5>]"
    );
    eprintln!("  cargo run -p app -- delete     <id> [--page <n>]");
    eprintln!();
    eprintln!("Global flags:");
    eprintln!("  --api-url <url>   trivia API base address");
    eprintln!("  --demo            use a built-in offline question bank");
    eprintln!("  -v, --verbose     debug logging");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRIVIA_API_URL, TRIVIA_API_TIMEOUT_SECS, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play,
    List,
    Search,
    Category,
    Categories,
    Add,
    Delete,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "list" => Some(Self::List),
            "search" => Some(Self::Search),
            "category" => Some(Self::Category),
            "categories" => Some(Self::Categories),
            "add" => Some(Self::Add),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub api_url: Option<String>,
    pub demo: bool,
    pub verbose: bool,
    pub category: Option<CategoryId>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<u8>,
    pub positional: Vec<String>,
}

/// Outcome of parsing: either something to run or a request for help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    Run(Args),
    Help,
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

impl Args {
    fn empty(command: Command) -> Self {
        Self {
            command,
            api_url: None,
            demo: false,
            verbose: false,
            category: None,
            page: None,
            per_page: None,
            question: None,
            answer: None,
            difficulty: None,
            positional: Vec::new(),
        }
    }

    /// Parse everything after the program name. No subcommand means `play`.
    pub fn parse(argv: impl IntoIterator<Item = String>) -> Result<Parsed, ArgsError> {
        let mut iter = argv.into_iter().peekable();
        let first = iter.peek().cloned();

        let command = match first.as_deref() {
            None => Command::Play,
            Some("--help" | "-h" | "help") => return Ok(Parsed::Help),
            Some(first) if first.starts_with('-') => Command::Play,
            Some(first) => {
                let command = Command::from_arg(first)
                    .ok_or_else(|| ArgsError::UnknownCommand(first.to_string()))?;
                iter.next();
                command
            }
        };

        let mut args = Self::empty(command);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--api-url" => args.api_url = Some(require_value(&mut iter, "--api-url")?),
                "--demo" => args.demo = true,
                "--verbose" | "-v" => args.verbose = true,
                "--category" => {
                    args.category = Some(CategoryId::new(parse_number(&mut iter, "--category")?));
                }
                "--page" => args.page = Some(parse_number(&mut iter, "--page")?),
                "--per-page" => args.per_page = Some(parse_number(&mut iter, "--per-page")?),
                "--question" => args.question = Some(require_value(&mut iter, "--question")?),
                "--answer" => args.answer = Some(require_value(&mut iter, "--answer")?),
                "--difficulty" => args.difficulty = Some(parse_number(&mut iter, "--difficulty")?),
                "--help" | "-h" => return Ok(Parsed::Help),
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => args.positional.push(arg),
            }
        }

        Ok(Parsed::Run(args))
    }

    /// Free-text argument, e.g. a search term split across words.
    pub fn text(&self) -> String {
        self.positional.join(" ")
    }

    /// The first positional argument parsed as a question id.
    pub fn question_id(&self) -> Result<QuestionId, ArgsError> {
        let raw = self
            .positional
            .first()
            .ok_or(ArgsError::MissingArgument { name: "id" })?;
        raw.parse().map_err(|_| ArgsError::InvalidNumber {
            flag: "<id>",
            raw: raw.clone(),
        })
    }

    /// `--category` or else the first positional argument.
    pub fn category_id(&self) -> Result<CategoryId, ArgsError> {
        if let Some(id) = self.category {
            return Ok(id);
        }
        let raw = self
            .positional
            .first()
            .ok_or(ArgsError::MissingArgument { name: "category" })?;
        raw.parse().map_err(|_| ArgsError::InvalidNumber {
            flag: "<category>",
            raw: raw.clone(),
        })
    }
}
