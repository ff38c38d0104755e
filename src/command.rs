#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(String),
    Home,
    Tweets,
    Profile,
    Health,
    Help,
    Quit,
}

pub fn parse_command(input: &str) -> Option<Command> {
    let input = input.strip_prefix(':').unwrap_or(input).trim();

    if input.is_empty() {
        return None;
    }

    let (cmd, args) = match input.split_once(char::is_whitespace) {
        Some((cmd, args)) => (cmd, args.trim()),
        None => (input, ""),
    };

    match cmd {
        "open" if !args.is_empty() => Some(Command::Open(args.to_owned())),
        "home" => Some(Command::Home),
        "tweets" | "all" | "t" => Some(Command::Tweets),
        "profile" | "p" => Some(Command::Profile),
        "health" => Some(Command::Health),
        "help" | "h" => Some(Command::Help),
        "quit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

/// Extract a tweet ID from user input: either a raw numeric ID or a
/// `post/{id}` route fragment.
pub fn parse_tweet_ref(input: &str) -> Option<String> {
    let trimmed = input.trim();

    if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Some(trimmed.to_owned());
    }

    let id = trimmed
        .strip_prefix('/')
        .unwrap_or(trimmed)
        .strip_prefix("post/")?;
    if !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) {
        Some(id.to_owned())
    } else {
        None
    }
}
