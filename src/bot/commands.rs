use crate::constants::{FUTURE_EVENTS_COMMAND, START_COMMAND};
use crate::db::PostType;
use crate::telegram::BotCommand;

/// A private message, classified by the command it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    FutureEvents,
    /// One of the navigation categories, e.g. `/contacts`.
    Navigation(PostType),
    /// Not a known command; answered with the intro.
    Other,
}

impl Command {
    /// Parse the leading `/command` of a message.
    ///
    /// Names match case-insensitively. A `/command@botname` addressed to any
    /// bot other than `bot_username` is not a command for us.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Self {
        let Some(token) = text.split_whitespace().next() else {
            return Self::Other;
        };
        let Some(name) = token.strip_prefix('/') else {
            return Self::Other;
        };
        let name = match name.split_once('@') {
            Some((name, mention)) => {
                if !bot_username.is_some_and(|own| own.eq_ignore_ascii_case(mention)) {
                    return Self::Other;
                }
                name
            }
            None => name,
        };
        let name = name.to_lowercase();

        match name.as_str() {
            START_COMMAND => Self::Start,
            FUTURE_EVENTS_COMMAND => Self::FutureEvents,
            _ => PostType::from_str(&name)
                .filter(PostType::is_navigation)
                .map_or(Self::Other, Self::Navigation),
        }
    }
}

/// Command menu registered on `/start`.
#[must_use]
pub fn menu() -> Vec<BotCommand> {
    vec![
        BotCommand::new(FUTURE_EVENTS_COMMAND, "ближайшие эвенты"),
        BotCommand::new(PostType::EventsArchive.as_str(), "архив эвентов"),
        BotCommand::new(PostType::LecturesArchive.as_str(), "архив лекций"),
        BotCommand::new(PostType::Chats.as_str(), "тематические чаты"),
        BotCommand::new(PostType::Contacts.as_str(), "контакты кураторов"),
        BotCommand::new(PostType::WhoisHowto.as_str(), "мануал по #whois"),
        BotCommand::new(START_COMMAND, "интро"),
    ]
}
