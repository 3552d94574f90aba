use chrono::NaiveDate;
use thiserror::Error;

/// Category a tagged chat message is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostType {
    Event,
    Chats,
    Contacts,
    EventsArchive,
    LecturesArchive,
    WhoisHowto,
}

impl PostType {
    /// Every category that acts as a plain lookup key (everything but `Event`).
    pub const NAVIGATION: [Self; 5] = [
        Self::Chats,
        Self::Contacts,
        Self::EventsArchive,
        Self::LecturesArchive,
        Self::WhoisHowto,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Chats => "chats",
            Self::Contacts => "contacts",
            Self::EventsArchive => "events_archive",
            Self::LecturesArchive => "lectures_archive",
            Self::WhoisHowto => "whois_howto",
        }
    }

    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "event" => Some(Self::Event),
            "chats" => Some(Self::Chats),
            "contacts" => Some(Self::Contacts),
            "events_archive" => Some(Self::EventsArchive),
            "lectures_archive" => Some(Self::LecturesArchive),
            "whois_howto" => Some(Self::WhoisHowto),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_navigation(&self) -> bool {
        !matches!(self, Self::Event)
    }
}

impl std::fmt::Display for PostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification parsed from a message's hashtag footer. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostFooter {
    pub post_type: PostType,
    pub event_date: Option<NaiveDate>,
}

impl PostFooter {
    #[must_use]
    pub const fn event(date: NaiveDate) -> Self {
        Self {
            post_type: PostType::Event,
            event_date: Some(date),
        }
    }

    #[must_use]
    pub const fn navigation(post_type: PostType) -> Self {
        Self {
            post_type,
            event_date: None,
        }
    }
}

/// A chat message indexed in the directory, keyed by its message id.
///
/// `event_date` is set exactly when `post_type` is [`PostType::Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub message_id: i64,
    pub post_type: PostType,
    pub event_date: Option<NaiveDate>,
}

impl Post {
    #[must_use]
    pub const fn event(message_id: i64, date: NaiveDate) -> Self {
        Self {
            message_id,
            post_type: PostType::Event,
            event_date: Some(date),
        }
    }

    /// Build a navigation post. An `Event` type here has no date, so callers
    /// must go through [`Post::event`] for those.
    #[must_use]
    pub const fn navigation(message_id: i64, post_type: PostType) -> Self {
        Self {
            message_id,
            post_type,
            event_date: None,
        }
    }

    #[must_use]
    pub const fn from_footer(message_id: i64, footer: PostFooter) -> Self {
        Self {
            message_id,
            post_type: footer.post_type,
            event_date: footer.event_date,
        }
    }
}

/// Raw row of the `posts` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRecord {
    pub message_id: i64,
    #[sqlx(rename = "type")]
    pub post_type: String,
    pub event_date: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("post {message_id}: unknown type '{value}'")]
    UnknownType { message_id: i64, value: String },
    #[error("post {message_id}: invalid event date '{value}'")]
    InvalidDate { message_id: i64, value: String },
    #[error("post {message_id}: event post without a date")]
    MissingDate { message_id: i64 },
    #[error("post {message_id}: {post_type} post carries a date")]
    UnexpectedDate { message_id: i64, post_type: PostType },
}

impl From<&Post> for PostRecord {
    fn from(post: &Post) -> Self {
        Self {
            message_id: post.message_id,
            post_type: post.post_type.as_str().to_string(),
            event_date: post.event_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = RecordError;

    fn try_from(record: PostRecord) -> Result<Self, Self::Error> {
        let message_id = record.message_id;
        let post_type =
            PostType::from_str(&record.post_type).ok_or_else(|| RecordError::UnknownType {
                message_id,
                value: record.post_type.clone(),
            })?;

        let event_date = record
            .event_date
            .map(|value| {
                NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                    .map_err(|_| RecordError::InvalidDate { message_id, value })
            })
            .transpose()?;

        match (post_type, event_date) {
            (PostType::Event, Some(date)) => Ok(Self::event(message_id, date)),
            (PostType::Event, None) => Err(RecordError::MissingDate { message_id }),
            (post_type, None) => Ok(Self::navigation(message_id, post_type)),
            (post_type, Some(_)) => Err(RecordError::UnexpectedDate {
                message_id,
                post_type,
            }),
        }
    }
}
