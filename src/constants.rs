//! Shared constants used across the application: command names and the
//! texts the bot sends to users.

use crate::db::PostType;

pub const START_COMMAND: &str = "start";
pub const FUTURE_EVENTS_COMMAND: &str = "future_events";

/// Intro sent on `/start` and in reply to anything that is not a command.
pub const START_TEXT: &str = "Привет!
Это бот-дворецкий ШАД. Я умею напоминать какие мероприятия \
будут в скором времени, рассказывать про контакты кураторов, \
показывать локальные чаты. В скором буду уметь еще много чего \
интересного, но не все сразу :)

Команды
/future_events — ближайшие эвенты
/events_archive — архив эвентов
/lectures_archive — архив лекций
/chats — тематические чаты
/contacts — контакты кураторов
/whois_howto — мануал по #whois

Команды доступны снизу по кнопке \"Меню\"";

pub const NO_FUTURE_EVENTS_TEXT: &str =
    "В ближайшее время нет эвентов. Список прошедших — /events_archive";

pub const NOT_CHAT_MEMBER_TEXT: &str = "Не нашел тебя в чате выпускников ШАДа. \
Напиши, пожалуйста, кураторам. \
Бот отвечает только тем кто в чатике.";

/// Reply when the directory has nothing filed under `post_type`.
#[must_use]
pub fn missing_posts_text(post_type: PostType) -> String {
    format!("Не нашел постов с тегом #{post_type}.")
}

/// Reply when a post's chat message turned out to be deleted.
#[must_use]
pub fn missing_forward_text(url: &str) -> String {
    format!("Хотел переслать пост {url}, но он исчез. Удалил из своей базы.")
}
