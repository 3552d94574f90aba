//! Update routing and command handlers.

mod commands;

pub use commands::{menu, Command};

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::config::Config;
use crate::constants::{
    missing_forward_text, missing_posts_text, NOT_CHAT_MEMBER_TEXT, NO_FUTURE_EVENTS_TEXT,
    START_TEXT,
};
use crate::db::{Post, PostType};
use crate::directory::{
    find_by_type, forward_post, on_message_created, on_message_edited, select_future_events,
    ForwardOutcome, PostDirectory, SyncAction,
};
use crate::telegram::{Message, Transport, Update};

/// The bot: configuration plus the directory and transport it works with.
#[derive(Clone)]
pub struct Bot {
    config: Arc<Config>,
    directory: Arc<dyn PostDirectory>,
    transport: Arc<dyn Transport>,
    /// Own username, for `/command@username` in private chats.
    username: Option<String>,
}

impl Bot {
    #[must_use]
    pub fn new(
        config: Arc<Config>,
        directory: Arc<dyn PostDirectory>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            config,
            directory,
            transport,
            username: None,
        }
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle one webhook update to completion.
    ///
    /// # Errors
    ///
    /// Returns an error if a store or transport call fails.
    pub async fn handle_update(&self, update: Update) -> Result<()> {
        if let Some(message) = update.message {
            self.handle_message(&message).await
        } else if let Some(message) = update.edited_message {
            self.handle_edited_message(&message).await
        } else if let Some(message) = update.channel_post {
            self.handle_message(&message).await
        } else if let Some(message) = update.edited_channel_post {
            self.handle_edited_message(&message).await
        } else {
            debug!(update_id = update.update_id, "Ignoring unsupported update");
            Ok(())
        }
    }

    async fn handle_message(&self, message: &Message) -> Result<()> {
        if message.is_private() {
            return self.handle_private_message(message).await;
        }

        if message.chat.id != self.config.chat_id {
            debug!(chat_id = message.chat.id, "Ignoring message from foreign chat");
            return Ok(());
        }

        let action = on_message_created(
            self.directory.as_ref(),
            message.message_id,
            message.content(),
        )
        .await
        .context("Failed to index new chat message")?;
        log_sync(message.message_id, &action);
        Ok(())
    }

    async fn handle_edited_message(&self, message: &Message) -> Result<()> {
        if message.chat.id != self.config.chat_id {
            return Ok(());
        }

        let action = on_message_edited(
            self.directory.as_ref(),
            message.message_id,
            message.content(),
        )
        .await
        .context("Failed to sync edited chat message")?;
        log_sync(message.message_id, &action);
        Ok(())
    }

    async fn handle_private_message(&self, message: &Message) -> Result<()> {
        let Some(user) = &message.from else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        // Ids only; usernames stay out of the logs
        info!(from_id = user.id, text = ?message.text, "Private message");

        let is_member = self
            .transport
            .is_chat_member(self.config.chat_id, user.id)
            .await
            .context("Failed to check chat membership")?;
        if !is_member {
            info!(from_id = user.id, "Refusing non-member");
            return self.reply(chat_id, NOT_CHAT_MEMBER_TEXT).await;
        }

        // Commands only come as text; a captioned photo gets the intro
        let text = message.text.as_deref().unwrap_or("");
        match Command::parse(text, self.username.as_deref()) {
            Command::Start => self.handle_start(chat_id).await,
            Command::FutureEvents => self.handle_future_events(chat_id, today()).await,
            Command::Navigation(post_type) => self.handle_navigation(chat_id, post_type).await,
            Command::Other => self.reply(chat_id, START_TEXT).await,
        }
    }

    async fn handle_start(&self, chat_id: i64) -> Result<()> {
        self.reply(chat_id, START_TEXT).await?;
        self.transport
            .set_my_commands(&menu())
            .await
            .context("Failed to register command menu")
    }

    /// Forward the next upcoming events, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store scan or a transport call fails.
    pub async fn handle_future_events(&self, chat_id: i64, today: NaiveDate) -> Result<()> {
        let posts = self.directory.read_all().await?;
        if find_by_type(&posts, PostType::Event).is_none() {
            return self
                .reply(chat_id, &missing_posts_text(PostType::Event))
                .await;
        }

        let upcoming = select_future_events(&posts, today, self.config.future_events_cap);
        if upcoming.is_empty() {
            return self.reply(chat_id, NO_FUTURE_EVENTS_TEXT).await;
        }

        for post in &upcoming {
            self.deliver(chat_id, post).await?;
        }
        Ok(())
    }

    /// Forward the post filed under a navigation category.
    ///
    /// # Errors
    ///
    /// Returns an error if the store scan or a transport call fails.
    pub async fn handle_navigation(&self, chat_id: i64, post_type: PostType) -> Result<()> {
        let posts = self.directory.read_all().await?;
        match find_by_type(&posts, post_type) {
            Some(post) => self.deliver(chat_id, post).await,
            None => self.reply(chat_id, &missing_posts_text(post_type)).await,
        }
    }

    async fn deliver(&self, chat_id: i64, post: &Post) -> Result<()> {
        let outcome = forward_post(
            self.directory.as_ref(),
            self.transport.as_ref(),
            self.config.chat_id,
            chat_id,
            post,
        )
        .await?;

        match outcome {
            ForwardOutcome::Forwarded => Ok(()),
            ForwardOutcome::Missing { url } => {
                self.reply(chat_id, &missing_forward_text(&url)).await
            }
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) -> Result<()> {
        self.transport
            .send_message(chat_id, text)
            .await
            .context("Failed to send message")
    }
}

fn log_sync(message_id: i64, action: &SyncAction) {
    match action {
        SyncAction::Indexed(post) => {
            info!(message_id, post_type = %post.post_type, event_date = ?post.event_date, "Post indexed");
        }
        SyncAction::Removed(_) => info!(message_id, "Post removed"),
        SyncAction::Ignored => {}
    }
}

/// Local calendar date; event dates carry no time of day.
fn today() -> NaiveDate {
    Local::now().date_naive()
}
