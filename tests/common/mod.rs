//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use post_directory_bot::bot::Bot;
use post_directory_bot::config::Config;
use post_directory_bot::db::Database;
use post_directory_bot::telegram::{BotCommand, TelegramError, Transport};
use tempfile::TempDir;

pub const CHAT_ID: i64 = -1_001_627_609_834;
pub const MEMBER_ID: i64 = 1001;
pub const STRANGER_ID: i64 = 2002;

pub async fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.sqlite");
    let db = Database::new(&db_path)
        .await
        .expect("Failed to create database");
    (db, temp_dir)
}

pub fn test_config() -> Config {
    Config {
        bot_token: "123:test".to_string(),
        chat_id: CHAT_ID,
        telegram_api_url: "http://127.0.0.1:1".to_string(),
        database_path: PathBuf::from("unused.sqlite"),
        web_host: "127.0.0.1".to_string(),
        web_port: 0,
        webhook_path: "/".to_string(),
        webhook_url: None,
        webhook_secret: None,
        future_events_cap: 3,
    }
}

/// In-memory stand-in for Telegram that records every call.
#[derive(Default)]
pub struct FakeTransport {
    pub forwarded: Mutex<Vec<(i64, i64, i64)>>,
    pub sent: Mutex<Vec<(i64, String)>>,
    pub menus: Mutex<Vec<Vec<BotCommand>>>,
    /// Source message ids that have been deleted from the chat.
    pub deleted_messages: Mutex<HashSet<i64>>,
    pub members: Mutex<HashSet<i64>>,
    /// When set, every forward fails with a generic API error.
    pub unavailable: Mutex<bool>,
}

impl FakeTransport {
    pub fn with_member(user_id: i64) -> Self {
        let transport = Self::default();
        transport.members.lock().unwrap().insert(user_id);
        transport
    }

    pub fn delete_message(&self, message_id: i64) {
        self.deleted_messages.lock().unwrap().insert(message_id);
    }

    pub fn forwarded_ids(&self) -> Vec<i64> {
        self.forwarded
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, id)| *id)
            .collect()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, text)| text.clone())
            .collect()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn forward_message(
        &self,
        chat_id: i64,
        from_chat_id: i64,
        message_id: i64,
    ) -> Result<(), TelegramError> {
        if *self.unavailable.lock().unwrap() {
            return Err(TelegramError::Api {
                code: 502,
                description: "Bad Gateway".to_string(),
            });
        }
        if self.deleted_messages.lock().unwrap().contains(&message_id) {
            return Err(TelegramError::MessageNotFound);
        }
        self.forwarded
            .lock()
            .unwrap()
            .push((chat_id, from_chat_id, message_id));
        Ok(())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }

    async fn is_chat_member(&self, _chat_id: i64, user_id: i64) -> Result<bool, TelegramError> {
        Ok(self.members.lock().unwrap().contains(&user_id))
    }

    async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        self.menus.lock().unwrap().push(commands.to_vec());
        Ok(())
    }
}

pub fn build_bot(config: Config, db: &Database, transport: &Arc<FakeTransport>) -> Bot {
    Bot::new(Arc::new(config), Arc::new(db.clone()), transport.clone())
}
