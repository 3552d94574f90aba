//! Post Directory Bot library.
//!
//! A Telegram bot that watches one chat for hashtag-tagged posts (`#event
//! 2030-05-01`, `#contacts`, ...), keeps a SQLite index of them in sync with
//! edits, and forwards the relevant posts to chat members on request.

pub mod bot;
pub mod config;
pub mod constants;
pub mod db;
pub mod directory;
pub mod telegram;
pub mod web;
