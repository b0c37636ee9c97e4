//! CLI commands for skillgrade

pub mod dispatch;
pub mod evaluate;
pub mod list;
pub mod show;
