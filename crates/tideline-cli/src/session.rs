//! Command parsing and the pager session driven by the CLI.

use std::str::FromStr;

use serde_json::Value;
use tracing::warn;

use tideline_pager::{ConfigError, PagerConfig, TimelineError, TimelinePager, json_field};

use crate::feed::{FeedError, MemoryFeed};

const HELP: &str = "\
commands:
  next         show the prefetched page
  prev         step back toward the live edge (refreshes when live)
  reset        reload from the live edge
  add <json>   deliver a new record at the head of the feed
  state        print pager state as JSON
  show         print the window
  help         this text
  quit         exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Next,
    Prev,
    Reset,
    Add(Value),
    State,
    Show,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("add needs a JSON record: {0}")]
    BadRecord(#[from] serde_json::Error),
    #[error("empty command")]
    Empty,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match word {
            "" => Err(CommandError::Empty),
            "next" | "n" => Ok(Command::Next),
            "prev" | "p" => Ok(Command::Prev),
            "reset" | "r" => Ok(Command::Reset),
            "add" | "a" => Ok(Command::Add(serde_json::from_str(rest.trim())?)),
            "state" => Ok(Command::State),
            "show" | "s" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Outcome of running one command.
#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Session {
    feed: MemoryFeed,
    pager: TimelinePager<Value, Value, FeedError>,
}

impl Session {
    pub fn new(feed: MemoryFeed, config: PagerConfig) -> Result<Self, ConfigError> {
        let pager = TimelinePager::builder()
            .source(std::sync::Arc::new(feed.clone()))
            .key(json_field(feed.key_field()))
            .config(config)
            .build()?;
        Ok(Self { feed, pager })
    }

    pub fn pager(&self) -> &TimelinePager<Value, Value, FeedError> {
        &self.pager
    }

    /// Run one command. Navigation failures are reported, not fatal.
    pub async fn execute(&mut self, command: Command) -> Result<Reply, TimelineError<FeedError>> {
        match command {
            Command::Next => {
                if !self.pager.can_fetch_next() {
                    return Ok(Reply::Text("end of timeline".to_string()));
                }
                self.pager.fetch_next().await?;
            }
            Command::Prev => {
                self.pager.fetch_previous().await?;
            }
            Command::Reset => {
                self.pager.reset().await?;
            }
            Command::Add(record) => {
                if !self.feed.push_latest(record.clone()).await {
                    return Ok(Reply::Text("already at the head of the feed".to_string()));
                }
                if let Err(e) = self.pager.add_latest_item(record) {
                    warn!("Live record not shown: {}", e);
                    return Ok(Reply::Text(format!("added to feed, window unchanged: {e}")));
                }
            }
            Command::State => {
                let snapshot = self.pager.snapshot();
                let text = serde_json::to_string_pretty(&snapshot)
                    .unwrap_or_else(|e| format!("unserializable state: {e}"));
                return Ok(Reply::Text(text));
            }
            Command::Show => {}
            Command::Help => return Ok(Reply::Text(HELP.to_string())),
            Command::Quit => return Ok(Reply::Quit),
        }
        Ok(Reply::Text(self.render()))
    }

    /// One line per window slot, items shown by key.
    pub fn render(&self) -> String {
        let keys = |items: &[Value]| {
            items
                .iter()
                .map(|item| self.pager.key_of(item).to_string())
                .collect::<Vec<_>>()
                .join(" ")
        };
        let position = if self.pager.is_live() {
            "live".to_string()
        } else {
            format!("depth {}", self.pager.index())
        };
        format!(
            "[{position}] data: {}\n next: {}",
            keys(self.pager.data()),
            keys(self.pager.next())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session(items: u64, page_size: usize) -> Session {
        Session::new(
            MemoryFeed::synthetic(items, "id"),
            PagerConfig::with_page_size(page_size),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("next".parse::<Command>().unwrap(), Command::Next);
        assert_eq!(" p ".parse::<Command>().unwrap(), Command::Prev);
        assert_eq!(
            r#"add {"id": 7}"#.parse::<Command>().unwrap(),
            Command::Add(json!({"id": 7}))
        );
        assert!(matches!("add".parse::<Command>(), Err(CommandError::BadRecord(_))));
        assert!(matches!("jump".parse::<Command>(), Err(CommandError::Unknown(_))));
        assert!(matches!("   ".parse::<Command>(), Err(CommandError::Empty)));
    }

    #[tokio::test]
    async fn test_session_navigation() {
        let mut session = session(5, 2);
        session.execute(Command::Reset).await.unwrap();
        assert_eq!(session.render(), "[live] data: 5 4\n next: 3 2");

        session.execute(Command::Next).await.unwrap();
        session.execute(Command::Next).await.unwrap();
        assert_eq!(session.render(), "[depth 2] data: 1\n next: ");

        let reply = session.execute(Command::Next).await.unwrap();
        assert_eq!(reply, Reply::Text("end of timeline".to_string()));

        session.execute(Command::Prev).await.unwrap();
        assert_eq!(session.pager().index(), 1);
    }

    #[tokio::test]
    async fn test_session_live_add() {
        let mut session = session(4, 2);
        session.execute(Command::Reset).await.unwrap();

        session.execute(Command::Add(json!({"id": 5}))).await.unwrap();
        assert_eq!(session.render(), "[live] data: 5 4\n next: 3 2");

        session.execute(Command::Next).await.unwrap();
        let reply = session.execute(Command::Add(json!({"id": 6}))).await.unwrap();
        assert!(matches!(reply, Reply::Text(ref t) if t.starts_with("added to feed")));

        // A refresh picks the arrival up from the feed
        session.execute(Command::Reset).await.unwrap();
        assert_eq!(session.render(), "[live] data: 6 5\n next: 4 3");
    }

    #[tokio::test]
    async fn test_repeated_add_is_stored_once() {
        let mut session = session(4, 2);
        session.execute(Command::Reset).await.unwrap();

        session.execute(Command::Add(json!({"id": 5}))).await.unwrap();
        let reply = session.execute(Command::Add(json!({"id": 5}))).await.unwrap();
        assert_eq!(reply, Reply::Text("already at the head of the feed".to_string()));
        assert_eq!(session.feed.len().await, 5);

        session.execute(Command::Reset).await.unwrap();
        assert_eq!(session.render(), "[live] data: 5 4\n next: 3 2");
    }

    #[tokio::test]
    async fn test_state_and_quit() {
        let mut session = session(3, 2);
        session.execute(Command::Reset).await.unwrap();

        let Reply::Text(state) = session.execute(Command::State).await.unwrap() else {
            panic!("state should print");
        };
        let value: Value = serde_json::from_str(&state).unwrap();
        assert_eq!(value["keys"], json!([2, 1]));

        assert_eq!(session.execute(Command::Quit).await.unwrap(), Reply::Quit);
    }
}
