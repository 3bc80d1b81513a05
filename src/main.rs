use {
  anyhow::Context,
  arguments::Arguments,
  browser::Browser,
  category::Category,
  chrono::{DateTime, Utc},
  clap::{Parser, Subcommand, ValueEnum},
  client::Client,
  comment_entry::CommentEntry,
  comment_feed::CommentFeed,
  config::Config,
  crossterm::style::Stylize,
  details::{item_details, user_details},
  error::Error,
  feed::{Feed, FeedSnapshot, LoadOutcome},
  filter::filter,
  futures::future::try_join_all,
  gateway::{Gateway, Response},
  item::Item,
  item_kind::ItemKind,
  list_entry::ListEntry,
  page_loader::load_page,
  pagination::{PAGE_SIZE, Page, next_cursor},
  serde::{
    Deserialize, Deserializer,
    de::{self, DeserializeOwned, Unexpected},
  },
  serde_json::Value,
  std::{
    backtrace::BacktraceStatus,
    collections::HashSet,
    io::{self, IsTerminal, Write},
    process,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
  },
  story_feed::StoryFeed,
  tracing::{debug, info, warn},
  tracing_subscriber::EnvFilter,
  url::Url,
  user::User,
  utils::{
    deserialize_id, domain, format_comments, format_points, permalink,
    relative_time, sanitize_comment, truncate, wrap_text,
  },
};

mod arguments;
mod browser;
mod category;
mod client;
mod comment_entry;
mod comment_feed;
mod config;
mod details;
mod error;
mod feed;
mod filter;
mod gateway;
mod item;
mod item_kind;
mod list_entry;
mod page_loader;
mod pagination;
mod story_feed;
#[cfg(test)]
mod testing;
mod user;
mod utils;

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_tracing() {
  let filter = EnvFilter::try_from_default_env()
    .unwrap_or_else(|_| EnvFilter::new("hn_feed=warn"));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

#[tokio::main]
async fn main() {
  initialize_tracing();

  if let Err(error) = Arguments::parse().run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
