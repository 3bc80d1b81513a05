use super::*;

#[derive(Debug, Parser)]
#[command(
  name = "hn-feed",
  version,
  about = "Page through Hacker News stories and comment threads"
)]
pub(crate) struct Arguments {
  #[arg(
    long,
    env = "HN_API_BASE_URL",
    default_value = Config::DEFAULT_BASE_URL,
    help = "Base URL of the Hacker News API"
  )]
  base_url: String,
  #[command(subcommand)]
  command: Option<Command>,
  #[arg(
    long,
    env = "HN_TIMEOUT_SECS",
    default_value_t = Config::DEFAULT_TIMEOUT_SECS,
    help = "Per-request timeout in seconds"
  )]
  timeout: u64,
}

#[derive(Debug, PartialEq, Subcommand)]
pub(crate) enum Command {
  /// Show an item and page through its comments
  Item { id: u64 },
  /// Page through a story category
  Stories {
    #[arg(value_enum, default_value_t)]
    category: Category,
  },
  /// Show a user profile
  User { id: String },
}

impl Arguments {
  fn config(&self) -> Result<Config, Error> {
    Config::new(&self.base_url, Duration::from_secs(self.timeout))
  }

  pub(crate) async fn run(self) -> Result {
    let config = self.config().context("invalid configuration")?;

    debug!(base_url = %config.base_url, timeout = ?config.timeout, "starting");

    let client = Client::new(&config).context("could not build HTTP client")?;

    let browser = Browser::new(client);

    match self.command.unwrap_or(Command::Stories {
      category: Category::Top,
    }) {
      Command::Item { id } => browser.item(id).await,
      Command::Stories { category } => browser.stories(category).await,
      Command::User { id } => browser.user(&id).await,
    }
  }
}
