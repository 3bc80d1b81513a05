use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
  pub(crate) base_url: Url,
  pub(crate) timeout: Duration,
}

impl Config {
  pub(crate) const DEFAULT_BASE_URL: &str =
    "https://hacker-news.firebaseio.com/v0/";

  pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

  /// Joining relative paths onto a base without a trailing slash would drop
  /// the last path segment, so one is always appended.
  pub(crate) fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
    let normalized = if base_url.ends_with('/') {
      base_url.to_string()
    } else {
      format!("{base_url}/")
    };

    let base_url =
      Url::parse(&normalized).map_err(|source| Error::InvalidUrl {
        input: base_url.to_string(),
        source,
      })?;

    Ok(Self { base_url, timeout })
  }
}
