#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
  #[error("invalid API url `{input}`")]
  InvalidUrl {
    input: String,
    source: url::ParseError,
  },
  #[error("malformed JSON from {url}")]
  Json {
    source: serde_json::Error,
    url: String,
  },
  #[error("request to {url} failed with status {status}")]
  Status { status: u16, url: String },
  #[error("request failed")]
  Transport(#[from] reqwest::Error),
}
