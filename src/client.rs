use super::*;

#[derive(Clone)]
pub(crate) struct Client {
  base_url: Url,
  client: reqwest::Client,
}

impl Client {
  async fn get(&self, segments: &[&str]) -> Result<Response, Error> {
    let url = self.url(segments)?;

    debug!(%url, "GET");

    let response = self.client.get(url.clone()).send().await?;

    let status = response.status().as_u16();

    let body = response.bytes().await?.to_vec();

    debug!(%url, status, bytes = body.len(), "response");

    Ok(Response {
      body,
      status,
      url: url.into(),
    })
  }

  pub(crate) fn new(config: &Config) -> Result<Self, Error> {
    Ok(Self {
      base_url: config.base_url.clone(),
      client: reqwest::Client::builder().timeout(config.timeout).build()?,
    })
  }

  /// Appends `segments` to the base path. Each segment is percent-encoded
  /// on its own, so a `/`, `?` or `..` inside an id stays part of it.
  fn url(&self, segments: &[&str]) -> Result<Url, Error> {
    let mut url = self.base_url.clone();

    url
      .path_segments_mut()
      .map_err(|()| Error::InvalidUrl {
        input: self.base_url.to_string(),
        source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
      })?
      .pop_if_empty()
      .extend(segments);

    Ok(url)
  }
}

impl Gateway for Client {
  async fn fetch_index(&self, category: Category) -> Result<Response, Error> {
    self
      .get(&[format!("{}.json", category.endpoint()).as_str()])
      .await
  }

  async fn fetch_item(&self, id: u64) -> Result<Response, Error> {
    self.get(&["item", format!("{id}.json").as_str()]).await
  }

  async fn fetch_user(&self, id: &str) -> Result<Response, Error> {
    self.get(&["user", format!("{id}.json").as_str()]).await
  }
}
