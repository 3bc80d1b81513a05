use super::*;

/// Read-only access to the item, index and user endpoints.
///
/// Implementations return the raw response without looking at the status
/// or the body. Only transport failures are errors.
pub(crate) trait Gateway {
  fn fetch_index(
    &self,
    category: Category,
  ) -> impl Future<Output = Result<Response, Error>> + Send;

  fn fetch_item(
    &self,
    id: u64,
  ) -> impl Future<Output = Result<Response, Error>> + Send;

  fn fetch_user(
    &self,
    id: &str,
  ) -> impl Future<Output = Result<Response, Error>> + Send;
}

#[derive(Clone, Debug)]
pub(crate) struct Response {
  pub(crate) body: Vec<u8>,
  pub(crate) status: u16,
  pub(crate) url: String,
}

impl Response {
  pub(crate) fn error_for_status(self) -> Result<Self, Error> {
    if self.is_success() {
      Ok(self)
    } else {
      Err(Error::Status {
        status: self.status,
        url: self.url,
      })
    }
  }

  pub(crate) fn is_success(&self) -> bool {
    (200..300).contains(&self.status)
  }

  pub(crate) fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
    serde_json::from_slice(&self.body).map_err(|source| Error::Json {
      source,
      url: self.url.clone(),
    })
  }
}
