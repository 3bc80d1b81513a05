use {
  super::*,
  std::collections::HashMap,
  tokio::task::yield_now,
};

type Yields = Arc<dyn Fn(u64) -> usize + Send + Sync>;

#[derive(Default)]
struct Inner {
  bodies: HashMap<u64, String>,
  failing: HashSet<u64>,
  index: HashMap<Category, String>,
  index_failures: usize,
  index_requests: Vec<Category>,
  index_statuses: HashMap<Category, u16>,
  item_requests: Vec<u64>,
  statuses: HashMap<u64, u16>,
  user_requests: Vec<String>,
  users: HashMap<String, String>,
  yields: Option<Yields>,
}

/// In-memory gateway that records every call.
///
/// Unknown ids answer `200` with a `null` body, like the real API.
#[derive(Clone, Default)]
pub(crate) struct FakeGateway {
  inner: Arc<Mutex<Inner>>,
}

impl FakeGateway {
  pub(crate) fn failing(self, id: u64) -> Self {
    self.lock().failing.insert(id);
    self
  }

  pub(crate) fn failing_index(self, times: usize) -> Self {
    self.lock().index_failures = times;
    self
  }

  pub(crate) fn index_requests(&self) -> Vec<Category> {
    self.lock().index_requests.clone()
  }

  pub(crate) fn item_request_count(&self) -> usize {
    self.lock().item_requests.len()
  }

  pub(crate) fn item_requests(&self) -> Vec<u64> {
    self.lock().item_requests.clone()
  }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().unwrap()
  }

  pub(crate) fn recover(&self, id: u64) {
    self.lock().failing.remove(&id);
  }

  pub(crate) fn user_requests(&self) -> Vec<String> {
    self.lock().user_requests.clone()
  }

  pub(crate) fn with_body(self, id: u64, body: &str) -> Self {
    self.lock().bodies.insert(id, body.to_string());
    self
  }

  pub(crate) fn with_comments(ids: impl IntoIterator<Item = u64>) -> Self {
    Self::default().with_items(ids.into_iter().map(comment))
  }

  pub(crate) fn with_index(
    self,
    category: Category,
    ids: impl IntoIterator<Item = u64>,
  ) -> Self {
    let ids = ids.into_iter().collect::<Vec<_>>();

    self
      .lock()
      .index
      .insert(category, serde_json::to_string(&ids).unwrap());

    self
  }

  pub(crate) fn with_index_status(
    self,
    category: Category,
    status: u16,
  ) -> Self {
    self.lock().index_statuses.insert(category, status);
    self
  }

  pub(crate) fn with_items(
    self,
    items: impl IntoIterator<Item = Item>,
  ) -> Self {
    {
      let mut inner = self.lock();

      for item in items {
        inner
          .bodies
          .insert(item.id, serde_json::to_string(&item).unwrap());
      }
    }

    self
  }

  pub(crate) fn with_status(self, id: u64, status: u16) -> Self {
    self.lock().statuses.insert(id, status);
    self
  }

  pub(crate) fn with_stories(ids: impl IntoIterator<Item = u64>) -> Self {
    Self::default().with_items(ids.into_iter().map(story))
  }

  pub(crate) fn with_user(self, id: &str, body: &str) -> Self {
    self.lock().users.insert(id.to_string(), body.to_string());
    self
  }

  /// Makes each item fetch suspend `yields(id)` times before answering.
  pub(crate) fn with_yields(
    self,
    yields: impl Fn(u64) -> usize + Send + Sync + 'static,
  ) -> Self {
    self.lock().yields = Some(Arc::new(yields));
    self
  }
}

impl Gateway for FakeGateway {
  async fn fetch_index(&self, category: Category) -> Result<Response, Error> {
    let url = format!("fake://{}.json", category.endpoint());

    let mut inner = self.lock();

    inner.index_requests.push(category);

    if inner.index_failures > 0 {
      inner.index_failures -= 1;
      return Err(transport_error());
    }

    Ok(Response {
      body: inner
        .index
        .get(&category)
        .cloned()
        .unwrap_or_else(|| "null".into())
        .into_bytes(),
      status: inner.index_statuses.get(&category).copied().unwrap_or(200),
      url,
    })
  }

  async fn fetch_item(&self, id: u64) -> Result<Response, Error> {
    let yields = {
      let mut inner = self.lock();
      inner.item_requests.push(id);
      inner.yields.as_ref().map_or(0, |yields| yields(id))
    };

    for _ in 0..yields {
      yield_now().await;
    }

    let inner = self.lock();

    if inner.failing.contains(&id) {
      return Err(transport_error());
    }

    Ok(Response {
      body: inner
        .bodies
        .get(&id)
        .cloned()
        .unwrap_or_else(|| "null".into())
        .into_bytes(),
      status: inner.statuses.get(&id).copied().unwrap_or(200),
      url: format!("fake://item/{id}.json"),
    })
  }

  async fn fetch_user(&self, id: &str) -> Result<Response, Error> {
    let mut inner = self.lock();

    inner.user_requests.push(id.to_string());

    Ok(Response {
      body: inner
        .users
        .get(id)
        .cloned()
        .unwrap_or_else(|| "null".into())
        .into_bytes(),
      status: 200,
      url: format!("fake://user/{id}.json"),
    })
  }
}

pub(crate) fn comment(id: u64) -> Item {
  Item {
    by: Some(format!("commenter{id}")),
    dead: Some(false),
    deleted: Some(false),
    descendants: None,
    id,
    kids: None,
    kind: ItemKind::Comment,
    parent: Some(1),
    parts: None,
    poll: None,
    score: None,
    text: Some(format!("<p>Comment {id}</p>")),
    time: Some(1_640_995_200),
    title: None,
    url: None,
  }
}

pub(crate) fn story(id: u64) -> Item {
  Item {
    by: Some(format!("user{id}")),
    dead: Some(false),
    deleted: Some(false),
    descendants: Some(id * 5),
    id,
    kids: Some(vec![id * 100 + 1, id * 100 + 2]),
    kind: ItemKind::Story,
    parent: None,
    parts: None,
    poll: None,
    score: Some(id * 100),
    text: None,
    time: Some(1_640_995_200),
    title: Some(format!("Test Story {id}")),
    url: Some(format!("https://example.com/{id}")),
  }
}

/// A real `reqwest` error, produced by a request that cannot be built.
pub(crate) fn transport_error() -> Error {
  Error::Transport(
    reqwest::Client::new()
      .get("http://")
      .build()
      .expect_err("empty host is rejected"),
  )
}
