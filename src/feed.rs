use super::*;

/// Result of asking a feed for its next page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LoadOutcome {
  /// `fetched` ids were consumed from the id list, `visible` items survived
  /// filtering.
  Appended { fetched: usize, visible: usize },
  Exhausted,
  /// The error is recorded on the feed and no page was merged.
  Failed,
  InFlight,
}

/// What the presentation layer reads from a feed.
#[derive(Clone, Debug, Default)]
pub(crate) struct FeedSnapshot {
  pub(crate) error: Option<Arc<Error>>,
  pub(crate) has_more: bool,
  pub(crate) items: Vec<Item>,
  pub(crate) loading: bool,
}

#[derive(Clone, Debug)]
enum Ids {
  Absent,
  Known(Arc<[u64]>),
  Pending,
}

/// Clears the loading flag when a load is dropped before it completes.
struct LoadGuard<'a>(Option<&'a Feed>);

impl LoadGuard<'_> {
  fn disarm(mut self) {
    self.0 = None;
  }
}

impl Drop for LoadGuard<'_> {
  fn drop(&mut self) {
    if let Some(feed) = self.0 {
      feed.lock().loading = false;
    }
  }
}

#[derive(Debug)]
struct State {
  error: Option<Arc<Error>>,
  ids: Ids,
  loading: bool,
  pages: Vec<Page>,
}

impl State {
  fn cursor(&self) -> Option<usize> {
    match &self.ids {
      Ids::Absent => None,
      Ids::Known(ids) => next_cursor(&self.pages, Some(ids)),
      Ids::Pending => Some(0),
    }
  }
}

/// Page accumulation shared by the story and comment controllers.
///
/// The lock is only taken between suspension points, never across one.
#[derive(Debug)]
pub(crate) struct Feed {
  state: Mutex<State>,
}

impl Feed {
  pub(crate) fn absent() -> Self {
    Self::with_ids(Ids::Absent)
  }

  pub(crate) fn cursor(&self) -> Option<usize> {
    self.lock().cursor()
  }

  pub(crate) fn known(ids: Arc<[u64]>) -> Self {
    Self::with_ids(Ids::Known(ids))
  }

  /// Runs `fetch` for the next page unless a load is already in flight or
  /// the id list is exhausted.
  ///
  /// `fetch` receives the id list, if known yet, and the cursor. It returns
  /// the id list it paged over along with the filtered page.
  pub(crate) async fn load_more<F, Fut>(&self, fetch: F) -> LoadOutcome
  where
    F: FnOnce(Option<Arc<[u64]>>, usize) -> Fut,
    Fut: Future<Output = Result<(Arc<[u64]>, Page), Error>>,
  {
    let (ids, cursor) = {
      let mut state = self.lock();

      if state.loading {
        return LoadOutcome::InFlight;
      }

      let Some(cursor) = state.cursor() else {
        return LoadOutcome::Exhausted;
      };

      state.loading = true;

      let ids = match &state.ids {
        Ids::Known(ids) => Some(ids.clone()),
        Ids::Absent | Ids::Pending => None,
      };

      (ids, cursor)
    };

    let guard = LoadGuard(Some(self));

    let result = fetch(ids, cursor).await;

    guard.disarm();

    let mut state = self.lock();

    state.loading = false;

    match result {
      Ok((ids, page)) => {
        let fetched = ids
          .len()
          .min(cursor.saturating_add(PAGE_SIZE))
          .saturating_sub(cursor);

        state.ids = Ids::Known(ids);
        state.error = None;

        if fetched == 0 {
          return LoadOutcome::Exhausted;
        }

        let visible = page.len();

        state.pages.push(page);

        debug!(cursor, fetched, visible, "page appended");

        LoadOutcome::Appended { fetched, visible }
      }
      Err(error) => {
        warn!(cursor, %error, "page load failed");

        state.error = Some(Arc::new(error));

        LoadOutcome::Failed
      }
    }
  }

  fn lock(&self) -> MutexGuard<'_, State> {
    self.state.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub(crate) fn pending() -> Self {
    Self::with_ids(Ids::Pending)
  }

  pub(crate) fn set_ids(&self, ids: Arc<[u64]>) {
    self.lock().ids = Ids::Known(ids);
  }

  pub(crate) fn snapshot(&self) -> FeedSnapshot {
    let state = self.lock();

    let mut seen = HashSet::new();

    let items = state
      .pages
      .iter()
      .flatten()
      .filter(|item| seen.insert(item.id))
      .cloned()
      .collect();

    FeedSnapshot {
      error: state.error.clone(),
      has_more: state.cursor().is_some(),
      items,
      loading: state.loading,
    }
  }

  fn with_ids(ids: Ids) -> Self {
    Self {
      state: Mutex::new(State {
        error: None,
        ids,
        loading: false,
        pages: Vec::new(),
      }),
    }
  }
}
