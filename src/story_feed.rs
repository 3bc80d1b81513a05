use super::*;

/// Paged, filtered stories for one category.
///
/// The category's id list is fetched on the first load and reused for every
/// later page. Switching categories means building a new feed.
///
/// Until that first load succeeds the snapshot reports `has_more`, which
/// only means the index has not been asked for yet. It says nothing about
/// whether any stories exist.
pub(crate) struct StoryFeed<G> {
  category: Category,
  feed: Feed,
  gateway: G,
}

impl<G: Gateway> StoryFeed<G> {
  pub(crate) fn category(&self) -> Category {
    self.category
  }

  pub(crate) fn cursor(&self) -> Option<usize> {
    self.feed.cursor()
  }

  async fn fetch_ids(&self) -> Result<Arc<[u64]>, Error> {
    let response = self
      .gateway
      .fetch_index(self.category)
      .await?
      .error_for_status()?;

    let ids: Arc<[u64]> =
      response.json::<Option<Vec<u64>>>()?.unwrap_or_default().into();

    info!(
      category = self.category.label(),
      count = ids.len(),
      "fetched story ids"
    );

    self.feed.set_ids(ids.clone());

    Ok(ids)
  }

  pub(crate) async fn load_more(&self) -> LoadOutcome {
    self
      .feed
      .load_more(|known, cursor| async move {
        let ids = match known {
          Some(ids) => ids,
          None => self.fetch_ids().await?,
        };

        let page = filter(load_page(&self.gateway, Some(&ids), cursor).await?);

        Ok::<_, Error>((ids, page))
      })
      .await
  }

  pub(crate) fn new(gateway: G, category: Category) -> Self {
    Self {
      category,
      feed: Feed::pending(),
      gateway,
    }
  }

  pub(crate) fn snapshot(&self) -> FeedSnapshot {
    self.feed.snapshot()
  }
}
