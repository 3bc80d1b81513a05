use super::*;

/// Paged, filtered comments for a fixed list of child ids.
///
/// A feed built from a missing `kids` list is empty and finished before
/// any request is made.
pub(crate) struct CommentFeed<G> {
  feed: Feed,
  gateway: G,
}

impl<G: Gateway> CommentFeed<G> {
  pub(crate) fn cursor(&self) -> Option<usize> {
    self.feed.cursor()
  }

  pub(crate) fn for_item(gateway: G, item: &Item) -> Self {
    Self::new(gateway, item.kids.clone())
  }

  pub(crate) async fn load_more(&self) -> LoadOutcome {
    self
      .feed
      .load_more(|known, cursor| async move {
        let ids = known.unwrap_or_else(|| Arc::from([]));

        let page = filter(load_page(&self.gateway, Some(&ids), cursor).await?);

        Ok::<_, Error>((ids, page))
      })
      .await
  }

  pub(crate) fn new(gateway: G, kids: Option<Vec<u64>>) -> Self {
    Self {
      feed: kids.map_or_else(Feed::absent, |kids| Feed::known(kids.into())),
      gateway,
    }
  }

  /// A feed over the replies to `comment`, sharing this feed's gateway.
  pub(crate) fn replies(&self, comment: &Item) -> Self
  where
    G: Clone,
  {
    Self::for_item(self.gateway.clone(), comment)
  }

  pub(crate) fn snapshot(&self) -> FeedSnapshot {
    self.feed.snapshot()
  }
}
