use super::*;

/// Fetches the items at `ids[cursor..cursor + PAGE_SIZE]` concurrently.
///
/// The result keeps slice order. Any failed fetch fails the whole page.
/// Ids whose body is `null` are dropped here, since they have no item to
/// show; they still count toward the page for pagination.
pub(crate) async fn load_page<G: Gateway>(
  gateway: &G,
  ids: Option<&[u64]>,
  cursor: usize,
) -> Result<Page, Error> {
  let Some(ids) = ids else {
    return Ok(Vec::new());
  };

  let start = cursor.min(ids.len());
  let end = cursor.saturating_add(PAGE_SIZE).min(ids.len());

  let batch = &ids[start..end];

  debug!(cursor, count = batch.len(), "loading page");

  let items = try_join_all(batch.iter().map(|&id| async move {
    let response = gateway.fetch_item(id).await?.error_for_status()?;

    let item = response.json::<Option<Item>>()?;

    if item.is_none() {
      debug!(id, "item has no body");
    }

    Ok::<_, Error>(item)
  }))
  .await?;

  Ok(items.into_iter().flatten().collect())
}
