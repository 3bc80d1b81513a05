use super::*;

/// Fetches one item. `Ok(None)` means the id does not exist.
pub(crate) async fn item_details<G: Gateway>(
  gateway: &G,
  id: u64,
) -> Result<Option<Item>, Error> {
  gateway.fetch_item(id).await?.error_for_status()?.json()
}

/// Fetches one user profile. `Ok(None)` means the user does not exist.
pub(crate) async fn user_details<G: Gateway>(
  gateway: &G,
  id: &str,
) -> Result<Option<User>, Error> {
  gateway.fetch_user(id).await?.error_for_status()?.json()
}
