use super::*;

/// Drops dead and deleted items. Items with empty text, title or author are
/// kept.
pub(crate) fn filter(items: Vec<Item>) -> Vec<Item> {
  items.into_iter().filter(|item| !item.is_removed()).collect()
}
