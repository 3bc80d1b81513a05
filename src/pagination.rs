use super::*;

pub(crate) const PAGE_SIZE: usize = 10;

pub(crate) type Page = Vec<Item>;

/// Offset of the next page into `ids`, or `None` once every id has been
/// requested.
///
/// The cursor is positional over the unfiltered id list: a page whose items
/// were all filtered out still advances by a full `PAGE_SIZE`.
pub(crate) fn next_cursor(
  pages: &[Page],
  ids: Option<&[u64]>,
) -> Option<usize> {
  let ids = ids?;

  let loaded = pages.len().saturating_mul(PAGE_SIZE);

  (loaded < ids.len()).then_some(loaded)
}
