use super::*;

/// A story, comment, job, poll or poll option as served by the item
/// endpoint. Fields that only apply to some kinds are optional.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[cfg_attr(test, derive(serde::Serialize))]
pub(crate) struct Item {
  pub(crate) by: Option<String>,
  pub(crate) dead: Option<bool>,
  pub(crate) deleted: Option<bool>,
  pub(crate) descendants: Option<u64>,
  pub(crate) id: u64,
  /// `None` when the field is absent or null, which is distinct from an
  /// empty reply list.
  pub(crate) kids: Option<Vec<u64>>,
  #[serde(rename = "type")]
  pub(crate) kind: ItemKind,
  pub(crate) parent: Option<u64>,
  pub(crate) parts: Option<Vec<u64>>,
  pub(crate) poll: Option<u64>,
  pub(crate) score: Option<u64>,
  pub(crate) text: Option<String>,
  pub(crate) time: Option<i64>,
  pub(crate) title: Option<String>,
  pub(crate) url: Option<String>,
}

impl Item {
  pub(crate) fn is_removed(&self) -> bool {
    self.dead == Some(true) || self.deleted == Some(true)
  }

  pub(crate) fn kids(&self) -> &[u64] {
    self.kids.as_deref().unwrap_or_default()
  }

  pub(crate) fn permalink(&self) -> String {
    permalink(self.id)
  }
}
