use super::*;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[cfg_attr(test, derive(serde::Serialize))]
#[serde(rename_all = "lowercase")]
pub(crate) enum ItemKind {
  Comment,
  Job,
  Poll,
  PollOpt,
  Story,
}
