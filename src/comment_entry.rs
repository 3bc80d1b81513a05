use super::*;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CommentEntry {
  pub(crate) age: Option<String>,
  pub(crate) author: String,
  pub(crate) body: String,
  pub(crate) replies: usize,
}

impl CommentEntry {
  pub(crate) fn header(&self) -> String {
    let mut header = self.author.clone();

    if let Some(age) = &self.age {
      header.push_str(" | ");
      header.push_str(age);
    }

    match self.replies {
      0 => {}
      1 => header.push_str(" | 1 reply"),
      n => header.push_str(&format!(" | {n} replies")),
    }

    header
  }

  pub(crate) fn new(item: &Item, now: DateTime<Utc>) -> Self {
    Self {
      age: item.time.map(|time| relative_time(time, now)),
      author: item
        .by
        .clone()
        .filter(|by| !by.is_empty())
        .unwrap_or_else(|| "unknown".to_string()),
      body: item
        .text
        .as_deref()
        .map(sanitize_comment)
        .unwrap_or_default(),
      replies: item.kids().len(),
    }
  }
}
