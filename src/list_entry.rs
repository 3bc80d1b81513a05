use super::*;

/// A story row as the terminal front end prints it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ListEntry {
  pub(crate) age: Option<String>,
  pub(crate) comments: String,
  pub(crate) detail: Option<String>,
  pub(crate) domain: Option<String>,
  pub(crate) id: u64,
  pub(crate) title: String,
  pub(crate) url: Option<String>,
}

impl ListEntry {
  pub(crate) fn new(item: &Item, now: DateTime<Utc>) -> Self {
    let author = item.by.as_deref().filter(|by| !by.is_empty());

    let detail = match (item.score, author) {
      (Some(score), Some(by)) => {
        Some(format!("{} by {}", format_points(score), by))
      }
      (Some(score), None) => Some(format_points(score)),
      (None, Some(by)) => Some(format!("by {by}")),
      _ => None,
    };

    let title = item
      .title
      .clone()
      .filter(|title| !title.is_empty())
      .unwrap_or_else(|| "Untitled".to_string());

    Self {
      age: item.time.map(|time| relative_time(time, now)),
      comments: format_comments(item.descendants.unwrap_or_default()),
      detail,
      domain: item.url.as_deref().and_then(domain),
      id: item.id,
      title,
      url: item.url.clone().filter(|url| !url.is_empty()),
    }
  }

  pub(crate) fn resolved_url(&self) -> String {
    self.url.clone().unwrap_or_else(|| permalink(self.id))
  }

  /// The line under the title: points, author, age and comment count.
  pub(crate) fn subtitle(&self) -> String {
    [self.detail.clone(), self.age.clone(), Some(self.comments.clone())]
      .into_iter()
      .flatten()
      .collect::<Vec<_>>()
      .join(" | ")
  }
}
