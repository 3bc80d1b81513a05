use super::*;

pub(crate) fn deserialize_id<'de, D>(
  deserializer: D,
) -> Result<String, D::Error>
where
  D: Deserializer<'de>,
{
  match Value::deserialize(deserializer)? {
    Value::String(s) => Ok(s),
    Value::Number(n) => Ok(n.to_string()),
    Value::Null => Err(de::Error::invalid_type(
      Unexpected::Unit,
      &"string or number",
    )),
    Value::Bool(b) => Err(de::Error::invalid_type(
      Unexpected::Bool(b),
      &"string or number",
    )),
    Value::Array(_) => Err(de::Error::invalid_type(
      Unexpected::Seq,
      &"string or number",
    )),
    Value::Object(_) => Err(de::Error::invalid_type(
      Unexpected::Map,
      &"string or number",
    )),
  }
}

/// Host of `url` without a leading `www.`.
pub(crate) fn domain(url: &str) -> Option<String> {
  let parsed = Url::parse(url).ok()?;

  let host = parsed.host_str()?;

  Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

pub(crate) fn format_comments(count: u64) -> String {
  match count {
    1 => "1 comment".to_string(),
    _ => format!("{count} comments"),
  }
}

pub(crate) fn format_points(score: u64) -> String {
  match score {
    1 => "1 point".to_string(),
    _ => format!("{score} points"),
  }
}

/// Age of a Unix timestamp relative to `now`. Timestamps in the future read
/// as "just now".
/// Discussion page of an item on the Hacker News site.
pub(crate) fn permalink(id: u64) -> String {
  format!("https://news.ycombinator.com/item?id={id}")
}

pub(crate) fn relative_time(time: i64, now: DateTime<Utc>) -> String {
  let Some(then) = DateTime::from_timestamp(time, 0) else {
    return "some time ago".to_string();
  };

  let elapsed = now.signed_duration_since(then);

  let (count, unit) = if elapsed.num_days() >= 365 {
    (elapsed.num_days() / 365, "year")
  } else if elapsed.num_days() >= 30 {
    (elapsed.num_days() / 30, "month")
  } else if elapsed.num_days() >= 1 {
    (elapsed.num_days(), "day")
  } else if elapsed.num_hours() >= 1 {
    (elapsed.num_hours(), "hour")
  } else if elapsed.num_minutes() >= 1 {
    (elapsed.num_minutes(), "minute")
  } else {
    return "just now".to_string();
  };

  if count == 1 {
    format!("1 {unit} ago")
  } else {
    format!("{count} {unit}s ago")
  }
}

pub(crate) fn sanitize_comment(text: &str) -> String {
  let mut cleaned = String::with_capacity(text.len());
  let mut inside_tag = false;
  let mut last_was_space = false;

  for ch in text.chars() {
    match ch {
      '<' => {
        inside_tag = true;

        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      '>' => {
        inside_tag = false;
      }
      _ if inside_tag => {}
      _ if ch.is_whitespace() => {
        if !last_was_space {
          cleaned.push(' ');
          last_was_space = true;
        }
      }
      _ => {
        cleaned.push(ch);
        last_was_space = false;
      }
    }
  }

  let decoded = html_escape::decode_html_entities(cleaned.trim());

  decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }

  let mut result = String::new();

  for (idx, ch) in text.chars().enumerate() {
    if idx >= max_chars {
      result.push_str("...");
      break;
    }

    result.push(ch);
  }

  result.trim_end().to_string()
}

pub(crate) fn wrap_text(text: &str, width: usize) -> Vec<String> {
  if text.is_empty() {
    return Vec::new();
  }

  let mut lines = Vec::new();
  let mut current = String::new();
  let mut current_width = 0;

  for word in text.split_whitespace() {
    let word_width = word.chars().count();

    if current.is_empty() {
      current.push_str(word);
      current_width = word_width;
    } else if current_width + 1 + word_width <= width {
      current.push(' ');
      current.push_str(word);
      current_width += 1 + word_width;
    } else {
      lines.push(current);
      current = word.to_string();
      current_width = word_width;
    }
  }

  if !current.is_empty() {
    lines.push(current);
  }

  lines
}
