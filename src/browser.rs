use super::*;

const COMMENTS_PROMPT: &str =
  "enter more • r N replies • u N author • o N open • b back • q quit";

const INDENT: &str = "     ";

const PARENT_PROMPT: &str = " • p parent";

const STORIES_PROMPT: &str =
  "enter more • c N comments • u N author • o N open • q quit";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
  Back,
  Quit,
}

/// A line of user input. Row numbers are 1-based, as printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
  Back,
  Comments(usize),
  More,
  Open(usize),
  Parent,
  Quit,
  Replies(usize),
  User(usize),
}

impl Input {
  pub(crate) fn parse(line: &str) -> Option<Self> {
    let mut words = line.split_whitespace();

    let command = words.next().unwrap_or("m");

    let row = words.next().map(str::parse::<usize>);

    match (command, row) {
      ("b" | "back", None) => Some(Self::Back),
      ("c" | "comments", Some(Ok(row))) if row > 0 => {
        Some(Self::Comments(row))
      }
      ("m" | "more", None) => Some(Self::More),
      ("o" | "open", Some(Ok(row))) if row > 0 => Some(Self::Open(row)),
      ("p" | "parent", None) => Some(Self::Parent),
      ("q" | "quit", None) => Some(Self::Quit),
      ("r" | "replies", Some(Ok(row))) if row > 0 => Some(Self::Replies(row)),
      ("u" | "user", Some(Ok(row))) if row > 0 => Some(Self::User(row)),
      _ => None,
    }
  }
}

/// Line-oriented terminal front end over the story and comment feeds.
pub(crate) struct Browser<G> {
  color: bool,
  gateway: G,
  width: usize,
}

impl<G: Gateway + Clone> Browser<G> {
  /// Pages through `root` and any reply feeds opened from it. `parent` is
  /// the item the `p` command opens, if the thread has one.
  async fn comments(
    &self,
    root: CommentFeed<G>,
    parent: Option<u64>,
  ) -> Result<Flow> {
    let prompt = match parent {
      Some(_) => format!("{COMMENTS_PROMPT}{PARENT_PROMPT}"),
      None => COMMENTS_PROMPT.to_string(),
    };

    let mut stack = vec![(root, 0)];

    if let Some((feed, printed)) = stack.last_mut() {
      self.page_comments(feed, printed).await;
    }

    loop {
      let Some((feed, printed)) = stack.last_mut() else {
        return Ok(Flow::Back);
      };

      let Some(line) = Self::read_line(&prompt).await? else {
        return Ok(Flow::Quit);
      };

      match Input::parse(&line) {
        Some(Input::More) => self.page_comments(feed, printed).await,
        Some(Input::Replies(row)) => {
          let Some(comment) = nth(&feed.snapshot().items, row) else {
            println!("no comment {row}");
            continue;
          };

          let replies = feed.replies(&comment);

          println!();
          self.print_heading(&format!(
            "replies to {}",
            comment_author(&comment)
          ));

          stack.push((replies, 0));

          if let Some((feed, printed)) = stack.last_mut() {
            self.page_comments(feed, printed).await;
          }
        }
        Some(Input::Open(row)) => {
          if let Some(comment) = nth(&feed.snapshot().items, row) {
            self.open(&comment.permalink());
          } else {
            println!("no comment {row}");
          }
        }
        Some(Input::Parent) => match parent {
          Some(id) => self.open(&permalink(id)),
          None => println!("{prompt}"),
        },
        Some(Input::User(row)) => {
          if let Some(comment) = nth(&feed.snapshot().items, row) {
            self.profile(comment.by.as_deref()).await;
          } else {
            println!("no comment {row}");
          }
        }
        Some(Input::Back) => {
          stack.pop();
        }
        Some(Input::Quit) => return Ok(Flow::Quit),
        Some(Input::Comments(_)) | None => println!("{prompt}"),
      }
    }
  }

  pub(crate) async fn item(&self, id: u64) -> Result {
    let item = item_details(&self.gateway, id)
      .await
      .with_context(|| format!("could not load item {id}"))?
      .with_context(|| format!("item {id} does not exist"))?;

    let now = Utc::now();

    if let Some(context) = parent_context(&self.gateway, &item).await {
      self.print_notice(&context);
    }

    if item.kind == ItemKind::Comment {
      let entry = CommentEntry::new(&item, now);

      for line in comment_lines(0, &entry, self.width) {
        println!("{line}");
      }
    } else {
      let [title, subtitle] = story_lines(0, &ListEntry::new(&item, now));

      self.print_title(&title);
      println!("{subtitle}");

      if let Some(text) = item.text.as_deref().map(sanitize_comment) {
        for line in wrap_text(&text, self.width) {
          println!("{line}");
        }
      }
    }

    println!();

    self
      .comments(
        CommentFeed::for_item(self.gateway.clone(), &item),
        item.parent,
      )
      .await?;

    Ok(())
  }

  pub(crate) fn new(gateway: G) -> Self {
    let width = crossterm::terminal::size()
      .map(|(columns, _)| usize::from(columns))
      .unwrap_or(80);

    Self {
      color: io::stdout().is_terminal(),
      gateway,
      width: width.saturating_sub(INDENT.len()).max(20),
    }
  }

  fn open(&self, url: &str) {
    match webbrowser::open(url) {
      Ok(()) => println!("opened {}", truncate(url, 80)),
      Err(error) => {
        self.print_notice(&format!("could not open link: {error}"));
      }
    }
  }

  async fn page_comments(&self, feed: &CommentFeed<G>, printed: &mut usize) {
    debug!(cursor = ?feed.cursor(), "loading comments");

    let outcome = feed.load_more().await;

    let snapshot = feed.snapshot();

    debug!(
      ?outcome,
      items = snapshot.items.len(),
      has_more = snapshot.has_more,
      loading = snapshot.loading,
      "feed updated"
    );

    let now = Utc::now();

    for (index, item) in snapshot.items.iter().enumerate().skip(*printed) {
      let entry = CommentEntry::new(item, now);

      let mut lines = comment_lines(index + 1, &entry, self.width).into_iter();

      if let Some(header) = lines.next() {
        self.print_title(&header);
      }

      for line in lines {
        println!("{line}");
      }
    }

    *printed = snapshot.items.len();

    if let Some(notice) = status(outcome, &snapshot) {
      self.print_notice(&notice);
    }
  }

  async fn page_stories(&self, feed: &StoryFeed<G>, printed: &mut usize) {
    debug!(
      category = feed.category().label(),
      cursor = ?feed.cursor(),
      "loading stories"
    );

    let outcome = feed.load_more().await;

    let snapshot = feed.snapshot();

    debug!(
      ?outcome,
      items = snapshot.items.len(),
      has_more = snapshot.has_more,
      loading = snapshot.loading,
      "feed updated"
    );

    let now = Utc::now();

    for (index, item) in snapshot.items.iter().enumerate().skip(*printed) {
      let entry = ListEntry::new(item, now);

      let [title, subtitle] = story_lines(index + 1, &entry);

      self.print_title(&title);
      println!("{subtitle}");
    }

    *printed = snapshot.items.len();

    if let Some(notice) = status(outcome, &snapshot) {
      self.print_notice(&notice);
    }
  }

  fn print_heading(&self, text: &str) {
    if self.color {
      println!("{}", text.to_uppercase().cyan().bold());
    } else {
      println!("{}", text.to_uppercase());
    }
  }

  fn print_notice(&self, text: &str) {
    if self.color {
      println!("{}", text.dark_grey());
    } else {
      println!("{text}");
    }
  }

  fn print_title(&self, text: &str) {
    if self.color {
      println!("{}", text.bold());
    } else {
      println!("{text}");
    }
  }

  /// Shows the profile of a row's author without leaving the current list.
  async fn profile(&self, author: Option<&str>) {
    let Some(id) = author.filter(|id| !id.is_empty()) else {
      self.print_notice("no author");
      return;
    };

    match user_details(&self.gateway, id).await {
      Ok(Some(user)) => {
        println!();

        for line in user_lines(&user, Utc::now(), self.width) {
          println!("{line}");
        }

        println!();
      }
      Ok(None) => self.print_notice(&format!("user {id} does not exist")),
      Err(error) => self.print_notice(&format!(
        "could not load user {id}: {}",
        error_chain(&error)
      )),
    }
  }

  /// `None` means stdin is closed.
  async fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt} > ");

    io::stdout().flush()?;

    next_line(|line| io::stdin().read_line(line)).await
  }

  pub(crate) async fn stories(&self, category: Category) -> Result {
    let feed = StoryFeed::new(self.gateway.clone(), category);

    let heading = format!("{} stories", feed.category().label());

    self.print_heading(&heading);

    let mut printed = 0;

    self.page_stories(&feed, &mut printed).await;

    loop {
      let Some(line) = Self::read_line(STORIES_PROMPT).await? else {
        return Ok(());
      };

      match Input::parse(&line) {
        Some(Input::More) => self.page_stories(&feed, &mut printed).await,
        Some(Input::Comments(row)) => {
          let Some(story) = nth(&feed.snapshot().items, row) else {
            println!("no story {row}");
            continue;
          };

          let entry = ListEntry::new(&story, Utc::now());

          println!();
          self.print_heading(&format!("comments on {}", entry.title));

          let flow = self
            .comments(CommentFeed::for_item(self.gateway.clone(), &story), None)
            .await?;

          if flow == Flow::Quit {
            return Ok(());
          }

          self.print_heading(&heading);
        }
        Some(Input::Open(row)) => {
          if let Some(story) = nth(&feed.snapshot().items, row) {
            self.open(&ListEntry::new(&story, Utc::now()).resolved_url());
          } else {
            println!("no story {row}");
          }
        }
        Some(Input::User(row)) => {
          if let Some(story) = nth(&feed.snapshot().items, row) {
            self.profile(story.by.as_deref()).await;
          } else {
            println!("no story {row}");
          }
        }
        Some(Input::Quit) => return Ok(()),
        Some(Input::Back | Input::Parent | Input::Replies(_)) | None => {
          println!("{STORIES_PROMPT}");
        }
      }
    }
  }

  pub(crate) async fn user(&self, id: &str) -> Result {
    let user = user_details(&self.gateway, id)
      .await
      .with_context(|| format!("could not load user {id}"))?
      .with_context(|| format!("user {id} does not exist"))?;

    for line in user_lines(&user, Utc::now(), self.width) {
      println!("{line}");
    }

    Ok(())
  }
}

fn comment_author(item: &Item) -> &str {
  item
    .by
    .as_deref()
    .filter(|by| !by.is_empty())
    .unwrap_or("unknown")
}

/// Header line followed by the wrapped, indented body. Row 0 means the
/// comment is shown on its own, without a number.
fn comment_lines(
  row: usize,
  entry: &CommentEntry,
  width: usize,
) -> Vec<String> {
  let header = if row == 0 {
    entry.header()
  } else {
    format!("{row:>3}. {}", entry.header())
  };

  let mut lines = vec![header];

  lines.extend(
    wrap_text(&entry.body, width)
      .into_iter()
      .map(|line| format!("{INDENT}{line}")),
  );

  lines
}

/// Error text including every source, since `Error` itself only names the
/// failing operation.
fn error_chain(error: &Error) -> String {
  let mut message = error.to_string();

  let mut source = std::error::Error::source(error);

  while let Some(cause) = source {
    message.push_str(": ");
    message.push_str(&cause.to_string());
    source = std::error::Error::source(cause);
  }

  message
}

/// Runs a blocking line read on tokio's blocking pool. `None` means the
/// input is exhausted.
async fn next_line<F>(read: F) -> Result<Option<String>>
where
  F: FnOnce(&mut String) -> io::Result<usize> + Send + 'static,
{
  let line = tokio::task::spawn_blocking(move || {
    let mut line = String::new();

    let count = read(&mut line)?;

    Ok::<_, io::Error>((count > 0).then_some(line))
  })
  .await??;

  Ok(line)
}

fn nth(items: &[Item], row: usize) -> Option<Item> {
  row.checked_sub(1).and_then(|index| items.get(index)).cloned()
}

/// A line naming what `item` replies to, or `None` for top-level items.
/// A parent that cannot be loaded is still named by id.
async fn parent_context<G: Gateway>(
  gateway: &G,
  item: &Item,
) -> Option<String> {
  let id = item.parent?;

  match item_details(gateway, id).await {
    Ok(Some(parent)) => Some(parent_line(&parent)),
    Ok(None) => Some(format!("in reply to item {id}")),
    Err(error) => {
      warn!(id, %error, "could not load parent");
      Some(format!("in reply to item {id}"))
    }
  }
}

fn parent_line(parent: &Item) -> String {
  match parent.title.as_deref().filter(|title| !title.is_empty()) {
    Some(title) => format!("on: {title}"),
    None => format!("in reply to {}", comment_author(parent)),
  }
}

fn status(outcome: LoadOutcome, snapshot: &FeedSnapshot) -> Option<String> {
  match outcome {
    LoadOutcome::Appended { fetched, visible: 0 } => Some(format!(
      "{fetched} removed entries skipped, ask for more to keep going"
    )),
    LoadOutcome::Appended { .. } | LoadOutcome::InFlight => {
      (!snapshot.has_more).then(|| "end of list".to_string())
    }
    LoadOutcome::Exhausted => Some(if snapshot.items.is_empty() {
      "nothing here".to_string()
    } else {
      "end of list".to_string()
    }),
    LoadOutcome::Failed => Some(snapshot.error.as_deref().map_or_else(
      || "could not load more".to_string(),
      |error| format!("could not load more: {}", error_chain(error)),
    )),
  }
}

fn story_lines(row: usize, entry: &ListEntry) -> [String; 2] {
  let mut title = if row == 0 {
    entry.title.clone()
  } else {
    format!("{row:>3}. {}", entry.title)
  };

  if let Some(domain) = &entry.domain {
    title.push_str(&format!(" ({domain})"));
  }

  [title, format!("{INDENT}{}", entry.subtitle())]
}

fn user_lines(user: &User, now: DateTime<Utc>, width: usize) -> Vec<String> {
  let mut lines = vec![user.id.clone()];

  let mut facts = Vec::new();

  if let Some(karma) = user.karma {
    facts.push(format!("{karma} karma"));
  }

  if let Some(created) = user.created {
    facts.push(format!("joined {}", relative_time(created, now)));
  }

  facts.push(match user.submitted.len() {
    1 => "1 submission".to_string(),
    n => format!("{n} submissions"),
  });

  lines.push(format!("{INDENT}{}", facts.join(" | ")));

  if let Some(about) = user.about.as_deref().map(sanitize_comment) {
    lines.extend(
      wrap_text(&about, width)
        .into_iter()
        .map(|line| format!("{INDENT}{line}")),
    );
  }

  lines
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    crate::testing::{FakeGateway, comment, story, transport_error},
    pretty_assertions::assert_eq,
    std::io::{BufRead, Cursor},
  };

  fn now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_640_995_200 + 2 * 3600, 0).unwrap()
  }

  #[test]
  fn parses_inputs() {
    assert_eq!(Input::parse("\n"), Some(Input::More));
    assert_eq!(Input::parse("m"), Some(Input::More));
    assert_eq!(Input::parse("c 3"), Some(Input::Comments(3)));
    assert_eq!(Input::parse("o 12\n"), Some(Input::Open(12)));
    assert_eq!(Input::parse("  r 1 "), Some(Input::Replies(1)));
    assert_eq!(Input::parse("b"), Some(Input::Back));
    assert_eq!(Input::parse("quit"), Some(Input::Quit));
    assert_eq!(Input::parse("p"), Some(Input::Parent));
    assert_eq!(Input::parse("u 2"), Some(Input::User(2)));
    assert_eq!(Input::parse("user 14"), Some(Input::User(14)));
  }

  #[test]
  fn rejects_bad_inputs() {
    assert_eq!(Input::parse("c"), None);
    assert_eq!(Input::parse("c 0"), None);
    assert_eq!(Input::parse("c x"), None);
    assert_eq!(Input::parse("m 2"), None);
    assert_eq!(Input::parse("z"), None);
    assert_eq!(Input::parse("u"), None);
    assert_eq!(Input::parse("u 0"), None);
    assert_eq!(Input::parse("p 1"), None);
  }

  #[test]
  fn rows_are_one_based() {
    let items = vec![story(1), story(2)];

    assert_eq!(nth(&items, 1).map(|item| item.id), Some(1));
    assert_eq!(nth(&items, 2).map(|item| item.id), Some(2));
    assert_eq!(nth(&items, 0), None);
    assert_eq!(nth(&items, 3), None);
  }

  #[test]
  fn story_rows() {
    let [title, subtitle] = story_lines(4, &ListEntry::new(&story(1), now()));

    assert_eq!(title, "  4. Test Story 1 (example.com)");
    assert_eq!(subtitle, "     100 points by user1 | 2 hours ago | 5 comments");
  }

  #[test]
  fn comment_rows_wrap_body() {
    let entry = CommentEntry::new(
      &Item {
        text: Some("<p>one two three four</p>".into()),
        ..comment(9)
      },
      now(),
    );

    assert_eq!(
      comment_lines(1, &entry, 9),
      vec![
        "  1. commenter9 | 2 hours ago".to_string(),
        "     one two".to_string(),
        "     three".to_string(),
        "     four".to_string(),
      ]
    );
  }

  #[test]
  fn user_profile_lines() {
    let user = User {
      about: Some("<p>Hello</p>".into()),
      created: Some(1_640_995_200),
      id: "testuser".into(),
      karma: Some(1000),
      submitted: vec![1, 2, 3],
    };

    assert_eq!(
      user_lines(&user, now(), 40),
      vec![
        "testuser".to_string(),
        "     1000 karma | joined 2 hours ago | 3 submissions".to_string(),
        "     Hello".to_string(),
      ]
    );
  }

  #[test]
  fn status_messages() {
    let more = FeedSnapshot {
      has_more: true,
      items: vec![story(1)],
      ..FeedSnapshot::default()
    };

    let done = FeedSnapshot {
      has_more: false,
      ..more.clone()
    };

    assert_eq!(
      status(
        LoadOutcome::Appended {
          fetched: 10,
          visible: 1
        },
        &more
      ),
      None
    );

    assert_eq!(
      status(
        LoadOutcome::Appended {
          fetched: 10,
          visible: 1
        },
        &done
      ),
      Some("end of list".into())
    );

    assert_eq!(
      status(LoadOutcome::Exhausted, &FeedSnapshot::default()),
      Some("nothing here".into())
    );

    assert!(
      status(
        LoadOutcome::Appended {
          fetched: 10,
          visible: 0
        },
        &more
      )
      .is_some_and(|notice| notice.starts_with("10 removed entries skipped"))
    );
  }

  #[test]
  fn failure_status_includes_cause() {
    let snapshot = FeedSnapshot {
      error: Some(Arc::new(transport_error())),
      has_more: true,
      ..FeedSnapshot::default()
    };

    let notice = status(LoadOutcome::Failed, &snapshot).unwrap();

    assert!(notice.starts_with("could not load more: request failed: "));
  }

  #[test]
  fn parent_lines() {
    assert_eq!(parent_line(&story(1)), "on: Test Story 1");
    assert_eq!(parent_line(&comment(3)), "in reply to commenter3");
  }

  #[tokio::test]
  async fn comment_names_its_parent_story() {
    let gateway = FakeGateway::with_stories([1]);

    assert_eq!(
      parent_context(&gateway, &comment(5)).await,
      Some("on: Test Story 1".into())
    );

    assert_eq!(gateway.item_requests(), vec![1]);
  }

  #[tokio::test]
  async fn reply_names_the_comment_it_answers() {
    let gateway = FakeGateway::with_comments([3]);

    let reply = Item {
      parent: Some(3),
      ..comment(7)
    };

    assert_eq!(
      parent_context(&gateway, &reply).await,
      Some("in reply to commenter3".into())
    );
  }

  #[tokio::test]
  async fn unavailable_parent_is_named_by_id() {
    assert_eq!(
      parent_context(&FakeGateway::default().failing(1), &comment(5)).await,
      Some("in reply to item 1".into())
    );

    assert_eq!(
      parent_context(&FakeGateway::default(), &comment(5)).await,
      Some("in reply to item 1".into())
    );
  }

  #[tokio::test]
  async fn top_level_item_has_no_parent_context() {
    let gateway = FakeGateway::with_stories([1]);

    assert_eq!(parent_context(&gateway, &story(1)).await, None);
    assert_eq!(gateway.item_request_count(), 0);
  }

  #[tokio::test(flavor = "current_thread")]
  async fn lines_are_read_off_the_runtime_thread() {
    let runtime_thread = std::thread::current().id();

    let line = next_line(move |line| {
      assert_ne!(std::thread::current().id(), runtime_thread);
      Cursor::new("c 2\n").read_line(line)
    })
    .await
    .unwrap();

    assert_eq!(line.as_deref(), Some("c 2\n"));
    assert_eq!(
      line.as_deref().and_then(Input::parse),
      Some(Input::Comments(2))
    );
  }

  #[tokio::test]
  async fn end_of_input_reads_as_none() {
    assert_eq!(
      next_line(|line| Cursor::new("").read_line(line)).await.unwrap(),
      None
    );
  }

  #[tokio::test]
  async fn read_errors_are_reported() {
    assert!(
      next_line(|_| Err(io::Error::other("terminal went away")))
        .await
        .is_err()
    );
  }
}
