use super::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub(crate) enum Category {
  Ask,
  Best,
  Show,
  #[default]
  Top,
}

impl Category {
  pub(crate) fn endpoint(self) -> &'static str {
    match self {
      Self::Ask => "askstories",
      Self::Best => "beststories",
      Self::Show => "showstories",
      Self::Top => "topstories",
    }
  }

  pub(crate) fn label(self) -> &'static str {
    match self {
      Self::Ask => "ask",
      Self::Best => "best",
      Self::Show => "show",
      Self::Top => "top",
    }
  }
}
