use super::*;

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub(crate) struct User {
  pub(crate) about: Option<String>,
  pub(crate) created: Option<i64>,
  #[serde(deserialize_with = "deserialize_id")]
  pub(crate) id: String,
  pub(crate) karma: Option<i64>,
  #[serde(default)]
  pub(crate) submitted: Vec<u64>,
}
