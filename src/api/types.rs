//! Document types returned by the 4chan JSON API
//!
//! Only the fields chanscope renders are typed. Everything is optional
//! because the API omits keys rather than sending nulls.

use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// Root of `boards.json`
#[derive(Debug, Clone, Deserialize)]
pub struct BoardList {
    #[serde(default)]
    pub boards: Vec<Board>,
}

/// A board and its posting rules
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Board {
    /// Short name (`g`, `a`, ...)
    pub board: String,

    pub title: String,

    pub meta_description: Option<String>,

    #[serde(deserialize_with = "flag")]
    pub code_tags: bool,
    #[serde(deserialize_with = "flag")]
    pub country_flags: bool,
    #[serde(deserialize_with = "flag")]
    pub forced_anon: bool,
    #[serde(deserialize_with = "flag")]
    pub is_archived: bool,
    #[serde(deserialize_with = "flag")]
    pub math_tags: bool,
    #[serde(deserialize_with = "flag")]
    pub oekaki: bool,
    #[serde(deserialize_with = "flag")]
    pub require_subject: bool,
    #[serde(deserialize_with = "flag")]
    pub sjis_tags: bool,
    #[serde(deserialize_with = "flag")]
    pub spoilers: bool,
    #[serde(deserialize_with = "flag")]
    pub text_only: bool,
    #[serde(deserialize_with = "flag")]
    pub troll_flags: bool,
    #[serde(deserialize_with = "flag")]
    pub user_ids: bool,
    #[serde(deserialize_with = "flag")]
    pub webm_audio: bool,

    pub pages: u64,
    pub per_page: u64,
    pub bump_limit: u64,
    pub image_limit: u64,
    pub max_comment_chars: u64,
    pub max_filesize: u64,
    pub max_webm_duration: u64,
    pub max_webm_filesize: u64,
    pub custom_spoilers: u64,
    pub min_image_height: u64,
    pub min_image_width: u64,
}

/// Board flags arrive as `0`/`1`; accept real booleans too
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(n)) => n != 0,
        None => false,
    })
}

/// One page of `{board}/catalog.json`
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub threads: Vec<Post>,
}

/// One page of `{board}/threads.json`
#[derive(Debug, Clone, Deserialize)]
pub struct IndexPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub threads: Vec<ThreadStub>,
}

/// Thread reference in `threads.json`
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThreadStub {
    pub no: u64,
    #[serde(default)]
    pub last_modified: Option<i64>,
    #[serde(default)]
    pub replies: Option<u32>,
}

/// `{board}/catalog.json`
pub type Catalog = Vec<CatalogPage>;

/// `{board}/threads.json`
pub type ThreadIndex = Vec<IndexPage>;

/// `{board}/archive.json`: thread numbers only
pub type Archive = Vec<u64>;

/// `{board}/thread/{no}.json`
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// A post, as found in threads, catalog pages and search hits
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(remote = "Self")]
pub struct Post {
    #[serde(default)]
    pub no: Option<u64>,
    #[serde(default)]
    pub resto: Option<u64>,
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub com: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub fsize: Option<u64>,
    #[serde(default)]
    pub w: Option<u32>,
    #[serde(default)]
    pub h: Option<u32>,
    #[serde(default)]
    pub tim: Option<u64>,
    #[serde(default)]
    pub unique_ips: Option<u32>,
    #[serde(default)]
    pub omitted_images: Option<u32>,
    #[serde(default)]
    pub omitted_posts: Option<u32>,
    #[serde(default)]
    pub bumplimit: Option<u8>,
    #[serde(default)]
    pub imagelimit: Option<u8>,
    #[serde(default)]
    pub images: Option<u32>,
    #[serde(default)]
    pub replies: Option<u32>,
    #[serde(default)]
    pub tag: Option<String>,

    /// Catalog only: the newest replies of the thread
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_replies: Vec<Post>,

    /// Every key the API sent, known or not, sorted
    #[serde(skip)]
    keys: Vec<String>,
}

impl<'de> Deserialize<'de> for Post {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = serde_json::Map::deserialize(deserializer)?;
        let keys = map.keys().cloned().collect();

        let mut post =
            Post::deserialize(serde_json::Value::Object(map)).map_err(serde::de::Error::custom)?;
        post.keys = keys;
        Ok(post)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Post>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Post>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Post {
    /// Names of every key this post carried, including empty and null ones
    pub fn keys(&self) -> &[String] {
        &self.keys
    }
}

/// One page from the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub threads: Vec<SearchHit>,
}

/// A thread matched by a search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchHit {
    #[serde(default)]
    pub board: Option<String>,

    /// Thread identifier as sent by the search backend (string or number)
    #[serde(default)]
    pub thread: Option<serde_json::Value>,

    #[serde(default)]
    pub posts: Vec<Post>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}
