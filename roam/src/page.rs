use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::date;
use crate::error::Error;

/// A top-level page of the export. Owns its block tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Page {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<Block>,
    #[serde(default = "Utc::now", deserialize_with = "unix_seconds")]
    pub create_time: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "unix_seconds")]
    pub edit_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "nullable")]
    pub create_email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub edit_email: String,
    /// Set once the title has been recognized as a daily-note date.
    #[serde(skip)]
    pub is_daily: bool,
}

impl Page {
    /// Rewrite a daily-note title ("January 5th, 2024") to its `YYYY-MM-DD`
    /// form and flag the page as daily. Other titles are left alone.
    pub fn normalize_title(&mut self) -> Result<(), Error> {
        if let Some(normalized) = date::normalize_title(&self.title)? {
            self.title = normalized;
            self.is_daily = true;
        }
        Ok(())
    }

    /// Number of blocks in the page, at every depth.
    pub fn block_count(&self) -> usize {
        self.children.iter().map(Block::subtree_len).sum()
    }
}

/// A node of page content, identified by a `uid` that is unique across the
/// whole export.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Block {
    pub uid: String,
    #[serde(default, rename = "string", deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub children: Vec<Block>,
    /// 0 when the block is not a heading.
    #[serde(default, deserialize_with = "nullable")]
    pub heading: u8,
    #[serde(default)]
    pub text_align: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub emojis: Vec<Emoji>,
    #[serde(default = "Utc::now", deserialize_with = "unix_seconds")]
    pub create_time: DateTime<Utc>,
    #[serde(default = "Utc::now", deserialize_with = "unix_seconds")]
    pub edit_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "nullable")]
    pub create_email: String,
    #[serde(default, deserialize_with = "nullable")]
    pub edit_email: String,
}

impl Block {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Block::subtree_len).sum::<usize>()
    }
}

/// An emoji reaction attached to a block. Carried through untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Emoji {
    #[serde(default)]
    pub emoji: Map<String, Value>,
    #[serde(default)]
    pub users: Vec<Map<String, Value>>,
}

/// Treat an explicit `null` like a missing field.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Unix seconds. Zero and `null` mean "unknown" and fall back to the load time.
fn unix_seconds<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(0) => Ok(Utc::now()),
        Some(secs) => DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp {secs} out of range"))),
    }
}
