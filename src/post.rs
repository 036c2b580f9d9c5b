//! The post record and its creation payload.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub type PostId = u64;

/// A stored post. The `id` is assigned by the store and never changes.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: String,
}

/// The body of `POST /posts`.
///
/// Absent fields decode as empty strings so they fail [`NewPost::validate`]
/// with the same message as explicitly empty ones. Any `id` or unknown field
/// in the body is ignored.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }

    /// All three fields must be non-empty. Whitespace counts as content.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.is_empty() || self.content.is_empty() || self.author.is_empty() {
            return Err(ApiError::MissingFields);
        }
        Ok(())
    }

    pub(crate) fn into_post(self, id: PostId) -> Post {
        Post {
            id,
            title: self.title,
            content: self.content,
            author: self.author,
        }
    }
}
