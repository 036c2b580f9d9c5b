//! In-memory post store.
//!
//! Posts live in a `BTreeMap` keyed by id. Ids are handed out by a counter
//! that only moves forward, so key order is insertion order: `list` stays
//! insertion-ordered while lookup and removal avoid a linear scan. A removed
//! id is never issued again.
//!
//! Every operation holds one mutex for its whole duration, which makes id
//! allocation and insertion a single atomic step under concurrent requests.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::post::{NewPost, Post, PostId};
use crate::seed;

#[derive(Debug)]
pub struct PostStore {
    inner: Mutex<Posts>,
}

#[derive(Debug)]
struct Posts {
    by_id: BTreeMap<PostId, Post>,
    next_id: PostId,
}

impl PostStore {
    /// An empty store whose first post gets id 1.
    pub fn new() -> Self {
        Self::from_posts(Vec::new())
    }

    /// The store as it looks at process start: the sample posts with ids 1
    /// and 2, next id 3.
    pub fn seeded() -> Self {
        Self::from_posts(seed::sample_posts())
    }

    /// Builds a store from existing posts. The counter resumes one past the
    /// highest id. Posts are listed in id order.
    pub fn from_posts(posts: impl IntoIterator<Item = Post>) -> Self {
        let by_id: BTreeMap<_, _> = posts.into_iter().map(|p| (p.id, p)).collect();
        let next_id = by_id.keys().next_back().map_or(1, |id| id + 1);
        Self { inner: Mutex::new(Posts { by_id, next_id }) }
    }

    /// Every post, in insertion order.
    pub fn list(&self) -> Vec<Post> {
        self.lock().by_id.values().cloned().collect()
    }

    /// Assigns the next id to an already-validated post and stores it.
    pub fn create(&self, new: NewPost) -> Post {
        let mut posts = self.lock();
        let id = posts.next_id;
        posts.next_id += 1;

        let post = new.into_post(id);
        posts.by_id.insert(id, post.clone());
        debug!(id, "post created");
        post
    }

    pub fn find_by_id(&self, id: PostId) -> Option<Post> {
        self.lock().by_id.get(&id).cloned()
    }

    /// Removes and returns the post, or `None` if no post has this id.
    pub fn remove(&self, id: PostId) -> Option<Post> {
        let removed = self.lock().by_id.remove(&id);
        if removed.is_some() {
            debug!(id, "post removed");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.lock().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Every operation leaves `Posts` consistent before it could panic, so a
    // poisoned lock still guards valid data.
    fn lock(&self) -> MutexGuard<'_, Posts> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for PostStore {
    fn default() -> Self { Self::new() }
}
