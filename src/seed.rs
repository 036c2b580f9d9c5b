//! Sample posts present at process start.

use crate::post::Post;

const SAMPLE_POSTS: [(&str, &str, &str); 2] = [
    ("Welcome to Go", "Go is awesome for backend development!", "Gopher"),
    ("Why Choose Go?", "Fast, simple, and reliable.", "Developer"),
];

/// The seed posts, numbered from 1 in order.
pub fn sample_posts() -> Vec<Post> {
    SAMPLE_POSTS.iter()
        .zip(1..)
        .map(|(&(title, content, author), id)| Post {
            id,
            title: title.to_owned(),
            content: content.to_owned(),
            author: author.to_owned(),
        })
        .collect()
}
