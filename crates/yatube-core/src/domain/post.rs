use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Group, User};

/// How many characters of the text a post shows as its display string.
pub const DISPLAY_LETTERS: usize = 15;

/// Post entity - a short authored text, optionally in a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub text: String,
    pub author_id: i32,
    pub group_id: Option<i32>,
    pub pub_date: DateTime<Utc>,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short: String = self.text.chars().take(DISPLAY_LETTERS).collect();
        f.write_str(&short)
    }
}

/// A post that has not been stored yet. The publication date is fixed here.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub text: String,
    pub author_id: i32,
    pub group_id: Option<i32>,
    pub pub_date: DateTime<Utc>,
}

impl NewPost {
    pub fn new(text: String, author_id: i32, group_id: Option<i32>) -> Self {
        Self {
            text,
            author_id,
            group_id,
            pub_date: Utc::now(),
        }
    }
}

/// Fields of a post the author may change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostChanges {
    pub text: String,
    pub group_id: Option<i32>,
}

/// A post together with its author and group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetails {
    pub post: Post,
    pub author: User,
    pub group: Option<Group>,
}

/// Which posts a listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostFilter {
    All,
    Group(i32),
    Author(i32),
}

impl PostFilter {
    pub fn matches(&self, post: &Post) -> bool {
        match *self {
            PostFilter::All => true,
            PostFilter::Group(group_id) => post.group_id == Some(group_id),
            PostFilter::Author(author_id) => post.author_id == author_id,
        }
    }
}
