//! Author-only edit guard.

use super::Post;

/// Outcome of checking whether a requester may edit a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditAccess {
    /// No post with the requested id.
    NotFound,
    /// The post exists but belongs to someone else.
    Forbidden { post_id: i32 },
    /// The requester is the author.
    Proceed(Post),
}

impl EditAccess {
    pub fn check(post: Option<Post>, requester_id: i32) -> Self {
        let Some(post) = post else {
            return EditAccess::NotFound;
        };
        if post.author_id != requester_id {
            return EditAccess::Forbidden { post_id: post.id };
        }
        EditAccess::Proceed(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: i32) -> Post {
        Post {
            id: 7,
            text: "text".to_string(),
            author_id,
            group_id: None,
            pub_date: Utc::now(),
        }
    }

    #[test]
    fn test_missing_post() {
        assert_eq!(EditAccess::check(None, 1), EditAccess::NotFound);
    }

    #[test]
    fn test_not_author() {
        assert_eq!(
            EditAccess::check(Some(post_by(2)), 1),
            EditAccess::Forbidden { post_id: 7 }
        );
    }

    #[test]
    fn test_author() {
        let post = post_by(1);
        assert_eq!(
            EditAccess::check(Some(post.clone()), 1),
            EditAccess::Proceed(post)
        );
    }
}
