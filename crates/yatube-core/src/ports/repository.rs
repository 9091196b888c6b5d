use async_trait::async_trait;

use crate::domain::{
    Group, NewGroup, NewPost, NewUser, Post, PostChanges, PostDetails, PostFilter, User,
};
use crate::error::RepoError;

/// Lookup by primary key, shared by every repository.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// User repository.
#[async_trait]
pub trait UserRepository: BaseRepository<User, i32> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Store a new user. A taken username is a `RepoError::Constraint`.
    async fn create(&self, user: NewUser) -> Result<User, RepoError>;
}

/// Group repository. Groups are read-only for the request handlers.
#[async_trait]
pub trait GroupRepository: BaseRepository<Group, i32> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError>;

    /// All groups ordered by title.
    async fn list_all(&self) -> Result<Vec<Group>, RepoError>;

    async fn create(&self, group: NewGroup) -> Result<Group, RepoError>;
}

/// Post repository. Listings are newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, i32> {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError>;

    /// One slice of the filtered listing, with authors and groups attached.
    async fn list(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostDetails>, RepoError>;

    async fn find_details(&self, id: i32) -> Result<Option<PostDetails>, RepoError>;

    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Apply the author's changes in place. Author and publication date stay.
    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError>;
}
