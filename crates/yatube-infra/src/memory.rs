//! In-memory repositories - used when no database is configured, and in tests.
//!
//! All three repositories share one set of tables behind an async `RwLock`.
//! Data is lost on process restart.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use yatube_core::domain::{
    Group, NewGroup, NewPost, NewUser, Post, PostChanges, PostDetails, PostFilter, User,
};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<i32, User>,
    groups: HashMap<i32, Group>,
    posts: HashMap<i32, Post>,
    last_user_id: i32,
    last_group_id: i32,
    last_post_id: i32,
}

impl Tables {
    fn details(&self, post: &Post) -> Result<PostDetails, RepoError> {
        let author = self.users.get(&post.author_id).cloned().ok_or_else(|| {
            RepoError::Query(format!("post {} references a missing author", post.id))
        })?;
        let group = post.group_id.and_then(|id| self.groups.get(&id).cloned());
        Ok(PostDetails {
            post: post.clone(),
            author,
            group,
        })
    }

    /// Filtered posts, newest first.
    fn filtered(&self, filter: PostFilter) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.values().filter(|p| filter.matches(p)).collect();
        posts.sort_by_key(|p| Reverse((p.pub_date, p.id)));
        posts
    }
}

/// Handle to a shared in-memory store.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository(self.clone())
    }

    pub fn groups(&self) -> InMemoryGroupRepository {
        InMemoryGroupRepository(self.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository(self.clone())
    }
}

pub struct InMemoryUserRepository(InMemoryStore);

pub struct InMemoryGroupRepository(InMemoryStore);

pub struct InMemoryPostRepository(InMemoryStore);

#[async_trait]
impl BaseRepository<User, i32> for InMemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepoError> {
        Ok(self.0.tables.read().await.users.get(&id).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("Username already taken".to_string()));
        }
        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            username: user.username,
            password_hash: user.password_hash,
            date_joined: user.date_joined,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl BaseRepository<Group, i32> for InMemoryGroupRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Group>, RepoError> {
        Ok(self.0.tables.read().await.groups.get(&id).cloned())
    }
}

#[async_trait]
impl GroupRepository for InMemoryGroupRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Group>, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Group>, RepoError> {
        let tables = self.0.tables.read().await;
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(groups)
    }

    async fn create(&self, group: NewGroup) -> Result<Group, RepoError> {
        let mut tables = self.0.tables.write().await;
        if tables.groups.values().any(|g| g.slug == group.slug) {
            return Err(RepoError::Constraint("Group slug already taken".to_string()));
        }
        tables.last_group_id += 1;
        let group = Group {
            id: tables.last_group_id,
            title: group.title,
            slug: group.slug,
            description: group.description,
        };
        tables.groups.insert(group.id, group.clone());
        Ok(group)
    }
}

#[async_trait]
impl BaseRepository<Post, i32> for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Post>, RepoError> {
        Ok(self.0.tables.read().await.posts.get(&id).cloned())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn count(&self, filter: PostFilter) -> Result<u64, RepoError> {
        let tables = self.0.tables.read().await;
        Ok(tables.posts.values().filter(|p| filter.matches(p)).count() as u64)
    }

    async fn list(
        &self,
        filter: PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<PostDetails>, RepoError> {
        let tables = self.0.tables.read().await;
        tables
            .filtered(filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|p| tables.details(p))
            .collect()
    }

    async fn find_details(&self, id: i32) -> Result<Option<PostDetails>, RepoError> {
        let tables = self.0.tables.read().await;
        tables.posts.get(&id).map(|p| tables.details(p)).transpose()
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("Unknown author".to_string()));
        }
        if let Some(group_id) = post.group_id {
            if !tables.groups.contains_key(&group_id) {
                return Err(RepoError::Constraint("Unknown group".to_string()));
            }
        }
        tables.last_post_id += 1;
        let post = Post {
            id: tables.last_post_id,
            text: post.text,
            author_id: post.author_id,
            group_id: post.group_id,
            pub_date: post.pub_date,
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, id: i32, changes: PostChanges) -> Result<Post, RepoError> {
        let mut tables = self.0.tables.write().await;
        if let Some(group_id) = changes.group_id {
            if !tables.groups.contains_key(&group_id) {
                return Err(RepoError::Constraint("Unknown group".to_string()));
            }
        }
        let post = tables.posts.get_mut(&id).ok_or(RepoError::NotFound)?;
        post.text = changes.text;
        post.group_id = changes.group_id;
        Ok(post.clone())
    }
}
