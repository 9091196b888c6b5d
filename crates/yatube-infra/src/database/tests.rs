use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase};

use yatube_core::domain::{NewPost, Post, PostChanges, PostFilter};
use yatube_core::error::RepoError;
use yatube_core::ports::{BaseRepository, GroupRepository, PostRepository};

use crate::database::entity::{group, post, user};
use crate::database::postgres_repo::{PostgresGroupRepository, PostgresPostRepository};

fn user_model(id: i32, username: &str) -> user::Model {
    user::Model {
        id,
        username: username.to_owned(),
        password_hash: "hash".to_owned(),
        date_joined: Utc::now().into(),
    }
}

fn group_model(id: i32, slug: &str) -> group::Model {
    group::Model {
        id,
        title: format!("Group {slug}"),
        slug: slug.to_owned(),
        description: String::new(),
    }
}

fn post_model(id: i32, author_id: i32, group_id: Option<i32>) -> post::Model {
    post::Model {
        id,
        text: format!("text {id}"),
        author_id,
        group_id,
        pub_date: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(5, 1, None)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(5).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, 5);
    assert_eq!(post.text, "text 5");
    assert_eq!(post.group_id, None);
}

#[tokio::test]
async fn test_find_group_by_slug() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![group_model(2, "test_group")]])
        .append_query_results([Vec::<group::Model>::new()])
        .into_connection();

    let repo = PostgresGroupRepository::new(db);

    let found = repo.find_by_slug("test_group").await.unwrap().unwrap();
    assert_eq!(found.id, 2);
    assert_eq!(found.to_string(), "Group test_group");

    assert!(repo.find_by_slug("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_attaches_authors_and_groups() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(2, 1, Some(3)), post_model(1, 1, None)]])
        .append_query_results([vec![user_model(1, "author")]])
        .append_query_results([vec![group_model(3, "cats")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let details = repo.list(PostFilter::All, 0, 10).await.unwrap();

    assert_eq!(details.len(), 2);
    assert_eq!(details[0].author.username, "author");
    assert_eq!(details[0].group.as_ref().unwrap().slug, "cats");
    assert!(details[1].group.is_none());
}

#[tokio::test]
async fn test_list_empty_page_skips_relation_queries() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let details = repo.list(PostFilter::Author(9), 0, 10).await.unwrap();
    assert!(details.is_empty());
}

#[tokio::test]
async fn test_create_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(11, 4, Some(2))]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let created = repo
        .create(NewPost::new("text 11".to_string(), 4, Some(2)))
        .await
        .unwrap();

    assert_eq!(created.id, 11);
    assert_eq!(created.author_id, 4);
    assert_eq!(created.group_id, Some(2));
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result = repo
        .update(
            404,
            PostChanges {
                text: "new".to_string(),
                group_id: None,
            },
        )
        .await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}
