//! Post pages: listings, detail, and the create/edit forms.

use actix_web::{HttpResponse, web};
use serde::Deserialize;

use yatube_core::domain::{EditAccess, NewPost, Post, PostFilter};
use yatube_core::forms::{FormErrors, PostFormData};
use yatube_core::pagination::{Page, Paginator};
use yatube_shared::dto::{
    GroupContext, GroupResponse, IndexContext, PageResponse, PostDetailContext, PostFormContext,
    PostFormResponse, PostResponse, ProfileContext, UserResponse,
};

use super::{post_detail_url, profile_url, redirect};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<String>,
}

/// Resolve the requested page of `filter` and load only its rows.
async fn load_page(
    state: &AppState,
    filter: PostFilter,
    query: &PageQuery,
) -> AppResult<PageResponse<PostResponse>> {
    let count = state.posts.count(filter).await?;
    let window = Paginator::new(count, state.site.posts_per_page).get_page(query.page.as_deref());

    let items = if window.limit() == 0 {
        Vec::new()
    } else {
        state
            .posts
            .list(filter, window.offset(), window.limit())
            .await?
    };

    Ok(Page::new(items, window).into())
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page_obj = load_page(&state, PostFilter::All, &query).await?;

    Ok(HttpResponse::Ok().json(IndexContext { page_obj }))
}

/// GET /group/{slug}/
pub async fn group_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let slug = path.into_inner();
    let group = state
        .groups
        .find_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Group '{}' not found", slug)))?;

    let page_obj = load_page(&state, PostFilter::Group(group.id), &query).await?;

    Ok(HttpResponse::Ok().json(GroupContext {
        group: GroupResponse::from(&group),
        page_obj,
    }))
}

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let username = path.into_inner();
    let posts_owner = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;

    let page_obj = load_page(&state, PostFilter::Author(posts_owner.id), &query).await?;

    Ok(HttpResponse::Ok().json(ProfileContext {
        posts_owner: UserResponse::from(&posts_owner),
        page_obj,
    }))
}

/// GET /posts/{post_id}/
pub async fn post_detail(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let details = state
        .posts
        .find_details(post_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Post {} not found", post_id)))?;

    Ok(HttpResponse::Ok().json(PostDetailContext {
        post: details.into(),
    }))
}

/// Render the post form, bound to `data` when it came from a submission.
async fn form_page(
    state: &AppState,
    form: Option<(PostFormData, FormErrors)>,
    editing: Option<&Post>,
) -> AppResult<HttpResponse> {
    let groups = state.groups.list_all().await?;
    let form = match form {
        Some((data, errors)) => PostFormResponse::new(true, data, errors, &groups),
        None => {
            let initial = editing.map(PostFormData::from_post).unwrap_or_default();
            PostFormResponse::new(false, initial, FormErrors::default(), &groups)
        }
    };

    Ok(HttpResponse::Ok().json(PostFormContext {
        form,
        is_edit: editing.is_some(),
        post_id: editing.map(|p| p.id),
    }))
}

/// GET /create/
pub async fn post_create_form(
    _identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    form_page(&state, None, None).await
}

/// POST /create/
///
/// The author is always the requester.
pub async fn post_create(
    identity: Identity,
    state: web::Data<AppState>,
    form: web::Form<PostFormData>,
) -> AppResult<HttpResponse> {
    let data = form.into_inner();
    let groups = state.groups.list_all().await?;

    let changes = match data.clean(&groups) {
        Ok(changes) => changes,
        Err(errors) => return form_page(&state, Some((data, errors)), None).await,
    };

    let author = identity.user;
    let post = state
        .posts
        .create(NewPost::new(changes.text, author.id, changes.group_id))
        .await?;

    tracing::info!(post_id = post.id, author = %author.username, "Post created");
    Ok(redirect(&profile_url(&author.username)))
}

/// Apply the author-only guard, turning the short-circuit outcomes into responses.
async fn authorize_edit(
    state: &AppState,
    identity: &Identity,
    post_id: i32,
) -> AppResult<Result<Post, HttpResponse>> {
    let post = state.posts.find_by_id(post_id).await?;

    match EditAccess::check(post, identity.user.id) {
        EditAccess::NotFound => Err(AppError::NotFound(format!("Post {} not found", post_id))),
        EditAccess::Forbidden { post_id } => {
            tracing::debug!(post_id, user = %identity.user.username, "Edit by non-author redirected");
            Ok(Err(redirect(&post_detail_url(post_id))))
        }
        EditAccess::Proceed(post) => Ok(Ok(post)),
    }
}

/// GET /posts/{post_id}/edit/
pub async fn post_edit_form(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post = match authorize_edit(&state, &identity, path.into_inner()).await? {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    form_page(&state, None, Some(&post)).await
}

/// POST /posts/{post_id}/edit/
///
/// The body is only looked at once the requester is known to be the author.
pub async fn post_edit(
    identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    form: Result<web::Form<PostFormData>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    let post = match authorize_edit(&state, &identity, path.into_inner()).await? {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    let data = match form {
        Ok(form) => form.into_inner(),
        Err(e) => return Ok(e.error_response()),
    };
    let groups = state.groups.list_all().await?;
    let changes = match data.clean(&groups) {
        Ok(changes) => changes,
        Err(errors) => return form_page(&state, Some((data, errors)), Some(&post)).await,
    };

    let updated = state.posts.update(post.id, changes).await?;

    tracing::info!(post_id = updated.id, "Post updated");
    Ok(redirect(&post_detail_url(updated.id)))
}
