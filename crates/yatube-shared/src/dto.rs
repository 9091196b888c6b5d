//! Data Transfer Objects - request types and the render contexts of each page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use yatube_core::domain::{Group, PostDetails, User};
use yatube_core::forms::{FieldMeta, FormErrors, GROUP_FIELD, POST_FORM_FIELDS, PostFormData};
use yatube_core::pagination::Page;

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub username: String,
}

/// Context of the login page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginPageContext {
    pub next: Option<String>,
}

/// A user's public information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupResponse {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub description: String,
}

impl From<&Group> for GroupResponse {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id,
            title: group.title.clone(),
            slug: group.slug.clone(),
            description: group.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i32,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author: UserResponse,
    pub group: Option<GroupResponse>,
}

impl From<PostDetails> for PostResponse {
    fn from(details: PostDetails) -> Self {
        Self {
            id: details.post.id,
            text: details.post.text,
            pub_date: details.post.pub_date,
            author: UserResponse::from(&details.author),
            group: details.group.as_ref().map(GroupResponse::from),
        }
    }
}

/// A page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub object_list: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub count: u64,
    pub per_page: u64,
    pub has_next: bool,
    pub has_previous: bool,
    pub start_index: u64,
    pub end_index: u64,
}

impl<T, U: Into<T>> From<Page<U>> for PageResponse<T> {
    fn from(page: Page<U>) -> Self {
        let w = page.window;
        Self {
            object_list: page.items.into_iter().map(Into::into).collect(),
            number: w.number,
            num_pages: w.num_pages,
            count: w.count,
            per_page: w.per_page,
            has_next: w.has_next(),
            has_previous: w.has_previous(),
            start_index: w.start_index(),
            end_index: w.end_index(),
        }
    }
}

/// `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexContext {
    pub page_obj: PageResponse<PostResponse>,
}

/// `GET /group/{slug}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupContext {
    pub group: GroupResponse,
    pub page_obj: PageResponse<PostResponse>,
}

/// `GET /profile/{username}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileContext {
    pub posts_owner: UserResponse,
    pub page_obj: PageResponse<PostResponse>,
}

/// `GET /posts/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailContext {
    pub post: PostResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceResponse {
    pub value: String,
    pub label: String,
}

/// A form field as a client needs it to draw the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormFieldResponse {
    pub name: String,
    pub label: String,
    pub help_text: String,
    pub kind: String,
    pub widget: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceResponse>,
}

impl FormFieldResponse {
    fn new(meta: &FieldMeta, choices: Vec<ChoiceResponse>) -> Self {
        Self {
            name: meta.name.to_string(),
            label: meta.label.to_string(),
            help_text: meta.help_text.to_string(),
            kind: meta.kind.as_str().to_string(),
            widget: meta.widget.as_str().to_string(),
            required: meta.required,
            choices,
        }
    }
}

/// State of the post form: values, errors and field descriptors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormResponse {
    pub is_bound: bool,
    pub data: PostFormData,
    pub errors: FormErrors,
    pub fields: Vec<FormFieldResponse>,
}

impl PostFormResponse {
    /// `groups` become the choices of the group field, after an empty choice.
    pub fn new(is_bound: bool, data: PostFormData, errors: FormErrors, groups: &[Group]) -> Self {
        let group_choices: Vec<ChoiceResponse> = std::iter::once(ChoiceResponse {
            value: String::new(),
            label: "---------".to_string(),
        })
        .chain(groups.iter().map(|g| ChoiceResponse {
            value: g.id.to_string(),
            label: g.to_string(),
        }))
        .collect();

        let fields = POST_FORM_FIELDS
            .iter()
            .map(|meta| {
                let choices = if meta.name == GROUP_FIELD.name {
                    group_choices.clone()
                } else {
                    Vec::new()
                };
                FormFieldResponse::new(meta, choices)
            })
            .collect();

        Self {
            is_bound,
            data,
            errors,
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FormFieldResponse> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// `GET|POST /create/` and `GET|POST /posts/{id}/edit/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostFormContext {
    pub form: PostFormResponse,
    pub is_edit: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<i32>,
}
