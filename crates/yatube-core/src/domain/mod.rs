//! Domain entities - the core business objects.

mod access;
mod group;
mod post;
mod user;

pub use access::EditAccess;
pub use group::{Group, NewGroup};
pub use post::{NewPost, Post, PostChanges, PostDetails, PostFilter};
pub use user::{NewUser, User};
