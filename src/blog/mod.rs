//! Blog posts for Quillpost.
//!
//! A post belongs to exactly one user and is immutable once written. The
//! public feed lists every post with its author's nickname, newest first.

mod post;
mod repository;

pub use post::{NewPost, Post, PostWithAuthor};
pub use repository::PostRepository;
