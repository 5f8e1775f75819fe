//! The three node endpoints and their wire bodies.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A collaborator endpoint exposed by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET /id`
    Whoami,
    /// `GET /posts`
    ListPosts,
    /// `POST /post`
    CreatePost,
}

impl Endpoint {
    /// Path relative to the node's base URL.
    pub const fn path(&self) -> &'static str {
        match self {
            Endpoint::Whoami => "/id",
            Endpoint::ListPosts => "/posts",
            Endpoint::CreatePost => "/post",
        }
    }

    pub const fn method(&self) -> &'static str {
        match self {
            Endpoint::Whoami | Endpoint::ListPosts => "GET",
            Endpoint::CreatePost => "POST",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

/// Body of `POST /post`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostBody {
    pub body: String,
}

impl PostBody {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}
