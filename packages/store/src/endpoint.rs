//! Routes of the poll backend.
//!
//! Both [`crate::MemoryStore`] and the HTTP client derive their method and path
//! from [`Endpoint`], so recorded calls and real requests agree.

use std::fmt;

/// HTTP verb of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    ListPolls,
    CreatePoll,
    DeletePoll(String),
    UpdateOption(String),
    ListUsers,
    CreateUser,
    DeleteUser(String),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::ListPolls | Endpoint::ListUsers => Method::Get,
            Endpoint::CreatePoll | Endpoint::CreateUser => Method::Post,
            Endpoint::UpdateOption(_) => Method::Put,
            Endpoint::DeletePoll(_) | Endpoint::DeleteUser(_) => Method::Delete,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::ListPolls => "/polls".to_string(),
            Endpoint::CreatePoll => "/polls/create".to_string(),
            Endpoint::DeletePoll(id) => format!("/polls/{id}"),
            Endpoint::UpdateOption(id) => format!("/options/{id}"),
            Endpoint::ListUsers => "/users".to_string(),
            Endpoint::CreateUser => "/users/create".to_string(),
            Endpoint::DeleteUser(id) => format!("/users/{id}"),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method().as_str(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::DeletePoll("7".into()).path(), "/polls/7");
        assert_eq!(Endpoint::UpdateOption("12".into()).path(), "/options/12");
        assert_eq!(Endpoint::CreateUser.to_string(), "POST /users/create");
        assert_eq!(Endpoint::DeleteUser("3".into()).method(), Method::Delete);
    }
}
