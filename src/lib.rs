//! # Showcase (workflow toolkit example projects)
//!
//! `showcase` bundles the example projects of a developer workflow toolkit into
//! one binary:
//!
//! - **API service:** a demo REST API with `auth` and `users` route groups backed
//!   by mock data. Handlers only check that required body fields are present.
//! - **Route validator hook:** an advisory lint that scans a route file for a few
//!   literal substrings and prints warnings. It never fails the caller.
//! - **API client:** JSON fetch helpers used against the demo API.
//! - **Banners:** the welcome script and the landing page text.
//!
//! Nothing here is a real authentication system or database layer; responses
//! are static or echo the request.

pub mod api;
pub mod banner;
pub mod cli;
pub mod client;
pub mod hook;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }
}
