// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Predicates deciding which normalized entities reach a feed.
//!
//! The rules inspect disjoint fields and are independent of each other, so
//! the order in which a feed applies them never changes its result set.

use crate::model::{Release, Repo};

/// Returns `true` for the profile repository `login/login`.
///
/// GitHub logins are case-insensitive, so the comparison ignores ASCII case.
///
/// # Examples
///
/// ```
/// use markscribe::is_meta_repository;
///
/// assert!(is_meta_repository("alice/alice", "alice"));
/// assert!(is_meta_repository("Alice/alice", "alice"));
/// assert!(!is_meta_repository("alice/dotfiles", "alice"));
/// assert!(!is_meta_repository("bob/alice", "alice"));
/// ```
pub fn is_meta_repository(name_with_owner: &str, login: &str,) -> bool
{
    match name_with_owner.split_once('/',) {
        Some((owner, name,),) => {
            !login.is_empty() && owner.eq_ignore_ascii_case(login,) && name.eq_ignore_ascii_case(login,)
        }
        None => false,
    }
}

/// Returns `true` when the repository is publicly visible.
pub fn is_public(repo: &Repo,) -> bool
{
    !repo.is_private
}

/// Returns `true` for releases that may be attached to a repository.
///
/// Drafts, prereleases, releases without a tag and releases that were never
/// published are rejected.
pub fn is_valid_release(release: &Release,) -> bool
{
    !release.is_draft
        && !release.is_prerelease
        && !release.tag_name.is_empty()
        && release.published_at.is_some()
}

/// Combined rule for feeds built from cross-cutting activity queries, where
/// the upstream query does not constrain visibility on its own.
pub fn is_public_activity(repo: &Repo, login: &str,) -> bool
{
    is_public(repo,) && !is_meta_repository(&repo.name_with_owner, login,)
}
