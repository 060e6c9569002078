// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Cursor-based pagination over paged GraphQL connections.
//!
//! The walker trusts the upstream exhaustion signal (a page without edges)
//! but refuses to follow a cursor it has already seen, so a non-monotonic
//! upstream cursor cannot trap it in an endless loop.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::Error;

/// Hard upper bound on the number of pages fetched by a single walk.
pub const MAX_PAGES: usize = 100;

/// One page returned by a paged fetch.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Page<T,>
{
    /// Items of the page, in upstream order.
    pub edges:       Vec<T,>,
    /// Cursor to resume after this page, usually the last edge cursor.
    pub next_cursor: Option<String,>,
}

impl<T,> Page<T,>
{
    /// Creates a page from its edges and continuation cursor.
    pub fn new(edges: Vec<T,>, next_cursor: Option<String,>,) -> Self
    {
        Self {
            edges,
            next_cursor,
        }
    }
}

/// Repeatedly invokes `fetch`, starting with no cursor, and concatenates the
/// edges of every page.
///
/// The walk ends when a page has no edges, when a page carries no cursor,
/// when a cursor repeats, or after [`MAX_PAGES`] pages. The first error
/// aborts the walk and is returned as-is; no partial result is produced.
///
/// # Errors
///
/// Propagates the first error returned by `fetch`.
///
/// # Example
///
/// ```
/// use markscribe::{Page, walk_pages};
///
/// let pages = vec![vec![1, 2], vec![3], vec![]];
/// let collected = walk_pages(|cursor| {
///     let index = cursor.map_or(0, |c| c.parse::<usize>().unwrap());
///     let next = Some((index + 1).to_string());
///     Ok(Page::new(pages[index].clone(), next))
/// })?;
/// assert_eq!(collected, vec![1, 2, 3]);
/// # Ok::<(), markscribe::Error>(())
/// ```
pub fn walk_pages<T, F,>(mut fetch: F,) -> Result<Vec<T,>, Error,>
where
    F: FnMut(Option<&str,>,) -> Result<Page<T,>, Error,>,
{
    let mut collected = Vec::new();
    let mut seen = HashSet::new();
    let mut cursor: Option<String,> = None;

    for page_number in 1..=MAX_PAGES {
        let page = fetch(cursor.as_deref(),)?;
        if page.edges.is_empty() {
            debug!("Page {} is empty, pagination finished", page_number);
            return Ok(collected,);
        }

        collected.extend(page.edges,);

        match page.next_cursor {
            Some(next,) if seen.insert(next.clone(),) => cursor = Some(next,),
            Some(next,) => {
                warn!("Cursor {} repeated on page {}, stopping pagination", next, page_number);
                return Ok(collected,);
            }
            None => return Ok(collected,),
        }
    }

    warn!("Stopped pagination after {} pages", MAX_PAGES);
    Ok(collected,)
}

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn walker_concatenates_pages_until_empty_page()
    {
        let pages = vec![vec!["a", "b"], vec!["c"], vec!["d", "e"], vec![]];
        let mut cursors = Vec::new();

        let collected = walk_pages(|cursor| {
            cursors.push(cursor.map(str::to_owned,),);
            let index = cursors.len() - 1;
            Ok(Page::new(pages[index].clone(), Some(format!("c{index}"),),),)
        },)
        .expect("walk succeeded",);

        assert_eq!(collected, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(
            cursors,
            vec![None, Some("c0".to_owned()), Some("c1".to_owned()), Some("c2".to_owned())]
        );
    }

    #[test]
    fn walker_aborts_on_first_error()
    {
        let mut calls = 0;
        let result = walk_pages::<u8, _,>(|_| {
            calls += 1;
            if calls == 2 {
                Err(Error::transport("GitHub", "boom",),)
            } else {
                Ok(Page::new(vec![1], Some(format!("c{calls}"),),),)
            }
        },);

        assert!(matches!(result, Err(Error::Transport { .. })));
        assert_eq!(calls, 2);
    }

    #[test]
    fn walker_stops_on_repeated_cursor()
    {
        let mut calls = 0;
        let collected = walk_pages(|_| {
            calls += 1;
            Ok(Page::new(vec![calls], Some("same".to_owned(),),),)
        },)
        .expect("walk succeeded",);

        assert_eq!(collected, vec![1, 2]);
    }

    #[test]
    fn walker_stops_when_cursor_is_missing()
    {
        let collected =
            walk_pages(|_| Ok(Page::new(vec![7], None,),),).expect("walk succeeded",);
        assert_eq!(collected, vec![7]);
    }

    #[test]
    fn walker_is_bounded()
    {
        let mut calls = 0usize;
        let collected = walk_pages(|_| {
            calls += 1;
            Ok(Page::new(vec![calls], Some(calls.to_string(),),),)
        },)
        .expect("walk succeeded",);

        assert_eq!(collected.len(), MAX_PAGES);
    }
}
