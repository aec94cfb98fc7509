//! Pairing of link-family tags, e.g. `Conditional` with `EndConditional`.
//!
//! Tags of one family nest like brackets. Matching runs at two scopes: once
//! within each paragraph over its tags, and once across the document over
//! tags that make up a whole paragraph on their own.

use crate::grammar::{LinkRole, TagGrammar};
use crate::tags::{MergeTag, TagError, TagErrorKind};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    /// Tags within one paragraph.
    Inline,
    /// Solo tags across paragraphs.
    Paragraph,
}

impl fmt::Display for LinkScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkScope::Inline => f.write_str("inline"),
            LinkScope::Paragraph => f.write_str("paragraph-level"),
        }
    }
}

/// Match open and close tags left to right, one stack per family.
///
/// Matched pairs are linked to each other. Every family member left
/// unmatched gets an `UnmatchedOpenTag` or `UnmatchedCloseTag` error. A close
/// with nothing open stays unmatched; a later open never pairs with it. Tags
/// outside every family are ignored.
pub fn match_links<'t>(
    grammar: &TagGrammar,
    candidates: impl IntoIterator<Item = &'t mut MergeTag>,
    scope: LinkScope,
) {
    let mut tags: Vec<&mut MergeTag> = candidates.into_iter().collect();
    let mut open: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut unmatched: Vec<(usize, LinkRole)> = Vec::new();

    for i in 0..tags.len() {
        let Some(member) = tags[i]
            .tag_type
            .as_deref()
            .and_then(|t| grammar.link_member(t))
        else {
            continue;
        };
        let stack = open.entry(member.family.as_str()).or_default();

        match member.role {
            LinkRole::Open => stack.push(i),
            LinkRole::Close => match stack.pop() {
                Some(j) => {
                    let (open_id, close_id) = (tags[j].id, tags[i].id);
                    log::trace!("{scope} link {open_id:?} <-> {close_id:?}");
                    tags[j].link_to(close_id);
                    tags[i].link_to(open_id);
                }
                None => unmatched.push((i, LinkRole::Close)),
            },
        }
    }

    unmatched.extend(
        open.into_values()
            .flatten()
            .map(|i| (i, LinkRole::Open)),
    );
    unmatched.sort_unstable_by_key(|&(i, _)| i);

    for (i, role) in unmatched {
        let tag = &mut tags[i];
        let kind = match role {
            LinkRole::Open => TagErrorKind::UnmatchedOpenTag,
            LinkRole::Close => TagErrorKind::UnmatchedCloseTag,
        };
        let tag_type = tag.tag_type.clone().unwrap_or_default();
        log::debug!("unmatched {scope} {tag_type} tag {:?}", tag.id);
        tag.error = Some(TagError::unmatched(kind, &tag_type, &scope.to_string()));
    }
}
