//! Greedy grouping of pending tasks by their dominant hashtag.
//!
//! A single pass ([`dominant_tag_cover`]) repeatedly picks the most frequent
//! tag in the working set, claims every task carrying it, and repeats until
//! no tagged task is left. [`group_by_tags`] applies that pass twice (the
//! second time inside each level-1 group, skipping the group's own tag) and
//! then flattens level-2 results that hold a single bucket.

use crate::UNGROUPED;
use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\S+)").expect("tag regex"));

/// Hashtag labels in `text`, `#` stripped, first occurrence order, no repeats.
pub fn extract_tags(text: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    TAG.captures_iter(text)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Result of one dominant-tag pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cover {
    /// Tags in the order they were picked, each with every task it claimed.
    pub groups: Vec<(String, Vec<String>)>,
    /// Tasks no tag claimed. Always present when `groups` is empty.
    pub ungrouped: Option<Vec<String>>,
}

impl Cover {
    fn bucket_count(&self) -> usize {
        self.groups.len() + usize::from(self.ungrouped.is_some())
    }
}

struct TagCount<'a> {
    tag: &'a str,
    count: usize,
    members: Vec<&'a str>,
}

/// Count tags over `tasks` in iteration order. The returned vector keeps the
/// order in which each tag was first seen.
fn count_tags<'a>(tasks: &[&'a str], skip: Option<&str>) -> Vec<TagCount<'a>> {
    let mut counts: Vec<TagCount<'a>> = Vec::new();
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    for &task in tasks {
        for tag in extract_tags(task) {
            if Some(tag) == skip {
                continue;
            }
            let idx = *slot.entry(tag).or_insert_with(|| {
                counts.push(TagCount {
                    tag,
                    count: 0,
                    members: Vec::new(),
                });
                counts.len() - 1
            });
            counts[idx].count += 1;
            counts[idx].members.push(task);
        }
    }
    counts
}

/// One level of greedy grouping over `tasks`.
///
/// Ties on frequency go to the tag seen first. `skip` is never picked.
/// Duplicate task strings in the input are collapsed.
pub fn dominant_tag_cover(tasks: &[String], skip: Option<&str>) -> Cover {
    let mut seen = HashSet::new();
    let mut remaining: Vec<&str> = tasks
        .iter()
        .map(String::as_str)
        .filter(|t| seen.insert(*t))
        .collect();
    let mut groups = Vec::new();

    loop {
        let counts = count_tags(&remaining, skip);
        let mut best: Option<&TagCount<'_>> = None;
        for c in &counts {
            if best.is_none_or(|b| c.count > b.count) {
                best = Some(c);
            }
        }
        let Some(best) = best else { break };

        let claimed: HashSet<&str> = best.members.iter().copied().collect();
        groups.push((
            best.tag.to_string(),
            best.members.iter().map(|t| t.to_string()).collect(),
        ));
        remaining.retain(|t| !claimed.contains(t));
    }

    let ungrouped = if !remaining.is_empty() || groups.is_empty() {
        Some(remaining.into_iter().map(String::from).collect())
    } else {
        None
    };
    Cover { groups, ungrouped }
}

/// A node of the grouping hierarchy: either a flat task list or a further
/// split by tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagGroup {
    Leaf(Vec<String>),
    Node(TagNode),
}

/// Tag-labelled children plus the optional `_` bucket, in pick order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNode {
    pub groups: Vec<(String, TagGroup)>,
    pub ungrouped: Option<Vec<String>>,
}

impl TagNode {
    pub fn get(&self, tag: &str) -> Option<&TagGroup> {
        self.groups.iter().find(|(t, _)| t == tag).map(|(_, g)| g)
    }

    /// Bucket labels in order, `_` last when present.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.groups.iter().map(|(t, _)| t.as_str()).collect();
        if self.ungrouped.is_some() {
            keys.push(UNGROUPED);
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.ungrouped.as_ref().is_none_or(|u| u.is_empty())
    }

    /// Every task at every depth, `_` buckets included.
    pub fn tasks(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        if let Some(u) = &self.ungrouped {
            out.extend(u.iter().map(String::as_str));
        }
        for (_, group) in &self.groups {
            match group {
                TagGroup::Leaf(items) => out.extend(items.iter().map(String::as_str)),
                TagGroup::Node(node) => out.extend(node.tasks()),
            }
        }
        out
    }
}

impl From<Cover> for TagNode {
    fn from(cover: Cover) -> Self {
        TagNode {
            groups: cover
                .groups
                .into_iter()
                .map(|(t, items)| (t, TagGroup::Leaf(items)))
                .collect(),
            ungrouped: cover.ungrouped,
        }
    }
}

/// Collapse a level-2 cover holding exactly one bucket into that bucket's list.
fn nest(cover: Cover) -> TagGroup {
    if cover.bucket_count() == 1 {
        let items = match cover.ungrouped {
            Some(items) => items,
            None => cover
                .groups
                .into_iter()
                .next()
                .map(|(_, items)| items)
                .unwrap_or_default(),
        };
        return TagGroup::Leaf(items);
    }
    TagGroup::Node(cover.into())
}

/// Two-level grouping of a pending set.
pub fn group_by_tags(tasks: &[String]) -> TagNode {
    let top = dominant_tag_cover(tasks, None);
    let groups = top
        .groups
        .into_iter()
        .map(|(tag, items)| {
            let sub = dominant_tag_cover(&items, Some(tag.as_str()));
            (tag, nest(sub))
        })
        .collect();
    TagNode {
        groups,
        ungrouped: top.ungrouped,
    }
}

// ── JSON shape: leaves are arrays, nodes are objects keyed by tag and `_` ──

impl Serialize for TagGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            TagGroup::Leaf(items) => items.serialize(serializer),
            TagGroup::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for TagNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.groups.len() + usize::from(self.ungrouped.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (tag, group) in &self.groups {
            map.serialize_entry(tag, group)?;
        }
        if let Some(u) = &self.ungrouped {
            map.serialize_entry(UNGROUPED, u)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(items: &[&str]) -> Vec<String> {
        items.iter().map(|i| i.to_string()).collect()
    }

    fn leaf(items: &[&str]) -> TagGroup {
        TagGroup::Leaf(s(items))
    }

    #[test]
    fn extract_tags_strips_hash_and_dedups() {
        assert_eq!(extract_tags("#a x #b y #a"), vec!["a", "b"]);
        assert_eq!(extract_tags("no tags here"), Vec::<&str>::new());
        assert_eq!(extract_tags("mail#inbox"), vec!["inbox"]);
        assert_eq!(extract_tags("lone # sign"), Vec::<&str>::new());
    }

    #[test]
    fn cover_picks_most_frequent_tag() {
        let cover = dominant_tag_cover(&s(&["#a x1", "#a x2", "#b x3"]), None);
        // #b is picked in the second round; nothing is left over.
        assert_eq!(
            cover.groups,
            vec![
                ("a".to_string(), s(&["#a x1", "#a x2"])),
                ("b".to_string(), s(&["#b x3"])),
            ]
        );
        assert_eq!(cover.ungrouped, None);
    }

    #[test]
    fn cover_leaves_untagged_in_ungrouped() {
        let cover = dominant_tag_cover(&s(&["#a x1", "#a x2", "plain x3"]), None);
        assert_eq!(cover.groups, vec![("a".to_string(), s(&["#a x1", "#a x2"]))]);
        assert_eq!(cover.ungrouped, Some(s(&["plain x3"])));
    }

    #[test]
    fn cover_tie_goes_to_first_seen_tag() {
        let cover = dominant_tag_cover(&s(&["#b x1", "#a x2"]), None);
        assert_eq!(cover.groups[0], ("b".to_string(), s(&["#b x1"])));
        assert_eq!(cover.groups[1], ("a".to_string(), s(&["#a x2"])));
    }

    #[test]
    fn cover_claims_all_tasks_with_tag() {
        // #work wins (3) and takes the task that also carries #home.
        let input = s(&["#work a", "#work #home b", "#work c", "#home d", "#home e"]);
        let cover = dominant_tag_cover(&input, None);
        assert_eq!(
            cover.groups,
            vec![
                ("work".to_string(), s(&["#work a", "#work #home b", "#work c"])),
                ("home".to_string(), s(&["#home d", "#home e"])),
            ]
        );
    }

    #[test]
    fn cover_without_tags_always_has_ungrouped() {
        let cover = dominant_tag_cover(&s(&["x", "y"]), None);
        assert!(cover.groups.is_empty());
        assert_eq!(cover.ungrouped, Some(s(&["x", "y"])));

        let empty = dominant_tag_cover(&[], None);
        assert_eq!(empty.ungrouped, Some(Vec::new()));
    }

    #[test]
    fn cover_skip_is_never_picked() {
        let cover = dominant_tag_cover(&s(&["#work #urgent t1", "#work t2"]), Some("work"));
        assert_eq!(cover.groups, vec![("urgent".to_string(), s(&["#work #urgent t1"]))]);
        assert_eq!(cover.ungrouped, Some(s(&["#work t2"])));
    }

    #[test]
    fn cover_repeated_tag_in_one_task_counts_once() {
        let cover = dominant_tag_cover(&s(&["#a #a t1", "#b t2", "#b t3"]), None);
        assert_eq!(cover.groups[0].0, "b");
        assert_eq!(cover.groups[1], ("a".to_string(), s(&["#a #a t1"])));
    }

    #[test]
    fn group_collapses_single_bucket_level_two() {
        // Level 2 of `a` finds no other tag: only `_` remains, flattened.
        let node = group_by_tags(&s(&["#a x1", "#a x2", "#b x3"]));
        assert_eq!(node.get("a"), Some(&leaf(&["#a x1", "#a x2"])));
        assert_eq!(node.get("b"), Some(&leaf(&["#b x3"])));
        assert_eq!(node.ungrouped, None);
    }

    #[test]
    fn group_collapses_single_real_subtag() {
        let node = group_by_tags(&s(&["#a #c x1", "#a #c x2"]));
        assert_eq!(node.keys(), vec!["a"]);
        assert_eq!(node.get("a"), Some(&leaf(&["#a #c x1", "#a #c x2"])));
    }

    #[test]
    fn group_keeps_two_level_split() {
        let node = group_by_tags(&s(&["#work #urgent t1", "#work t2", "#work t3", "idle"]));
        assert_eq!(node.keys(), vec!["work", "_"]);
        let expected = TagNode {
            groups: vec![("urgent".to_string(), leaf(&["#work #urgent t1"]))],
            ungrouped: Some(s(&["#work t2", "#work t3"])),
        };
        assert_eq!(node.get("work"), Some(&TagGroup::Node(expected)));
        assert_eq!(node.ungrouped, Some(s(&["idle"])));
    }

    #[test]
    fn group_is_complete_without_duplicates() {
        let input = s(&[
            "#p1 #ctx a",
            "#p1 b",
            "#p2 #ctx c",
            "#ctx d",
            "#p2 e",
            "f",
            "#p1 #p2 #x g",
            "#x #y h",
        ]);
        let node = group_by_tags(&input);
        let mut got: Vec<&str> = node.tasks();
        got.sort_unstable();
        let mut want: Vec<&str> = input.iter().map(String::as_str).collect();
        want.sort_unstable();
        assert_eq!(got, want);
    }

    #[test]
    fn group_of_untagged_set_is_root_bucket_only() {
        let node = group_by_tags(&s(&["buy milk"]));
        assert!(node.groups.is_empty());
        assert_eq!(node.ungrouped, Some(s(&["buy milk"])));
    }

    #[test]
    fn serializes_like_nested_maps() {
        let node = group_by_tags(&s(&["#work #urgent t1", "#work t2", "#home t3", "idle"]));
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "work": { "urgent": ["#work #urgent t1"], "_": ["#work t2"] },
                "home": ["#home t3"],
                "_": ["idle"],
            })
        );
    }
}
