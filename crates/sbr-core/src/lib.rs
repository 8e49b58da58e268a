pub mod group;
pub mod render;
pub mod task;

pub use group::{dominant_tag_cover, extract_tags, group_by_tags, Cover, TagGroup, TagNode};
pub use task::{classify_line, reconcile, task_key, CheckboxState, Task};

/// Label of the bucket holding tasks no tag claimed.
pub const UNGROUPED: &str = "_";
