//! 可复用的遍历片段库
//!
//! 将常用的遍历步骤封装为实现了 [`SubTraversal`] 的值类型，
//! 方便在多个查询之间复用片段链。

use crate::traversal::{SubTraversal, Traversal};

/// `select` 片段：按一个或多个别名选取结果行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Select {
    aliases: Vec<String>,
}

impl Select {
    pub fn of(aliases: &[&str]) -> Self {
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl SubTraversal for Select {
    fn apply(&self, traversal: Traversal) -> Traversal {
        match self.aliases.as_slice() {
            [single] => traversal.select_one(single),
            many => traversal.select_many(many),
        }
    }
}

/// `hasLabel` 片段：按标签过滤
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HasLabel {
    label: String,
}

impl HasLabel {
    pub fn of(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl SubTraversal for HasLabel {
    fn apply(&self, traversal: Traversal) -> Traversal {
        traversal.has_label(&self.label)
    }
}

/// `count` 片段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count;

impl SubTraversal for Count {
    fn apply(&self, traversal: Traversal) -> Traversal {
        traversal.count()
    }
}

/// `drop` 片段：删除当前遍历到的元素
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Drop;

impl SubTraversal for Drop {
    fn apply(&self, traversal: Traversal) -> Traversal {
        traversal.drop()
    }
}
