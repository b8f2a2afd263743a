//! 遍历片段能力接口
//!
//! 两种形态的遍历函数：
//! - [`SubTraversal`]：`Traversal -> Traversal`，可组合的遍历片段，
//!   从左到右串联在入口遍历之后
//! - [`AnyTraversal`]：`&Source -> Traversal`，一次性给出完整遍历的函数
//!
//! 两者都为对应签名的闭包提供 blanket 实现，调用方可以直接传闭包，
//! 也可以用实现了这些 trait 的可复用片段类型（见 `library` 模块）。

use crate::traversal::{Traversal, TraversalSource};

/// 可组合的遍历片段
pub trait SubTraversal: Send + Sync {
    fn apply(&self, traversal: Traversal) -> Traversal;
}

impl<F> SubTraversal for F
where
    F: Fn(Traversal) -> Traversal + Send + Sync,
{
    fn apply(&self, traversal: Traversal) -> Traversal {
        self(traversal)
    }
}

/// 完整遍历函数
///
/// 直接从遍历源构造整条遍历，与片段链互斥（最后一次 `by` 调用生效）
pub trait AnyTraversal<S: TraversalSource>: Send + Sync {
    fn apply(&self, source: &S) -> Traversal;
}

impl<S, F> AnyTraversal<S> for F
where
    S: TraversalSource,
    F: Fn(&S) -> Traversal + Send + Sync,
{
    fn apply(&self, source: &S) -> Traversal {
        self(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_as_sub_traversal() {
        let fragment = |t: Traversal| t.has_label("person");
        let applied = SubTraversal::apply(&fragment, Traversal::v());
        assert_eq!(applied.to_string(), "V().hasLabel('person')");
    }
}
