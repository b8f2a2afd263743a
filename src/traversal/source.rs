//! 遍历源与入口点
//!
//! [`TraversalSource`] 是底层遍历引擎的接口：接收描述性的遍历链，
//! 一次性急切地物化出 bulk/multiset 结果集合。
//! [`Source`] 是命名的遍历入口点工厂，每次终端调用后重置为默认值。

use serde::{Deserialize, Serialize};

use crate::core::{DBResult, RawValue};
use crate::traversal::Traversal;

/// 遍历引擎接口
///
/// 实现者持有到图引擎的连接/会话。`execute` 是阻塞调用，
/// 返回时结果已全部物化到内存，保留重复条目（不去重）。
pub trait TraversalSource: Send + Sync {
    /// 执行遍历并物化全部结果
    fn execute(&self, traversal: &Traversal) -> DBResult<Vec<RawValue>>;

    /// 关闭底层连接
    ///
    /// 关闭失败必须向上传播，不允许静默吞掉
    fn close(&self) -> DBResult<()>;
}

/// 命名的遍历入口点
///
/// 默认从所有顶点开始（`V`）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// 从所有顶点开始
    #[default]
    V,
    /// 从所有边开始
    E,
}

impl Source {
    /// 构造入口遍历
    pub fn apply(&self) -> Traversal {
        match self {
            Source::V => Traversal::v(),
            Source::E => Traversal::e(),
        }
    }
}
