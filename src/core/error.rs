//! 统一错误处理系统
//!
//! ## 设计理念
//!
//! 1. **分层转换**：查询层错误使用 `#[from]` 注解自动转换为顶层错误，
//!    保留完整错误信息
//! 2. **统一接口**：`DBResult<T>` 提供统一的返回类型，简化错误传播
//! 3. **携带上下文**：每个错误变体携带足够的上下文来定位出错的查询
//!    （例如匹配到的被禁用步骤名、实际结果行数）

use thiserror::Error;

/// 统一的顶层错误类型
#[derive(Error, Debug)]
pub enum DBError {
    #[error("查询错误: {0}")]
    Query(#[from] QueryError),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 查询执行错误
///
/// 覆盖对象查询管道的所有失败路径：遍历未配置、禁用步骤、
/// 结果数量不符、对象转换失败以及底层引擎执行失败。
#[derive(Error, Debug)]
pub enum QueryError {
    /// 终端方法被调用时既没有完整遍历函数也没有片段链
    #[error("未指定遍历: 在调用终端方法之前必须先调用 by")]
    NoTraversalSpecified,

    /// 构造出的遍历文本中出现了被禁用的步骤名
    #[error("查询了被禁用的步骤: {0}")]
    DisabledStepQueried(String),

    /// `one` 的结果行数不是恰好一行
    #[error("结果数量不符合预期: 期望 {expected} 行, 实际 {actual} 行")]
    UnexpectedResultCount { expected: usize, actual: usize },

    /// 原始图值无法映射到目标类型
    #[error("对象转换失败: {0}")]
    Conversion(String),

    /// 底层遍历引擎执行失败
    #[error("遍历引擎执行失败: {0}")]
    ExecutionError(String),
}

/// 统一的返回类型
pub type DBResult<T> = Result<T, DBError>;
