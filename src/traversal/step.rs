//! 步骤类型定义
//!
//! 可被禁用的遍历步骤类别。禁用列表通常用于在共享环境中
//! 屏蔽变更型步骤（例如 `drop`）。

use serde::{Deserialize, Serialize};

/// 遍历步骤类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StepType {
    AddV,
    AddE,
    Property,
    Drop,
    Select,
    Dedup,
    Limit,
    Count,
    Has,
    HasLabel,
    Out,
    In,
    Both,
    Values,
    As,
}

impl StepType {
    /// 获取步骤类型在遍历文本中的名称
    pub fn name(&self) -> &'static str {
        match self {
            StepType::AddV => "addV",
            StepType::AddE => "addE",
            StepType::Property => "property",
            StepType::Drop => "drop",
            StepType::Select => "select",
            StepType::Dedup => "dedup",
            StepType::Limit => "limit",
            StepType::Count => "count",
            StepType::Has => "has",
            StepType::HasLabel => "hasLabel",
            StepType::Out => "out",
            StepType::In => "in",
            StepType::Both => "both",
            StepType::Values => "values",
            StepType::As => "as",
        }
    }
}
