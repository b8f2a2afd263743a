//! 遍历模块
//!
//! 包含描述性的遍历链构造器、步骤类型枚举、遍历引擎接口、
//! 入口点工厂以及可组合的遍历片段能力接口。
//!
//! 这里的 [`Traversal`] 只是对遍历的描述（步骤链数据），
//! 真正的图遍历由注入的 [`TraversalSource`] 实现执行。

pub mod functions;
pub mod library;
pub mod source;
pub mod step;

pub use functions::{AnyTraversal, SubTraversal};
pub use source::{Source, TraversalSource};
pub use step::StepType;

use std::fmt;

/// 遍历中的单个步骤
///
/// 参数以渲染好的文本片段存储，例如字符串字面量带单引号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    name: String,
    args: Vec<String>,
}

impl Step {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.args.join(", "))
    }
}

/// 描述性的遍历链
///
/// 由入口步骤加上后续步骤组成，从左到右依次应用。
/// 文本形式（`Display`）用于禁用步骤的子串检查；
/// [`Traversal::has_step`] 提供基于步骤描述符的结构化检查变体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    steps: Vec<Step>,
}

impl Traversal {
    /// 从所有顶点开始的遍历
    pub fn v() -> Self {
        Self {
            steps: vec![Step::new("V", vec![])],
        }
    }

    /// 从所有边开始的遍历
    pub fn e() -> Self {
        Self {
            steps: vec![Step::new("E", vec![])],
        }
    }

    /// 追加任意步骤
    pub fn step(mut self, name: impl Into<String>, args: Vec<String>) -> Self {
        self.steps.push(Step::new(name, args));
        self
    }

    pub fn has_label(self, label: &str) -> Self {
        self.step("hasLabel", vec![quote(label)])
    }

    pub fn has(self, key: &str, value: &str) -> Self {
        self.step("has", vec![quote(key), quote(value)])
    }

    pub fn out(self, label: &str) -> Self {
        self.step("out", vec![quote(label)])
    }

    pub fn in_(self, label: &str) -> Self {
        self.step("in", vec![quote(label)])
    }

    pub fn both(self, label: &str) -> Self {
        self.step("both", vec![quote(label)])
    }

    pub fn values(self, key: &str) -> Self {
        self.step("values", vec![quote(key)])
    }

    /// 为遍历的当前位置打上别名
    pub fn as_(self, alias: &str) -> Self {
        self.step("as", vec![quote(alias)])
    }

    pub fn select_one(self, alias: &str) -> Self {
        self.step("select", vec![quote(alias)])
    }

    pub fn select_many(self, aliases: &[String]) -> Self {
        self.step("select", aliases.iter().map(|a| quote(a)).collect())
    }

    pub fn dedup(self) -> Self {
        self.step("dedup", vec![])
    }

    pub fn limit(self, count: usize) -> Self {
        self.step("limit", vec![count.to_string()])
    }

    pub fn count(self) -> Self {
        self.step("count", vec![])
    }

    pub fn drop(self) -> Self {
        self.step("drop", vec![])
    }

    pub fn add_v(self, label: &str) -> Self {
        self.step("addV", vec![quote(label)])
    }

    pub fn property(self, key: &str, value: &str) -> Self {
        self.step("property", vec![quote(key), quote(value)])
    }

    /// 步骤描述符序列（结构化形式）
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// 结构化检查：遍历中是否包含指定类型的步骤
    ///
    /// 与引擎使用的文本子串检查不同，这里按步骤名精确匹配
    pub fn has_step(&self, step_type: StepType) -> bool {
        self.steps
            .iter()
            .any(|step| step.name.eq_ignore_ascii_case(step_type.name()))
    }
}

impl fmt::Display for Traversal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.steps.iter().map(Step::to_string).collect();
        write!(f, "{}", rendered.join("."))
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text)
}
