//! 对象查询执行引擎
//!
//! [`ObjectQuery`] 持有遍历源的句柄，通过 `by` 系列方法累积遍历描述，
//! 在终端方法（`one`/`optional`/`list`/`none`/`select`）被调用时
//! 构造出完整遍历、做禁用步骤检查、对引擎执行恰好一次、
//! 把原始结果转换为目标类型，最后无条件重置配置状态，
//! 使同一实例可以直接用于下一次查询。
//!
//! 状态重置覆盖所有退出路径（成功与失败），但禁用步骤列表
//! 和持有的遍历源句柄跨重置保留。

use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::core::{DBResult, QueryError, RawValue};
use crate::parser;
use crate::query::selections::{Selection, Selections};
use crate::traversal::{AnyTraversal, Source, StepType, SubTraversal, Traversal, TraversalSource};

/// 默认的慢查询告警阈值（毫秒）
const DEFAULT_SLOW_QUERY_MS: u64 = 1000;

/// 遍历配置的带标签变体
///
/// 最近一次 `by` 调用整体替换该变体，因此完整遍历函数与片段链
/// 的互斥性在类型层面是显式的：设置一种即清除另一种。
pub enum TraversalSpec<S: TraversalSource> {
    /// 尚未配置遍历
    Empty,
    /// 单个完整遍历函数
    Full(Box<dyn AnyTraversal<S>>),
    /// 有序的片段链，从配置的入口点开始从左到右应用
    Chain(Vec<Box<dyn SubTraversal>>),
}

impl<S: TraversalSource> fmt::Debug for TraversalSpec<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalSpec::Empty => write!(f, "Empty"),
            TraversalSpec::Full(_) => write!(f, "Full"),
            TraversalSpec::Chain(fragments) => write!(f, "Chain({})", fragments.len()),
        }
    }
}

/// 对象查询执行引擎
pub struct ObjectQuery<S: TraversalSource> {
    g: Arc<S>,
    spec: TraversalSpec<S>,
    disabled_steps: Vec<StepType>,
    selections: Option<Selections>,
    source: Source,
    slow_query_ms: u64,
}

impl<S: TraversalSource> fmt::Debug for ObjectQuery<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectQuery")
            .field("spec", &self.spec)
            .field("disabled_steps", &self.disabled_steps)
            .field("source", &self.source)
            .finish()
    }
}

impl<S: TraversalSource> ObjectQuery<S> {
    pub fn new(g: Arc<S>) -> Self {
        Self {
            g,
            spec: TraversalSpec::Empty,
            disabled_steps: Vec::new(),
            selections: None,
            source: Source::default(),
            slow_query_ms: DEFAULT_SLOW_QUERY_MS,
        }
    }

    /// 替换禁用步骤列表
    ///
    /// 与遍历配置不同，禁用列表跨状态重置保留
    pub fn disable(&mut self, steps: &[StepType]) -> &mut Self {
        self.disabled_steps = steps.to_vec();
        self
    }

    pub fn disabled_steps(&self) -> &[StepType] {
        &self.disabled_steps
    }

    /// 设置慢查询告警阈值（毫秒）
    pub fn set_slow_query_ms(&mut self, threshold_ms: u64) -> &mut Self {
        self.slow_query_ms = threshold_ms;
        self
    }

    /// 设置单个完整遍历函数，替换之前的任何遍历配置
    pub fn by_traversal(&mut self, traversal: impl AnyTraversal<S> + 'static) -> &mut Self {
        self.spec = TraversalSpec::Full(Box::new(traversal));
        self
    }

    /// 设置有序的片段链，替换之前的任何遍历配置
    pub fn by(&mut self, fragments: Vec<Box<dyn SubTraversal>>) -> &mut Self {
        self.spec = TraversalSpec::Chain(fragments);
        self
    }

    /// 设置单片段的链
    pub fn by_one(&mut self, fragment: impl SubTraversal + 'static) -> &mut Self {
        self.by(vec![Box::new(fragment)])
    }

    /// 声明别名的结果类型，供 `select` 转换时使用
    ///
    /// 对应遍历里 `select` 步骤引用的别名；重复声明时最后一次生效。
    /// 按需惰性创建 Selections 容器。
    pub fn alias<T>(&mut self, name: impl Into<String>) -> &mut Self
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.selections
            .get_or_insert_with(Selections::new)
            .declare::<T>(name);
        self
    }

    /// 覆盖下一次执行的遍历入口点
    ///
    /// 仅对下一次终端调用生效，之后重置回默认的 `V`
    pub fn source(&mut self, source: Source) -> &mut Self {
        self.source = source;
        self
    }

    /// 执行并期望恰好一行结果
    pub fn one<T>(&mut self) -> DBResult<T>
    where
        T: DeserializeOwned,
    {
        let outcome = self.fetch_list::<T>();
        self.reset();
        let mut rows = outcome?;
        if rows.len() != 1 {
            return Err(QueryError::UnexpectedResultCount {
                expected: 1,
                actual: rows.len(),
            }
            .into());
        }
        Ok(rows.remove(0))
    }

    /// `one` 的恢复版本：任何失败都映射为 None
    ///
    /// 刻意宽泛：空结果、多行结果、转换失败和引擎失败一视同仁
    pub fn optional<T>(&mut self) -> Option<T>
    where
        T: DeserializeOwned,
    {
        self.one().ok()
    }

    /// 执行并将每个原始结果条目转换为目标类型
    ///
    /// 保留引擎返回的顺序和重复条目（bulk/multiset 语义）
    pub fn list<T>(&mut self) -> DBResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let outcome = self.fetch_list::<T>();
        self.reset();
        outcome
    }

    /// 只为副作用执行遍历，丢弃结果
    ///
    /// 适用于包含 `drop` 等变更步骤的遍历
    pub fn none(&mut self) -> DBResult<()> {
        let outcome = self.execute();
        self.reset();
        outcome.map(|_| ())
    }

    /// 执行并为每个结果行构造一个 Selection
    ///
    /// 每行必须是别名到原始值的映射；行内每个条目按 `alias`
    /// 声明的类型转换，未声明的别名透传原始值。
    /// 行顺序与引擎返回顺序一致。
    pub fn select(&mut self) -> DBResult<Selections> {
        let outcome = self.execute();
        let selections = self.selections.take().unwrap_or_default();
        self.reset();

        let raw_rows = outcome?;
        let mut selections = selections;
        for raw_row in raw_rows {
            let entries = match raw_row {
                RawValue::Map(entries) => entries,
                other => {
                    return Err(QueryError::Conversion(format!(
                        "select 期望别名映射形式的结果行, 实际得到 {:?}",
                        other
                    ))
                    .into())
                }
            };
            let mut selection = Selection::new();
            for (alias, raw_value) in entries {
                let parsed = selections.parse_as(&alias, &raw_value)?;
                selection.put(alias, parsed);
            }
            selections.add(selection);
        }
        Ok(selections)
    }

    /// 重置遍历配置状态
    ///
    /// 清空遍历配置、别名绑定，并把入口点重置为默认的 `V`。
    /// 禁用步骤列表和遍历源句柄保留。
    pub fn reset(&mut self) {
        self.spec = TraversalSpec::Empty;
        self.selections = None;
        self.source = Source::default();
    }

    /// 关闭底层遍历源
    pub fn close(&self) -> DBResult<()> {
        self.g.close()
    }

    fn fetch_list<T>(&self) -> DBResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let raw = self.execute()?;
        raw.iter().map(parser::parse::<T>).collect()
    }

    /// 共享的执行路径：构造遍历、禁用步骤检查、执行、计时
    fn execute(&self) -> DBResult<Vec<RawValue>> {
        let traversal = match &self.spec {
            TraversalSpec::Empty => return Err(QueryError::NoTraversalSpecified.into()),
            TraversalSpec::Full(full) => full.apply(self.g.as_ref()),
            TraversalSpec::Chain(fragments) => {
                let mut traversal = self.source.apply();
                for fragment in fragments {
                    traversal = fragment.apply(traversal);
                }
                traversal
            }
        };

        // 禁用步骤检查必须发生在执行之前，不允许部分执行
        if let Some(step) = self.disabled_step_in(&traversal) {
            return Err(QueryError::DisabledStepQueried(step.name().to_string()).into());
        }

        let start = Instant::now();
        let results = self.g.execute(&traversal)?;
        let elapsed_ms = start.elapsed().as_millis() as u64;
        if elapsed_ms >= self.slow_query_ms {
            log::warn!("慢查询: {} 耗时 {}ms", traversal, elapsed_ms);
        } else {
            log::debug!("执行图遍历链: {} 耗时 {}ms", traversal, elapsed_ms);
        }
        Ok(results)
    }

    /// 大小写不敏感的文本子串检查
    ///
    /// 结构化变体见 [`Traversal::has_step`]，引擎契约使用文本形式
    fn disabled_step_in(&self, traversal: &Traversal) -> Option<StepType> {
        if self.disabled_steps.is_empty() {
            return None;
        }
        let statement = traversal.to_string().to_lowercase();
        self.disabled_steps
            .iter()
            .copied()
            .find(|step| statement.contains(&step.name().to_lowercase()))
    }
}
