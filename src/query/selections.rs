//! 结果选择容器
//!
//! [`Selections`] 持有有序的结果行序列，外加别名到声明类型的绑定表。
//! 绑定在执行前通过 `declare` 配置，在结果转换时被查询。
//! 行的插入顺序即对外可见的顺序，与引擎返回结果的顺序一致。

use serde::de::DeserializeOwned;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::core::{DBResult, RawValue};
use crate::parser;

type ParseFn = Arc<dyn Fn(&RawValue) -> DBResult<Box<dyn Any + Send + Sync>> + Send + Sync>;

/// 别名的类型绑定：声明的类型名加上单态化的解析闭包
#[derive(Clone)]
struct AliasBinding {
    type_name: &'static str,
    parse: ParseFn,
}

/// 一行转换后的结果，按别名键控
#[derive(Default)]
pub struct Selection {
    values: HashMap<String, Box<dyn Any + Send + Sync>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, alias: impl Into<String>, value: Box<dyn Any + Send + Sync>) {
        self.values.insert(alias.into(), value);
    }

    /// 取出别名对应的对象，类型不匹配时返回 None
    pub fn get<T: Any>(&self, alias: &str) -> Option<&T> {
        self.values.get(alias)?.downcast_ref::<T>()
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut aliases: Vec<&str> = self.aliases().collect();
        aliases.sort_unstable();
        f.debug_struct("Selection").field("aliases", &aliases).finish()
    }
}

/// 有序的结果行集合加别名类型绑定表
#[derive(Default)]
pub struct Selections {
    rows: Vec<Selection>,
    bindings: HashMap<String, AliasBinding>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明别名的结果类型，重复声明时最后一次生效
    pub fn declare<T>(&mut self, alias: impl Into<String>)
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        self.bindings.insert(
            alias.into(),
            AliasBinding {
                type_name: std::any::type_name::<T>(),
                parse: Arc::new(|raw| {
                    parser::parse::<T>(raw)
                        .map(|value| Box::new(value) as Box<dyn Any + Send + Sync>)
                }),
            },
        );
    }

    /// 别名声明的类型名，未声明时返回 None
    pub fn declared(&self, alias: &str) -> Option<&'static str> {
        self.bindings.get(alias).map(|binding| binding.type_name)
    }

    /// 按别名的声明类型转换原始值
    ///
    /// 未声明的别名退化为未类型化的透传：原始值按原样装箱，
    /// 可通过 `Selection::get::<RawValue>` 取回
    pub(crate) fn parse_as(
        &self,
        alias: &str,
        raw: &RawValue,
    ) -> DBResult<Box<dyn Any + Send + Sync>> {
        match self.bindings.get(alias) {
            Some(binding) => (binding.parse)(raw),
            None => Ok(Box::new(raw.clone())),
        }
    }

    /// 追加一行
    pub fn add(&mut self, selection: Selection) {
        self.rows.push(selection);
    }

    /// 按插入顺序访问结果行
    pub fn rows(&self) -> &[Selection] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Debug for Selections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut declared: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        declared.sort_unstable();
        f.debug_struct("Selections")
            .field("rows", &self.rows.len())
            .field("declared", &declared)
            .finish()
    }
}
