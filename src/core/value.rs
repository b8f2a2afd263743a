//! 图元素值类型系统
//!
//! 定义遍历引擎返回的原始图值：标量、顶点、边以及按别名键控的结果行。
//! 对象映射层消费这些原始值，并通过 `parser` 模块转换为调用者声明的类型。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 属性值类型
///
/// 表示顶点/边属性以及遍历产生的标量结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            // NaN/Infinity 无法表示为 JSON 数字，退化为 Null
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
        }
    }
}

/// 图中的顶点
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vertex {
    pub id: Value,
    pub label: String,
    pub properties: HashMap<String, Value>,
}

impl Vertex {
    pub fn new(id: Value, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_properties(
        id: Value,
        label: impl Into<String>,
        properties: HashMap<String, Value>,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            properties,
        }
    }

    /// 获取指定属性
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// 图中的边
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub id: Value,
    pub label: String,
    pub from: Value,
    pub to: Value,
    pub properties: HashMap<String, Value>,
}

impl Edge {
    pub fn new(id: Value, label: impl Into<String>, from: Value, to: Value) -> Self {
        Self {
            id,
            label: label.into(),
            from,
            to,
            properties: HashMap::new(),
        }
    }

    /// 获取指定属性
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name)
    }
}

/// 遍历引擎返回的原始结果条目
///
/// `Map` 是 `select` 终端方法消费的行形态：别名到原始值的映射。
/// 结果集合是 bulk/multiset 语义，允许重复条目，不做去重。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RawValue {
    Vertex(Vertex),
    Edge(Edge),
    Map(HashMap<String, RawValue>),
    Scalar(Value),
}
