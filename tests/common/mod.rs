//! 集成测试公共设施
//!
//! 提供记录调用的模拟遍历源和测试用领域类型

#![allow(dead_code)]

use parking_lot::Mutex;
use serde::Deserialize;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use graph_objects::core::{DBResult, QueryError, RawValue, Value, Vertex};
use graph_objects::traversal::{Traversal, TraversalSource};

/// 模拟遍历源
///
/// 记录每次执行的遍历文本和调用次数，按入队顺序返回预设结果。
/// 队列为空时返回空结果集。
pub struct MockSource {
    queued: Mutex<VecDeque<Result<Vec<RawValue>, String>>>,
    executed: Mutex<Vec<String>>,
    close_calls: AtomicUsize,
    close_error: Option<String>,
}

impl MockSource {
    pub fn new() -> Self {
        Self {
            queued: Mutex::new(VecDeque::new()),
            executed: Mutex::new(Vec::new()),
            close_calls: AtomicUsize::new(0),
            close_error: None,
        }
    }

    pub fn failing_close(message: &str) -> Self {
        Self {
            close_error: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// 预设下一次执行的结果
    pub fn push_result(&self, rows: Vec<RawValue>) {
        self.queued.lock().push_back(Ok(rows));
    }

    /// 预设下一次执行失败
    pub fn push_error(&self, message: &str) {
        self.queued.lock().push_back(Err(message.to_string()));
    }

    /// 已执行的遍历文本，按执行顺序
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().clone()
    }

    pub fn execute_count(&self) -> usize {
        self.executed.lock().len()
    }

    pub fn close_count(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TraversalSource for MockSource {
    fn execute(&self, traversal: &Traversal) -> DBResult<Vec<RawValue>> {
        self.executed.lock().push(traversal.to_string());
        match self.queued.lock().pop_front() {
            Some(Ok(rows)) => Ok(rows),
            Some(Err(message)) => Err(QueryError::ExecutionError(message).into()),
            None => Ok(Vec::new()),
        }
    }

    fn close(&self) -> DBResult<()> {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
        match &self.close_error {
            Some(message) => Err(QueryError::ExecutionError(message.clone()).into()),
            None => Ok(()),
        }
    }
}

/// 测试用领域类型
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: i64,
}

/// 构造一个 person 顶点
pub fn person_vertex(id: i64, name: &str, age: i64) -> RawValue {
    let mut properties = HashMap::new();
    properties.insert("name".to_string(), Value::String(name.to_string()));
    properties.insert("age".to_string(), Value::Int(age));
    RawValue::Vertex(Vertex::with_properties(Value::Int(id), "person", properties))
}
