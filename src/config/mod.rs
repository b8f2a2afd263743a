//! 配置模块
//!
//! TOML 格式的对象映射层配置：工厂缓存策略、禁用步骤黑名单、
//! 慢查询告警阈值。所有字段都有默认值，配置文件可以只写需要覆盖的项。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::core::{DBError, DBResult};
use crate::provider::{GraphFactory, ShouldCache};
use crate::query::ObjectQuery;
use crate::traversal::{StepType, TraversalSource};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectsConfig {
    /// Graph/Query 实例的缓存策略
    pub should_cache: ShouldCache,
    /// 禁用的遍历步骤黑名单
    pub disabled_steps: Vec<StepType>,
    /// 慢查询告警阈值（毫秒）
    pub slow_query_ms: u64,
}

impl Default for ObjectsConfig {
    fn default() -> Self {
        Self {
            should_cache: ShouldCache::ThreadLocal,
            disabled_steps: Vec::new(),
            slow_query_ms: 1000,
        }
    }
}

impl ObjectsConfig {
    /// 从 TOML 文件加载配置
    pub fn load<P: AsRef<Path>>(path: P) -> DBResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 字符串解析配置
    pub fn from_toml_str(content: &str) -> DBResult<Self> {
        toml::from_str(content).map_err(|e| DBError::Config(e.to_string()))
    }

    /// 保存配置到 TOML 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> DBResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DBError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 按配置的缓存策略构造工厂
    pub fn factory<S: TraversalSource>(&self, g: Arc<S>) -> GraphFactory<S> {
        GraphFactory::new(g, self.should_cache)
    }

    /// 把禁用黑名单和慢查询阈值应用到查询实例
    pub fn apply_to<S: TraversalSource>(&self, query: &mut ObjectQuery<S>) {
        query.disable(&self.disabled_steps);
        query.set_slow_query_ms(self.slow_query_ms);
    }
}
