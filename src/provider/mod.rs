//! 提供者模块
//!
//! [`GraphFactory`] 负责 Query/Graph 实例的生命周期与共享策略，
//! 把"什么时候(重新)构造包装同一遍历源的实例"这个决定从调用方剥离。
//! 缓存槽是工厂实例自身的字段而不是模块级静态变量，
//! 测试可以构造相互隔离的工厂而不依赖共享的清理调用。

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::thread::{self, ThreadId};

use crate::core::DBResult;
use crate::query::ObjectQuery;
use crate::traversal::TraversalSource;

/// 缓存策略
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShouldCache {
    /// 进程内（按工厂实例）缓存唯一的 Graph/Query 实例
    ///
    /// 适用于单线程应用。多个线程并发使用同一个缓存实例时，
    /// 调用方必须在时间上互斥地串行化各次调用。
    Everything,
    /// 按调用线程缓存实例
    ///
    /// 每个线程只观察和修改自己的缓存实例，线程之间不共享。
    /// 适用于底层遍历源能承受并发请求的多线程应用。
    #[default]
    ThreadLocal,
    /// 不缓存，每次调用都构造新实例
    ///
    /// 适用于底层资源无法承受并发请求、或调用方自带缓存方案的场景
    Nothing,
}

/// 绑定遍历源与其专属查询的图句柄
///
/// 可变的暂存状态就是内部查询的待执行配置；
/// 工厂每次取出缓存的 Graph 都会先 `reset`，
/// 避免上一个调用方的部分配置泄漏给下一个调用方。
pub struct ObjectGraph<S: TraversalSource> {
    g: Arc<S>,
    query: ObjectQuery<S>,
}

impl<S: TraversalSource> ObjectGraph<S> {
    pub fn new(g: Arc<S>) -> Self {
        let query = ObjectQuery::new(g.clone());
        Self { g, query }
    }

    pub fn query(&self) -> &ObjectQuery<S> {
        &self.query
    }

    pub fn query_mut(&mut self) -> &mut ObjectQuery<S> {
        &mut self.query
    }

    /// 清空暂存状态（内部查询的遍历配置）
    pub fn reset(&mut self) {
        self.query.reset();
    }

    /// 关闭底层遍历源
    pub fn close(&self) -> DBResult<()> {
        self.g.close()
    }
}

/// Graph/Query 实例工厂
pub struct GraphFactory<S: TraversalSource> {
    g: Arc<S>,
    should_cache: ShouldCache,
    cached_graph: Mutex<Option<Arc<Mutex<ObjectGraph<S>>>>>,
    cached_query: Mutex<Option<Arc<Mutex<ObjectQuery<S>>>>>,
    thread_graphs: DashMap<ThreadId, Arc<Mutex<ObjectGraph<S>>>>,
    thread_queries: DashMap<ThreadId, Arc<Mutex<ObjectQuery<S>>>>,
}

impl<S: TraversalSource> GraphFactory<S> {
    pub fn new(g: Arc<S>, should_cache: ShouldCache) -> Self {
        Self {
            g,
            should_cache,
            cached_graph: Mutex::new(None),
            cached_query: Mutex::new(None),
            thread_graphs: DashMap::new(),
            thread_queries: DashMap::new(),
        }
    }

    /// 使用默认的按线程缓存策略构造工厂
    pub fn with_thread_local(g: Arc<S>) -> Self {
        Self::new(g, ShouldCache::ThreadLocal)
    }

    pub fn should_cache(&self) -> ShouldCache {
        self.should_cache
    }

    fn make_graph(&self) -> Arc<Mutex<ObjectGraph<S>>> {
        Arc::new(Mutex::new(ObjectGraph::new(self.g.clone())))
    }

    fn make_query(&self) -> Arc<Mutex<ObjectQuery<S>>> {
        Arc::new(Mutex::new(ObjectQuery::new(self.g.clone())))
    }

    /// 按当前策略返回可用的 Graph 实例
    ///
    /// 缓存命中时先重置实例的暂存状态再交给调用方
    pub fn graph(&self) -> Arc<Mutex<ObjectGraph<S>>> {
        match self.should_cache {
            ShouldCache::Nothing => self.make_graph(),
            ShouldCache::Everything => {
                // 槽位锁串行化首次创建，并发的首批调用方不会创建出重复实例
                let mut slot = self.cached_graph.lock();
                match slot.as_ref() {
                    Some(cached) => {
                        cached.lock().reset();
                        cached.clone()
                    }
                    None => {
                        let fresh = self.make_graph();
                        *slot = Some(fresh.clone());
                        fresh
                    }
                }
            }
            ShouldCache::ThreadLocal => {
                let thread_id = thread::current().id();
                match self.thread_graphs.entry(thread_id) {
                    dashmap::mapref::entry::Entry::Occupied(entry) => {
                        let cached = entry.get().clone();
                        cached.lock().reset();
                        cached
                    }
                    dashmap::mapref::entry::Entry::Vacant(entry) => {
                        let fresh = self.make_graph();
                        entry.insert(fresh.clone());
                        fresh
                    }
                }
            }
        }
    }

    /// 按当前策略返回可用的 Query 实例
    pub fn query(&self) -> Arc<Mutex<ObjectQuery<S>>> {
        match self.should_cache {
            ShouldCache::Nothing => self.make_query(),
            ShouldCache::Everything => {
                let mut slot = self.cached_query.lock();
                match slot.as_ref() {
                    Some(cached) => cached.clone(),
                    None => {
                        let fresh = self.make_query();
                        *slot = Some(fresh.clone());
                        fresh
                    }
                }
            }
            ShouldCache::ThreadLocal => {
                let thread_id = thread::current().id();
                self.thread_queries
                    .entry(thread_id)
                    .or_insert_with(|| self.make_query())
                    .clone()
            }
        }
    }

    /// 无条件丢弃所有缓存状态（单例槽和线程槽）
    ///
    /// 用于测试隔离和显式的缓存失效
    pub fn clear(&self) {
        *self.cached_graph.lock() = None;
        *self.cached_query.lock() = None;
        self.thread_graphs.clear();
        self.thread_queries.clear();
    }
}
