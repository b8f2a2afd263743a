//! 查询模块
//!
//! 包含查询执行引擎和按别名键控的结果容器

pub mod object_query;
pub mod selections;

pub use object_query::{ObjectQuery, TraversalSpec};
pub use selections::{Selection, Selections};
