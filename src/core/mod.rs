//! 核心模块
//!
//! 包含统一错误处理和图元素值类型系统

pub mod error;
pub mod value;

pub use error::{DBError, DBResult, QueryError};
pub use value::{Edge, RawValue, Value, Vertex};
