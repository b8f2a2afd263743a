//! 对象解析模块
//!
//! 将遍历引擎返回的原始图值转换为调用者声明的类型。
//! 转换通过 `serde_json::Value` 作为中间表示：顶点/边被展开为
//! 携带 `id`、`label`（边另有 `from`/`to`）及其全部属性的 JSON 对象，
//! 再反序列化为目标类型。转换失败映射为 [`QueryError::Conversion`]，
//! 原样向上传播。

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::core::{DBResult, QueryError, RawValue};

/// 将原始图值解析为目标类型
pub fn parse<T: DeserializeOwned>(raw: &RawValue) -> DBResult<T> {
    let json = to_json(raw);
    serde_json::from_value(json)
        .map_err(|e| QueryError::Conversion(e.to_string()).into())
}

/// 原始图值的 JSON 中间表示
fn to_json(raw: &RawValue) -> JsonValue {
    match raw {
        RawValue::Scalar(value) => value.into(),
        RawValue::Vertex(vertex) => {
            let mut object = properties_to_json(&vertex.properties);
            // 属性优先，同名属性不被 id/label 覆盖
            object.entry("id").or_insert_with(|| (&vertex.id).into());
            object
                .entry("label")
                .or_insert_with(|| JsonValue::String(vertex.label.clone()));
            JsonValue::Object(object)
        }
        RawValue::Edge(edge) => {
            let mut object = properties_to_json(&edge.properties);
            object.entry("id").or_insert_with(|| (&edge.id).into());
            object
                .entry("label")
                .or_insert_with(|| JsonValue::String(edge.label.clone()));
            object.entry("from").or_insert_with(|| (&edge.from).into());
            object.entry("to").or_insert_with(|| (&edge.to).into());
            JsonValue::Object(object)
        }
        RawValue::Map(entries) => {
            let mut object = Map::new();
            for (alias, value) in entries {
                object.insert(alias.clone(), to_json(value));
            }
            JsonValue::Object(object)
        }
    }
}

fn properties_to_json(
    properties: &std::collections::HashMap<String, crate::core::Value>,
) -> Map<String, JsonValue> {
    properties
        .iter()
        .map(|(key, value)| (key.clone(), value.into()))
        .collect()
}
