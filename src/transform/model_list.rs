//! 模型列表响应解码
//!
//! 后端的列表端点返回形状不固定，这里按优先级依次尝试各形状，首个匹配者胜出。

use super::utils::{dedupe_preserving_order, is_json_content_type, split_lines, stringify};
use serde_json::{Map, Value};

/// 已识别的 JSON 响应形状
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelListShape<'a> {
    /// `[{"name": ...}, ...]`，以首元素判定
    NamedRecords(&'a [Value]),
    /// `["a", "b", ...]` 或其他非记录数组
    Scalars(&'a [Value]),
    /// `{"models": [...]}`
    ModelsField(&'a [Value]),
    /// `{"data": [...]}`
    DataField(&'a [Value]),
    /// 其他对象：取全部值
    ObjectValues(&'a Map<String, Value>),
}

impl<'a> ModelListShape<'a> {
    pub fn decode(body: &'a Value) -> Option<Self> {
        Self::as_named_records(body)
            .or_else(|| Self::as_scalars(body))
            .or_else(|| Self::as_models_field(body))
            .or_else(|| Self::as_data_field(body))
            .or_else(|| Self::as_object_values(body))
    }

    fn as_named_records(body: &'a Value) -> Option<Self> {
        let items = body.as_array()?;
        let first = items.first()?.as_object()?;
        first.contains_key("name").then_some(Self::NamedRecords(items))
    }

    fn as_scalars(body: &'a Value) -> Option<Self> {
        body.as_array().map(|items| Self::Scalars(items))
    }

    fn as_models_field(body: &'a Value) -> Option<Self> {
        body.get("models")?.as_array().map(|items| Self::ModelsField(items))
    }

    fn as_data_field(body: &'a Value) -> Option<Self> {
        body.get("data")?.as_array().map(|items| Self::DataField(items))
    }

    fn as_object_values(body: &'a Value) -> Option<Self> {
        body.as_object().map(Self::ObjectValues)
    }

    /// 提取原始名称（未去重，可能含空串）
    pub fn names(self) -> Vec<String> {
        match self {
            Self::NamedRecords(items) => items.iter().filter_map(record_name).collect(),
            Self::ModelsField(items) => items
                .iter()
                .filter_map(|item| {
                    if item.is_object() {
                        record_name(item)
                    } else {
                        stringify(item)
                    }
                })
                .collect(),
            Self::Scalars(items) | Self::DataField(items) => {
                items.iter().filter_map(stringify).collect()
            }
            Self::ObjectValues(map) => map.values().filter_map(stringify).collect(),
        }
    }
}

fn record_name(item: &Value) -> Option<String> {
    item.as_object()?.get("name").and_then(stringify)
}

/// 从单个候选端点的响应中提取模型名
///
/// JSON 解析失败或形状不认识时返回空列表，不向上传播错误。
pub fn extract_model_names(content_type: &str, body: &str) -> Vec<String> {
    let names = if is_json_content_type(content_type) {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ModelListShape::decode(&value)
                .map(ModelListShape::names)
                .unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Model list body is not valid JSON: {}", e);
                Vec::new()
            }
        }
    } else {
        split_lines(body)
    };

    dedupe_preserving_order(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const JSON: &str = "application/json";

    fn extract(body: Value) -> Vec<String> {
        extract_model_names(JSON, &body.to_string())
    }

    #[test]
    fn test_decode_shapes() {
        let records = json!([{"name": "a"}]);
        assert!(matches!(
            ModelListShape::decode(&records),
            Some(ModelListShape::NamedRecords(_))
        ));

        let scalars = json!(["a"]);
        assert!(matches!(
            ModelListShape::decode(&scalars),
            Some(ModelListShape::Scalars(_))
        ));

        let models = json!({"models": [], "data": ["x"]});
        assert!(matches!(
            ModelListShape::decode(&models),
            Some(ModelListShape::ModelsField(_))
        ));

        let data = json!({"models": "not-a-list", "data": ["x"]});
        assert!(matches!(
            ModelListShape::decode(&data),
            Some(ModelListShape::DataField(_))
        ));

        let object = json!({"first": "x"});
        assert!(matches!(
            ModelListShape::decode(&object),
            Some(ModelListShape::ObjectValues(_))
        ));

        assert_eq!(ModelListShape::decode(&json!("llama3")), None);
        assert_eq!(ModelListShape::decode(&json!(42)), None);
    }

    #[test]
    fn test_array_of_strings() {
        assert_eq!(extract(json!(["b", "a", "b", "c"])), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_array_of_named_records() {
        let body = json!([{"name": "a"}, {"name": "b"}, {"name": "a"}]);
        assert_eq!(extract(body), vec!["a", "b"]);
    }

    #[test]
    fn test_named_records_skip_unnamed_entries() {
        let body = json!([{"name": "a"}, {"size": 1}, "loose", {"name": ""}, {"name": "b"}]);
        assert_eq!(extract(body), vec!["a", "b"]);
    }

    #[test]
    fn test_array_of_records_without_name_is_stringified() {
        let body = json!([{"id": "a"}]);
        assert_eq!(extract(body), vec![r#"{"id":"a"}"#]);
    }

    #[test]
    fn test_object_with_models_strings() {
        assert_eq!(extract(json!({"models": ["x", "y"]})), vec!["x", "y"]);
    }

    #[test]
    fn test_object_with_models_records() {
        let body = json!({
            "models": [
                {"name": "llama3:latest", "size": 4661224676u64},
                {"name": "mistral:7b"},
                "phi3"
            ]
        });
        assert_eq!(extract(body), vec!["llama3:latest", "mistral:7b", "phi3"]);
    }

    #[test]
    fn test_object_with_data() {
        assert_eq!(extract(json!({"data": ["p", "q"]})), vec!["p", "q"]);
    }

    #[test]
    fn test_object_values_fallback() {
        let body = json!({"primary": "llama3", "secondary": "phi3", "empty": null});
        assert_eq!(extract(body), vec!["llama3", "phi3"]);
    }

    #[test]
    fn test_plain_text_lines() {
        assert_eq!(extract_model_names("text/plain", "m1\nm2\n\nm1"), vec!["m1", "m2"]);
    }

    #[test]
    fn test_plain_text_mixed_line_breaks() {
        assert_eq!(extract_model_names("text/plain", "a\rb\x0cc\r\na"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_content_type_is_plain_text() {
        assert_eq!(extract_model_names("", "[\"a\"]"), vec!["[\"a\"]"]);
    }

    #[test]
    fn test_invalid_json_yields_empty() {
        assert!(extract_model_names(JSON, "{not json").is_empty());
        assert!(extract_model_names(JSON, "").is_empty());
    }

    #[test]
    fn test_unrecognized_json_yields_empty() {
        assert!(extract_model_names(JSON, "\"llama3\"").is_empty());
        assert!(extract(json!([])).is_empty());
        assert!(extract(json!({})).is_empty());
    }
}
