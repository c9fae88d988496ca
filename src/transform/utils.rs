//! 归一化工具函数

use serde_json::Value;
use std::collections::HashSet;

/// 判断 Content-Type 是否声明为 JSON（包括 application/x-ndjson、+json 等变体）
pub fn is_json_content_type(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}

/// 将 JSON 值转为模型名；字符串原样返回，null 视为空
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// 行分隔符：\n、单独的 \r、\v、\f、文件/组/记录分隔符、NEL 及 Unicode 行/段分隔符
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// 按行解析纯文本响应，去除首尾空白并丢弃空行
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// 丢弃空项并去重，保留首次出现的顺序
pub fn dedupe_preserving_order<I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
