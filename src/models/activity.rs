//! ChEMBL activity 接口的数据结构

use serde::Deserialize;
use std::fmt;

/// 一页 activity 响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityPage {
    /// 活性记录；字段缺失或为 null 时视为空页
    #[serde(default, deserialize_with = "null_as_empty")]
    pub activities: Vec<RawActivity>,

    /// 分页元信息
    #[serde(default)]
    pub page_meta: Option<PageMeta>,
}

/// 服务端返回的分页元信息
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageMeta {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub total_count: Option<u64>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

/// 单条活性记录（原始形态，所有字段均可为空）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawActivity {
    #[serde(default)]
    pub molecule_chembl_id: Option<String>,
    #[serde(default)]
    pub target_chembl_id: Option<String>,
    #[serde(default)]
    pub standard_type: Option<String>,
    #[serde(default)]
    pub value: Option<ActivityValue>,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub assay_description: Option<String>,
}

impl RawActivity {
    /// 非空的分子 ID（只含空白的 ID 原样保留）
    pub fn molecule_id(&self) -> Option<&str> {
        self.molecule_chembl_id.as_deref().filter(|id| !id.is_empty())
    }

    /// 记录是否可以进入累加器：分子 ID 非空且活性值不算缺失
    pub fn is_usable(&self, policy: ValuePolicy) -> bool {
        self.molecule_id().is_some() && has_activity_value(self.value.as_ref(), policy)
    }
}

/// 活性值
///
/// ChEMBL 把 `value` 序列化为字符串，但也兼容数值和其他 JSON 形态。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ActivityValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl ActivityValue {
    /// 按给定策略判断该值是否视为缺失
    pub fn is_missing(&self, policy: ValuePolicy) -> bool {
        match self {
            ActivityValue::Number(n) => *n == 0.0 && policy == ValuePolicy::ZeroIsMissing,
            ActivityValue::Text(s) => s.trim().is_empty(),
            ActivityValue::Other(v) => match v {
                serde_json::Value::Null => true,
                serde_json::Value::Bool(b) => !b,
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(map) => map.is_empty(),
                // Number 和 String 已被前面的分支接住
                _ => false,
            },
        }
    }
}

impl fmt::Display for ActivityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityValue::Number(n) => write!(f, "{}", n),
            ActivityValue::Text(s) => f.write_str(s),
            ActivityValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// 活性值为数值 0 时的处理策略
///
/// 缺失（null）和空字符串在任何策略下都算缺失；字符串 `"0"` 总是保留。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValuePolicy {
    /// 数值 0 视为缺失
    #[default]
    ZeroIsMissing,
    /// 数值 0 是合法的测量值
    KeepZero,
}

impl ValuePolicy {
    pub fn from_keep_zero(keep_zero: bool) -> Self {
        if keep_zero {
            ValuePolicy::KeepZero
        } else {
            ValuePolicy::ZeroIsMissing
        }
    }
}

/// 活性值是否存在
pub fn has_activity_value(value: Option<&ActivityValue>, policy: ValuePolicy) -> bool {
    value.is_some_and(|v| !v.is_missing(policy))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<RawActivity>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<RawActivity>>::deserialize(deserializer)?.unwrap_or_default())
}
