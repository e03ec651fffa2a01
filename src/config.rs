use crate::error::{AppResult, ConfigError, FileError};
use crate::models::ValuePolicy;
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// ChEMBL API 根地址（不含 `/activity.json`）
    pub api_base_url: String,
    /// 目标 ChEMBL ID，默认 EGFR
    pub target_chembl_id: String,
    /// 每页记录数
    pub page_size: u64,
    /// offset 安全上限，超过后停止翻页
    pub max_offset: u64,
    /// 需要收集的唯一分子数
    pub required_molecules: usize,
    /// 每次请求之后的固定间隔
    pub request_delay: Duration,
    /// 单次请求超时
    pub request_timeout: Duration,
    /// 请求头中的 User-Agent
    pub user_agent: String,
    /// 结果表预览行数
    pub preview_rows: usize,
    /// 活性值为数值 0 时如何处理
    pub value_policy: ValuePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.ebi.ac.uk/chembl/api/data".to_string(),
            target_chembl_id: "CHEMBL203".to_string(),
            page_size: 50,
            max_offset: 2000,
            required_molecules: 20,
            request_delay: Duration::from_secs(1),
            request_timeout: Duration::from_secs(30),
            user_agent: "ChEMBL-Internship-Task".to_string(),
            preview_rows: 5,
            value_policy: ValuePolicy::ZeroIsMissing,
        }
    }
}

/// TOML 配置文件，所有键均可省略
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    api_base_url: Option<String>,
    target_chembl_id: Option<String>,
    page_size: Option<u64>,
    max_offset: Option<u64>,
    required_molecules: Option<usize>,
    request_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
    user_agent: Option<String>,
    preview_rows: Option<usize>,
    keep_zero_values: Option<bool>,
}

impl Config {
    /// 加载配置
    ///
    /// 顺序：默认值 → 配置文件（`CHEMBL_CONFIG_FILE`）→ 环境变量，最后校验
    pub fn load() -> AppResult<Self> {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("CHEMBL_CONFIG_FILE") {
            config = config.merge_toml_file(Path::new(&path))?;
        }
        let config = config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 仅从环境变量加载（不读取配置文件）
    pub fn from_env() -> AppResult<Self> {
        let config = Self::default().apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 用 TOML 文件中的值覆盖当前配置
    pub fn merge_toml_file(self, path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| FileError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        let merged = self
            .merge_toml_str(&content)
            .map_err(|source| FileError::TomlParseFailed {
                path: path.display().to_string(),
                source,
            })?;
        Ok(merged)
    }

    fn merge_toml_str(mut self, content: &str) -> Result<Self, toml::de::Error> {
        let file: FileConfig = toml::from_str(content)?;
        if let Some(v) = file.api_base_url {
            self.api_base_url = v;
        }
        if let Some(v) = file.target_chembl_id {
            self.target_chembl_id = v;
        }
        if let Some(v) = file.page_size {
            self.page_size = v;
        }
        if let Some(v) = file.max_offset {
            self.max_offset = v;
        }
        if let Some(v) = file.required_molecules {
            self.required_molecules = v;
        }
        if let Some(v) = file.request_delay_ms {
            self.request_delay = Duration::from_millis(v);
        }
        if let Some(v) = file.request_timeout_secs {
            self.request_timeout = Duration::from_secs(v);
        }
        if let Some(v) = file.user_agent {
            self.user_agent = v;
        }
        if let Some(v) = file.preview_rows {
            self.preview_rows = v;
        }
        if let Some(keep) = file.keep_zero_values {
            self.value_policy = ValuePolicy::from_keep_zero(keep);
        }
        Ok(self)
    }

    /// 用环境变量覆盖当前配置
    ///
    /// `lookup` 负责读取变量，测试中可以替换成固定的表。
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CHEMBL_API_BASE_URL") {
            self.api_base_url = v;
        }
        if let Some(v) = lookup("CHEMBL_TARGET_ID") {
            self.target_chembl_id = v;
        }
        if let Some(v) = parse_var(&lookup, "CHEMBL_PAGE_SIZE", "u64")? {
            self.page_size = v;
        }
        if let Some(v) = parse_var(&lookup, "CHEMBL_MAX_OFFSET", "u64")? {
            self.max_offset = v;
        }
        if let Some(v) = parse_var(&lookup, "CHEMBL_REQUIRED_MOLECULES", "usize")? {
            self.required_molecules = v;
        }
        if let Some(ms) = parse_var(&lookup, "CHEMBL_REQUEST_DELAY_MS", "u64")? {
            self.request_delay = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var(&lookup, "CHEMBL_REQUEST_TIMEOUT_SECS", "u64")? {
            self.request_timeout = Duration::from_secs(secs);
        }
        if let Some(v) = lookup("CHEMBL_USER_AGENT") {
            self.user_agent = v;
        }
        if let Some(v) = parse_var(&lookup, "CHEMBL_PREVIEW_ROWS", "usize")? {
            self.preview_rows = v;
        }
        if let Some(keep) = parse_var(&lookup, "CHEMBL_KEEP_ZERO_VALUES", "bool")? {
            self.value_policy = ValuePolicy::from_keep_zero(keep);
        }
        Ok(self)
    }

    /// 启动时校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(ConfigError::invalid("api_base_url", "不能为空"));
        }
        if self.target_chembl_id.trim().is_empty() {
            return Err(ConfigError::invalid("target_chembl_id", "不能为空"));
        }
        if self.page_size == 0 {
            return Err(ConfigError::invalid("page_size", "必须大于 0"));
        }
        if self.required_molecules == 0 {
            return Err(ConfigError::invalid("required_molecules", "必须大于 0"));
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::invalid("request_timeout", "必须大于 0"));
        }
        Ok(())
    }
}

fn parse_var<T, F>(
    lookup: &F,
    var_name: &str,
    expected_type: &str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: var_name.to_string(),
                value: raw,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_matches_documented_constants() {
        let config = Config::default();
        assert_eq!(config.target_chembl_id, "CHEMBL203");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_offset, 2000);
        assert_eq!(config.required_molecules, 20);
        assert_eq!(config.request_delay, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = Config::default()
            .apply_env(env_of(&[
                ("CHEMBL_TARGET_ID", "CHEMBL240"),
                ("CHEMBL_PAGE_SIZE", "100"),
                ("CHEMBL_REQUEST_DELAY_MS", "250"),
                ("CHEMBL_KEEP_ZERO_VALUES", "true"),
            ]))
            .unwrap();

        assert_eq!(config.target_chembl_id, "CHEMBL240");
        assert_eq!(config.page_size, 100);
        assert_eq!(config.request_delay, Duration::from_millis(250));
        assert_eq!(config.value_policy, ValuePolicy::KeepZero);
        // 未设置的保持默认
        assert_eq!(config.max_offset, 2000);
    }

    #[test]
    fn test_env_parse_failure_is_reported() {
        let err = Config::default()
            .apply_env(env_of(&[("CHEMBL_PAGE_SIZE", "fifty")]))
            .unwrap_err();

        assert_eq!(
            err,
            ConfigError::EnvVarParseFailed {
                var_name: "CHEMBL_PAGE_SIZE".to_string(),
                value: "fifty".to_string(),
                expected_type: "u64".to_string(),
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_page_size_and_required_count() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "page_size"
        ));

        let config = Config {
            required_molecules: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "required_molecules"
        ));
    }

    #[test]
    fn test_validate_rejects_blank_target() {
        let config = Config {
            target_chembl_id: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_toml_str_overrides_only_present_keys() {
        let config = Config::default()
            .merge_toml_str(
                r#"
                target_chembl_id = "CHEMBL1862"
                max_offset = 500
                request_timeout_secs = 10
                "#,
            )
            .unwrap();

        assert_eq!(config.target_chembl_id, "CHEMBL1862");
        assert_eq!(config.max_offset, 500);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_merge_toml_str_rejects_unknown_keys() {
        assert!(Config::default().merge_toml_str("pagesize = 10").is_err());
    }

    #[test]
    fn test_merge_toml_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chembl.toml");
        std::fs::write(&path, "required_molecules = 5\n").unwrap();

        let config = Config::default().merge_toml_file(&path).unwrap();
        assert_eq!(config.required_molecules, 5);
    }

    #[test]
    fn test_merge_toml_file_missing_file() {
        let result = Config::default().merge_toml_file(Path::new("/nonexistent/chembl.toml"));
        assert!(matches!(
            result,
            Err(crate::error::AppError::File(FileError::ReadFailed { .. }))
        ));
    }
}
