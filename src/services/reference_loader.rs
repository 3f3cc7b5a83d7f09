//! 参考数据加载 - 业务能力层
//!
//! 从静态 JSON 资源（本地目录或 http 地址）加载下拉列表，
//! 格式为 `[{"<标签字段>": "..."}, ...]`。加载失败时回退到内置默认列表。

use phf::phf_map;
use serde_json::Value as JsonValue;
use std::cmp::Ordering;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, ReferenceDataError};
use crate::models::reference::{ReferenceKind, ReferenceLists};

/// 排序时去掉重音符号
static ACCENT_FOLD: phf::Map<char, char> = phf_map! {
    'á' => 'a', 'à' => 'a', 'â' => 'a', 'ä' => 'a', 'ã' => 'a',
    'é' => 'e', 'è' => 'e', 'ê' => 'e', 'ë' => 'e',
    'í' => 'i', 'ì' => 'i', 'î' => 'i', 'ï' => 'i',
    'ó' => 'o', 'ò' => 'o', 'ô' => 'o', 'ö' => 'o', 'õ' => 'o',
    'ú' => 'u', 'ù' => 'u', 'û' => 'u', 'ü' => 'u',
    'ñ' => 'n', 'ç' => 'c',
};

/// 参考数据加载器
#[derive(Debug, Clone)]
pub struct ReferenceDataLoader {
    /// 本地目录或 http(s) 基础地址
    base: String,
    client: reqwest::Client,
}

impl ReferenceDataLoader {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            client: reqwest::Client::new(),
        }
    }

    /// 加载某一类列表，失败时回退到默认列表
    ///
    /// # 返回
    /// 去重并排序后的列表
    pub async fn load_list(&self, kind: ReferenceKind) -> Vec<String> {
        match self.try_load_list(kind).await {
            Ok(list) => {
                info!("✓ {}列表加载成功: {} 条", kind, list.len());
                list
            }
            Err(e) => {
                warn!("⚠️ {}列表加载失败，使用默认列表: {}", kind, e);
                sort_labels(kind.fallback().iter().map(|s| s.to_string()).collect())
            }
        }
    }

    /// 并发加载全部列表
    pub async fn load_all(&self) -> ReferenceLists {
        let loads = ReferenceKind::ALL
            .into_iter()
            .map(|kind| async move { (kind, self.load_list(kind).await) });

        let mut lists = ReferenceLists::new();
        for (kind, values) in futures::future::join_all(loads).await {
            lists.insert(kind, values);
        }
        lists
    }

    /// 加载某一类列表，不做回退
    pub async fn try_load_list(&self, kind: ReferenceKind) -> AppResult<Vec<String>> {
        let location = self.location(kind);
        debug!("请求参考数据: {}", location);

        let text = if is_remote(&self.base) {
            self.fetch_remote(&location).await?
        } else {
            tokio::fs::read_to_string(&location)
                .await
                .map_err(|e| AppError::reference_fetch_failed(location.as_str(), e))?
        };

        let labels = parse_labels(&text, kind.label_key(), &location)?;
        if labels.is_empty() {
            return Err(ReferenceDataError::Empty { location }.into());
        }

        Ok(sort_labels(labels))
    }

    fn location(&self, kind: ReferenceKind) -> String {
        if is_remote(&self.base) {
            format!("{}/{}", self.base.trim_end_matches('/'), kind.file_name())
        } else {
            PathBuf::from(&self.base)
                .join(kind.file_name())
                .to_string_lossy()
                .to_string()
        }
    }

    async fn fetch_remote(&self, url: &str) -> AppResult<String> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json; charset=utf-8")
            .header("Cache-Control", "no-cache")
            .send()
            .await
            .map_err(|e| AppError::reference_fetch_failed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReferenceDataError::BadStatus {
                location: url.to_string(),
                status: status.as_u16(),
            }
            .into());
        }

        // 按 UTF-8 解码，不依赖响应头中的字符集
        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::reference_fetch_failed(url, e))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn is_remote(base: &str) -> bool {
    base.starts_with("http://") || base.starts_with("https://")
}

/// 解析 JSON 数组并取出标签字段
fn parse_labels(text: &str, label_key: &str, location: &str) -> AppResult<Vec<String>> {
    let text = text.trim_start_matches('\u{feff}');
    let value: JsonValue = serde_json::from_str(text)?;

    let Some(items) = value.as_array() else {
        return Err(ReferenceDataError::NotAnArray {
            location: location.to_string(),
        }
        .into());
    };

    let mut labels = Vec::with_capacity(items.len());
    for item in items {
        match item.get(label_key).and_then(|v| v.as_str()) {
            Some(label) if !label.trim().is_empty() => labels.push(label.trim().to_string()),
            _ => warn!("条目缺少 {} 字段: {}", label_key, item),
        }
    }

    Ok(labels)
}

/// 去重后按不区分大小写、不区分重音的顺序排序
pub fn sort_labels(mut labels: Vec<String>) -> Vec<String> {
    labels.sort_by(|a, b| compare_labels(a, b));
    labels.dedup();
    labels
}

/// 先按折叠后的文本比较，相同时再按原文比较
pub fn compare_labels(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

fn collation_key(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| ACCENT_FOLD.get(&c).copied().unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_is_accent_and_case_insensitive() {
        let sorted = sort_labels(vec![
            "Perú".to_string(),
            "árbol".to_string(),
            "Panamá".to_string(),
            "Zeta".to_string(),
            "Perú".to_string(),
            "azul".to_string(),
        ]);

        assert_eq!(sorted, vec!["árbol", "azul", "Panamá", "Perú", "Zeta"]);
    }

    #[test]
    fn test_parse_labels_strips_bom_and_skips_missing_key() {
        let text = "\u{feff}[{\"Autor\": \"Ana Pérez\"}, {\"Nombre\": \"X\"}, {\"Autor\": \" \"}]";
        let labels = parse_labels(text, "Autor", "test").unwrap();
        assert_eq!(labels, vec!["Ana Pérez".to_string()]);
    }

    #[test]
    fn test_parse_labels_rejects_non_array() {
        let result = parse_labels("{\"Autor\": \"A\"}", "Autor", "test");
        assert!(matches!(
            result,
            Err(AppError::ReferenceData(ReferenceDataError::NotAnArray { .. }))
        ));
    }

    #[tokio::test]
    async fn test_load_list_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("roles.json"),
            r#"[{"Rol": "Guionista"}, {"Rol": "Director"}, {"Rol": "Director"}]"#,
        )
        .unwrap();

        let loader = ReferenceDataLoader::new(dir.path().to_string_lossy());
        let roles = loader.load_list(ReferenceKind::Roles).await;

        assert_eq!(roles, vec!["Director", "Guionista"]);
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ReferenceDataLoader::new(dir.path().to_string_lossy());

        assert!(loader.try_load_list(ReferenceKind::Countries).await.is_err());

        let countries = loader.load_list(ReferenceKind::Countries).await;
        assert!(countries.contains(&"México".to_string()));

        let lists = loader.load_all().await;
        assert!(lists.is_loaded(ReferenceKind::Authors));
        assert!(lists.get(ReferenceKind::Authors).is_empty());
    }
}
