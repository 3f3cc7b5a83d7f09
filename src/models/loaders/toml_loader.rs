use crate::models::form::WorkForm;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载申报表单
pub async fn load_form_file(toml_file_path: &Path) -> Result<WorkForm> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取表单文件: {}", toml_file_path.display()))?;

    let form: WorkForm = toml::from_str(&content)
        .with_context(|| format!("无法解析表单文件: {}", toml_file_path.display()))?;

    Ok(form.with_file_path(toml_file_path.to_string_lossy().to_string()))
}

/// 从文件夹中加载所有表单文件，按文件名排序
///
/// 解析失败的文件只记录警告，不影响其他文件
pub async fn load_all_form_files(folder_path: &str) -> Result<Vec<WorkForm>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut forms = Vec::new();
    for path in paths {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_form_file(&path).await {
            Ok(form) => {
                tracing::info!(
                    "成功加载《{}》: {} 个剧集区块, {} 条参与行",
                    form.general.title,
                    form.episode_blocks.len(),
                    form.active_participation_lines().count()
                );
                forms.push(form);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::FormatType;

    const SERIES_FORM: &str = r#"
[general]
title = "Los Años Dorados"
format_type = "Serie"
producing_companies = ["Andes Films"]
production_countries = ["Chile", "Perú"]
production_year = 2023
language = "Español"

[[exhibitions]]
alternate_title = "The Golden Years"
language = "Inglés"
country = "Estados Unidos"
channel = "Netflix"

[[episode_blocks]]
season = 2
from = 1
to = 2

[[episode_blocks.episodes]]
number = 1
title = "El comienzo"

[[episode_blocks.episodes.alternate_titles]]
title = "The Beginning"
language = "Inglés"

[[episode_blocks.participation]]
role = "Director"
contributor = "Ana Pérez"
percentage = 60
"#;

    #[tokio::test]
    async fn test_load_form_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("serie.toml");
        std::fs::write(&path, SERIES_FORM).unwrap();

        let form = load_form_file(&path).await.unwrap();

        assert_eq!(form.general.title, "Los Años Dorados");
        assert_eq!(form.general.format_type, FormatType::Serie);
        assert_eq!(form.general.production_year, "2023");
        assert_eq!(form.episode_blocks[0].season, "2");
        assert_eq!(form.episode_blocks[0].participation[0].percentage, "60");
        assert_eq!(
            form.episode_blocks[0].episodes[0].alternate_titles[0].title,
            "The Beginning"
        );
        assert!(form.file_path.is_some());
    }

    #[tokio::test]
    async fn test_load_all_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), SERIES_FORM).unwrap();
        std::fs::write(dir.path().join("b.toml"), "general = [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignorado").unwrap();

        let forms = load_all_form_files(dir.path().to_str().unwrap())
            .await
            .unwrap();

        assert_eq!(forms.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_folder_fails() {
        let result = load_all_form_files("/no/existe/este/directorio").await;
        assert!(result.is_err());
    }
}
