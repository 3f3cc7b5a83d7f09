use crate::models::record::BatchKind;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的表单数量
    pub max_concurrent_forms: usize,
    /// 待提交表单（TOML）存放目录
    pub forms_folder: String,
    /// 参考数据目录或 http(s) 基础地址
    pub reference_data_dir: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 主批次提交成功后删除表单文件
    pub remove_after_submit: bool,
    // --- 自动化流程接口 ---
    pub primary_endpoint: String,
    pub exhibitions_endpoint: String,
    pub alternate_titles_endpoint: String,
    pub automation_api_version: String,
    pub automation_signature: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_forms: 4,
            forms_folder: "forms".to_string(),
            reference_data_dir: "assets".to_string(),
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            remove_after_submit: false,
            primary_endpoint: String::new(),
            exhibitions_endpoint: String::new(),
            alternate_titles_endpoint: String::new(),
            automation_api_version: "1".to_string(),
            automation_signature: String::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_forms: std::env::var("MAX_CONCURRENT_FORMS").ok().and_then(|v| v.parse().ok()).filter(|v| *v > 0).unwrap_or(default.max_concurrent_forms),
            forms_folder: std::env::var("FORMS_FOLDER").unwrap_or(default.forms_folder),
            reference_data_dir: std::env::var("REFERENCE_DATA_DIR").unwrap_or(default.reference_data_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
            remove_after_submit: std::env::var("REMOVE_AFTER_SUBMIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.remove_after_submit),
            primary_endpoint: std::env::var("PRIMARY_ENDPOINT").unwrap_or(default.primary_endpoint),
            exhibitions_endpoint: std::env::var("EXHIBITIONS_ENDPOINT").unwrap_or(default.exhibitions_endpoint),
            alternate_titles_endpoint: std::env::var("ALTERNATE_TITLES_ENDPOINT").unwrap_or(default.alternate_titles_endpoint),
            automation_api_version: std::env::var("AUTOMATION_API_VERSION").unwrap_or(default.automation_api_version),
            automation_signature: std::env::var("AUTOMATION_SIGNATURE").unwrap_or(default.automation_signature),
        }
    }

    /// 获取某个批次的提交地址
    pub fn endpoint(&self, kind: BatchKind) -> &str {
        match kind {
            BatchKind::Primary => &self.primary_endpoint,
            BatchKind::Exhibitions => &self.exhibitions_endpoint,
            BatchKind::AlternateTitles => &self.alternate_titles_endpoint,
        }
    }
}
