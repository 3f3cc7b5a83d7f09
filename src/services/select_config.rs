//! 下拉选择配置
//!
//! 描述下拉框"是否允许自定义条目、如何匹配搜索词"的类型化配置

/// 匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// 不区分大小写的子串匹配
    #[default]
    SubstringCaseInsensitive,
}

/// 下拉选择配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectConfig {
    /// 是否允许输入列表之外的值
    pub allow_custom_entries: bool,
    pub match_mode: MatchMode,
    /// 多值输入的分隔符
    pub token_separators: Vec<char>,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            allow_custom_entries: true,
            match_mode: MatchMode::SubstringCaseInsensitive,
            token_separators: vec![','],
        }
    }
}

impl SelectConfig {
    /// 搜索词是否匹配选项文本，空搜索词匹配全部
    pub fn matches(&self, term: &str, text: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        match self.match_mode {
            MatchMode::SubstringCaseInsensitive => {
                text.to_lowercase().contains(&term.to_lowercase())
            }
        }
    }

    /// 过滤出匹配的选项
    pub fn filter<'a>(&self, term: &str, options: &'a [String]) -> Vec<&'a str> {
        options
            .iter()
            .filter(|option| self.matches(term, option))
            .map(String::as_str)
            .collect()
    }

    /// 用搜索词创建新条目（去掉首尾空白，空白条目无效）
    pub fn create_entry(&self, term: &str) -> Option<String> {
        let term = term.trim();
        if term.is_empty() {
            None
        } else {
            Some(term.to_string())
        }
    }

    /// 把输入值解析为最终选中的值
    ///
    /// 与某个选项忽略大小写完全相同时返回该选项；否则在允许自定义时返回输入本身
    pub fn resolve(&self, term: &str, options: &[String]) -> Option<String> {
        let entry = self.create_entry(term)?;
        let lowered = entry.to_lowercase();

        if let Some(option) = options.iter().find(|o| o.to_lowercase() == lowered) {
            return Some(option.clone());
        }

        if self.allow_custom_entries {
            Some(entry)
        } else {
            None
        }
    }

    /// 与 `resolve` 相同，但只接受与选项完全一致的写法，不改变大小写
    pub fn resolve_exact(&self, term: &str, options: &[String]) -> Option<String> {
        let entry = self.create_entry(term)?;

        if options.iter().any(|o| *o == entry) || self.allow_custom_entries {
            Some(entry)
        } else {
            None
        }
    }

    /// 按分隔符拆分多值输入，丢弃空白项
    pub fn split_tokens(&self, input: &str) -> Vec<String> {
        input
            .split(|c: char| self.token_separators.contains(&c))
            .filter_map(|token| self.create_entry(token))
            .collect()
    }
}
