//! 表单模型
//!
//! 对应申报页面上的全部表单状态：基本信息、展映信息、剧集区块、参与行

use serde::{Deserialize, Serialize};

/// 作品格式
///
/// 决定表单使用剧集区块还是单独的参与行列表（二者互斥）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormatType {
    /// 未选择
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "Película", alias = "Pelicula")]
    Pelicula,
    #[serde(rename = "Cortometraje")]
    Cortometraje,
    #[serde(rename = "Documental")]
    Documental,
    #[serde(rename = "Serie")]
    Serie,
    #[serde(rename = "Miniserie")]
    Miniserie,
    #[serde(rename = "Telenovela")]
    Telenovela,
    #[serde(rename = "Programa")]
    Programa,
}

impl FormatType {
    /// 获取表单上显示的名称
    pub fn label(self) -> &'static str {
        match self {
            FormatType::Unset => "",
            FormatType::Pelicula => "Película",
            FormatType::Cortometraje => "Cortometraje",
            FormatType::Documental => "Documental",
            FormatType::Serie => "Serie",
            FormatType::Miniserie => "Miniserie",
            FormatType::Telenovela => "Telenovela",
            FormatType::Programa => "Programa",
        }
    }

    /// 是否按剧集申报
    pub fn is_episodic(self) -> bool {
        matches!(
            self,
            FormatType::Serie | FormatType::Miniserie | FormatType::Telenovela | FormatType::Programa
        )
    }
}

impl std::fmt::Display for FormatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 作品基本信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralInfo {
    pub title: String,
    pub format_type: FormatType,
    pub producing_companies: Vec<String>,
    pub production_countries: Vec<String>,
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub production_year: String,
    pub language: String,
    pub actors: String,
    pub directors: String,
    pub writers: String,
}

/// 展映信息（其他标题 / 语言 / 国家 / 频道）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Exhibition {
    pub alternate_title: String,
    pub language: String,
    pub country: String,
    pub channel: String,
}

impl Exhibition {
    /// 至少有一个字段非空
    pub fn has_content(&self) -> bool {
        [&self.alternate_title, &self.language, &self.country, &self.channel]
            .iter()
            .any(|v| !v.trim().is_empty())
    }
}

/// 参与行：角色 + 作者 + 百分比
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipationLine {
    pub role: String,
    pub contributor: String,
    /// 保留用户输入的原始文本
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub percentage: String,
}

impl ParticipationLine {
    pub fn new(
        role: impl Into<String>,
        contributor: impl Into<String>,
        percentage: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            contributor: contributor.into(),
            percentage: percentage.into(),
        }
    }

    /// 角色、作者、百分比都已填写
    pub fn is_complete(&self) -> bool {
        !self.role.trim().is_empty()
            && !self.contributor.trim().is_empty()
            && !self.percentage.trim().is_empty()
    }
}

/// 单集的其他标题
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlternateTitle {
    pub title: String,
    pub language: String,
    pub country: String,
}

/// 单集条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeEntry {
    pub number: u32,
    pub title: String,
    pub alternate_titles: Vec<AlternateTitle>,
}

impl EpisodeEntry {
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Default::default()
        }
    }
}

/// 剧集区块
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodeBlock {
    /// 页面上的区块标题
    pub label: String,
    #[serde(deserialize_with = "deserialize_loose_string")]
    pub season: String,
    pub from: u32,
    pub to: u32,
    pub episodes: Vec<EpisodeEntry>,
    pub participation: Vec<ParticipationLine>,
}

impl EpisodeBlock {
    /// 区块覆盖的剧集编号，范围无效时为空
    pub fn episode_numbers(&self) -> std::ops::RangeInclusive<u32> {
        if self.from == 0 || self.to < self.from {
            // 空区间
            1..=0
        } else {
            self.from..=self.to
        }
    }

    /// 查找某一集的条目
    pub fn episode(&self, number: u32) -> Option<&EpisodeEntry> {
        self.episodes.iter().find(|e| e.number == number)
    }

    /// 获取单集标题，未填写时回退为 "Episodio N"
    pub fn episode_title(&self, number: u32) -> String {
        match self.episode(number) {
            Some(entry) if !entry.title.trim().is_empty() => entry.title.clone(),
            _ => format!("Episodio {}", number),
        }
    }

    /// 季标签，未填写时为 "1"
    pub fn season_label(&self) -> &str {
        let season = self.season.trim();
        if season.is_empty() {
            "1"
        } else {
            season
        }
    }
}

/// 完整的申报表单
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkForm {
    pub general: GeneralInfo,
    pub exhibitions: Vec<Exhibition>,
    pub episode_blocks: Vec<EpisodeBlock>,
    /// 非剧集作品的参与行
    pub participation: Vec<ParticipationLine>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl WorkForm {
    /// 当前是否为剧集模式
    pub fn is_episodic(&self) -> bool {
        self.general.format_type.is_episodic()
    }

    /// 当前格式下生效的参与行
    ///
    /// 剧集模式只看剧集区块，否则只看非剧集列表
    pub fn active_participation_lines(&self) -> impl Iterator<Item = &ParticipationLine> {
        let (blocks, bare): (&[EpisodeBlock], &[ParticipationLine]) = if self.is_episodic() {
            (self.episode_blocks.as_slice(), &[][..])
        } else {
            (&[][..], self.participation.as_slice())
        };

        blocks
            .iter()
            .flat_map(|b| b.participation.iter())
            .chain(bare.iter())
    }

    /// 清空当前格式下不生效的容器，返回是否丢弃了内容
    pub fn drop_inactive_source(&mut self) -> bool {
        if self.is_episodic() {
            let dropped = !self.participation.is_empty();
            self.participation.clear();
            dropped
        } else {
            let dropped = !self.episode_blocks.is_empty();
            self.episode_blocks.clear();
            dropped
        }
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// 字符串或数字统一反序列化为字符串（年份、百分比、季）
pub(crate) fn deserialize_loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct LooseStringVisitor;

    impl<'de> Visitor<'de> for LooseStringVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a number")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(LooseStringVisitor)
}
