//! 提交记录
//!
//! 扁平化后的表格行，字段名与目标表格的列名一致

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 提交批次类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// 主记录批次
    Primary,
    /// 国际展映批次
    Exhibitions,
    /// 单集其他标题批次
    AlternateTitles,
}

impl BatchKind {
    pub fn name(self) -> &'static str {
        match self {
            BatchKind::Primary => "主记录",
            BatchKind::Exhibitions => "国际展映",
            BatchKind::AlternateTitles => "其他标题",
        }
    }

    /// 展示给用户的名称
    pub fn label(self) -> &'static str {
        match self {
            BatchKind::Primary => "principal",
            BatchKind::Exhibitions => "exhibiciones internacionales",
            BatchKind::AlternateTitles => "títulos alternativos",
        }
    }
}

impl std::fmt::Display for BatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// 主记录字段：基本信息 + 展映信息（带序号后缀）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterFields {
    pub titulo_original: String,
    pub tipo_formato: String,
    pub empresa_productora: String,
    pub pais_produccion: String,
    pub anio_produccion: String,
    pub idioma: String,
    pub actores: String,
    pub directores: String,
    pub guionistas: String,
    pub fecha_envio: String,
    /// `otro_titulo_N` / `idioma_exhibicion_N` / `pais_exhibicion_N` / `canal_N`
    #[serde(flatten)]
    pub exhibiciones: BTreeMap<String, String>,
}

/// 剧集字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeFields {
    pub temporada: String,
    pub num_episodio: u32,
    pub titulo_episodio: String,
}

/// 参与字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationFields {
    pub rol: String,
    pub autor: String,
    pub porcentaje: String,
}

/// 主批次中的一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    #[serde(flatten)]
    pub master: MasterFields,
    #[serde(flatten)]
    pub episode: Option<EpisodeFields>,
    #[serde(flatten)]
    pub participation: Option<ParticipationFields>,
}

impl SubmissionRecord {
    /// 只有主记录字段的行
    pub fn master(master: MasterFields) -> Self {
        Self {
            master,
            episode: None,
            participation: None,
        }
    }

    pub fn is_master(&self) -> bool {
        self.episode.is_none() && self.participation.is_none()
    }
}

/// 国际展映批次中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExhibitionRecord {
    pub titulo_original: String,
    pub num_exhibicion: usize,
    pub otro_titulo: String,
    pub idioma_exhibicion: String,
    pub pais_exhibicion: String,
    pub canal: String,
}

/// 其他标题批次中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateTitleRecord {
    pub titulo_original: String,
    pub temporada: String,
    pub num_episodio: u32,
    pub titulo_episodio: String,
    pub titulo_alternativo: String,
    pub idioma: String,
    pub pais: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_flat() {
        let mut master = MasterFields {
            titulo_original: "La casa".to_string(),
            ..Default::default()
        };
        master
            .exhibiciones
            .insert("otro_titulo_1".to_string(), "The House".to_string());

        let record = SubmissionRecord {
            master,
            episode: Some(EpisodeFields {
                temporada: "1".to_string(),
                num_episodio: 4,
                titulo_episodio: "Episodio 4".to_string(),
            }),
            participation: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["titulo_original"], "La casa");
        assert_eq!(value["otro_titulo_1"], "The House");
        assert_eq!(value["num_episodio"], 4);
        assert!(value.get("rol").is_none());
    }
}
