//! 记录展开 - 业务能力层
//!
//! 把层级化的表单状态展开为扁平的提交记录：
//! 第一行是主记录（基本信息 + 展映信息），之后按
//! 区块 → 剧集（升序）→ 参与行 的顺序逐行展开。

use chrono::{DateTime, SecondsFormat, Utc};
use std::collections::BTreeMap;

use crate::models::form::{Exhibition, ParticipationLine, WorkForm};
use crate::models::record::{
    EpisodeFields, ExhibitionRecord, MasterFields, ParticipationFields, SubmissionRecord,
};

/// 展开主批次记录
///
/// # 参数
/// - `form`: 表单状态
/// - `sent_at`: 提交时间（写入 `fecha_envio`）
///
/// # 返回
/// 第一条总是主记录
pub fn expand_records(form: &WorkForm, sent_at: DateTime<Utc>) -> Vec<SubmissionRecord> {
    let master = build_master_fields(form, sent_at);
    let mut records = vec![SubmissionRecord::master(master.clone())];

    if form.is_episodic() {
        for block in &form.episode_blocks {
            let lines = complete_lines(&block.participation);

            for number in block.episode_numbers() {
                let episode = EpisodeFields {
                    temporada: block.season_label().to_string(),
                    num_episodio: number,
                    titulo_episodio: block.episode_title(number),
                };

                // 没有参与行时仍保留剧集信息
                if lines.is_empty() {
                    records.push(SubmissionRecord {
                        master: master.clone(),
                        episode: Some(episode),
                        participation: None,
                    });
                    continue;
                }

                for line in &lines {
                    records.push(SubmissionRecord {
                        master: master.clone(),
                        episode: Some(episode.clone()),
                        participation: Some(participation_fields(line)),
                    });
                }
            }
        }
    } else {
        for line in complete_lines(&form.participation) {
            records.push(SubmissionRecord {
                master: master.clone(),
                episode: None,
                participation: Some(participation_fields(line)),
            });
        }
    }

    records
}

/// 构建主记录字段
pub fn build_master_fields(form: &WorkForm, sent_at: DateTime<Utc>) -> MasterFields {
    let general = &form.general;

    MasterFields {
        titulo_original: general.title.trim().to_string(),
        tipo_formato: general.format_type.label().to_string(),
        empresa_productora: join_values(&general.producing_companies),
        pais_produccion: join_values(&general.production_countries),
        anio_produccion: general.production_year.trim().to_string(),
        idioma: general.language.trim().to_string(),
        actores: general.actors.trim().to_string(),
        directores: general.directors.trim().to_string(),
        guionistas: general.writers.trim().to_string(),
        fecha_envio: sent_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        exhibiciones: exhibition_columns(&form.exhibitions),
    }
}

/// 构建国际展映批次
///
/// 序号与主记录中的后缀一致（页面上的位置，从 1 开始）
pub fn collect_exhibition_records(form: &WorkForm) -> Vec<ExhibitionRecord> {
    form.exhibitions
        .iter()
        .enumerate()
        .filter(|(_, exhibition)| exhibition.has_content())
        .map(|(idx, exhibition)| ExhibitionRecord {
            titulo_original: form.general.title.trim().to_string(),
            num_exhibicion: idx + 1,
            otro_titulo: exhibition.alternate_title.trim().to_string(),
            idioma_exhibicion: exhibition.language.trim().to_string(),
            pais_exhibicion: exhibition.country.trim().to_string(),
            canal: exhibition.channel.trim().to_string(),
        })
        .collect()
}

fn exhibition_columns(exhibitions: &[Exhibition]) -> BTreeMap<String, String> {
    let mut columns = BTreeMap::new();

    for (idx, exhibition) in exhibitions.iter().enumerate() {
        if !exhibition.has_content() {
            continue;
        }
        let num = idx + 1;
        columns.insert(
            format!("otro_titulo_{}", num),
            exhibition.alternate_title.trim().to_string(),
        );
        columns.insert(
            format!("idioma_exhibicion_{}", num),
            exhibition.language.trim().to_string(),
        );
        columns.insert(
            format!("pais_exhibicion_{}", num),
            exhibition.country.trim().to_string(),
        );
        columns.insert(format!("canal_{}", num), exhibition.channel.trim().to_string());
    }

    columns
}

fn complete_lines(lines: &[ParticipationLine]) -> Vec<&ParticipationLine> {
    lines.iter().filter(|line| line.is_complete()).collect()
}

fn participation_fields(line: &ParticipationLine) -> ParticipationFields {
    ParticipationFields {
        rol: line.role.trim().to_string(),
        autor: line.contributor.trim().to_string(),
        porcentaje: line.percentage.trim().to_string(),
    }
}

fn join_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
