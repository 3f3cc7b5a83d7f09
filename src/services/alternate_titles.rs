//! 单集其他标题收集 - 业务能力层
//!
//! 独立于主批次提交的第二条记录流

use crate::models::form::WorkForm;
use crate::models::record::AlternateTitleRecord;

/// 遍历全部剧集区块，收集每一集的其他标题
///
/// - 非剧集格式不收集
/// - 标题文本为空的条目直接丢弃（即使填写了语言/国家）
/// - 只收集区块范围内的剧集
pub fn collect_alternate_titles(form: &WorkForm) -> Vec<AlternateTitleRecord> {
    let mut records = Vec::new();
    if !form.is_episodic() {
        return records;
    }

    for block in &form.episode_blocks {
        for number in block.episode_numbers() {
            let Some(entry) = block.episode(number) else {
                continue;
            };

            for alternate in &entry.alternate_titles {
                let title = alternate.title.trim();
                if title.is_empty() {
                    continue;
                }

                records.push(AlternateTitleRecord {
                    titulo_original: form.general.title.trim().to_string(),
                    temporada: block.season_label().to_string(),
                    num_episodio: number,
                    titulo_episodio: block.episode_title(number),
                    titulo_alternativo: title.to_string(),
                    idioma: alternate.language.trim().to_string(),
                    pais: alternate.country.trim().to_string(),
                });
            }
        }
    }

    records
}
