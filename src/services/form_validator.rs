//! 提交前表单校验 - 业务能力层
//!
//! 汇总全部校验项，一次性返回所有问题（而不是逐条提示）

use regex::Regex;
use std::sync::OnceLock;

use crate::error::ValidationError;
use crate::models::form::WorkForm;
use crate::services::percentage_validator::{parse_hundredths, percentage_overflows};
use crate::services::presence_validator::has_participation_data;

/// 单个剧集区块允许的最大集数
pub const MAX_EPISODES_PER_BLOCK: u32 = 50;

/// 校验结论
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationVerdict {
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors: errors.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// 执行全部提交前校验
///
/// 顺序：存在性 → 剧集范围 → 百分比格式 → 百分比累计
pub fn validate_form(form: &WorkForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !has_participation_data(form) {
        errors.push(ValidationError::PresenceMissing);
    }

    if form.is_episodic() {
        errors.extend(episode_range_errors(form));
    }

    for line in form.active_participation_lines() {
        let role = line.role.trim();
        let value = line.percentage.trim();
        if role.is_empty() || value.is_empty() {
            continue;
        }
        if !is_valid_percentage(value) {
            errors.push(ValidationError::InvalidPercentage {
                role: role.to_string(),
                value: value.to_string(),
            });
        }
    }

    errors.extend(percentage_overflows(form.active_participation_lines()));

    errors
}

/// 检查每个剧集区块的范围
///
/// 区块编号从 1 开始，与页面上显示的一致
pub fn episode_range_errors(form: &WorkForm) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (idx, block) in form.episode_blocks.iter().enumerate() {
        let number = idx + 1;
        if block.from == 0 || block.to < block.from {
            errors.push(ValidationError::InvalidEpisodeRange {
                block: number,
                from: block.from,
                to: block.to,
            });
        } else if block.to - block.from + 1 > MAX_EPISODES_PER_BLOCK {
            errors.push(ValidationError::EpisodeRangeTooLarge {
                block: number,
                from: block.from,
                to: block.to,
                max: MAX_EPISODES_PER_BLOCK,
            });
        }
    }

    errors
}

/// 0-100 之间，最多两位小数
pub fn is_valid_percentage(value: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

    let pattern = PATTERN.get_or_init(|| Regex::new(r"^\d{1,3}([.,]\d{1,2})?$").ok());
    if let Some(re) = pattern {
        if !re.is_match(value) {
            return false;
        }
    }

    matches!(parse_hundredths(value), Some(v) if (0..=10_000).contains(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{EpisodeBlock, FormatType, GeneralInfo, ParticipationLine};

    fn series(blocks: Vec<EpisodeBlock>) -> WorkForm {
        WorkForm {
            general: GeneralInfo {
                format_type: FormatType::Serie,
                ..Default::default()
            },
            episode_blocks: blocks,
            ..Default::default()
        }
    }

    #[test]
    fn test_reports_every_problem_at_once() {
        let form = series(vec![
            EpisodeBlock {
                from: 4,
                to: 2,
                participation: vec![ParticipationLine::new("Actor", "A", "70")],
                ..Default::default()
            },
            EpisodeBlock {
                from: 1,
                to: 60,
                participation: vec![
                    ParticipationLine::new("Actor", "B", "40"),
                    ParticipationLine::new("Director", "C", "12.345"),
                ],
                ..Default::default()
            },
        ]);

        let errors = validate_form(&form);

        assert_eq!(errors.len(), 4);
        assert!(matches!(
            errors[0],
            ValidationError::InvalidEpisodeRange { block: 1, .. }
        ));
        assert!(matches!(
            errors[1],
            ValidationError::EpisodeRangeTooLarge { block: 2, .. }
        ));
        assert!(matches!(errors[2], ValidationError::InvalidPercentage { .. }));
        assert_eq!(errors[3].to_string(), "Actor total exceeds 100% (110.00%)");
    }

    #[test]
    fn test_missing_participation() {
        let errors = validate_form(&WorkForm::default());
        assert_eq!(errors, vec![ValidationError::PresenceMissing]);
    }

    #[test]
    fn test_valid_form_passes() {
        let form = series(vec![EpisodeBlock {
            from: 1,
            to: 50,
            participation: vec![ParticipationLine::new("Director", "A", "100")],
            ..Default::default()
        }]);

        let verdict = ValidationVerdict::from_errors(validate_form(&form));
        assert!(verdict.valid);
    }

    #[test]
    fn test_percentage_format() {
        assert!(is_valid_percentage("0"));
        assert!(is_valid_percentage("100"));
        assert!(is_valid_percentage("99.99"));
        assert!(is_valid_percentage("12,5"));
        assert!(!is_valid_percentage("100.01"));
        assert!(!is_valid_percentage("1.234"));
        assert!(!is_valid_percentage("-5"));
        assert!(!is_valid_percentage("diez"));
    }

    #[test]
    fn test_leftover_blocks_in_film_are_ignored() {
        let form = WorkForm {
            general: GeneralInfo {
                format_type: FormatType::Pelicula,
                ..Default::default()
            },
            episode_blocks: vec![EpisodeBlock {
                from: 1,
                to: 1,
                participation: vec![ParticipationLine::new("Director", "A", "100")],
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(validate_form(&form), vec![ValidationError::PresenceMissing]);
    }

    #[test]
    fn test_huge_percentages_are_reported_not_summed() {
        let form = series(vec![EpisodeBlock {
            from: 1,
            to: 1,
            participation: vec![
                ParticipationLine::new("Actor", "A", "9e16"),
                ParticipationLine::new("Actor", "B", "9e16"),
            ],
            ..Default::default()
        }]);

        let errors = validate_form(&form);

        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ValidationError::InvalidPercentage { .. })));
    }
}
