//! 参与数据存在性校验

use crate::models::form::WorkForm;

/// 当前格式生效的来源（剧集区块或非剧集列表）中至少有一条完整的参与行
pub fn has_participation_data(form: &WorkForm) -> bool {
    form.active_participation_lines().any(|line| line.is_complete())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::form::{EpisodeBlock, FormatType, GeneralInfo, ParticipationLine};

    #[test]
    fn test_empty_form_has_no_data() {
        assert!(!has_participation_data(&WorkForm::default()));
    }

    #[test]
    fn test_incomplete_line_does_not_count() {
        let form = WorkForm {
            participation: vec![ParticipationLine::new("Director", "A", "")],
            ..Default::default()
        };
        assert!(!has_participation_data(&form));
    }

    #[test]
    fn test_either_source_is_enough() {
        let bare = WorkForm {
            participation: vec![ParticipationLine::new("Director", "A", "10")],
            ..Default::default()
        };
        assert!(has_participation_data(&bare));

        let episodic = WorkForm {
            general: GeneralInfo {
                format_type: FormatType::Serie,
                ..Default::default()
            },
            episode_blocks: vec![EpisodeBlock {
                from: 1,
                to: 1,
                participation: vec![ParticipationLine::new("Actor", "B", "5")],
                ..Default::default()
            }],
            ..Default::default()
        };
        assert!(has_participation_data(&episodic));
    }

    #[test]
    fn test_inactive_source_does_not_count() {
        let block = EpisodeBlock {
            from: 1,
            to: 1,
            participation: vec![ParticipationLine::new("Director", "A", "100")],
            ..Default::default()
        };
        let film = WorkForm {
            general: GeneralInfo {
                format_type: FormatType::Pelicula,
                ..Default::default()
            },
            episode_blocks: vec![block],
            ..Default::default()
        };
        assert!(!has_participation_data(&film));

        let series = WorkForm {
            general: GeneralInfo {
                format_type: FormatType::Miniserie,
                ..Default::default()
            },
            participation: vec![ParticipationLine::new("Director", "A", "100")],
            ..Default::default()
        };
        assert!(!has_participation_data(&series));
    }
}
