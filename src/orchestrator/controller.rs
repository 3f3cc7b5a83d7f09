//! 申报表单控制器 - 编排层
//!
//! ## 职责
//!
//! 唯一持有应用状态的对象：参考列表、当前表单、区块计数器。
//!
//! - 启动时加载参考数据（`start`）
//! - 清空时重置表单（`reset`）
//! - 新增/删除展映、剧集区块、参与行
//! - 提交前按参考列表规范化输入，再交给 `SubmissionFlow`

use std::sync::Arc;
use tracing::{info, warn};

use crate::models::form::{
    EpisodeBlock, EpisodeEntry, Exhibition, FormatType, ParticipationLine, WorkForm,
};
use crate::models::reference::{ReferenceKind, ReferenceLists};
use crate::services::{
    Banner, FeedbackSurface, ReferenceDataLoader, SelectConfig, MAX_EPISODES_PER_BLOCK,
};
use crate::workflow::{SubmissionCtx, SubmissionFlow, SubmissionOutcome};

/// 申报表单控制器
#[derive(Clone)]
pub struct DeclarationController {
    lists: Arc<ReferenceLists>,
    select: SelectConfig,
    form: WorkForm,
    /// 只增不减，重置时归零
    block_counter: u32,
    flow: SubmissionFlow,
    feedback: Arc<dyn FeedbackSurface>,
}

impl DeclarationController {
    /// 创建控制器，初始表单带一个空展映
    pub fn new(flow: SubmissionFlow, feedback: Arc<dyn FeedbackSurface>) -> Self {
        Self {
            lists: Arc::new(ReferenceLists::new()),
            select: SelectConfig::default(),
            form: initial_form(),
            block_counter: 0,
            flow,
            feedback,
        }
    }

    pub fn with_select_config(mut self, select: SelectConfig) -> Self {
        self.select = select;
        self
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackSurface>) -> Self {
        self.feedback = feedback;
        self
    }

    /// 加载全部参考列表
    pub async fn start(&mut self, loader: &ReferenceDataLoader) {
        info!("📚 正在加载参考数据...");
        self.lists = Arc::new(loader.load_all().await);
    }

    pub fn set_reference_lists(&mut self, lists: ReferenceLists) {
        self.lists = Arc::new(lists);
    }

    pub fn reference_lists(&self) -> &ReferenceLists {
        &self.lists
    }

    pub fn form(&self) -> &WorkForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WorkForm {
        &mut self.form
    }

    /// 用已有表单替换当前状态
    ///
    /// 当前格式下不生效的容器会被清空
    pub fn load_form(&mut self, mut form: WorkForm) {
        if form.drop_inactive_source() {
            warn!(
                "《{}》格式为 {}，已丢弃不生效的参与数据",
                form.general.title, form.general.format_type
            );
        }

        let mut counter = 0;
        for block in form.episode_blocks.iter_mut() {
            counter += 1;
            if block.label.trim().is_empty() {
                block.label = block_label(counter);
            }
        }
        self.block_counter = counter;
        self.form = form;
    }

    /// 清空表单，计数器归零
    pub fn reset(&mut self) {
        self.form = initial_form();
        self.block_counter = 0;
    }

    /// 切换作品格式，同时清空不再生效的容器
    pub fn set_format_type(&mut self, format_type: FormatType) {
        self.form.general.format_type = format_type;
        if self.form.drop_inactive_source() {
            self.block_counter = 0;
        }
    }

    /// 新增展映，返回其索引
    pub fn add_exhibition(&mut self) -> usize {
        self.form.exhibitions.push(Exhibition::default());
        self.form.exhibitions.len() - 1
    }

    /// 删除展映，至少保留一个
    pub fn remove_exhibition(&mut self, index: usize) -> bool {
        if index >= self.form.exhibitions.len() {
            warn!("展映索引 {} 超出范围", index);
            return false;
        }
        if self.form.exhibitions.len() <= 1 {
            self.feedback
                .show_banner(&Banner::warning("Debe haber al menos una exhibición."));
            return false;
        }
        self.form.exhibitions.remove(index);
        true
    }

    /// 新增剧集区块，返回其索引
    pub fn add_episode_block(&mut self) -> usize {
        self.block_counter += 1;
        self.form.episode_blocks.push(EpisodeBlock {
            label: block_label(self.block_counter),
            ..Default::default()
        });
        self.form.episode_blocks.len() - 1
    }

    pub fn remove_episode_block(&mut self, index: usize) -> bool {
        if index >= self.form.episode_blocks.len() {
            warn!("剧集区块索引 {} 超出范围", index);
            return false;
        }
        self.form.episode_blocks.remove(index);
        true
    }

    /// 设置区块的剧集范围并重新生成单集条目
    ///
    /// 新范围内已填写的单集标题会保留；范围无效或过大时不生成条目
    pub fn set_episode_range(&mut self, index: usize, from: u32, to: u32) -> bool {
        let Some(block) = self.form.episode_blocks.get_mut(index) else {
            warn!("剧集区块索引 {} 超出范围", index);
            return false;
        };

        block.from = from;
        block.to = to;

        let valid = from > 0 && to >= from && to - from < MAX_EPISODES_PER_BLOCK;
        if !valid {
            block.episodes.clear();
            return true;
        }

        let previous = std::mem::take(&mut block.episodes);
        block.episodes = (from..=to)
            .map(|number| {
                previous
                    .iter()
                    .find(|e| e.number == number)
                    .cloned()
                    .unwrap_or_else(|| EpisodeEntry::new(number))
            })
            .collect();
        true
    }

    /// 新增参与行；`block` 为 None 时加到非剧集列表
    pub fn add_participation_line(&mut self, block: Option<usize>) -> bool {
        match self.lines_mut(block) {
            Some(lines) => {
                lines.push(ParticipationLine::default());
                true
            }
            None => false,
        }
    }

    pub fn remove_participation_line(&mut self, block: Option<usize>, line: usize) -> bool {
        match self.lines_mut(block) {
            Some(lines) if line < lines.len() => {
                lines.remove(line);
                true
            }
            _ => {
                warn!("参与行 {:?}/{} 不存在", block, line);
                false
            }
        }
    }

    fn lines_mut(&mut self, block: Option<usize>) -> Option<&mut Vec<ParticipationLine>> {
        match block {
            None => Some(&mut self.form.participation),
            Some(index) => self
                .form
                .episode_blocks
                .get_mut(index)
                .map(|b| &mut b.participation),
        }
    }

    /// 按参考列表规范化当前表单
    ///
    /// 与列表项忽略大小写相同的输入替换为列表中的写法；角色按原样精确匹配，
    /// 百分比校验按角色区分大小写。不允许自定义条目时，列表外的输入被清空
    pub fn normalized_form(&self) -> WorkForm {
        let mut form = self.form.clone();
        form.drop_inactive_source();
        let lists = &self.lists;

        form.general.producing_companies =
            self.resolve_many(&form.general.producing_companies, ReferenceKind::Producers);
        form.general.production_countries =
            self.resolve_many(&form.general.production_countries, ReferenceKind::Countries);
        form.general.language = self.resolve_one(&form.general.language, ReferenceKind::Languages);

        for exhibition in form.exhibitions.iter_mut() {
            exhibition.language = self.resolve_one(&exhibition.language, ReferenceKind::Languages);
            exhibition.country = self.resolve_one(&exhibition.country, ReferenceKind::Countries);
        }

        let normalize_line = |line: &mut ParticipationLine| {
            line.role = self
                .select
                .resolve_exact(&line.role, lists.get(ReferenceKind::Roles))
                .unwrap_or_default();
            line.contributor = self
                .select
                .resolve(&line.contributor, lists.get(ReferenceKind::Authors))
                .unwrap_or_default();
            line.percentage = line.percentage.trim().to_string();
        };

        form.participation.iter_mut().for_each(&normalize_line);
        for block in form.episode_blocks.iter_mut() {
            block.participation.iter_mut().for_each(&normalize_line);
            for episode in block.episodes.iter_mut() {
                for alternate in episode.alternate_titles.iter_mut() {
                    alternate.language =
                        self.resolve_one(&alternate.language, ReferenceKind::Languages);
                    alternate.country =
                        self.resolve_one(&alternate.country, ReferenceKind::Countries);
                }
            }
        }

        form
    }

    fn resolve_one(&self, value: &str, kind: ReferenceKind) -> String {
        self.select
            .resolve(value, self.lists.get(kind))
            .unwrap_or_default()
    }

    fn resolve_many(&self, values: &[String], kind: ReferenceKind) -> Vec<String> {
        values
            .iter()
            .flat_map(|value| self.select.split_tokens(value))
            .filter_map(|token| self.select.resolve(&token, self.lists.get(kind)))
            .collect()
    }

    /// 校验并提交当前表单
    pub async fn submit(&self, form_index: usize) -> SubmissionOutcome {
        let form = self.normalized_form();
        let ctx = SubmissionCtx::new(form_index, form.general.title.clone());
        self.flow.run(&form, &ctx, self.feedback.as_ref()).await
    }
}

fn initial_form() -> WorkForm {
    WorkForm {
        exhibitions: vec![Exhibition::default()],
        ..Default::default()
    }
}

fn block_label(number: u32) -> String {
    format!("Bloque de Episodios #{}", number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{SubmissionTransport, SubmitResponse};
    use crate::config::Config;
    use crate::error::AppResult;
    use crate::services::ConsoleFeedback;
    use async_trait::async_trait;
    use serde_json::Value as JsonValue;

    struct NoopTransport;

    #[async_trait]
    impl SubmissionTransport for NoopTransport {
        async fn submit(&self, _endpoint: &str, _batch: &JsonValue) -> AppResult<SubmitResponse> {
            Ok(SubmitResponse {
                ok: true,
                status: 200,
                body: String::new(),
            })
        }
    }

    fn controller() -> DeclarationController {
        let config = Config {
            primary_endpoint: "https://flow.test/primary".to_string(),
            ..Default::default()
        };
        let flow = SubmissionFlow::new(&config, Arc::new(NoopTransport));
        DeclarationController::new(flow, Arc::new(ConsoleFeedback::new()))
    }

    #[test]
    fn test_block_counter_and_reset() {
        let mut controller = controller();

        let first = controller.add_episode_block();
        controller.add_episode_block();
        assert!(controller.remove_episode_block(first));
        controller.add_episode_block();

        let labels: Vec<&str> = controller
            .form()
            .episode_blocks
            .iter()
            .map(|b| b.label.as_str())
            .collect();
        assert_eq!(labels, vec!["Bloque de Episodios #2", "Bloque de Episodios #3"]);

        controller.reset();
        assert!(controller.form().episode_blocks.is_empty());
        assert_eq!(controller.form().exhibitions.len(), 1);
        controller.add_episode_block();
        assert_eq!(controller.form().episode_blocks[0].label, "Bloque de Episodios #1");
    }

    #[test]
    fn test_last_exhibition_cannot_be_removed() {
        let mut controller = controller();
        assert!(!controller.remove_exhibition(0));

        controller.add_exhibition();
        assert!(controller.remove_exhibition(0));
        assert_eq!(controller.form().exhibitions.len(), 1);
    }

    #[test]
    fn test_set_episode_range_keeps_titles() {
        let mut controller = controller();
        let block = controller.add_episode_block();

        assert!(controller.set_episode_range(block, 1, 3));
        controller.form_mut().episode_blocks[block].episodes[1].title = "Dos".to_string();

        assert!(controller.set_episode_range(block, 2, 4));
        let episodes = &controller.form().episode_blocks[block].episodes;
        let numbers: Vec<u32> = episodes.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![2, 3, 4]);
        assert_eq!(episodes[0].title, "Dos");

        assert!(controller.set_episode_range(block, 5, 2));
        assert!(controller.form().episode_blocks[block].episodes.is_empty());
        assert!(!controller.set_episode_range(9, 1, 2));
    }

    #[test]
    fn test_participation_lines() {
        let mut controller = controller();
        let block = controller.add_episode_block();

        assert!(controller.add_participation_line(Some(block)));
        assert!(controller.add_participation_line(None));
        assert!(!controller.add_participation_line(Some(7)));
        assert!(controller.remove_participation_line(Some(block), 0));
        assert!(!controller.remove_participation_line(Some(block), 0));
        assert_eq!(controller.form().participation.len(), 1);
    }

    #[test]
    fn test_normalized_form_uses_reference_spelling() {
        let mut controller = controller();
        let mut lists = ReferenceLists::new();
        lists.insert(ReferenceKind::Roles, vec!["Director".to_string()]);
        lists.insert(ReferenceKind::Countries, vec!["Perú".to_string()]);
        controller.set_reference_lists(lists);

        let form = controller.form_mut();
        form.general.production_countries = vec!["perú, Chile".to_string()];
        form.participation = vec![ParticipationLine::new(" Director ", " Ana ", " 40 ")];

        let normalized = controller.normalized_form();
        assert_eq!(
            normalized.general.production_countries,
            vec!["Perú".to_string(), "Chile".to_string()]
        );
        assert_eq!(
            normalized.participation[0],
            ParticipationLine::new("Director", "Ana", "40")
        );
    }

    #[tokio::test]
    async fn test_submit_current_form() {
        let mut controller = controller();
        controller.form_mut().general.title = "Corto".to_string();
        controller
            .form_mut()
            .participation
            .push(ParticipationLine::new("Director", "Ana", "100"));

        let outcome = controller.submit(1).await;
        assert!(outcome.is_submitted());

        controller.reset();
        let outcome = controller.submit(2).await;
        assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
    }

    #[test]
    fn test_load_form_drops_inactive_source() {
        let mut controller = controller();
        let film = WorkForm {
            general: crate::models::form::GeneralInfo {
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

        controller.load_form(film);
        assert!(controller.form().episode_blocks.is_empty());
    }

    #[test]
    fn test_switching_format_clears_other_container() {
        let mut controller = controller();
        controller.set_format_type(FormatType::Serie);
        let block = controller.add_episode_block();
        assert!(controller.add_participation_line(Some(block)));

        controller.set_format_type(FormatType::Cortometraje);
        assert!(controller.form().episode_blocks.is_empty());

        controller.add_participation_line(None);
        controller.set_format_type(FormatType::Programa);
        assert!(controller.form().participation.is_empty());
        controller.add_episode_block();
        assert_eq!(controller.form().episode_blocks[0].label, "Bloque de Episodios #1");
    }

    #[tokio::test]
    async fn test_leftover_blocks_are_not_submitted() {
        let mut controller = controller();
        controller.form_mut().general.format_type = FormatType::Pelicula;
        controller.form_mut().episode_blocks.push(EpisodeBlock {
            from: 1,
            to: 1,
            participation: vec![ParticipationLine::new("Director", "A", "100")],
            ..Default::default()
        });

        let outcome = controller.submit(1).await;
        assert!(matches!(outcome, SubmissionOutcome::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_role_totals_stay_case_sensitive() {
        let mut controller = controller();
        let mut lists = ReferenceLists::new();
        lists.insert(ReferenceKind::Roles, vec!["Actor".to_string()]);
        controller.set_reference_lists(lists);

        controller.form_mut().participation = vec![
            ParticipationLine::new("Actor", "Ana", "60"),
            ParticipationLine::new("actor", "Luis", "60"),
        ];

        assert_eq!(controller.normalized_form().participation[1].role, "actor");
        let outcome = controller.submit(1).await;
        assert!(outcome.is_submitted(), "unexpected outcome: {:?}", outcome);
    }
}
