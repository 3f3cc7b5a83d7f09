//! 百分比校验 - 业务能力层
//!
//! 同一角色的百分比累计不能超过 100

use crate::error::ValidationError;
use crate::models::form::ParticipationLine;
use crate::services::form_validator::ValidationVerdict;

/// 100% 对应的百分之一单位
const FULL_SHARE: i64 = 100 * 100;

/// 按角色累计百分比并检查是否超出 100
///
/// - 角色名区分大小写、精确匹配
/// - 角色为空的行不参与累计
/// - 错误按角色首次出现的顺序输出
pub fn validate_percentages<'a, I>(lines: I) -> ValidationVerdict
where
    I: IntoIterator<Item = &'a ParticipationLine>,
{
    ValidationVerdict::from_errors(percentage_overflows(lines))
}

/// 返回每个超额角色对应的校验问题
pub fn percentage_overflows<'a, I>(lines: I) -> Vec<ValidationError>
where
    I: IntoIterator<Item = &'a ParticipationLine>,
{
    // (角色, 百分之一单位的累计值)
    let mut totals: Vec<(&str, i64)> = Vec::new();

    for line in lines {
        let role = line.role.trim();
        if role.is_empty() {
            continue;
        }

        let hundredths = parse_hundredths(&line.percentage).unwrap_or(0);
        match totals.iter_mut().find(|(r, _)| *r == role) {
            Some((_, total)) => *total = total.saturating_add(hundredths),
            None => totals.push((role, hundredths)),
        }
    }

    totals
        .into_iter()
        .filter(|(_, total)| *total > FULL_SHARE)
        .map(|(role, total)| ValidationError::PercentageOverflow {
            role: role.to_string(),
            total: format_hundredths(total),
        })
        .collect()
}

/// 百分比文本的上限（百分之一单位），超出即视为无法解析
const MAX_PARSED_HUNDREDTHS: f64 = 1_000_000.0;

/// 把百分比文本转换为百分之一单位（"33.33" -> 3333）
///
/// 无法解析、为负数或大于 10000% 时返回 None
pub fn parse_hundredths(text: &str) -> Option<i64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    let hundredths = (value * 100.0).round();
    if !hundredths.is_finite() || !(0.0..=MAX_PARSED_HUNDREDTHS).contains(&hundredths) {
        return None;
    }
    Some(hundredths as i64)
}

/// 格式化为两位小数并带百分号（11000 -> "110.00%"）
fn format_hundredths(total: i64) -> String {
    let sign = if total < 0 { "-" } else { "" };
    let abs = total.abs();
    format!("{}{}.{:02}%", sign, abs / 100, abs % 100)
}
