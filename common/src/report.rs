//! 点検結果の集計と報告書テキスト生成
//!
//! 集計対象は完了済みの作業種別のみ。進行中の作業種別は評価済みでも含めない。

use crate::labels::rating_label;
use crate::types::{BasicInfo, ConstructionType, InspectionDocument, SafetyRating};
use std::fmt::Write;

/// 報告書ファイル名の接頭辞
pub const REPORT_FILE_PREFIX: &str = "安全点検報告書";

/// 評価の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub good: usize,
    pub warning: usize,
    pub danger: usize,
    /// 評価済み項目数
    pub total: usize,
}

impl Statistics {
    pub fn collect(doc: &InspectionDocument) -> Self {
        doc.completed_work_types()
            .flat_map(|wt| wt.items())
            .filter_map(|item| item.rating)
            .fold(Self::default(), |mut stats, rating| {
                stats.total += 1;
                match rating {
                    SafetyRating::Good => stats.good += 1,
                    SafetyRating::Warning => stats.warning += 1,
                    SafetyRating::Danger => stats.danger += 1,
                }
                stats
            })
    }

    /// 全体に対する割合（四捨五入）。総数0なら0
    pub fn percent(&self, count: usize) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (count as f64 * 100.0 / self.total as f64).round() as u32
    }
}

/// 報告書（集計＋テキスト）
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub statistics: Statistics,
    pub text: String,
}

/// ドキュメントから報告書を生成
pub fn project(doc: &InspectionDocument) -> Report {
    let statistics = Statistics::collect(doc);
    let text = render_text(doc, &statistics);
    Report { statistics, text }
}

/// `安全点検報告書_<点検日>_<現場名>.txt`
pub fn report_file_name(doc: &InspectionDocument) -> String {
    let (date, site_name) = doc
        .basic_info
        .as_ref()
        .map(|info| (info.date.as_str(), info.site_name.as_str()))
        .unwrap_or_default();
    let name = format!("{}_{}_{}.txt", REPORT_FILE_PREFIX, date, site_name.trim());
    name.replace(['/', '\\'], "_")
}

fn construction_label(code: &str) -> &str {
    ConstructionType::from_code(code)
        .map(|t| t.label())
        .unwrap_or(code)
}

fn render_text(doc: &InspectionDocument, stats: &Statistics) -> String {
    let fallback = BasicInfo::default();
    let info = doc.basic_info.as_ref().unwrap_or(&fallback);

    // Stringへのwrite!は失敗しない
    let mut out = String::from("=== 安全点検報告書 ===\n\n");

    out.push_str("【基本情報】\n");
    let _ = writeln!(out, "点検日: {}", info.date);
    let _ = writeln!(out, "現場名: {}", info.site_name);
    let _ = writeln!(out, "場所: {}", info.location);
    if let Some((lat, lon)) = info.coordinates() {
        let _ = writeln!(out, "位置情報: {}, {}", lat, lon);
    }
    let _ = writeln!(out, "現場代理人: {}", info.site_representative);
    let _ = writeln!(out, "現場責任者: {}", info.site_supervisor);
    let _ = writeln!(out, "工事種別: {}", construction_label(&info.construction_type));
    let _ = writeln!(out, "作業員: {}\n", info.team_members.join(", "));

    out.push_str("【点検結果サマリー】\n");
    let _ = writeln!(out, "総点検項目数: {}", stats.total);
    for (label, count) in [("良好", stats.good), ("注意", stats.warning), ("危険", stats.danger)] {
        let _ = writeln!(out, "{}: {} ({}%)", label, count, stats.percent(count));
    }
    out.push('\n');

    for work_type in doc.completed_work_types() {
        let _ = writeln!(out, "\n【{}】", work_type.name);
        for category in &work_type.categories {
            let _ = writeln!(out, "\n{}:", category.name);
            for item in &category.items {
                let _ = writeln!(out, "  - {}: {}", item.name, rating_label(item.rating));
                if !item.notes.is_empty() {
                    let _ = writeln!(out, "    メモ: {}", item.notes);
                }
            }
            if let Some(findings) = category.findings.as_deref().filter(|f| !f.trim().is_empty()) {
                let _ = writeln!(out, "  所見: {}", findings);
            }
            if !category.photos.is_empty() {
                let _ = writeln!(out, "  写真: {}枚", category.photos.len());
            }
        }
    }

    if !doc.final_comments.is_empty() {
        let _ = writeln!(out, "\n【総合コメント】\n{}", doc.final_comments);
    }

    out
}
