//! 進捗計算と画面遷移の可否判定
//!
//! 評価済み項目数だけが進捗の指標。判定はすべてドキュメントに対する純粋な述語。

use crate::types::{BasicInfo, InspectionDocument, InspectionStatus, WorkType, WorkTypeId};

/// 基本情報の必須項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicField {
    SiteName,
    Location,
    SiteRepresentative,
    SiteSupervisor,
    ConstructionType,
    TeamMembers,
}

impl BasicField {
    pub fn label(&self) -> &'static str {
        match self {
            BasicField::SiteName => "現場名",
            BasicField::Location => "場所",
            BasicField::SiteRepresentative => "現場代理人",
            BasicField::SiteSupervisor => "現場責任者",
            BasicField::ConstructionType => "工事種別",
            BasicField::TeamMembers => "作業員",
        }
    }
}

pub fn total_items(work_type: &WorkType) -> usize {
    work_type.categories.iter().map(|c| c.items.len()).sum()
}

pub fn rated_items(work_type: &WorkType) -> usize {
    work_type.items().filter(|item| item.rating.is_some()).count()
}

/// 進捗率（0.0〜100.0）。項目がなければ0
pub fn progress(work_type: &WorkType) -> f64 {
    let total = total_items(work_type);
    if total == 0 {
        return 0.0;
    }
    rated_items(work_type) as f64 * 100.0 / total as f64
}

/// 表示用に四捨五入した進捗率
pub fn progress_percent(work_type: &WorkType) -> u32 {
    progress(work_type).round() as u32
}

/// すべての項目が評価済み（進捗100%）
pub fn is_complete(work_type: &WorkType) -> bool {
    let total = total_items(work_type);
    total > 0 && rated_items(work_type) == total
}

/// 未入力の必須項目（空白のみは未入力扱い）
pub fn missing_basic_fields(info: &BasicInfo) -> Vec<BasicField> {
    let text_fields = [
        (BasicField::SiteName, &info.site_name),
        (BasicField::Location, &info.location),
        (BasicField::SiteRepresentative, &info.site_representative),
        (BasicField::SiteSupervisor, &info.site_supervisor),
        (BasicField::ConstructionType, &info.construction_type),
    ];

    let mut missing: Vec<BasicField> = text_fields
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

    if info.team_members.is_empty() {
        missing.push(BasicField::TeamMembers);
    }
    missing
}

/// 基本情報画面から進めるか
pub fn can_leave_basic_info(info: &BasicInfo) -> bool {
    missing_basic_fields(info).is_empty()
}

/// 作業種別選択から点検を開始できるか
pub fn can_start_inspection(selected: &[WorkTypeId]) -> bool {
    !selected.is_empty()
}

/// チェックリストを完了して次へ進めるか
pub fn can_complete_checklist(work_type: &WorkType) -> bool {
    is_complete(work_type)
}

/// サマリーへ進めるか（完了済みの作業種別が1つ以上）
pub fn can_finish(doc: &InspectionDocument) -> bool {
    doc.work_types
        .iter()
        .any(|wt| wt.status == InspectionStatus::Completed)
}
