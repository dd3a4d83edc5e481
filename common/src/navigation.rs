//! 画面遷移
//!
//! メニュー → 基本情報 → 作業種別選択 → チェックリスト → 作業種別選択 → サマリー → メニュー

use crate::progress::can_finish;
use crate::types::{InspectionDocument, InspectionStatus, WorkTypeId};
use std::fmt;

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    BasicInfo,
    WorkSelection,
    Checklist(WorkTypeId),
    Summary,
}

impl Screen {
    pub fn path(&self) -> String {
        match self {
            Screen::Menu => "/".to_string(),
            Screen::BasicInfo => "/basic-info".to_string(),
            Screen::WorkSelection => "/work-selection".to_string(),
            Screen::Checklist(id) => format!("/checklist/{}", id),
            Screen::Summary => "/summary".to_string(),
        }
    }

    pub fn parse(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" => Some(Screen::Menu),
            "/basic-info" => Some(Screen::BasicInfo),
            "/work-selection" => Some(Screen::WorkSelection),
            "/summary" => Some(Screen::Summary),
            other => other
                .strip_prefix("/checklist/")
                .and_then(|id| id.parse().ok())
                .map(Screen::Checklist),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// 前提を満たさない画面は、前提を作り直せる最初の画面へ差し戻す
pub fn resolve(requested: Screen, doc: Option<&InspectionDocument>) -> Screen {
    let doc = match (requested, doc) {
        (Screen::Menu | Screen::BasicInfo, _) => return requested,
        (_, Some(doc)) if doc.basic_info.is_some() => doc,
        _ => return Screen::BasicInfo,
    };

    match requested {
        Screen::Checklist(id) => match doc.work_type(id) {
            Some(wt) if !wt.categories.is_empty() => requested,
            _ => Screen::WorkSelection,
        },
        Screen::Summary if !can_finish(doc) => Screen::WorkSelection,
        _ => requested,
    }
}

/// サマリーの「戻る」: 最後に完了した作業種別のチェックリスト
pub fn summary_back_target(doc: &InspectionDocument) -> Screen {
    doc.completed_work_types()
        .last()
        .map(|wt| Screen::Checklist(wt.id))
        .unwrap_or(Screen::WorkSelection)
}

/// 選択画面で最初からチェックされている作業種別
pub fn preselected(doc: &InspectionDocument) -> Vec<WorkTypeId> {
    doc.work_types
        .iter()
        .filter(|wt| wt.status != InspectionStatus::NotStarted)
        .map(|wt| wt.id)
        .collect()
}

/// 選択後に開くチェックリスト（カタログ順で先頭）
pub fn first_selected(selected: &[WorkTypeId]) -> Option<WorkTypeId> {
    WorkTypeId::ALL
        .into_iter()
        .find(|id| selected.contains(id))
}

/// 写真プレビューの表示状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoPreview {
    pub category_id: String,
    pub index: usize,
}

impl PhotoPreview {
    pub fn new(category_id: impl Into<String>, index: usize) -> Self {
        Self {
            category_id: category_id.into(),
            index,
        }
    }

    /// 写真削除後の状態。表示中の写真自体が消えたら閉じ、前の写真が消えたら番号を詰める
    pub fn after_delete(self, category_id: &str, deleted: usize) -> Option<Self> {
        if self.category_id != category_id || deleted > self.index {
            return Some(self);
        }
        if deleted == self.index {
            return None;
        }
        Some(Self {
            index: self.index - 1,
            ..self
        })
    }
}
