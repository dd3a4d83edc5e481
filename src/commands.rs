//! 非対話コマンド
//!
//! 各コマンドはセッションから全体を読み込み、1つ変更して全体を保存する。
//! 画面遷移の条件（基本情報・選択・完了）はここで判定する。

use crate::error::{PatrolError, Result};
use crate::photo;
use crate::store::{DocumentStore, Session};
use safety_patrol_common::labels::status_label;
use safety_patrol_common::navigation::{first_selected, resolve};
use safety_patrol_common::progress::{
    can_complete_checklist, can_finish, can_leave_basic_info, can_start_inspection,
    missing_basic_fields, progress_percent, rated_items, total_items,
};
use safety_patrol_common::{
    BasicInfo, InspectionDocument, SafetyRating, Screen, WorkType, WorkTypeId,
};
use std::fmt::Write;
use std::path::PathBuf;

/// 基本情報を確定する（既存の作業種別・コメントは引き継ぐ）
pub fn submit_basic_info<S: DocumentStore>(
    session: &Session<S>,
    info: BasicInfo,
) -> Result<InspectionDocument> {
    if !can_leave_basic_info(&info) {
        let missing: Vec<&str> = missing_basic_fields(&info).iter().map(|f| f.label()).collect();
        return Err(PatrolError::NotReady(format!("未入力の項目があります: {}", missing.join(", "))));
    }

    let doc = session.load().unwrap_or_default().set_basic_info(info);
    session.replace(&doc)?;
    tracing::info!("基本情報を保存");
    Ok(doc)
}

/// 作業種別を選択し、最初に点検する作業種別を返す
pub fn select_work_types<S: DocumentStore>(
    session: &Session<S>,
    selected: &[WorkTypeId],
) -> Result<(InspectionDocument, WorkTypeId)> {
    let doc = session.require()?;
    ensure_screen(&doc, Screen::WorkSelection)?;

    let first = first_selected(selected)
        .filter(|_| can_start_inspection(selected))
        .ok_or_else(|| PatrolError::NotReady("作業種別を1つ以上選択してください".into()))?;

    let doc = doc.select_work_types(selected);
    session.replace(&doc)?;
    tracing::info!(?selected, "作業種別を選択");
    Ok((doc, first))
}

pub fn rate<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
    category_id: &str,
    item_id: &str,
    rating: SafetyRating,
) -> Result<InspectionDocument> {
    let doc = checklist_doc(session, work_type_id)?;
    ensure_item(&doc, work_type_id, category_id, item_id)?;
    let doc = doc.set_rating(work_type_id, category_id, item_id, rating);
    session.replace(&doc)?;
    Ok(doc)
}

pub fn note<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
    category_id: &str,
    item_id: &str,
    notes: &str,
) -> Result<InspectionDocument> {
    let doc = checklist_doc(session, work_type_id)?;
    ensure_item(&doc, work_type_id, category_id, item_id)?;
    let doc = doc.set_notes(work_type_id, category_id, item_id, notes);
    session.replace(&doc)?;
    Ok(doc)
}

/// 所見を記録（注意・危険の項目がないカテゴリでも記録はできる）
pub fn findings<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
    category_id: &str,
    text: &str,
) -> Result<InspectionDocument> {
    let doc = checklist_doc(session, work_type_id)?;
    let has_issues = ensure_category(&doc, work_type_id, category_id)?.has_issues();
    if !has_issues {
        tracing::warn!(category = category_id, "注意・危険の項目がないカテゴリに所見を記録");
    }
    let doc = doc.set_findings(work_type_id, category_id, text);
    session.replace(&doc)?;
    Ok(doc)
}

/// 写真を追加し、追加できた枚数を返す
pub async fn add_photos<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
    category_id: &str,
    inputs: &[PathBuf],
) -> Result<usize> {
    let doc = checklist_doc(session, work_type_id)?;
    ensure_category(&doc, work_type_id, category_id)?;

    let paths = photo::expand_photo_paths(inputs)?;
    let photos = photo::encode_photos(&paths).await;
    let added = photos.len();

    let doc = doc.add_photos(work_type_id, category_id, photos);
    session.replace(&doc)?;
    tracing::info!(added, requested = paths.len(), "写真を追加");
    Ok(added)
}

pub fn delete_photo<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
    category_id: &str,
    index: usize,
) -> Result<InspectionDocument> {
    let doc = checklist_doc(session, work_type_id)?;
    let count = ensure_category(&doc, work_type_id, category_id)?.photos.len();
    if index >= count {
        return Err(PatrolError::NotReady(format!(
            "写真番号 {} は存在しません（{}枚）",
            index, count
        )));
    }
    let doc = doc.delete_photo(work_type_id, category_id, index);
    session.replace(&doc)?;
    Ok(doc)
}

/// カテゴリの写真一覧（番号・形式・識別子）
pub fn photo_listing(
    doc: &InspectionDocument,
    work_type_id: WorkTypeId,
    category_id: &str,
) -> Result<Vec<String>> {
    let category = ensure_category(doc, work_type_id, category_id)?;
    Ok(category
        .photos
        .iter()
        .enumerate()
        .map(|(i, p)| format!("[{}] {} {}", i, p.mime_type(), p.fingerprint()))
        .collect())
}

/// 作業種別を完了にする。未評価が残る場合は `force` がなければ拒否
pub fn complete<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
    force: bool,
) -> Result<InspectionDocument> {
    let doc = checklist_doc(session, work_type_id)?;
    let work_type = find_work_type(&doc, work_type_id)?;
    if !can_complete_checklist(work_type) {
        if !force {
            return Err(PatrolError::NotReady(format!(
                "{} に未評価の項目があります（{}/{}）",
                work_type.name,
                rated_items(work_type),
                total_items(work_type)
            )));
        }
        tracing::warn!(work_type = %work_type_id, "未評価の項目を残したまま完了");
    }

    let doc = doc.complete_work_type(work_type_id);
    session.replace(&doc)?;
    tracing::info!(work_type = %work_type_id, "作業種別を完了");
    Ok(doc)
}

pub fn comment<S: DocumentStore>(session: &Session<S>, text: &str) -> Result<InspectionDocument> {
    session.update(|doc| doc.set_final_comments(text))
}

/// サマリーへ進めるドキュメントを返す
pub fn summary_doc<S: DocumentStore>(session: &Session<S>) -> Result<InspectionDocument> {
    let doc = session.require()?;
    ensure_screen(&doc, Screen::Summary)?;
    Ok(doc)
}

/// 作業種別ごとの状況
pub fn render_status(doc: &InspectionDocument) -> String {
    let mut out = String::new();
    match &doc.basic_info {
        Some(info) => {
            let _ = writeln!(out, "{} {} ({})", info.date, info.site_name, info.location);
        }
        None => out.push_str("基本情報: 未入力\n"),
    }
    for work_type in &doc.work_types {
        let _ = writeln!(
            out,
            "  {:<14} {:<4} {:>3}%",
            work_type.name,
            status_label(work_type.status),
            progress_percent(work_type)
        );
    }
    if can_finish(doc) {
        out.push_str("→ サマリーへ進めます\n");
    }
    out
}

fn ensure_screen(doc: &InspectionDocument, screen: Screen) -> Result<()> {
    let resolved = resolve(screen, Some(doc));
    if resolved == screen {
        return Ok(());
    }
    let reason = match resolved {
        Screen::BasicInfo => "基本情報が未入力です".to_string(),
        Screen::WorkSelection if screen == Screen::Summary => "完了した作業種別がありません".to_string(),
        Screen::WorkSelection => "この作業種別は選択されていません".to_string(),
        other => format!("{} から操作してください", other),
    };
    Err(PatrolError::NotReady(reason))
}

fn checklist_doc<S: DocumentStore>(
    session: &Session<S>,
    work_type_id: WorkTypeId,
) -> Result<InspectionDocument> {
    let doc = session.require()?;
    ensure_screen(&doc, Screen::Checklist(work_type_id))?;
    Ok(doc)
}

fn find_work_type(doc: &InspectionDocument, id: WorkTypeId) -> Result<&WorkType> {
    doc.work_type(id)
        .ok_or_else(|| PatrolError::UnknownWorkType(id.to_string()))
}

fn ensure_category<'a>(
    doc: &'a InspectionDocument,
    work_type_id: WorkTypeId,
    category_id: &str,
) -> Result<&'a safety_patrol_common::ChecklistCategory> {
    find_work_type(doc, work_type_id)?
        .category(category_id)
        .ok_or_else(|| PatrolError::UnknownCategory(category_id.to_string()))
}

fn ensure_item(
    doc: &InspectionDocument,
    work_type_id: WorkTypeId,
    category_id: &str,
    item_id: &str,
) -> Result<()> {
    ensure_category(doc, work_type_id, category_id)?
        .item(item_id)
        .map(|_| ())
        .ok_or_else(|| PatrolError::UnknownItem(format!("{}/{}", category_id, item_id)))
}
