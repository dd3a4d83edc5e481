//! 点検の流れのテスト
//!
//! 基本情報入力から報告書出力までをコマンド単位で検証

use safety_patrol::commands;
use safety_patrol::error::PatrolError;
use safety_patrol::store::{MemoryStore, Session};
use safety_patrol_common::navigation::{resolve, summary_back_target};
use safety_patrol_common::progress::{can_leave_basic_info, is_complete, progress_percent};
use safety_patrol_common::{
    project, BasicInfo, InspectionStatus, SafetyRating, Screen, WorkTypeId,
};
use std::path::PathBuf;
use tempfile::tempdir;

fn complete_info() -> BasicInfo {
    let mut info = BasicInfo::new("2025-04-01");
    info.site_name = "Site A".to_string();
    info.location = "福岡市中央区".to_string();
    info.site_representative = "山田".to_string();
    info.site_supervisor = "田中".to_string();
    info.construction_type = "electrical-kyuden".to_string();
    info.add_team_member("佐藤");
    info
}

fn session_with_crane() -> Session<MemoryStore> {
    let session = Session::new(MemoryStore::new());
    commands::submit_basic_info(&session, complete_info()).expect("基本情報の保存失敗");
    commands::select_work_types(&session, &[WorkTypeId::Crane]).expect("選択失敗");
    session
}

fn rate_all(session: &Session<MemoryStore>, id: WorkTypeId, rating: SafetyRating) {
    let doc = session.require().unwrap();
    let targets: Vec<(String, String)> = doc
        .work_type(id)
        .unwrap()
        .categories
        .iter()
        .flat_map(|c| c.items.iter().map(move |i| (c.id.clone(), i.id.clone())))
        .collect();
    for (category, item) in targets {
        commands::rate(session, id, &category, &item, rating).unwrap();
    }
}

/// 作業員を追加して削除すると再び進めなくなる
#[test]
fn test_basic_info_member_gate() {
    let mut info = complete_info();
    info.team_members.clear();
    assert!(!can_leave_basic_info(&info));

    assert!(info.add_team_member("佐藤"));
    assert!(can_leave_basic_info(&info));

    info.remove_team_member(0);
    assert!(!can_leave_basic_info(&info));

    let session = Session::new(MemoryStore::new());
    let result = commands::submit_basic_info(&session, info);
    assert!(matches!(result, Err(PatrolError::NotReady(_))));
    assert!(session.load().is_none(), "不完全な基本情報が保存された");
}

/// 基本情報なしでは作業種別を選択できない
#[test]
fn test_select_without_session() {
    let session = Session::new(MemoryStore::new());
    let result = commands::select_work_types(&session, &[WorkTypeId::Crane]);
    assert!(matches!(result, Err(PatrolError::NoSession)));
}

#[test]
fn test_select_requires_one_work_type() {
    let session = Session::new(MemoryStore::new());
    commands::submit_basic_info(&session, complete_info()).unwrap();

    let result = commands::select_work_types(&session, &[]);
    assert!(matches!(result, Err(PatrolError::NotReady(_))));
}

/// 最初に点検するのは作業種別の並び順で先頭のもの
#[test]
fn test_select_returns_first_in_catalog_order() {
    let session = Session::new(MemoryStore::new());
    commands::submit_basic_info(&session, complete_info()).unwrap();

    let (doc, first) =
        commands::select_work_types(&session, &[WorkTypeId::Manhole, WorkTypeId::Crane]).unwrap();
    assert_eq!(first, WorkTypeId::Crane);
    assert_eq!(
        doc.work_type(WorkTypeId::Manhole).unwrap().status,
        InspectionStatus::InProgress
    );
    assert_eq!(
        doc.work_type(WorkTypeId::Excavation).unwrap().status,
        InspectionStatus::NotStarted
    );
}

/// 選択していない作業種別のチェックリストは操作できない
#[test]
fn test_rate_unselected_work_type() {
    let session = session_with_crane();
    let result = commands::rate(
        &session,
        WorkTypeId::Manhole,
        "basic",
        "helmet",
        SafetyRating::Good,
    );
    assert!(matches!(result, Err(PatrolError::NotReady(_))));
}

#[test]
fn test_rate_unknown_item() {
    let session = session_with_crane();
    let result = commands::rate(&session, WorkTypeId::Crane, "basic", "goggles", SafetyRating::Good);
    assert!(matches!(result, Err(PatrolError::UnknownItem(_))));

    let result = commands::rate(&session, WorkTypeId::Crane, "lighting", "helmet", SafetyRating::Good);
    assert!(matches!(result, Err(PatrolError::UnknownCategory(_))));
}

/// 一部だけ評価した状態では完了できない
#[test]
fn test_partial_rating_blocks_completion() {
    let session = session_with_crane();
    commands::rate(&session, WorkTypeId::Crane, "basic", "helmet", SafetyRating::Good).unwrap();
    let doc = commands::rate(&session, WorkTypeId::Crane, "basic", "gloves", SafetyRating::Good)
        .unwrap();

    let crane = doc.work_type(WorkTypeId::Crane).unwrap();
    assert_eq!(progress_percent(crane), 20);
    assert!(!is_complete(crane));

    let result = commands::complete(&session, WorkTypeId::Crane, false);
    assert!(matches!(result, Err(PatrolError::NotReady(_))));
    assert_eq!(
        session.require().unwrap().work_type(WorkTypeId::Crane).unwrap().status,
        InspectionStatus::InProgress
    );
}

#[test]
fn test_force_complete() {
    let session = session_with_crane();
    let doc = commands::complete(&session, WorkTypeId::Crane, true).unwrap();
    assert_eq!(
        doc.work_type(WorkTypeId::Crane).unwrap().status,
        InspectionStatus::Completed
    );
}

/// すべて良好で完了すると集計は良好のみ
#[test]
fn test_all_good_statistics() {
    let session = session_with_crane();
    rate_all(&session, WorkTypeId::Crane, SafetyRating::Good);
    let doc = commands::complete(&session, WorkTypeId::Crane, false).expect("完了失敗");

    let report = project(&doc);
    let item_count = doc.work_type(WorkTypeId::Crane).unwrap().items().count();
    assert_eq!(report.statistics.good, item_count);
    assert_eq!(report.statistics.warning, 0);
    assert_eq!(report.statistics.danger, 0);
    assert_eq!(report.statistics.total, item_count);
}

/// 未完了の作業種別の評価は集計に含めない
#[test]
fn test_statistics_ignore_in_progress() {
    let session = session_with_crane();
    rate_all(&session, WorkTypeId::Crane, SafetyRating::Danger);

    let doc = session.require().unwrap();
    let report = project(&doc);
    assert_eq!(report.statistics.good, 0);
    assert_eq!(report.statistics.warning, 0);
    assert_eq!(report.statistics.danger, 0);
    assert_eq!(report.statistics.total, 0);

    let result = commands::summary_doc(&session);
    assert!(matches!(result, Err(PatrolError::NotReady(_))));
}

/// 所見は注意・危険のあるカテゴリで記録する
#[test]
fn test_findings_recorded() {
    let session = session_with_crane();
    commands::rate(&session, WorkTypeId::Crane, "basic", "helmet", SafetyRating::Warning).unwrap();
    let doc = commands::findings(&session, WorkTypeId::Crane, "basic", "あご紐の締め忘れ").unwrap();

    let basic = doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap();
    assert!(basic.has_issues());
    assert_eq!(basic.findings.as_deref(), Some("あご紐の締め忘れ"));
}

/// 3枚中1枚目（0始まり）を削除すると後ろが1つ詰まる
#[tokio::test]
async fn test_photo_add_and_delete() {
    let dir = tempdir().expect("Failed to create temp dir");
    let names = ["a.jpg", "b.png", "c.jpg"];
    for (i, name) in names.iter().enumerate() {
        std::fs::write(dir.path().join(name), [i as u8; 8]).unwrap();
    }
    std::fs::write(dir.path().join("memo.txt"), "x").unwrap();

    let session = session_with_crane();
    let added = commands::add_photos(
        &session,
        WorkTypeId::Crane,
        "basic",
        &[dir.path().to_path_buf()],
    )
    .await
    .expect("写真追加失敗");
    assert_eq!(added, 3);

    let doc = session.require().unwrap();
    let before = doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().photos.clone();
    assert_eq!(before[1].mime_type(), "image/png");

    let doc = commands::delete_photo(&session, WorkTypeId::Crane, "basic", 1).unwrap();
    let after = &doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().photos;
    assert_eq!(after, &vec![before[0].clone(), before[2].clone()]);

    let listing = commands::photo_listing(&doc, WorkTypeId::Crane, "basic").unwrap();
    assert_eq!(listing.len(), 2);
    assert!(listing[1].starts_with("[1] image/jpeg"));

    let result = commands::delete_photo(&session, WorkTypeId::Crane, "basic", 5);
    assert!(matches!(result, Err(PatrolError::NotReady(_))));
}

/// 読み込めないファイルは飛ばして残りを追加する
#[tokio::test]
async fn test_photo_add_skips_unreadable() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("ok.jpg");
    std::fs::write(&good, [0xFF, 0xD8, 0xFF]).unwrap();

    let session = session_with_crane();
    let inputs = vec![good, PathBuf::from("/nonexistent/missing.jpg")];
    let added = commands::add_photos(&session, WorkTypeId::Crane, "fall-prevention", &inputs)
        .await
        .unwrap();
    assert_eq!(added, 1);
}

/// サマリーから戻る先は最後に完了した作業種別
#[test]
fn test_summary_navigation() {
    let session = session_with_crane();
    rate_all(&session, WorkTypeId::Crane, SafetyRating::Good);
    commands::complete(&session, WorkTypeId::Crane, false).unwrap();
    let doc = commands::comment(&session, "全体的に良好").unwrap();

    assert_eq!(resolve(Screen::Summary, Some(&doc)), Screen::Summary);
    assert_eq!(summary_back_target(&doc), Screen::Checklist(WorkTypeId::Crane));
    assert_eq!(doc.final_comments, "全体的に良好");

    let status = commands::render_status(&doc);
    assert!(status.contains("Site A"));
    assert!(status.contains("完了"));
}

/// 基本情報を修正しても点検内容は残る
#[test]
fn test_resubmit_basic_info_keeps_checklist() {
    let session = session_with_crane();
    commands::rate(&session, WorkTypeId::Crane, "basic", "helmet", SafetyRating::Good).unwrap();

    let mut info = complete_info();
    info.site_name = "Site B".to_string();
    let doc = commands::submit_basic_info(&session, info).unwrap();

    assert_eq!(doc.basic_info.as_ref().unwrap().site_name, "Site B");
    let helmet = doc
        .work_type(WorkTypeId::Crane)
        .and_then(|wt| wt.category("basic"))
        .and_then(|c| c.item("helmet"))
        .unwrap();
    assert_eq!(helmet.rating, Some(SafetyRating::Good));
}
