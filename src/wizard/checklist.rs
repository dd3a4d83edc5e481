//! チェックリスト画面
//!
//! 項目の評価・メモ、カテゴリの写真・所見を編集する。
//! 変更は操作ごとに保存し、全項目が評価済みになるまで完了できない。

use super::{prompt_error, Wizard};
use crate::commands;
use crate::error::{PatrolError, Result};
use crate::geolocation::GeoLocator;
use crate::store::DocumentStore;
use dialoguer::{Confirm, Input, Select};
use safety_patrol_common::labels::{rating_display, rating_label};
use safety_patrol_common::progress::{
    can_complete_checklist, progress_percent, rated_items, total_items,
};
use safety_patrol_common::{
    ChecklistCategory, ChecklistItem, PhotoPreview, SafetyRating, Screen, WorkTypeId,
};
use std::path::PathBuf;

enum Action {
    Item { category: String, item: String },
    Photos { category: String },
    Findings { category: String },
    Complete,
    Back,
}

pub async fn show<S: DocumentStore, G: GeoLocator>(
    wizard: &Wizard<'_, S, G>,
    work_type_id: WorkTypeId,
) -> Result<Screen> {
    let mut preview: Option<PhotoPreview> = None;

    loop {
        let doc = wizard.session.require()?;
        let work_type = doc
            .work_type(work_type_id)
            .ok_or_else(|| PatrolError::UnknownWorkType(work_type_id.to_string()))?;

        println!(
            "\n✅ {}  進捗 {}%（{}/{}）",
            work_type.name,
            progress_percent(work_type),
            rated_items(work_type),
            total_items(work_type)
        );
        if let Some(p) = &preview {
            println!("   プレビュー中: {} の写真 [{}]", p.category_id, p.index);
        }

        let mut entries: Vec<(Action, String)> = Vec::new();
        for category in &work_type.categories {
            for item in &category.items {
                entries.push((
                    Action::Item {
                        category: category.id.clone(),
                        item: item.id.clone(),
                    },
                    item_line(category, item),
                ));
            }
            entries.push((
                Action::Photos {
                    category: category.id.clone(),
                },
                format!("{} / 📷 写真（{}枚）", category.name, category.photos.len()),
            ));
            if category.has_issues() {
                let findings = category
                    .findings
                    .as_deref()
                    .filter(|f| !f.is_empty())
                    .unwrap_or("未入力");
                entries.push((
                    Action::Findings {
                        category: category.id.clone(),
                    },
                    format!("{} / 所見: {}", category.name, findings),
                ));
            }
        }

        let complete_label = if can_complete_checklist(work_type) {
            "完了して次へ →".to_string()
        } else {
            format!("完了して次へ →（未評価 {}件）", total_items(work_type) - rated_items(work_type))
        };
        entries.push((Action::Complete, complete_label));
        entries.push((Action::Back, "← 作業種別選択へ戻る".to_string()));

        let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();
        let choice = Select::with_theme(&wizard.theme)
            .items(&labels)
            .default(0)
            .max_length(15)
            .interact()
            .map_err(prompt_error)?;

        match &entries[choice].0 {
            Action::Item { category, item } => {
                edit_item(wizard, work_type_id, category, item)?;
            }
            Action::Photos { category } => {
                preview = edit_photos(wizard, work_type_id, category, preview).await?;
            }
            Action::Findings { category } => {
                let current = work_type
                    .category(category)
                    .and_then(|c| c.findings.clone())
                    .unwrap_or_default();
                let text = Input::<String>::with_theme(&wizard.theme)
                    .with_prompt("所見（指摘事項・是正内容）")
                    .with_initial_text(current)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                commands::findings(wizard.session, work_type_id, category, &text)?;
            }
            Action::Complete => {
                if !can_complete_checklist(work_type) {
                    println!("⚠ すべての項目を評価してください");
                    continue;
                }
                commands::complete(wizard.session, work_type_id, false)?;
                return Ok(Screen::WorkSelection);
            }
            Action::Back => return Ok(Screen::WorkSelection),
        }
    }
}

fn item_line(category: &ChecklistCategory, item: &ChecklistItem) -> String {
    let mark = item
        .rating
        .map(|r| rating_display(r).symbol)
        .unwrap_or("・");
    let memo = if item.notes.is_empty() { "" } else { " 📝" };
    format!(
        "{} / {} {} [{}]{}",
        category.name,
        item.name,
        mark,
        rating_label(item.rating),
        memo
    )
}

fn edit_item<S: DocumentStore, G: GeoLocator>(
    wizard: &Wizard<'_, S, G>,
    work_type_id: WorkTypeId,
    category_id: &str,
    item_id: &str,
) -> Result<()> {
    let doc = wizard.session.require()?;
    let item = doc
        .work_type(work_type_id)
        .and_then(|wt| wt.category(category_id))
        .and_then(|c| c.item(item_id))
        .ok_or_else(|| PatrolError::UnknownItem(format!("{}/{}", category_id, item_id)))?;

    println!("\n{}（現在: {}）", item.name, rating_label(item.rating));
    if !item.notes.is_empty() {
        println!("  メモ: {}", item.notes);
    }

    let mut options: Vec<String> = SafetyRating::ALL
        .iter()
        .map(|r| {
            let display = rating_display(*r);
            format!("{} {}", display.symbol, display.label)
        })
        .collect();
    options.extend(["メモを入力", "💡 確認ポイント", "戻る"].map(String::from));

    let choice = Select::with_theme(&wizard.theme)
        .items(&options)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    match choice {
        0..=2 => {
            commands::rate(wizard.session, work_type_id, category_id, item_id, SafetyRating::ALL[choice])?;
        }
        3 => {
            let notes = Input::<String>::with_theme(&wizard.theme)
                .with_prompt("メモ")
                .with_initial_text(item.notes.clone())
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            commands::note(wizard.session, work_type_id, category_id, item_id, &notes)?;
        }
        4 => {
            println!("\n💡 {}\n\n{}", item.name, item.tips.text);
            if let Some(image) = &item.tips.image {
                println!("\n参考画像: {}", image);
            }
        }
        _ => {}
    }
    Ok(())
}

/// 写真の追加・プレビュー・削除。更新後のプレビュー状態を返す
async fn edit_photos<S: DocumentStore, G: GeoLocator>(
    wizard: &Wizard<'_, S, G>,
    work_type_id: WorkTypeId,
    category_id: &str,
    preview: Option<PhotoPreview>,
) -> Result<Option<PhotoPreview>> {
    let doc = wizard.session.require()?;
    let listing = commands::photo_listing(&doc, work_type_id, category_id)?;
    for line in &listing {
        println!("  {}", line);
    }

    let options = ["写真を追加", "プレビュー", "写真を削除", "戻る"];
    let choice = Select::with_theme(&wizard.theme)
        .items(&options)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    match choice {
        0 => {
            let input = Input::<String>::with_theme(&wizard.theme)
                .with_prompt("画像ファイルまたはフォルダ（複数はカンマ区切り）")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;
            let paths: Vec<PathBuf> = input
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
            if paths.is_empty() {
                return Ok(preview);
            }
            match commands::add_photos(wizard.session, work_type_id, category_id, &paths).await {
                Ok(added) => println!("✔ {}枚の写真を追加しました", added),
                Err(e) => println!("⚠ {}", e),
            }
            Ok(preview)
        }
        1 | 2 if listing.is_empty() => {
            println!("写真がありません");
            Ok(preview)
        }
        1 => {
            let index = pick_photo(wizard, &listing, "プレビューする写真")?;
            let photo = doc
                .work_type(work_type_id)
                .and_then(|wt| wt.category(category_id))
                .and_then(|c| c.photos.get(index));
            if let Some(photo) = photo {
                let bytes = photo.payload().map(|p| p.len() * 3 / 4).unwrap_or(0);
                println!("  形式: {}  約{}KB  ID: {}", photo.mime_type(), bytes / 1024, photo.fingerprint());
            }
            Ok(Some(PhotoPreview::new(category_id, index)))
        }
        2 => {
            let index = pick_photo(wizard, &listing, "削除する写真")?;
            let confirmed = Confirm::with_theme(&wizard.theme)
                .with_prompt(format!("写真 [{}] を削除しますか？", index))
                .default(false)
                .interact()
                .map_err(prompt_error)?;
            if !confirmed {
                return Ok(preview);
            }
            commands::delete_photo(wizard.session, work_type_id, category_id, index)?;
            Ok(preview.and_then(|p| p.after_delete(category_id, index)))
        }
        _ => Ok(preview),
    }
}

fn pick_photo<S: DocumentStore, G: GeoLocator>(
    wizard: &Wizard<'_, S, G>,
    listing: &[String],
    prompt: &str,
) -> Result<usize> {
    Select::with_theme(&wizard.theme)
        .with_prompt(prompt)
        .items(listing)
        .default(0)
        .interact()
        .map_err(prompt_error)
}
