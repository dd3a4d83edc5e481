//! サマリー画面
//!
//! 完了した作業種別の集計・総合コメント・報告書出力。

use super::{prompt_error, Wizard};
use crate::commands;
use crate::error::Result;
use crate::export::export_report;
use crate::geolocation::GeoLocator;
use crate::store::DocumentStore;
use dialoguer::{Confirm, Input, Select};
use safety_patrol_common::navigation::summary_back_target;
use safety_patrol_common::{project, InspectionDocument, Screen};

pub fn show<S: DocumentStore, G: GeoLocator>(wizard: &Wizard<'_, S, G>) -> Result<Screen> {
    loop {
        let doc = commands::summary_doc(wizard.session)?;
        print_overview(&doc);

        let actions = [
            "総合コメントを編集",
            "報告書を出力",
            "点検を終了（データを消去）",
            "← 戻る",
        ];
        let choice = Select::with_theme(&wizard.theme)
            .items(&actions)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match choice {
            0 => {
                let text = Input::<String>::with_theme(&wizard.theme)
                    .with_prompt("総合コメント")
                    .with_initial_text(doc.final_comments.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_error)?;
                commands::comment(wizard.session, &text)?;
            }
            1 => match export_report(&doc, &wizard.export_dir) {
                Ok((path, _)) => println!("✔ 報告書を出力しました: {}", path.display()),
                Err(e) => println!("⚠ 報告書を出力できません: {}", e),
            },
            2 => {
                let done = Confirm::with_theme(&wizard.theme)
                    .with_prompt("点検データを消去して終了しますか？")
                    .default(false)
                    .interact()
                    .map_err(prompt_error)?;
                if done {
                    wizard.session.clear()?;
                    return Ok(Screen::Menu);
                }
            }
            _ => return Ok(summary_back_target(&doc)),
        }
    }
}

fn print_overview(doc: &InspectionDocument) {
    let report = project(doc);
    let stats = &report.statistics;

    println!("\n📊 点検結果サマリー");
    if let Some(info) = &doc.basic_info {
        println!("  {}  {}（{}）", info.date, info.site_name, info.location);
    }
    println!("  総点検項目数: {}", stats.total);
    println!(
        "  ○ 良好 {} ({}%)  △ 注意 {} ({}%)  × 危険 {} ({}%)",
        stats.good,
        stats.percent(stats.good),
        stats.warning,
        stats.percent(stats.warning),
        stats.danger,
        stats.percent(stats.danger)
    );

    let completed: Vec<&str> = doc
        .completed_work_types()
        .map(|wt| wt.name.as_str())
        .collect();
    println!("  完了した作業: {}", completed.join(", "));
    if !doc.final_comments.is_empty() {
        println!("  総合コメント: {}", doc.final_comments);
    }
}
