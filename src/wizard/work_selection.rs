use super::{prompt_error, Wizard};
use crate::commands;
use crate::error::Result;
use crate::geolocation::GeoLocator;
use crate::store::DocumentStore;
use dialoguer::{MultiSelect, Select};
use safety_patrol_common::labels::status_label;
use safety_patrol_common::navigation::preselected;
use safety_patrol_common::progress::can_finish;
use safety_patrol_common::{InspectionStatus, Screen, WorkTypeId};

/// 作業種別選択画面
pub fn show<S: DocumentStore, G: GeoLocator>(wizard: &Wizard<'_, S, G>) -> Result<Screen> {
    loop {
        let doc = wizard.session.require()?;
        println!("\n🏗  作業種別選択");

        let finish_label = if can_finish(&doc) {
            "点検完了（サマリーへ）"
        } else {
            "点検完了（完了した作業種別がありません）"
        };
        let actions = ["点検する作業を選択して開始", finish_label, "← 基本情報へ戻る"];
        let choice = Select::with_theme(&wizard.theme)
            .items(&actions)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match choice {
            0 => {
                let ticked = preselected(&doc);
                let items: Vec<(String, bool)> = doc
                    .work_types
                    .iter()
                    .map(|wt| {
                        let label = match wt.status {
                            InspectionStatus::NotStarted => wt.name.clone(),
                            status => format!("{}（{}）", wt.name, status_label(status)),
                        };
                        (label, ticked.contains(&wt.id))
                    })
                    .collect();

                let picked = MultiSelect::with_theme(&wizard.theme)
                    .with_prompt("点検する作業を選択してください（スペースで選択）")
                    .items_checked(&items)
                    .interact()
                    .map_err(prompt_error)?;
                let selected: Vec<WorkTypeId> =
                    picked.into_iter().map(|i| doc.work_types[i].id).collect();

                match commands::select_work_types(wizard.session, &selected) {
                    Ok((_, first)) => return Ok(Screen::Checklist(first)),
                    Err(e) => println!("⚠ {}", e),
                }
            }
            1 => {
                if can_finish(&doc) {
                    return Ok(Screen::Summary);
                }
                println!("⚠ 完了した作業種別がありません");
            }
            _ => return Ok(Screen::BasicInfo),
        }
    }
}
