//! 基本情報入力画面
//!
//! 入力内容はフォーム上で保持し、「次へ」で確定したときだけ保存する。

use super::{prompt_error, today, Wizard};
use crate::commands;
use crate::error::Result;
use crate::geolocation::GeoLocator;
use crate::store::DocumentStore;
use dialoguer::{Confirm, Input, Select};
use safety_patrol_common::progress::{can_leave_basic_info, missing_basic_fields};
use safety_patrol_common::{BasicInfo, ConstructionType, Screen};

enum Field {
    Date,
    SiteName,
    Location,
    Gps,
    Representative,
    Supervisor,
    ConstructionType,
    AddMember,
    RemoveMember,
    Next,
    Back,
}

pub async fn show<S: DocumentStore, G: GeoLocator>(wizard: &Wizard<'_, S, G>) -> Result<Screen> {
    let mut form = wizard
        .session
        .load()
        .and_then(|doc| doc.basic_info)
        .unwrap_or_else(|| BasicInfo::new(today()));

    loop {
        println!("\n📋 基本情報入力");

        let coordinates = form
            .coordinates()
            .map(|(lat, lon)| format!("{}, {}", lat, lon))
            .unwrap_or_else(|| "未取得".to_string());
        let construction = ConstructionType::from_code(&form.construction_type)
            .map(|t| t.label().to_string())
            .unwrap_or_else(|| form.construction_type.clone());
        let next_label = if can_leave_basic_info(&form) {
            "次へ →".to_string()
        } else {
            let missing: Vec<&str> = missing_basic_fields(&form).iter().map(|f| f.label()).collect();
            format!("次へ →（未入力: {}）", missing.join(", "))
        };

        let entries = [
            (Field::Date, format!("点検日: {}", form.date)),
            (Field::SiteName, format!("現場名: {}", form.site_name)),
            (Field::Location, format!("場所: {}", form.location)),
            (Field::Gps, format!("位置情報を取得: {}", coordinates)),
            (Field::Representative, format!("現場代理人: {}", form.site_representative)),
            (Field::Supervisor, format!("現場責任者: {}", form.site_supervisor)),
            (Field::ConstructionType, format!("工事種別: {}", construction)),
            (Field::AddMember, format!("作業員を追加: {}", form.team_members.join(", "))),
            (Field::RemoveMember, "作業員を削除".to_string()),
            (Field::Next, next_label),
            (Field::Back, "← メニューへ戻る".to_string()),
        ];
        let labels: Vec<&str> = entries.iter().map(|(_, label)| label.as_str()).collect();

        let choice = Select::with_theme(&wizard.theme)
            .items(&labels)
            .default(0)
            .interact()
            .map_err(prompt_error)?;

        match entries[choice].0 {
            Field::Date => form.date = prompt_text(wizard, "点検日 (YYYY-MM-DD)", &form.date)?,
            Field::SiteName => form.site_name = prompt_text(wizard, "現場名", &form.site_name)?,
            Field::Location => form.location = prompt_text(wizard, "場所", &form.location)?,
            Field::Gps => match wizard.locator.locate().await {
                Ok(coords) => {
                    form.set_coordinates(coords.latitude, coords.longitude);
                    println!("✔ 位置情報を取得しました");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "位置情報の取得に失敗");
                    println!("⚠ 位置情報の取得に失敗しました: {}", e);
                }
            },
            Field::Representative => {
                form.site_representative =
                    prompt_text(wizard, "現場代理人", &form.site_representative)?
            }
            Field::Supervisor => {
                form.site_supervisor = prompt_text(wizard, "現場責任者", &form.site_supervisor)?
            }
            Field::ConstructionType => {
                let labels: Vec<&str> = ConstructionType::ALL.iter().map(|t| t.label()).collect();
                let current = ConstructionType::ALL
                    .iter()
                    .position(|t| t.code() == form.construction_type)
                    .unwrap_or(0);
                let picked = Select::with_theme(&wizard.theme)
                    .with_prompt("工事種別")
                    .items(&labels)
                    .default(current)
                    .interact()
                    .map_err(prompt_error)?;
                form.construction_type = ConstructionType::ALL[picked].code().to_string();
            }
            Field::AddMember => {
                let name = prompt_text(wizard, "作業員名", "")?;
                if !form.add_team_member(&name) {
                    println!("⚠ 名前が空です");
                }
            }
            Field::RemoveMember => {
                if form.team_members.is_empty() {
                    println!("作業員が登録されていません");
                    continue;
                }
                let picked = Select::with_theme(&wizard.theme)
                    .with_prompt("削除する作業員")
                    .items(&form.team_members)
                    .interact()
                    .map_err(prompt_error)?;
                form.remove_team_member(picked);
            }
            Field::Next => {
                if !can_leave_basic_info(&form) {
                    println!("⚠ 必須項目をすべて入力してください");
                    continue;
                }
                commands::submit_basic_info(wizard.session, form)?;
                return Ok(Screen::WorkSelection);
            }
            Field::Back => {
                let leave = Confirm::with_theme(&wizard.theme)
                    .with_prompt("入力内容を保存せずに戻りますか？")
                    .default(false)
                    .interact()
                    .map_err(prompt_error)?;
                if leave {
                    return Ok(Screen::Menu);
                }
            }
        }
    }
}

fn prompt_text<S: DocumentStore, G: GeoLocator>(
    wizard: &Wizard<'_, S, G>,
    prompt: &str,
    current: &str,
) -> Result<String> {
    Input::<String>::with_theme(&wizard.theme)
        .with_prompt(prompt)
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}
