use super::{prompt_error, Wizard};
use crate::error::Result;
use crate::geolocation::GeoLocator;
use crate::store::DocumentStore;
use dialoguer::Select;
use safety_patrol_common::Screen;

enum MenuAction {
    Start,
    Resume,
    Quit,
}

/// メニュー。新規開始時は保存データを消去する
pub fn show<S: DocumentStore, G: GeoLocator>(wizard: &Wizard<'_, S, G>) -> Result<Option<Screen>> {
    println!("\n🦺 安全パトロールシステム");
    println!("   地中線・配電工事用 v{}\n", env!("CARGO_PKG_VERSION"));

    let mut actions = vec![(MenuAction::Start, "パトロール開始")];
    if wizard.session.load().is_some() {
        actions.push((MenuAction::Resume, "続きから再開"));
    }
    actions.push((MenuAction::Quit, "終了"));

    let labels: Vec<&str> = actions.iter().map(|(_, label)| *label).collect();
    let choice = Select::with_theme(&wizard.theme)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_error)?;

    match actions[choice].0 {
        MenuAction::Start => {
            wizard.session.clear()?;
            Ok(Some(Screen::BasicInfo))
        }
        MenuAction::Resume => Ok(Some(Screen::WorkSelection)),
        MenuAction::Quit => Ok(None),
    }
}
