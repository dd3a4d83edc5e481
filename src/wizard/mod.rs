//! 対話式点検ウィザード
//!
//! 画面ごとに1つの関数を持ち、次に表示する画面を返す。
//! 表示前に前提条件を確認し、満たさない場合は前提を作れる画面へ差し戻す。

mod basic_info;
mod checklist;
mod menu;
mod summary;
mod work_selection;

use crate::error::{PatrolError, Result};
use crate::geolocation::GeoLocator;
use crate::store::{DocumentStore, Session};
use dialoguer::theme::ColorfulTheme;
use safety_patrol_common::navigation::resolve;
use safety_patrol_common::Screen;
use std::path::PathBuf;

/// 画面間で共有するコンテキスト
pub struct Wizard<'a, S: DocumentStore, G: GeoLocator> {
    pub session: &'a Session<S>,
    pub locator: &'a G,
    pub export_dir: PathBuf,
    theme: ColorfulTheme,
}

impl<'a, S: DocumentStore, G: GeoLocator> Wizard<'a, S, G> {
    pub fn new(session: &'a Session<S>, locator: &'a G, export_dir: PathBuf) -> Self {
        Self {
            session,
            locator,
            export_dir,
            theme: ColorfulTheme::default(),
        }
    }

    /// 指定画面から開始し、メニューで終了が選ばれるまで続ける
    pub async fn run(&self, start: Screen) -> Result<()> {
        let mut screen = start;

        loop {
            let doc = self.session.load();
            let resolved = resolve(screen, doc.as_ref());
            if resolved != screen {
                tracing::debug!(requested = %screen, resolved = %resolved, "画面を差し戻し");
            }

            let next = match resolved {
                Screen::Menu => menu::show(self)?,
                Screen::BasicInfo => Some(basic_info::show(self).await?),
                Screen::WorkSelection => Some(work_selection::show(self)?),
                Screen::Checklist(id) => Some(checklist::show(self, id).await?),
                Screen::Summary => Some(summary::show(self)?),
            };

            match next {
                Some(next) => screen = next,
                None => break,
            }
        }

        Ok(())
    }
}

pub(crate) fn prompt_error(e: dialoguer::Error) -> PatrolError {
    PatrolError::Prompt(e.to_string())
}

/// 今日の日付（YYYY-MM-DD）
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
