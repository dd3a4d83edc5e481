use clap::Parser;
use dialoguer::Confirm;
use safety_patrol::{cli, commands, config, error, export, geolocation, store, wizard};
use safety_patrol_common::{project, BasicInfo, ConstructionType, Screen};
use cli::{Cli, Commands, PhotoAction};
use config::Config;
use error::PatrolError;
use geolocation::{CommandLocator, GeoLocator};
use store::{FileStore, Session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    let store_path = match &cli.store {
        Some(path) => path.clone(),
        None => config.resolved_store_path()?,
    };
    tracing::debug!(path = %store_path.display(), "保存先");
    let session = Session::new(FileStore::new(store_path));
    let locator = CommandLocator::new(config.geolocation_command.clone());

    match cli.command {
        Commands::Start => {
            session.clear()?;
            wizard::Wizard::new(&session, &locator, config.resolved_export_dir())
                .run(Screen::BasicInfo)
                .await?;
        }

        Commands::Resume { screen } => {
            let start = match screen {
                Some(path) => Screen::parse(&path)
                    .ok_or_else(|| PatrolError::NotReady(format!("不明な画面: {}", path)))?,
                None if session.load().is_some() => Screen::WorkSelection,
                None => Screen::Menu,
            };
            wizard::Wizard::new(&session, &locator, config.resolved_export_dir())
                .run(start)
                .await?;
        }

        Commands::Status => match session.load() {
            Some(doc) => print!("{}", commands::render_status(&doc)),
            None => println!("点検データはありません"),
        },

        Commands::BasicInfo {
            date,
            site_name,
            location,
            latitude,
            longitude,
            locate,
            representative,
            supervisor,
            construction_type,
            members,
        } => {
            let mut info = session
                .load()
                .and_then(|doc| doc.basic_info)
                .unwrap_or_else(|| BasicInfo::new(wizard::today()));

            if let Some(date) = date {
                info.date = date;
            }
            if let Some(site_name) = site_name {
                info.site_name = site_name;
            }
            if let Some(location) = location {
                info.location = location;
            }
            if let Some(representative) = representative {
                info.site_representative = representative;
            }
            if let Some(supervisor) = supervisor {
                info.site_supervisor = supervisor;
            }
            if let Some(code) = construction_type {
                let kind = ConstructionType::from_code(&code)
                    .ok_or_else(|| PatrolError::NotReady(format!("不明な工事種別: {}", code)))?;
                info.construction_type = kind.code().to_string();
            }
            for member in &members {
                info.add_team_member(member);
            }
            if let (Some(lat), Some(lon)) = (latitude, longitude) {
                info.set_coordinates(lat, lon);
            }
            if locate {
                let coords = locator.locate().await.map_err(PatrolError::from)?;
                info.set_coordinates(coords.latitude, coords.longitude);
            }

            commands::submit_basic_info(&session, info)?;
            println!("✔ 基本情報を保存しました");
        }

        Commands::Select { work_types } => {
            let (_, first) = commands::select_work_types(&session, &work_types)?;
            println!("✔ 作業種別を選択しました（次: {}）", Screen::Checklist(first));
        }

        Commands::Rate { work_type, category, item, rating } => {
            commands::rate(&session, work_type, &category, &item, rating)?;
            println!("✔ {}/{} を評価しました", category, item);
        }

        Commands::Note { work_type, category, item, text } => {
            commands::note(&session, work_type, &category, &item, &text)?;
            println!("✔ メモを保存しました");
        }

        Commands::Findings { work_type, category, text } => {
            commands::findings(&session, work_type, &category, &text)?;
            println!("✔ 所見を保存しました");
        }

        Commands::Photo { action } => match action {
            PhotoAction::Add { work_type, category, paths } => {
                let added = commands::add_photos(&session, work_type, &category, &paths).await?;
                println!("✔ {}枚の写真を追加しました", added);
            }
            PhotoAction::Delete { work_type, category, index } => {
                commands::delete_photo(&session, work_type, &category, index)?;
                println!("✔ 写真 [{}] を削除しました", index);
            }
            PhotoAction::List { work_type, category } => {
                let doc = session.require()?;
                let listing = commands::photo_listing(&doc, work_type, &category)?;
                if listing.is_empty() {
                    println!("写真がありません");
                }
                for line in listing {
                    println!("{}", line);
                }
            }
        },

        Commands::Complete { work_type, force } => {
            commands::complete(&session, work_type, force)?;
            println!("✔ {} を完了しました", work_type.display_name());
        }

        Commands::Comment { text } => {
            commands::comment(&session, &text)?;
            println!("✔ 総合コメントを保存しました");
        }

        Commands::Export { output, stdout } => {
            let doc = commands::summary_doc(&session)?;
            if stdout {
                print!("{}", project(&doc).text);
            } else {
                let output = output.unwrap_or_else(|| config.resolved_export_dir());
                let (path, report) = export::export_report(&doc, &output)?;
                println!("✔ 報告書を出力: {}（{}項目）", path.display(), report.statistics.total);
            }
        }

        Commands::Clear { yes } => {
            if !session.store().path().exists() {
                println!("点検データはありません");
                return Ok(());
            }
            let confirmed = yes
                || Confirm::new()
                    .with_prompt("点検データを消去しますか？")
                    .default(false)
                    .interact()
                    .map_err(|e| PatrolError::Prompt(e.to_string()))?;
            if confirmed {
                session.clear()?;
                println!("✔ 点検データを消去しました");
            }
        }

        Commands::Config {
            show,
            set_store_path,
            set_export_dir,
            set_geolocation_command,
        } => {
            if let Some(path) = set_store_path {
                config.set_store_path(path)?;
                println!("✔ 保存先を設定しました");
            }
            if let Some(path) = set_export_dir {
                config.set_export_dir(path)?;
                println!("✔ 出力先を設定しました");
            }
            if let Some(command) = set_geolocation_command {
                config.set_geolocation_command(command)?;
                println!("✔ 位置情報取得コマンドを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  保存先: {}", session.store().path().display());
                println!("  出力先: {}", config.resolved_export_dir().display());
                println!(
                    "  位置情報取得コマンド: {}",
                    config.geolocation_command.as_deref().unwrap_or("未設定")
                );
            }
        }
    }

    Ok(())
}

/// RUST_LOG があれば優先し、なければ --verbose で debug
fn init_logging(verbose: bool) {
    let default = if verbose { "safety_patrol=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
