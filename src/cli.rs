use clap::{Parser, Subcommand};
use safety_patrol_common::{SafetyRating, WorkTypeId};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "safety-patrol")]
#[command(about = "建設現場 安全パトロール点検ウィザード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 点検データの保存先（設定ファイル・環境変数より優先）
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 新しい点検を開始（保存データを消去して対話入力）
    Start,

    /// 保存データから点検を再開
    Resume {
        /// 開始画面 (/basic-info, /work-selection, /checklist/<作業種別>, /summary)
        #[arg(long)]
        screen: Option<String>,
    },

    /// 点検の進捗を表示
    Status,

    /// 基本情報を入力
    BasicInfo {
        /// 点検日（省略時は今日）
        #[arg(long)]
        date: Option<String>,

        /// 現場名
        #[arg(long)]
        site_name: Option<String>,

        /// 場所
        #[arg(long)]
        location: Option<String>,

        /// 緯度
        #[arg(long, requires = "longitude")]
        latitude: Option<f64>,

        /// 経度
        #[arg(long, requires = "latitude")]
        longitude: Option<f64>,

        /// 位置情報を取得して設定
        #[arg(long, conflicts_with_all = ["latitude", "longitude"])]
        locate: bool,

        /// 現場代理人
        #[arg(long)]
        representative: Option<String>,

        /// 現場責任者
        #[arg(long)]
        supervisor: Option<String>,

        /// 工事種別 (electrical-kyuden/civil-kyuden/electrical-general/civil-general)
        #[arg(long)]
        construction_type: Option<String>,

        /// 作業員（複数指定可）
        #[arg(short, long = "member")]
        members: Vec<String>,
    },

    /// 点検する作業種別を選択
    Select {
        /// 作業種別 (crane/excavation/utility-pole/manhole/other)
        #[arg(required = true)]
        work_types: Vec<WorkTypeId>,
    },

    /// 項目を評価
    Rate {
        work_type: WorkTypeId,
        category: String,
        item: String,
        /// 評価 (good/warning/danger)
        rating: SafetyRating,
    },

    /// 項目にメモを記録
    Note {
        work_type: WorkTypeId,
        category: String,
        item: String,
        text: String,
    },

    /// カテゴリに所見を記録
    Findings {
        work_type: WorkTypeId,
        category: String,
        text: String,
    },

    /// 写真の追加・削除・一覧
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// 作業種別を完了にする
    Complete {
        work_type: WorkTypeId,

        /// 未評価の項目があっても完了にする
        #[arg(long)]
        force: bool,
    },

    /// 総合コメントを記録
    Comment {
        text: String,
    },

    /// 報告書をテキストで出力
    Export {
        /// 出力ファイル/ディレクトリ（省略時は設定の出力先）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// ファイルに書かず標準出力に表示
        #[arg(long)]
        stdout: bool,
    },

    /// 保存データを消去
    Clear {
        /// 確認せずに消去
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 点検データの保存先を設定
        #[arg(long)]
        set_store_path: Option<PathBuf>,

        /// 報告書の出力先を設定
        #[arg(long)]
        set_export_dir: Option<PathBuf>,

        /// 位置情報取得コマンドを設定（空文字で解除）
        #[arg(long)]
        set_geolocation_command: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum PhotoAction {
    /// 画像ファイル・フォルダから写真を追加
    Add {
        work_type: WorkTypeId,
        category: String,
        /// 画像ファイルまたはフォルダ
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// 写真を削除
    Delete {
        work_type: WorkTypeId,
        category: String,
        index: usize,
    },

    /// 写真を一覧表示
    List {
        work_type: WorkTypeId,
        category: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rate() {
        let cli = Cli::try_parse_from([
            "safety-patrol", "rate", "crane", "basic", "helmet", "warning",
        ])
        .expect("パース失敗");
        match cli.command {
            Commands::Rate { work_type, category, item, rating } => {
                assert_eq!(work_type, WorkTypeId::Crane);
                assert_eq!(category, "basic");
                assert_eq!(item, "helmet");
                assert_eq!(rating, SafetyRating::Warning);
            }
            _ => panic!("rate として解析されていない"),
        }
    }

    #[test]
    fn test_parse_unknown_work_type() {
        let result = Cli::try_parse_from(["safety-patrol", "select", "welding"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_repeated_members() {
        let cli = Cli::try_parse_from([
            "safety-patrol", "basic-info", "--site-name", "A", "-m", "佐藤", "-m", "鈴木",
        ])
        .expect("パース失敗");
        match cli.command {
            Commands::BasicInfo { members, site_name, .. } => {
                assert_eq!(members, vec!["佐藤", "鈴木"]);
                assert_eq!(site_name.as_deref(), Some("A"));
            }
            _ => panic!("basic-info として解析されていない"),
        }
    }

    #[test]
    fn test_global_store_option() {
        let cli = Cli::try_parse_from(["safety-patrol", "status", "--store", "/tmp/p.json"])
            .expect("パース失敗");
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/p.json")));
    }
}
