use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatrolError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("点検データがありません。`safety-patrol start` で点検を開始してください")]
    NoSession,

    #[error("まだ進めません: {0}")]
    NotReady(String),

    #[error("作業種別が見つかりません: {0}")]
    UnknownWorkType(String),

    #[error("カテゴリが見つかりません: {0}")]
    UnknownCategory(String),

    #[error("チェック項目が見つかりません: {0}")]
    UnknownItem(String),

    #[error("写真読み込みエラー: {0}")]
    Photo(String),

    #[error("位置情報の取得に失敗しました: {0}")]
    Geolocation(#[from] crate::geolocation::GeoError),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] safety_patrol_common::Error),
}

pub type Result<T> = std::result::Result<T, PatrolError>;
