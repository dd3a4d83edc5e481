//! 点検ドキュメントの型定義
//!
//! 保存されるスナップショットと同じ形（camelCase JSON）:
//! - InspectionDocument: 1セッションにつき1つの集約
//! - WorkType / ChecklistCategory / ChecklistItem: 作業種別ごとのチェックリスト
//! - BasicInfo: 点検開始時に入力する現場情報

use crate::error::Error;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// 作業種別ID（固定5種）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkTypeId {
    Crane,
    Excavation,
    UtilityPole,
    Manhole,
    Other,
}

impl WorkTypeId {
    /// カタログ順
    pub const ALL: [WorkTypeId; 5] = [
        WorkTypeId::Crane,
        WorkTypeId::Excavation,
        WorkTypeId::UtilityPole,
        WorkTypeId::Manhole,
        WorkTypeId::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkTypeId::Crane => "crane",
            WorkTypeId::Excavation => "excavation",
            WorkTypeId::UtilityPole => "utility-pole",
            WorkTypeId::Manhole => "manhole",
            WorkTypeId::Other => "other",
        }
    }

    /// 表示名
    pub fn display_name(&self) -> &'static str {
        match self {
            WorkTypeId::Crane => "クレーン作業",
            WorkTypeId::Excavation => "掘削作業",
            WorkTypeId::UtilityPole => "電柱作業",
            WorkTypeId::Manhole => "マンホール作業",
            WorkTypeId::Other => "その他現場作業",
        }
    }
}

impl fmt::Display for WorkTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkTypeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkTypeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| Error::Parse(format!("不明な作業種別: {}", s)))
    }
}

/// 点検状況
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// 安全評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyRating {
    Good,
    Warning,
    Danger,
}

impl SafetyRating {
    pub const ALL: [SafetyRating; 3] = [SafetyRating::Good, SafetyRating::Warning, SafetyRating::Danger];

    /// 注意・危険のいずれか
    pub fn is_issue(&self) -> bool {
        matches!(self, SafetyRating::Warning | SafetyRating::Danger)
    }
}

impl FromStr for SafetyRating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "good" | "g" | "良好" => Ok(SafetyRating::Good),
            "warning" | "w" | "注意" => Ok(SafetyRating::Warning),
            "danger" | "d" | "危険" => Ok(SafetyRating::Danger),
            _ => Err(Error::Parse(format!(
                "不明な評価: {}。good, warning, danger のいずれかを指定してください",
                s
            ))),
        }
    }
}

/// 工事種別（4区分）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructionType {
    ElectricalKyuden,
    CivilKyuden,
    ElectricalGeneral,
    CivilGeneral,
}

impl ConstructionType {
    pub const ALL: [ConstructionType; 4] = [
        ConstructionType::ElectricalKyuden,
        ConstructionType::CivilKyuden,
        ConstructionType::ElectricalGeneral,
        ConstructionType::CivilGeneral,
    ];

    /// スナップショットに保存されるコード
    pub fn code(&self) -> &'static str {
        match self {
            ConstructionType::ElectricalKyuden => "electrical-kyuden",
            ConstructionType::CivilKyuden => "civil-kyuden",
            ConstructionType::ElectricalGeneral => "electrical-general",
            ConstructionType::CivilGeneral => "civil-general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConstructionType::ElectricalKyuden => "電気（九電）",
            ConstructionType::CivilKyuden => "土木（九電）",
            ConstructionType::ElectricalGeneral => "電気（一般）",
            ConstructionType::CivilGeneral => "土木（一般）",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code.trim())
    }
}

/// 現場の基本情報
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    /// 点検日（YYYY-MM-DD）
    pub date: String,
    pub site_name: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    pub site_representative: String,
    pub site_supervisor: String,
    #[serde(default)]
    pub team_members: Vec<String>,
    /// ConstructionTypeのコード（未選択は空文字）
    pub construction_type: String,
}

/// 項目ごとの確認ポイント（静的コンテンツ）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tips {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// チェック項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub name: String,
    pub rating: Option<SafetyRating>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tips: Tips,
}

/// 写真（Data URL形式でインライン保持）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Photo(String);

impl Photo {
    pub fn from_data_url(data_url: impl Into<String>) -> Self {
        Photo(data_url.into())
    }

    pub fn data_url(&self) -> &str {
        &self.0
    }

    /// "data:image/jpeg;base64,..." からMIMEタイプを抽出（不明時は image/jpeg）
    pub fn mime_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|s| s.split(';').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("image/jpeg")
    }

    /// Base64データ部分
    pub fn payload(&self) -> Option<&str> {
        self.0.split_once(',').map(|(_, data)| data)
    }

    /// 一覧表示用の短いハッシュ
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..6])
    }
}

/// チェックカテゴリ（写真・所見の単位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistCategory {
    pub id: String,
    pub name: String,
    pub items: Vec<ChecklistItem>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,
}

/// 作業種別
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkType {
    pub id: WorkTypeId,
    pub name: String,
    pub status: InspectionStatus,
    #[serde(default)]
    pub categories: Vec<ChecklistCategory>,
}

/// 点検ドキュメント（保存単位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionDocument {
    pub basic_info: Option<BasicInfo>,
    pub work_types: Vec<WorkType>,
    #[serde(default)]
    pub final_comments: String,
}
