//! 表示ラベル
//!
//! 評価・状況の表示用メタデータ。モデル本体からは参照しない。

use crate::types::{InspectionStatus, SafetyRating};

/// 未評価のラベル
pub const UNRATED_LABEL: &str = "未評価";

/// 評価ごとの表示情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingDisplay {
    pub label: &'static str,
    pub symbol: &'static str,
}

const RATING_TABLE: [(SafetyRating, RatingDisplay); 3] = [
    (SafetyRating::Good, RatingDisplay { label: "良好", symbol: "○" }),
    (SafetyRating::Warning, RatingDisplay { label: "注意", symbol: "△" }),
    (SafetyRating::Danger, RatingDisplay { label: "危険", symbol: "×" }),
];

pub fn rating_display(rating: SafetyRating) -> RatingDisplay {
    RATING_TABLE
        .iter()
        .find(|(r, _)| *r == rating)
        .map(|(_, display)| *display)
        .unwrap_or(RatingDisplay { label: UNRATED_LABEL, symbol: "-" })
}

pub fn rating_label(rating: Option<SafetyRating>) -> &'static str {
    rating.map(|r| rating_display(r).label).unwrap_or(UNRATED_LABEL)
}

pub fn status_label(status: InspectionStatus) -> &'static str {
    match status {
        InspectionStatus::NotStarted => "未着手",
        InspectionStatus::InProgress => "進行中",
        InspectionStatus::Completed => "完了",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_labels() {
        assert_eq!(rating_label(Some(SafetyRating::Good)), "良好");
        assert_eq!(rating_label(Some(SafetyRating::Warning)), "注意");
        assert_eq!(rating_label(Some(SafetyRating::Danger)), "危険");
        assert_eq!(rating_label(None), "未評価");
    }

    #[test]
    fn test_every_rating_has_display() {
        for rating in SafetyRating::ALL {
            assert_ne!(rating_display(rating).label, UNRATED_LABEL);
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(InspectionStatus::Completed), "完了");
        assert_eq!(status_label(InspectionStatus::InProgress), "進行中");
    }
}
