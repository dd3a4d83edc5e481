//! ドキュメント更新操作
//!
//! すべての操作は所有権付きのドキュメントを受け取り、変更後のドキュメントを返す。
//! 各階層でIDを照合し、一致したノードだけを置き換える。
//! IDが解決できない場合は何もせずそのまま返す（古い参照によるもの）。

use crate::catalog::{default_categories, default_work_types};
use crate::error::Result;
use crate::types::{
    BasicInfo, ChecklistCategory, ChecklistItem, InspectionDocument, InspectionStatus, Photo,
    SafetyRating, WorkType, WorkTypeId,
};

impl Default for InspectionDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InspectionDocument {
    /// 基本情報なし・既定の作業種別で新規作成
    pub fn new() -> Self {
        Self {
            basic_info: None,
            work_types: default_work_types(),
            final_comments: String::new(),
        }
    }

    /// 基本情報を丸ごと置き換える（作業種別には触れない）
    pub fn set_basic_info(mut self, info: BasicInfo) -> Self {
        self.basic_info = Some(info);
        self
    }

    /// 選択された作業種別を進行中にし、カテゴリが空なら既定テンプレートを割り当てる
    ///
    /// 選択されなかった作業種別は変更しない。
    pub fn select_work_types(mut self, selected: &[WorkTypeId]) -> Self {
        for work_type in self
            .work_types
            .iter_mut()
            .filter(|wt| selected.contains(&wt.id))
        {
            if work_type.status == InspectionStatus::NotStarted {
                work_type.status = InspectionStatus::InProgress;
            }
            if work_type.categories.is_empty() {
                work_type.categories = default_categories();
            }
        }
        self
    }

    /// カテゴリの写真列の末尾に追加
    pub fn add_photos(
        self,
        work_type_id: WorkTypeId,
        category_id: &str,
        photos: impl IntoIterator<Item = Photo>,
    ) -> Self {
        self.update_category(work_type_id, category_id, |category| {
            category.photos.extend(photos);
        })
    }

    /// 指定位置の写真を削除（後続は1つ前に詰まる）
    pub fn delete_photo(self, work_type_id: WorkTypeId, category_id: &str, index: usize) -> Self {
        self.update_category(work_type_id, category_id, |category| {
            if index < category.photos.len() {
                category.photos.remove(index);
            }
        })
    }

    pub fn set_rating(
        self,
        work_type_id: WorkTypeId,
        category_id: &str,
        item_id: &str,
        rating: SafetyRating,
    ) -> Self {
        self.update_item(work_type_id, category_id, item_id, |item| {
            item.rating = Some(rating);
        })
    }

    pub fn set_notes(
        self,
        work_type_id: WorkTypeId,
        category_id: &str,
        item_id: &str,
        notes: impl Into<String>,
    ) -> Self {
        let notes = notes.into();
        self.update_item(work_type_id, category_id, item_id, |item| {
            item.notes = notes;
        })
    }

    pub fn set_findings(
        self,
        work_type_id: WorkTypeId,
        category_id: &str,
        findings: impl Into<String>,
    ) -> Self {
        let findings = findings.into();
        self.update_category(work_type_id, category_id, |category| {
            category.findings = Some(findings);
        })
    }

    /// 完了にする（評価の網羅は検証しない。呼び出し側でゲートすること）
    pub fn complete_work_type(mut self, work_type_id: WorkTypeId) -> Self {
        if let Some(work_type) = self.work_type_mut(work_type_id) {
            work_type.status = InspectionStatus::Completed;
        }
        self
    }

    pub fn set_final_comments(mut self, comments: impl Into<String>) -> Self {
        self.final_comments = comments.into();
        self
    }

    /// 保存形式（JSON）から復元
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn work_type(&self, id: WorkTypeId) -> Option<&WorkType> {
        self.work_types.iter().find(|wt| wt.id == id)
    }

    /// 完了済みの作業種別（カタログ順）
    pub fn completed_work_types(&self) -> impl Iterator<Item = &WorkType> {
        self.work_types
            .iter()
            .filter(|wt| wt.status == InspectionStatus::Completed)
    }

    fn work_type_mut(&mut self, id: WorkTypeId) -> Option<&mut WorkType> {
        self.work_types.iter_mut().find(|wt| wt.id == id)
    }

    fn update_category(
        mut self,
        work_type_id: WorkTypeId,
        category_id: &str,
        apply: impl FnOnce(&mut ChecklistCategory),
    ) -> Self {
        if let Some(category) = self
            .work_type_mut(work_type_id)
            .and_then(|wt| wt.categories.iter_mut().find(|c| c.id == category_id))
        {
            apply(category);
        }
        self
    }

    fn update_item(
        self,
        work_type_id: WorkTypeId,
        category_id: &str,
        item_id: &str,
        apply: impl FnOnce(&mut ChecklistItem),
    ) -> Self {
        self.update_category(work_type_id, category_id, |category| {
            if let Some(item) = category.items.iter_mut().find(|i| i.id == item_id) {
                apply(item);
            }
        })
    }
}

impl WorkType {
    pub fn category(&self, id: &str) -> Option<&ChecklistCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }
}

impl ChecklistCategory {
    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// 注意・危険の項目を含むか（所見入力の対象）
    pub fn has_issues(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.rating.is_some_and(|r| r.is_issue()))
    }
}

impl BasicInfo {
    /// 点検日のみ設定した空のフォーム
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    /// 前後の空白を除いて追加（空なら無視）。追加したらtrue
    pub fn add_team_member(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.team_members.push(name.to_string());
        true
    }

    /// 範囲外は無視
    pub fn remove_team_member(&mut self, index: usize) -> Option<String> {
        (index < self.team_members.len()).then(|| self.team_members.remove(index))
    }

    /// 位置情報を小数6桁の文字列で保存
    pub fn set_coordinates(&mut self, latitude: f64, longitude: f64) {
        self.latitude = Some(format!("{:.6}", latitude));
        self.longitude = Some(format!("{:.6}", longitude));
    }

    /// 緯度・経度の両方が入力済みなら返す
    pub fn coordinates(&self) -> Option<(&str, &str)> {
        match (self.latitude.as_deref(), self.longitude.as_deref()) {
            (Some(lat), Some(lon)) if !lat.trim().is_empty() && !lon.trim().is_empty() => {
                Some((lat, lon))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selected_doc() -> InspectionDocument {
        InspectionDocument::new()
            .set_basic_info(BasicInfo::new("2025-04-01"))
            .select_work_types(&[WorkTypeId::Crane])
    }

    fn photo(n: usize) -> Photo {
        Photo::from_data_url(format!("data:image/jpeg;base64,PHOTO{}", n))
    }

    #[test]
    fn test_new_document_has_five_work_types() {
        let doc = InspectionDocument::new();
        assert!(doc.basic_info.is_none());
        assert_eq!(doc.work_types.len(), 5);
        assert_eq!(doc.final_comments, "");
    }

    #[test]
    fn test_json_roundtrip() {
        let doc = selected_doc()
            .set_rating(WorkTypeId::Crane, "basic", "helmet", SafetyRating::Good)
            .add_photos(WorkTypeId::Crane, "basic", [photo(0)]);
        let raw = doc.to_json().unwrap();
        assert_eq!(InspectionDocument::from_json(&raw).unwrap(), doc);
    }

    #[test]
    fn test_from_json_corrupt() {
        let result = InspectionDocument::from_json("{\"workTypes\": 3}");
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_set_basic_info_keeps_work_types() {
        let doc = selected_doc();
        let mut info = BasicInfo::new("2025-04-02");
        info.site_name = "Site B".into();
        let doc = doc.set_basic_info(info);
        assert_eq!(doc.basic_info.as_ref().unwrap().site_name, "Site B");
        let crane = doc.work_type(WorkTypeId::Crane).unwrap();
        assert_eq!(crane.status, InspectionStatus::InProgress);
        assert_eq!(crane.categories.len(), 3);
    }

    #[test]
    fn test_select_work_types_only_touches_selected() {
        let doc = selected_doc();
        let crane = doc.work_type(WorkTypeId::Crane).unwrap();
        assert_eq!(crane.status, InspectionStatus::InProgress);
        assert!(!crane.categories.is_empty());

        let manhole = doc.work_type(WorkTypeId::Manhole).unwrap();
        assert_eq!(manhole.status, InspectionStatus::NotStarted);
        assert!(manhole.categories.is_empty());
    }

    #[test]
    fn test_select_keeps_completed_status_and_categories() {
        let doc = selected_doc()
            .set_rating(WorkTypeId::Crane, "basic", "helmet", SafetyRating::Danger)
            .complete_work_type(WorkTypeId::Crane)
            .select_work_types(&[WorkTypeId::Crane, WorkTypeId::Other]);

        let crane = doc.work_type(WorkTypeId::Crane).unwrap();
        assert_eq!(crane.status, InspectionStatus::Completed);
        let helmet = crane.category("basic").unwrap().item("helmet").unwrap();
        assert_eq!(helmet.rating, Some(SafetyRating::Danger));
        assert_eq!(
            doc.work_type(WorkTypeId::Other).unwrap().status,
            InspectionStatus::InProgress
        );
    }

    #[test]
    fn test_categories_not_aliased_between_work_types() {
        let doc = InspectionDocument::new()
            .select_work_types(&[WorkTypeId::Crane, WorkTypeId::Excavation])
            .set_notes(WorkTypeId::Crane, "basic", "gloves", "破れあり");

        let excavation = doc.work_type(WorkTypeId::Excavation).unwrap();
        assert_eq!(excavation.category("basic").unwrap().item("gloves").unwrap().notes, "");
    }

    #[test]
    fn test_set_rating_and_notes() {
        let doc = selected_doc()
            .set_rating(WorkTypeId::Crane, "fall-prevention", "harness", SafetyRating::Warning)
            .set_notes(WorkTypeId::Crane, "fall-prevention", "harness", "フック未使用");

        let item = doc
            .work_type(WorkTypeId::Crane)
            .and_then(|wt| wt.category("fall-prevention"))
            .and_then(|c| c.item("harness"))
            .unwrap();
        assert_eq!(item.rating, Some(SafetyRating::Warning));
        assert_eq!(item.notes, "フック未使用");
    }

    #[test]
    fn test_unresolved_paths_are_noops() {
        let doc = selected_doc();
        let same = doc
            .clone()
            .set_rating(WorkTypeId::Crane, "basic", "no-such-item", SafetyRating::Good)
            .set_rating(WorkTypeId::Crane, "no-such-category", "helmet", SafetyRating::Good)
            .set_findings(WorkTypeId::Manhole, "basic", "未選択")
            .delete_photo(WorkTypeId::Crane, "basic", 0)
            .add_photos(WorkTypeId::Excavation, "basic", vec![photo(0)]);
        assert_eq!(same, doc);
    }

    #[test]
    fn test_add_photos_preserves_order() {
        let doc = selected_doc()
            .add_photos(WorkTypeId::Crane, "basic", vec![photo(0), photo(1)])
            .add_photos(WorkTypeId::Crane, "basic", vec![photo(2)]);
        let photos = &doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().photos;
        assert_eq!(photos, &vec![photo(0), photo(1), photo(2)]);
    }

    #[test]
    fn test_delete_photo_shifts_later_photos() {
        let doc = selected_doc()
            .add_photos(WorkTypeId::Crane, "basic", vec![photo(0), photo(1), photo(2)])
            .delete_photo(WorkTypeId::Crane, "basic", 1);
        let photos = &doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().photos;
        assert_eq!(photos, &vec![photo(0), photo(2)]);
    }

    #[test]
    fn test_delete_then_readd_does_not_restore_order() {
        let doc = selected_doc()
            .add_photos(WorkTypeId::Crane, "basic", vec![photo(0), photo(1), photo(2)])
            .delete_photo(WorkTypeId::Crane, "basic", 0)
            .add_photos(WorkTypeId::Crane, "basic", vec![photo(0)]);
        let photos = &doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().photos;
        assert_eq!(photos, &vec![photo(1), photo(2), photo(0)]);
    }

    #[test]
    fn test_delete_photo_out_of_range() {
        let doc = selected_doc().add_photos(WorkTypeId::Crane, "basic", vec![photo(0)]);
        let after = doc.clone().delete_photo(WorkTypeId::Crane, "basic", 5);
        assert_eq!(after, doc);
    }

    #[test]
    fn test_complete_does_not_validate() {
        let doc = selected_doc().complete_work_type(WorkTypeId::Crane);
        assert_eq!(
            doc.work_type(WorkTypeId::Crane).unwrap().status,
            InspectionStatus::Completed
        );
    }

    #[test]
    fn test_has_issues() {
        let doc = selected_doc().set_rating(WorkTypeId::Crane, "basic", "helmet", SafetyRating::Good);
        assert!(!doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().has_issues());

        let doc = doc.set_rating(WorkTypeId::Crane, "basic", "gloves", SafetyRating::Danger);
        assert!(doc.work_type(WorkTypeId::Crane).unwrap().category("basic").unwrap().has_issues());
    }

    #[test]
    fn test_team_members() {
        let mut info = BasicInfo::new("2025-04-01");
        assert!(info.add_team_member("  田中 "));
        assert!(!info.add_team_member("   "));
        assert!(info.add_team_member("田中"));
        assert_eq!(info.team_members, vec!["田中", "田中"]);

        assert_eq!(info.remove_team_member(5), None);
        assert_eq!(info.remove_team_member(0).as_deref(), Some("田中"));
        assert_eq!(info.team_members.len(), 1);
    }

    #[test]
    fn test_set_coordinates_six_decimals() {
        let mut info = BasicInfo::new("2025-04-01");
        assert_eq!(info.coordinates(), None);
        info.set_coordinates(33.5902, 130.4017123456);
        assert_eq!(info.latitude.as_deref(), Some("33.590200"));
        assert_eq!(info.longitude.as_deref(), Some("130.401712"));
        assert_eq!(info.coordinates(), Some(("33.590200", "130.401712")));
    }
}
