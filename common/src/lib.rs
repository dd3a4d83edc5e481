//! Safety Patrol Common Library
//!
//! 点検ドキュメントのモデル・進捗判定・画面遷移・報告書生成。
//! ファイルI/Oを持たない純粋なロジックのみ。

pub mod types;
pub mod catalog;
pub mod error;
pub mod model;
pub mod progress;
pub mod navigation;
pub mod labels;
pub mod report;

pub use types::{
    BasicInfo, ChecklistCategory, ChecklistItem, ConstructionType, InspectionDocument,
    InspectionStatus, Photo, SafetyRating, Tips, WorkType, WorkTypeId,
};
pub use catalog::{default_categories, default_work_types};
pub use error::{Error, Result};
pub use progress::{is_complete, progress, progress_percent, BasicField};
pub use navigation::{PhotoPreview, Screen};
pub use labels::{rating_label, status_label};
pub use report::{project, report_file_name, Report, Statistics};
