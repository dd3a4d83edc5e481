use crate::error::Result;
use safety_patrol_common::{project, report_file_name, InspectionDocument, Report};
use std::path::{Path, PathBuf};

/// 出力先がフォルダ（または拡張子なし）ならファイル名を付与する
fn output_path_for_report(output: &Path, file_name: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(file_name)
    } else {
        output.to_path_buf()
    }
}

/// 報告書をUTF-8テキストで書き出し、書き出したパスを返す
pub fn export_report(doc: &InspectionDocument, output: &Path) -> Result<(PathBuf, Report)> {
    let report = project(doc);
    let path = output_path_for_report(output, &report_file_name(doc));

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, &report.text)?;
    tracing::info!(path = %path.display(), total = report.statistics.total, "報告書を出力");

    Ok((path, report))
}
