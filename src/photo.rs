//! 写真読み込みモジュール
//!
//! 画像ファイルをData URL（base64）に変換してカテゴリに添付できる形にする。
//! 複数ファイルは選択順に1枚ずつ処理し、読めなかったファイルは黙って除外する。

use crate::error::{PatrolError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use safety_patrol_common::Photo;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("heic", "image/heic"),
];

/// 拡張子からMIMEタイプを判定（大文字小文字は区別しない）
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}

/// バイト列からData URLを作成
pub fn photo_from_bytes(mime: &str, bytes: &[u8]) -> Photo {
    Photo::from_data_url(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// 1ファイルを読み込んでData URLに変換
pub async fn encode_photo(path: &Path) -> Result<Photo> {
    let mime = mime_for_path(path)
        .ok_or_else(|| PatrolError::Photo(format!("画像ファイルではありません: {}", path.display())))?;
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| PatrolError::Photo(format!("{}: {}", path.display(), e)))?;
    Ok(photo_from_bytes(mime, &bytes))
}

/// 複数ファイルを順番に変換（失敗分は除外、順序は入力順）
pub async fn encode_photos(paths: &[PathBuf]) -> Vec<Photo> {
    let mut photos = Vec::with_capacity(paths.len());
    for path in paths {
        match encode_photo(path).await {
            Ok(photo) => photos.push(photo),
            Err(e) => tracing::debug!(error = %e, "写真をスキップ"),
        }
    }
    photos
}

/// フォルダ直下の画像ファイル（ファイル名順）
pub fn scan_photo_dir(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(PatrolError::Photo(format!(
            "フォルダが見つかりません: {}",
            folder.display()
        )));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && mime_for_path(p).is_some())
        .collect();

    paths.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));
    Ok(paths)
}

/// 引数のパス群を展開（フォルダは中の画像に置き換える）
pub fn expand_photo_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(scan_photo_dir(input)?);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}
