//! 点検データの保存
//!
//! ドキュメント全体を1つのスナップショットとして保存する。
//! 保存は常に全体の上書き。スナップショットがない・壊れている場合は「前回のセッションなし」。

use crate::error::{PatrolError, Result};
use safety_patrol_common::InspectionDocument;
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// スナップショットの読み書き
pub trait DocumentStore {
    fn load(&self) -> Option<InspectionDocument>;
    fn save(&self, doc: &InspectionDocument) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// JSONファイル1つに保存するストア
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// スナップショットを書き込み、バッファを確実に書き出す
fn write_snapshot<W: Write>(writer: W, doc: &InspectionDocument) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, doc)?;
    writer.flush()?;
    Ok(())
}

impl DocumentStore for FileStore {
    fn load(&self) -> Option<InspectionDocument> {
        if !self.path.exists() {
            return None;
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "点検データを開けません");
                return None;
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "点検データが壊れています。新規セッションとして扱います");
                None
            }
        }
    }

    fn save(&self, doc: &InspectionDocument) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent)?;

        // 同じフォルダの一時ファイルに書き切ってから置き換える
        let mut temp = NamedTempFile::new_in(parent)?;
        write_snapshot(temp.as_file_mut(), doc)?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;
        tracing::debug!(path = %self.path.display(), "点検データを保存");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "点検データを削除");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// プロセス内だけで保持するストア（シリアライズ済みの文字列を保持する）
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生のスナップショットを直接設定
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Option<InspectionDocument> {
        let slot = self.slot.borrow();
        let raw = slot.as_deref()?;
        InspectionDocument::from_json(raw)
            .map_err(|e| tracing::warn!(error = %e, "点検データが壊れています"))
            .ok()
    }

    fn save(&self, doc: &InspectionDocument) -> Result<()> {
        let raw = doc.to_json()?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// 画面・コマンドに渡すセッションハンドル
///
/// 更新は「全体を読み込み、1つ変更を適用し、全体を書き戻す」。
pub struct Session<S: DocumentStore> {
    store: S,
}

impl<S: DocumentStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Option<InspectionDocument> {
        self.store.load()
    }

    /// 既存セッション必須で読み込む
    pub fn require(&self) -> Result<InspectionDocument> {
        self.store.load().ok_or(PatrolError::NoSession)
    }

    /// 1つの変更を適用して保存し、保存後のドキュメントを返す
    pub fn update<F>(&self, apply: F) -> Result<InspectionDocument>
    where
        F: FnOnce(InspectionDocument) -> InspectionDocument,
    {
        let doc = apply(self.require()?);
        self.store.save(&doc)?;
        Ok(doc)
    }

    pub fn replace(&self, doc: &InspectionDocument) -> Result<()> {
        self.store.save(doc)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
