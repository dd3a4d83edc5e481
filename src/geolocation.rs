//! 位置情報取得
//!
//! 外部コマンド（termux-location, CoreLocationCLI など）を1回だけ実行し、
//! 標準出力から緯度・経度を読み取る。リトライはしない。

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tokio::process::Command;

/// 取得した座標
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Error, Debug, PartialEq)]
pub enum GeoError {
    #[error("位置情報に対応していません（`safety-patrol config --set-geolocation-command` で取得コマンドを設定してください）")]
    Unsupported,

    #[error("{0}")]
    Failed(String),

    #[error("位置情報を読み取れません: {0}")]
    Parse(String),
}

/// 現在地の取得元
#[allow(async_fn_in_trait)]
pub trait GeoLocator {
    async fn locate(&self) -> Result<Coordinates, GeoError>;
}

/// 設定されたコマンドで取得する
#[derive(Debug, Clone)]
pub struct CommandLocator {
    command: Option<String>,
}

impl CommandLocator {
    pub fn new(command: Option<String>) -> Self {
        Self {
            command: command.filter(|c| !c.trim().is_empty()),
        }
    }
}

impl GeoLocator for CommandLocator {
    async fn locate(&self) -> Result<Coordinates, GeoError> {
        let command = self.command.as_deref().ok_or(GeoError::Unsupported)?;

        #[cfg(windows)]
        let output = Command::new("cmd").args(["/c", command]).output().await;

        #[cfg(not(windows))]
        let output = Command::new("sh").args(["-c", command]).output().await;

        let output = output.map_err(|e| GeoError::Failed(format!("コマンド実行エラー: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GeoError::Failed(format!(
                "コマンドが失敗しました (code {:?}): {}",
                output.status.code(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::debug!(output = %stdout.trim(), "位置情報コマンドの出力");
        parse_coordinates(&stdout)
    }
}

/// JSON形式の出力（termux-location など）
#[derive(Debug, Deserialize)]
struct LocationOutput {
    latitude: f64,
    longitude: f64,
}

/// JSON の latitude/longitude、または "33.5902,130.4017" / "33.5902 130.4017" を解釈
pub fn parse_coordinates(text: &str) -> Result<Coordinates, GeoError> {
    lazy_static::lazy_static! {
        static ref PAIR: Regex =
            Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*[,\s]\s*(-?\d+(?:\.\d+)?)\s*$").unwrap();
    }

    let trimmed = text.trim();
    let (latitude, longitude) = if trimmed.starts_with('{') {
        let output: LocationOutput = serde_json::from_str(trimmed)
            .map_err(|e| GeoError::Parse(format!("{}: {}", e, trimmed)))?;
        (output.latitude, output.longitude)
    } else {
        let caps = PAIR
            .captures(trimmed)
            .ok_or_else(|| GeoError::Parse(trimmed.to_string()))?;
        let latitude: f64 = caps[1].parse().map_err(|_| GeoError::Parse(caps[1].to_string()))?;
        let longitude: f64 = caps[2].parse().map_err(|_| GeoError::Parse(caps[2].to_string()))?;
        (latitude, longitude)
    };

    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(GeoError::Parse(format!("範囲外の座標: {}, {}", latitude, longitude)));
    }

    Ok(Coordinates { latitude, longitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_pair() {
        let coords = parse_coordinates("33.590200,130.401700\n").unwrap();
        assert_eq!(coords, Coordinates { latitude: 33.5902, longitude: 130.4017 });
    }

    #[test]
    fn test_parse_space_pair() {
        let coords = parse_coordinates("  -33.86 151.2  ").unwrap();
        assert_eq!(coords.latitude, -33.86);
        assert_eq!(coords.longitude, 151.2);
    }

    #[test]
    fn test_parse_json_output() {
        let json = r#"{"latitude": 33.5902, "longitude": 130.4017, "accuracy": 12.0}"#;
        let coords = parse_coordinates(json).unwrap();
        assert_eq!(coords.latitude, 33.5902);
    }

    #[test]
    fn test_parse_json_with_extra_fields() {
        let json = r#"{
  "latitude": -33.86,
  "longitude": 151.2,
  "altitude": 12.5,
  "provider": "gps"
}"#;
        let coords = parse_coordinates(json).unwrap();
        assert_eq!(coords, Coordinates { latitude: -33.86, longitude: 151.2 });
    }

    #[test]
    fn test_parse_json_invalid() {
        assert!(matches!(
            parse_coordinates(r#"{"latitude": "north", "longitude": 130.4}"#),
            Err(GeoError::Parse(_))
        ));
        assert!(matches!(parse_coordinates(r#"{"latitude": 33.5}"#), Err(GeoError::Parse(_))));
        assert!(matches!(
            parse_coordinates(r#"{"latitude": 91.0, "longitude": 130.4}"#),
            Err(GeoError::Parse(_))
        ));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(parse_coordinates("permission denied"), Err(GeoError::Parse(_))));
        assert!(matches!(parse_coordinates("95.0,10.0"), Err(GeoError::Parse(_))));
    }

    #[tokio::test]
    async fn test_locator_without_command_is_unsupported() {
        let locator = CommandLocator::new(Some("   ".into()));
        assert_eq!(locator.locate().await, Err(GeoError::Unsupported));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_locator_runs_command() {
        let locator = CommandLocator::new(Some("echo 33.5,130.25".into()));
        let coords = locator.locate().await.unwrap();
        assert_eq!(coords, Coordinates { latitude: 33.5, longitude: 130.25 });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_locator_command_failure() {
        let locator = CommandLocator::new(Some("exit 3".into()));
        assert!(matches!(locator.locate().await, Err(GeoError::Failed(_))));
    }
}
