//! 型のないJSON値を目的の型へ変換する関数群
//!
//! どの関数も形の不一致ではエラーにならず、型ごとのデフォルト値を返す。
//! 例外は`parse_required_date_time`のみで、値が存在するのにパースできない場合に失敗する。

use crate::error::{Error, Result};
use crate::models::FieldSchema;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

/// JIRAの日時フォーマット（例: "2024-01-15T10:30:00.000+0000"）
const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
/// JIRAの日付フォーマット（例: "2024-01-15"）
const DATE_FORMAT: &str = "%Y-%m-%d";
/// GreenHopperボードの日時フォーマット（例: "13/Jan/14 4:01 PM"）
const AGILE_DATE_TIME_FORMAT: &str = "%d/%b/%y %I:%M %p";

pub fn get_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

pub fn get_boolean(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(true)))
}

pub fn get_integer(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        _ => 0,
    }
}

pub fn get_float(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

pub fn get_date_time(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => parse_jira_datetime(s).ok(),
        _ => None,
    }
}

/// 必須の日時フィールドを取得
///
/// 値がnull/欠落なら`Ok(None)`、文字列以外や解釈できない文字列なら`InvalidTimestamp`。
pub fn parse_required_date_time(value: Option<&Value>, field: &str) -> Result<Option<DateTime<Utc>>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => parse_jira_datetime(s).map(Some).map_err(|_| Error::InvalidTimestamp {
            field: field.to_string(),
            value: s.clone(),
        }),
        Some(other) => Err(Error::InvalidTimestamp {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

pub fn get_date(value: Option<&Value>) -> Option<NaiveDate> {
    match value? {
        Value::String(s) => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
        _ => None,
    }
}

pub fn get_agile_date_time(value: Option<&Value>) -> Option<NaiveDateTime> {
    match value? {
        Value::String(s) => NaiveDateTime::parse_from_str(s, AGILE_DATE_TIME_FORMAT).ok(),
        _ => None,
    }
}

pub fn get_string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| get_string(Some(v))).collect(),
        _ => Vec::new(),
    }
}

pub fn get_integer_array(value: Option<&Value>) -> Vec<i64> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| v.is_number())
            .map(|v| get_integer(Some(v)))
            .collect(),
        _ => Vec::new(),
    }
}

/// オブジェクトの各エントリを`convert`で変換したマップ
///
/// 変換結果が`None`のエントリは含めない。
pub fn get_map<V>(value: Option<&Value>, convert: impl Fn(&Value) -> Option<V>) -> HashMap<String, V> {
    match value {
        Some(Value::Object(map)) => map
            .iter()
            .filter_map(|(k, v)| convert(v).map(|v| (k.clone(), v)))
            .collect(),
        _ => HashMap::new(),
    }
}

pub fn get_string_map(value: Option<&Value>) -> HashMap<String, String> {
    get_map(value, |v| get_string(Some(v)))
}

pub fn get_field_schema(value: Option<&Value>) -> Option<FieldSchema> {
    match value? {
        Value::Object(map) => Some(FieldSchema {
            field_type: get_string(map.get("type")),
            items: get_string(map.get("items")),
            system: get_string(map.get("system")),
            custom: get_string(map.get("custom")),
            custom_id: get_integer(map.get("customId")),
        }),
        _ => None,
    }
}

/// JIRAの日時文字列を`DateTime<Utc>`にパース
pub fn parse_jira_datetime(s: &str) -> std::result::Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc3339(s))
        .map(|dt| dt.with_timezone(&Utc))
}
