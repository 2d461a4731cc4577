//! JSONツリーを辿るための読み取り専用カーソル
//!
//! 途中のキーが存在しなくてもエラーにはならず「欠落」ノードになり、
//! 以降の変換はすべて型ごとのデフォルト値を返す。

use crate::error::Result;
use crate::field;
use crate::models::FieldSchema;
use crate::resource::{Materialize, materialize_many};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default)]
pub struct Node<'a> {
    value: Option<&'a Value>,
}

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Self { value: Some(value) }
    }

    pub fn missing() -> Self {
        Self { value: None }
    }

    pub fn get(self, key: &str) -> Node<'a> {
        Node {
            value: self.value.and_then(|v| v.as_object()).and_then(|m| m.get(key)),
        }
    }

    /// `node.path(&["versionData", "versionsPerProject"])`
    pub fn path(self, keys: &[&str]) -> Node<'a> {
        keys.iter().fold(self, |node, key| node.get(key))
    }

    /// キーが存在するか（値がnullでも存在とみなす）
    pub fn has(self, key: &str) -> bool {
        self.value
            .and_then(|v| v.as_object())
            .is_some_and(|m| m.contains_key(key))
    }

    pub fn is_missing(self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    pub fn is_object(self) -> bool {
        matches!(self.value, Some(Value::Object(_)))
    }

    pub fn is_array(self) -> bool {
        matches!(self.value, Some(Value::Array(_)))
    }

    pub fn is_number(self) -> bool {
        matches!(self.value, Some(Value::Number(_)))
    }

    /// 配列要素を順に返す（配列でなければ空）
    pub fn elements(self) -> impl Iterator<Item = Node<'a>> {
        self.value
            .and_then(|v| v.as_array())
            .into_iter()
            .flatten()
            .map(Node::new)
    }

    /// オブジェクトのエントリを返す（オブジェクトでなければ空）
    pub fn entries(self) -> impl Iterator<Item = (&'a str, Node<'a>)> {
        self.value
            .and_then(|v| v.as_object())
            .into_iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), Node::new(v)))
    }

    pub fn as_string(self) -> Option<String> {
        field::get_string(self.value)
    }

    pub fn as_bool(self) -> bool {
        field::get_boolean(self.value)
    }

    pub fn as_integer(self) -> i64 {
        field::get_integer(self.value)
    }

    pub fn as_float(self) -> f64 {
        field::get_float(self.value)
    }

    pub fn as_date_time(self) -> Option<DateTime<Utc>> {
        field::get_date_time(self.value)
    }

    pub fn as_required_date_time(self, field: &str) -> Result<Option<DateTime<Utc>>> {
        field::parse_required_date_time(self.value, field)
    }

    pub fn as_date(self) -> Option<NaiveDate> {
        field::get_date(self.value)
    }

    pub fn as_agile_date_time(self) -> Option<NaiveDateTime> {
        field::get_agile_date_time(self.value)
    }

    pub fn as_string_list(self) -> Vec<String> {
        field::get_string_array(self.value)
    }

    pub fn as_integer_list(self) -> Vec<i64> {
        field::get_integer_array(self.value)
    }

    pub fn as_string_map(self) -> HashMap<String, String> {
        field::get_string_map(self.value)
    }

    pub fn as_map<V>(self, convert: impl Fn(Node<'_>) -> Option<V>) -> HashMap<String, V> {
        field::get_map(self.value, |v| convert(Node::new(v)))
    }

    pub fn as_field_schema(self) -> Option<FieldSchema> {
        field::get_field_schema(self.value)
    }

    /// 埋め込みリソース（オブジェクトでなければ`None`）
    pub fn resource<T: Materialize>(self) -> Result<Option<T>> {
        if self.is_object() {
            T::materialize(self).map(Some)
        } else {
            Ok(None)
        }
    }

    /// 埋め込みリソース配列（配列でなければ空、オブジェクト以外の要素は捨てる）
    pub fn resources<T: Materialize>(self) -> Result<Vec<T>> {
        match self.value {
            Some(value) => materialize_many(value),
            None => Ok(Vec::new()),
        }
    }
}
