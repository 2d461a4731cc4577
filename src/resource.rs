//! リソースの共通能力（id/self）とJSONからの具体化
//!
//! 各リソース型は`Materialize`で自分のフィールド抽出を定義し、
//! `materialize_one`/`materialize_many`がJSONの形の揺れを吸収する。

use crate::error::Result;
use crate::node::Node;
use serde::Serialize;
use serde_json::Value;

/// サーバー側で識別されるリソースの能力
pub trait Resource {
    fn id(&self) -> Option<&str>;
    fn self_url(&self) -> Option<&str>;
}

/// 各リソースに埋め込まれる`{id, self}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "self")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
}

impl ResourceRef {
    pub fn from_node(node: Node<'_>) -> Self {
        Self {
            id: node.get("id").as_string(),
            self_url: node.get("self").as_string(),
        }
    }
}

impl Resource for ResourceRef {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn self_url(&self) -> Option<&str> {
        self.self_url.as_deref()
    }
}

/// JSONオブジェクトからのフィールド抽出
///
/// `Default`はペイロードなし（null）で生成したプレースホルダーを表す。
pub trait Materialize: Default + Sized {
    fn materialize(node: Node<'_>) -> Result<Self>;
}

/// 単一のリソースを具体化する
///
/// オブジェクトでなければ識別子のないデフォルト値を返す。
pub fn materialize_one<T: Materialize>(json: &Value) -> Result<T> {
    if json.is_object() {
        T::materialize(Node::new(json))
    } else {
        Ok(T::default())
    }
}

/// 配列からリソース列を具体化する
///
/// 配列でなければ空。オブジェクトでない要素は穴を残さずに読み飛ばす。
pub fn materialize_many<T: Materialize>(json: &Value) -> Result<Vec<T>> {
    let Some(items) = json.as_array() else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .filter(|item| item.is_object())
        .map(|item| T::materialize(Node::new(item)))
        .collect()
}

/// `resource`フィールド経由で`Resource`を実装する
macro_rules! impl_resource {
    ($($ty:ty => $($field:ident).+),* $(,)?) => {
        $(
            impl $crate::resource::Resource for $ty {
                fn id(&self) -> Option<&str> {
                    self.$($field).+.id.as_deref()
                }

                fn self_url(&self) -> Option<&str> {
                    self.$($field).+.self_url.as_deref()
                }
            }
        )*
    };
}

pub(crate) use impl_resource;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Default, PartialEq)]
    struct Named {
        resource: ResourceRef,
        name: Option<String>,
    }

    impl Materialize for Named {
        fn materialize(node: Node<'_>) -> Result<Self> {
            Ok(Self {
                resource: ResourceRef::from_node(node),
                name: node.get("name").as_string(),
            })
        }
    }

    impl_resource!(Named => resource);

    #[test]
    fn test_materialize_one_non_object_is_default() {
        let named: Named = materialize_one(&json!([1, 2, 3])).unwrap();
        assert_eq!(named, Named::default());
        assert_eq!(named.id(), None);

        let named: Named = materialize_one(&json!(null)).unwrap();
        assert_eq!(named, Named::default());
    }

    #[test]
    fn test_materialize_one_object() {
        let named: Named = materialize_one(&json!({
            "id": 10000,
            "self": "https://example.atlassian.net/rest/api/2/thing/10000",
            "name": "Thing"
        }))
        .unwrap();

        assert_eq!(named.id(), Some("10000"));
        assert_eq!(
            named.self_url(),
            Some("https://example.atlassian.net/rest/api/2/thing/10000")
        );
        assert_eq!(named.name.as_deref(), Some("Thing"));
    }

    #[test]
    fn test_materialize_many_drops_non_objects_in_order() {
        let list: Vec<Named> = materialize_many(&json!([
            {"name": "a"},
            "junk",
            null,
            {"name": "b"},
            42,
            [{"name": "nested"}],
            {"name": "c"}
        ]))
        .unwrap();

        let names: Vec<_> = list.iter().filter_map(|n| n.name.as_deref()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_materialize_many_non_array_is_empty() {
        let list: Vec<Named> = materialize_many(&json!({"name": "a"})).unwrap();
        assert!(list.is_empty());
    }
}
