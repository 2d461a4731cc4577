use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

/// バックログ上の区切り
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Marker {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Materialize for Marker {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
        })
    }
}

impl_resource!(Marker => resource);

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
