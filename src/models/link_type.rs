use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LinkType {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outward: Option<String>,
}

impl Materialize for LinkType {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            inward: node.get("inward").as_string(),
            outward: node.get("outward").as_string(),
        })
    }
}

impl_resource!(LinkType => resource);

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
