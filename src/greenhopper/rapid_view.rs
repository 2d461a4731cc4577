use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RapidViewProject {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RapidViewVersion {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sequence: i64,
    pub released: bool,
}

impl Materialize for RapidViewProject {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            key: node.get("key").as_string(),
            name: node.get("name").as_string(),
        })
    }
}

impl Materialize for RapidViewVersion {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            sequence: node.get("sequence").as_integer(),
            released: node.get("released").as_bool(),
        })
    }
}

impl_resource!(
    RapidViewProject => resource,
    RapidViewVersion => resource,
);

impl fmt::Display for RapidViewProject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}

impl fmt::Display for RapidViewVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
