use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Component {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "isAssigneeTypeValid")]
    pub is_assignee_type_valid: bool,
}

impl Materialize for Component {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            description: node.get("description").as_string(),
            is_assignee_type_valid: node.get("isAssigneeTypeValid").as_bool(),
        })
    }
}

impl_resource!(Component => resource);

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
