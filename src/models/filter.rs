use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filter {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jql: Option<String>,
    pub favourite: bool,
}

impl Materialize for Filter {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            name: node.get("name").as_string(),
            jql: node.get("jql").as_string(),
            favourite: node.get("favourite").as_bool(),
        })
    }
}

impl_resource!(Filter => resource);

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Filter{{favourite={}, name='{}', jql='{}'}}",
            self.favourite,
            self.name.as_deref().unwrap_or_default(),
            self.jql.as_deref().unwrap_or_default()
        )
    }
}
