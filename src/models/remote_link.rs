use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RemoteLink {
    #[serde(flatten)]
    pub resource: ResourceRef,
    #[serde(rename = "remoteUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Materialize for RemoteLink {
    fn materialize(node: Node<'_>) -> Result<Self> {
        let object = node.get("object");

        Ok(Self {
            resource: ResourceRef::from_node(node),
            remote_url: object.get("url").as_string(),
            title: object.get("title").as_string(),
        })
    }
}

impl_resource!(RemoteLink => resource);
