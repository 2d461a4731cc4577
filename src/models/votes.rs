use crate::error::Result;
use crate::node::Node;
use crate::resource::{Materialize, ResourceRef, impl_resource};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Votes {
    #[serde(flatten)]
    pub resource: ResourceRef,
    pub votes: i64,
    #[serde(rename = "hasVoted")]
    pub has_voted: bool,
}

impl Materialize for Votes {
    fn materialize(node: Node<'_>) -> Result<Self> {
        Ok(Self {
            resource: ResourceRef::from_node(node),
            votes: node.get("votes").as_integer(),
            has_voted: node.get("hasVoted").as_bool(),
        })
    }
}

impl_resource!(Votes => resource);

impl fmt::Display for Votes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.votes)
    }
}
