pub mod component;
pub mod field;
pub mod filter;
pub mod history;
pub mod issue;
pub mod issue_type;
pub mod link_type;
pub mod priority;
pub mod project;
pub mod remote_link;
pub mod resolution;
pub mod search;
pub mod status;
pub mod user;
pub mod version;
pub mod votes;

pub use component::*;
pub use field::*;
pub use filter::*;
pub use history::*;
pub use issue::*;
pub use issue_type::*;
pub use link_type::*;
pub use priority::*;
pub use project::*;
pub use remote_link::*;
pub use resolution::*;
pub use search::*;
pub use status::*;
pub use user::*;
pub use version::*;
pub use votes::*;
