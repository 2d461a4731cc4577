//! GreenHopper（アジャイルボード）のリソース

mod backlog;
mod issue;
mod marker;
mod rapid_view;
mod sprint;

pub use backlog::*;
pub use issue::*;
pub use marker::*;
pub use rapid_view::*;
pub use sprint::*;
