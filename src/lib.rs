pub mod v1;

pub mod prelude {
    pub use crate::v1::config::*;
    pub use crate::v1::dispatch::*;
    pub use crate::v1::item::*;
    pub use crate::v1::request::*;
    pub use crate::v1::route::*;
    pub use crate::v1::store::{dynamo::*, memory::*, *};
}
