pub mod codec;
pub mod errors;
pub mod kv;
pub mod models;
pub mod session;
pub mod shuffle;
pub mod store;
pub mod view;

pub use codec::*;
pub use errors::*;
pub use kv::*;
pub use models::*;
pub use session::*;
pub use shuffle::*;
pub use store::*;
pub use view::*;
