//! Lather client - session layer for the laundromat ordering core
//!
//! Wires the `shared` domain model to its collaborators: menu fetch and
//! cart persistence behind traits, connectivity monitoring, opportunistic
//! cart sync with deferred retry, the staged (cancelable) cart erase, and
//! store discovery ordering.

pub mod config;
pub mod connectivity;
pub mod discovery;
pub mod error;
pub mod session;
pub mod sync;
pub mod traits;

pub use config::SessionConfig;
pub use connectivity::{ConnectivityMonitor, ConnectivityProbe, ConnectivityStatus};
pub use discovery::{sort_by_distance, Favorites};
pub use error::{ClientError, ClientResult};
pub use session::StoreSession;
pub use traits::{CartStore, InMemoryCartStore, InMemoryMenuSource, MenuSource};
