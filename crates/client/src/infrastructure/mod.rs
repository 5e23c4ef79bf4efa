pub mod http_client;
pub mod notifier;
pub mod session;
pub mod storage;

pub mod testing;

pub use http_client::WishlistHttpClient;
pub use notifier::TracingNotifier;
pub use session::{EnvSession, SessionCredentials, StoredSession};
pub use storage::FileStorageProvider;
