pub mod credentials;
pub mod refresh;

pub use credentials::PostgresCredentialRepository;
pub use refresh::RedisRefreshStore;
