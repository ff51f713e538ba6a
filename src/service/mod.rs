mod pool_service;

pub use pool_service::{PoolService, DEFAULT_REQUEST_TIMEOUT};
