pub mod media;

pub use media::{
    DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT, MediaResult, Provider, ProviderSelection, clamp_limit,
};
