//! Holding sources feeding cross-collection capital gains.

mod collection_source;
mod remote_source;
mod sources_traits;

pub use collection_source::CollectionSource;
pub use remote_source::RemoteStocksSource;
pub use sources_traits::HoldingSourceTrait;
