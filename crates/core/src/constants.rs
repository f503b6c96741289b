/// Placeholder stored for optional holding fields that were not supplied
pub const NOT_AVAILABLE: &str = "NA";

/// Collection served when none is configured
pub const DEFAULT_COLLECTION_NAME: &str = "stocks1";

/// Label returned with a portfolio valuation when the caller gives no date
pub const DEFAULT_VALUATION_DATE: &str = "Today";

/// Decimal precision for stored prices and reported values
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Price lookups allowed in flight for one aggregation
pub const DEFAULT_QUOTE_CONCURRENCY: usize = 4;
