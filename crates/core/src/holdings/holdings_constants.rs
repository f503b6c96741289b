/// Wire and document keys of a holding record
pub mod fields {
    pub const ID: &str = "id";
    pub const SYMBOL: &str = "symbol";
    pub const NAME: &str = "name";
    pub const PURCHASE_PRICE: &str = "purchase price";
    pub const PURCHASE_DATE: &str = "purchase date";
    pub const SHARES: &str = "shares";
}

/// Fields a payload must carry to create a holding
pub const CREATE_REQUIRED_FIELDS: [&str; 3] =
    [fields::SYMBOL, fields::PURCHASE_PRICE, fields::SHARES];

/// Fields a payload must carry to replace a holding
pub const UPDATE_REQUIRED_FIELDS: [&str; 6] = [
    fields::ID,
    fields::SYMBOL,
    fields::NAME,
    fields::PURCHASE_PRICE,
    fields::PURCHASE_DATE,
    fields::SHARES,
];

/// Separator between the day, month and year of a purchase date
pub const DATE_SEPARATOR: char = '-';
