//! Tests for holding models: decoding, encoding and query filters.

#[cfg(test)]
mod tests {
    use crate::documents::DOCUMENT_ID_KEY;
    use crate::errors::Error;
    use crate::holdings::{normalize_price, CanonicalHolding, Holding, HoldingFilter, HoldingPayload};
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    #[test]
    fn test_holding_uses_wire_field_names() {
        let holding = Holding {
            id: "abc".to_string(),
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            purchase_price: dec!(150.25),
            purchase_date: "01-02-2024".to_string(),
            shares: 10,
        };
        let value = serde_json::to_value(&holding).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc",
                "symbol": "AAPL",
                "name": "Apple Inc.",
                "purchase price": 150.25,
                "purchase date": "01-02-2024",
                "shares": 10
            })
        );
    }

    #[test]
    fn test_holding_decodes_missing_optional_fields_as_na() {
        let holding: Holding = serde_json::from_value(json!({
            "id": "x",
            "symbol": "MSFT",
            "purchase price": 300,
            "shares": 2
        }))
        .unwrap();
        assert_eq!(holding.name, "NA");
        assert_eq!(holding.purchase_date, "NA");
        assert_eq!(holding.purchase_price, dec!(300));
    }

    #[test]
    fn test_canonical_document_has_only_canonical_fields() {
        let record = CanonicalHolding {
            symbol: "AAPL".to_string(),
            name: "NA".to_string(),
            purchase_price: dec!(12.35),
            purchase_date: "NA".to_string(),
            shares: 10,
        };
        let document = record.to_document().unwrap();
        let mut keys: Vec<&str> = document.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["name", "purchase date", "purchase price", "shares", "symbol"]
        );
        assert_eq!(document["purchase price"], json!(12.35));
    }

    #[test]
    fn test_payload_must_be_an_object() {
        assert!(HoldingPayload::from_value(json!({"symbol": "A"})).is_ok());
        for value in [json!([1, 2]), json!("AAPL"), Value::Null, json!(3)] {
            let err = HoldingPayload::from_value(value).unwrap_err();
            assert!(matches!(err, Error::Validation(_)));
        }
    }

    #[test]
    fn test_normalize_price_rounds_half_away_from_zero() {
        assert_eq!(normalize_price(dec!(12.345)), dec!(12.35));
        assert_eq!(normalize_price(dec!(-12.345)), dec!(-12.35));
        assert_eq!(normalize_price(dec!(12.344)), dec!(12.34));
        assert_eq!(normalize_price(dec!(7)), dec!(7));
    }

    #[test]
    fn test_query_filter_coerces_numeric_fields() {
        let filter = HoldingFilter::from_query_pairs(vec![
            ("purchase price", "12.345"),
            ("shares", "10"),
            ("name", "Apple"),
        ])
        .unwrap();
        let expected = HoldingFilter::new()
            .with("purchase price", serde_json::to_value(dec!(12.35)).unwrap())
            .with("shares", 10)
            .with("name", "Apple");
        assert_eq!(filter, expected);
    }

    #[test]
    fn test_query_filter_rejects_bad_numbers() {
        assert!(HoldingFilter::from_query_pairs(vec![("shares", "ten")]).is_err());
        assert!(HoldingFilter::from_query_pairs(vec![("purchase price", "cheap")]).is_err());
    }

    #[test]
    fn test_query_filter_translates_id_key() {
        let filter = HoldingFilter::from_query_pairs(vec![("id", "abc")]).unwrap();
        let document_filter = filter.to_document_filter();
        let keys: Vec<&String> = document_filter.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![DOCUMENT_ID_KEY]);
    }

    #[test]
    fn test_empty_query_filter() {
        let pairs: Vec<(String, String)> = Vec::new();
        assert!(HoldingFilter::from_query_pairs(pairs).unwrap().is_empty());
    }
}
