use super::*;

// =============================================================
// IntegrationAccount
// =============================================================

#[test]
fn account_decodes_with_optional_fields_missing() {
    let account: IntegrationAccount = serde_json::from_str(r#"{"id":"1a2b3c4d5e6f","api_key":"KEY"}"#).unwrap();
    assert_eq!(account.batch_id, None);
    assert_eq!(account.proxy, None);
}

#[test]
fn masked_api_key_keeps_head_and_tail() {
    let account: IntegrationAccount =
        serde_json::from_str(r#"{"id":"a","api_key":"ABCDEFGHIJKLMNOP","secret":"ignored"}"#).unwrap();
    assert_eq!(account.masked_api_key(), "ABCD...MNOP");
}

#[test]
fn short_api_key_is_not_masked() {
    let account = IntegrationAccount {
        id: "a".into(),
        api_key: "SHORT".into(),
        batch_id: None,
        proxy: None,
        created_at: None,
    };
    assert_eq!(account.masked_api_key(), "SHORT");
}

#[test]
fn account_label_uses_first_eight_chars() {
    let account: IntegrationAccount =
        serde_json::from_str(r#"{"id":"1a2b3c4d-5e6f-7a8b","api_key":"k"}"#).unwrap();
    assert_eq!(account.label(), "Account 1a2b3c4d");
}

// =============================================================
// Unit
// =============================================================

#[test]
fn unit_size_renders_numbers_and_strings() {
    let numeric: Unit = serde_json::from_str(r#"{"id":"u1","symbol":"SOL_USDC_PERP","size":1.5}"#).unwrap();
    let decimal: Unit = serde_json::from_str(r#"{"id":"u2","symbol":"SOL_USDC_PERP","size":"0.25"}"#).unwrap();
    let missing: Unit = serde_json::from_str(r#"{"id":"u3","symbol":"SOL_USDC_PERP"}"#).unwrap();
    assert_eq!(numeric.size_label(), "1.5");
    assert_eq!(decimal.size_label(), "0.25");
    assert_eq!(missing.size_label(), "-");
}

#[test]
fn unit_deleted_flag_follows_timestamp() {
    let unit: Unit =
        serde_json::from_str(r#"{"id":"u1","symbol":"BTC_USDC_PERP","deleted_at":"2025-01-02T03:04:05Z"}"#).unwrap();
    assert!(unit.is_deleted());
}

// =============================================================
// Batch
// =============================================================

#[test]
fn batch_decodes() {
    let batch: Batch = serde_json::from_str(r#"{"id":"b1","name":"Night shift","created_at":null}"#).unwrap();
    assert_eq!(batch.name, "Night shift");
    assert!(batch.created_at.is_none());
}
