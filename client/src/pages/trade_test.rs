use super::*;

fn unit(id: &str, batch_id: Option<&str>) -> Unit {
    Unit {
        id: id.to_owned(),
        symbol: "SOL_USDC_PERP".to_owned(),
        size: serde_json::json!(1),
        batch_id: batch_id.map(str::to_owned),
        created_at: None,
        deleted_at: None,
    }
}

#[test]
fn units_in_batch_filters_by_batch_id() {
    let units = vec![unit("u1", Some("b1")), unit("u2", Some("b2")), unit("u3", None), unit("u4", Some("b1"))];
    let ids: Vec<&str> = units_in_batch(&units, "b1").iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u4"]);
}

#[test]
fn history_href_points_at_batch_history() {
    let batch = Batch { id: "b-42".to_owned(), name: "Night".to_owned(), created_at: None };
    assert_eq!(history_href(&batch), "/trade/history/b-42");
}
