use assert_matches::assert_matches;
use brewops_api::services::remote::{
    InventoryClient, InventoryLotSource, ProcurementClient, PurchaseOrderLineSource, RemoteError,
};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(5);

fn po_line_json(uuid: Uuid) -> serde_json::Value {
    json!({
        "uuid": uuid,
        "unit_cost_cents": 125,
        "quantity": 50,
        "quantity_unit": "kg",
        "currency": "USD"
    })
}

#[tokio::test]
async fn inventory_client_forwards_token_and_decodes_lots() {
    let server = MockServer::start().await;
    let batch_uuid = Uuid::new_v4();
    let lot_uuid = Uuid::new_v4();
    let po_line = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/ingredient-lots"))
        .and(query_param("batch_uuid", batch_uuid.to_string()))
        .and(header("authorization", "Bearer caller-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "uuid": lot_uuid,
                "ingredient_uuid": Uuid::new_v4(),
                "ingredient_name": "Maris Otter",
                "ingredient_category": "malt",
                "brewery_lot_code": "MO-17",
                "purchase_order_line_uuid": po_line,
                "received_unit": "kg"
            },
            {
                "uuid": Uuid::new_v4(),
                "ingredient_uuid": Uuid::new_v4(),
                "ingredient_name": "Irish Moss",
                "ingredient_category": "finings",
                "received_unit": "g"
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = InventoryClient::new(server.uri(), TIMEOUT).unwrap();
    let lots = client
        .batch_ingredient_lots("caller-token", batch_uuid)
        .await
        .unwrap();

    assert_eq!(lots.len(), 2);
    assert_eq!(lots[0].uuid, lot_uuid);
    assert_eq!(lots[0].purchase_order_line_uuid, Some(po_line));
    assert_eq!(lots[1].brewery_lot_code, None);
    assert_eq!(lots[1].purchase_order_line_uuid, None);
}

#[tokio::test]
async fn inventory_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ingredient-lots"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = InventoryClient::new(server.uri(), TIMEOUT).unwrap();
    let err = client
        .batch_ingredient_lots("t", Uuid::new_v4())
        .await
        .unwrap_err();

    assert_matches!(err, RemoteError::Status { service: "inventory", status } if status.as_u16() == 503);
}

#[tokio::test]
async fn inventory_undecodable_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ingredient-lots"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = InventoryClient::new(server.uri(), TIMEOUT).unwrap();
    let err = client
        .batch_ingredient_lots("t", Uuid::new_v4())
        .await
        .unwrap_err();

    assert_matches!(err, RemoteError::Parse { .. });
}

#[tokio::test]
async fn slow_inventory_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ingredient-lots"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = InventoryClient::new(server.uri(), Duration::from_millis(200)).unwrap();
    let err = client
        .batch_ingredient_lots("t", Uuid::new_v4())
        .await
        .unwrap_err();

    assert_matches!(err, RemoteError::Timeout { service: "inventory" });
}

#[tokio::test]
async fn procurement_posts_uuid_set_with_token() {
    let server = MockServer::start().await;
    let ids = vec![Uuid::new_v4(), Uuid::new_v4()];

    Mock::given(method("POST"))
        .and(path("/purchase-order-lines/batch-lookup"))
        .and(header("authorization", "Bearer caller-token"))
        .and(body_json(json!({ "uuids": ids })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([po_line_json(ids[0]), po_line_json(ids[1])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ProcurementClient::new(server.uri(), TIMEOUT, 100).unwrap();
    let lines = client
        .lookup_purchase_order_lines("caller-token", &ids)
        .await
        .unwrap();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].unit_cost_cents, 125);
    assert_eq!(lines[1].currency, "USD");
}

#[tokio::test]
async fn procurement_chunks_large_id_sets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/purchase-order-lines/batch-lookup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(3)
        .mount(&server)
        .await;

    let ids: Vec<Uuid> = (0..250).map(|_| Uuid::new_v4()).collect();
    let client = ProcurementClient::new(server.uri(), TIMEOUT, 100).unwrap();
    client.lookup_purchase_order_lines("t", &ids).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let sizes: Vec<usize> = requests
        .iter()
        .map(|r| {
            let body: serde_json::Value = serde_json::from_slice(&r.body).unwrap();
            body["uuids"].as_array().unwrap().len()
        })
        .collect();
    assert_eq!(sizes, [100, 100, 50]);
}

#[tokio::test]
async fn procurement_skips_call_for_empty_id_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = ProcurementClient::new(server.uri(), TIMEOUT, 100).unwrap();
    let lines = client.lookup_purchase_order_lines("t", &[]).await.unwrap();

    assert!(lines.is_empty());
}

#[tokio::test]
async fn procurement_failure_stops_the_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/purchase-order-lines/batch-lookup"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let ids: Vec<Uuid> = (0..150).map(|_| Uuid::new_v4()).collect();
    let client = ProcurementClient::new(server.uri(), TIMEOUT, 100).unwrap();
    let err = client
        .lookup_purchase_order_lines("t", &ids)
        .await
        .unwrap_err();

    assert_eq!(err.service(), "procurement");
}
