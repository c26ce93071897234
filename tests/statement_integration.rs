use std::sync::Arc;

use rust_decimal::Decimal;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coinsph_api_client::auth::StaticCredentials;
use coinsph_api_client::error::CoinsError;
use coinsph_api_client::rest::{CoinsRestClient, StatementRequest};
use coinsph_api_client::statement::{FilterSpec, StatementValue, TransactionField};

const STATEMENT: &str = "Balance Statement for January 2023\r\n\
('deposit','tx1','2023-01-01T08:00:00',100.0,100.0,None,None,'PHP',0,None,'ord1',None,None,None,None,None,None,None,None,None,'done',None)\r\n\
('transfer','tx2','2023-01-05T09:30:00',-25.25,74.75,'gcash','09170000000','PHP',0.5,'tr-9',None,None,None,'ext-2',None,None,'rent',None,None,None,'done',0)\r\n\
('deposit','tx3','2023-01-09T10:00:00',10,84.75,None,None,'PHP',0,None,'ord3',None,None,None,None,None,None,None,None,None,'pending',None)\r\n";

fn build_client(server: &MockServer) -> CoinsRestClient {
    CoinsRestClient::builder()
        .base_url(server.uri())
        .credentials(Arc::new(StaticCredentials::new("test_token")))
        .build()
}

#[tokio::test]
async fn test_get_transactions_and_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/balance-statements/"))
        .and(query_param("month", "1"))
        .and(query_param("year", "2023"))
        .and(query_param("currency", "PBTC"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/plain")
                .set_body_string(STATEMENT),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let statement = client
        .get_transactions(&StatementRequest::new(1, 2023))
        .await
        .unwrap();
    assert_eq!(statement.header(), Some("Balance Statement for January 2023"));

    let all = statement.collect_records(None).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].amount(), Some(Decimal::new(-2525, 2)));
    assert_eq!(all[1].get(TransactionField::Message), &StatementValue::from("rent"));
    assert_eq!(all[1].get(TransactionField::OrderFee), &StatementValue::from(0i64));

    let deposits = FilterSpec::new().with("entry_type", "deposit");
    let ids: Vec<_> = statement
        .records(Some(&deposits))
        .map(|r| r.unwrap().transaction_id().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["tx1", "tx3"]);

    // Numeric filters compare by value.
    let hundred = FilterSpec::new().with("amount", 100i64);
    assert_eq!(statement.records(Some(&hundred)).count(), 1);
}

#[tokio::test]
async fn test_get_transactions_without_currency() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/balance-statements/"))
        .and(query_param_is_missing("currency"))
        .respond_with(ResponseTemplate::new(200).set_body_string("header\r\n"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let statement = client
        .get_transactions(&StatementRequest::new(12, 2022).all_currencies())
        .await
        .unwrap();
    assert_eq!(statement.records(None).count(), 0);
}

#[tokio::test]
async fn test_get_transactions_rejects_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/balance-statements/"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get_transactions(&StatementRequest::new(1, 2023))
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_malformed_statement_line_surfaces() {
    let server = MockServer::start().await;
    let body = format!("{STATEMENT}('deposit','short')\r\n");

    Mock::given(method("GET"))
        .and(path("/balance-statements/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let statement = client
        .get_transactions(&StatementRequest::new(1, 2023))
        .await
        .unwrap();

    match statement.collect_records(None).unwrap_err() {
        CoinsError::MalformedRecord {
            line_number,
            raw_line,
            ..
        } => {
            assert_eq!(line_number, 4);
            assert_eq!(raw_line, "('deposit','short')");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
