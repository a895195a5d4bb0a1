//! Every client action against a canned transport: right page, right
//! action name, representative reply parsed.

use crate::canned::CannedTransport;
use opthouse_client::errors::ClientError;
use opthouse_client::optionshouse::{OptionsHouseClient, OptionsHouseConfig};
use opthouse_client::{Page, PositionType, Side, TimeInForce};
use opthouse_core::{fixed, Fixed};

const TOKEN: &str = "tok-42";
const ACCOUNT: &str = "1001";

fn config() -> OptionsHouseConfig {
    OptionsHouseConfig::default()
        .with_credentials("trader".to_string(), "secret".to_string())
        .with_timing(false)
}

fn session(reply: &str) -> OptionsHouseClient<CannedTransport> {
    let client = OptionsHouseClient::with_transport(config(), CannedTransport::new().with_reply(reply));
    client.set_auth_token(TOKEN);
    client
}

fn assert_sent(client: &OptionsHouseClient<CannedTransport>, page: Page, action: &str) -> serde_json::Value {
    let sent = client.transport().last_sent().expect("a request was sent");
    assert_eq!(sent.page, page);
    assert_eq!(sent.action(), action);
    sent.data().clone()
}

#[monoio::test]
async fn test_login_and_logout() {
    let transport = CannedTransport::new()
        .with_reply(r#"{"EZMessage":{"action":"auth.login","data":{"authToken":"tok-42","firstName":"Ann","lastName":"Lee","funded":"true","delayedQuotes":false}}}"#)
        .with_reply(r#"{"EZMessage":{"action":"auth.logout","data":{"authToken":""}}}"#);
    let client = OptionsHouseClient::with_transport(config(), transport);

    let login = client.login().await.unwrap();
    assert!(login.login_success());
    assert!(login.funded);
    assert_eq!(client.auth_token().as_deref(), Some(TOKEN));
    let data = assert_sent(&client, Page::M, "auth.login");
    assert_eq!(data["userName"], "trader");
    assert_eq!(data["password"], "secret");

    let logout = client.logout().await.unwrap();
    assert!(logout.logged_out(TOKEN));
    assert!(!client.is_logged_in());
    let data = assert_sent(&client, Page::M, "auth.logout");
    assert_eq!(data["authToken"], TOKEN);
}

#[monoio::test]
async fn test_rejected_login_keeps_no_token() {
    let client = OptionsHouseClient::with_transport(
        config(),
        CannedTransport::new().with_reply(r#"{"EZMessage":{"action":"auth.login","data":{"authToken":""}}}"#),
    );
    let reply = client.login().await.unwrap();
    assert!(!reply.login_success());
    assert!(!client.is_logged_in());
}

#[monoio::test]
async fn test_keep_alive() {
    let client = session(r#"{"EZMessage":{"action":"auth.keepAlive","data":{}}}"#);
    let reply = client.keep_alive(ACCOUNT).await.unwrap();
    assert_eq!(reply.status().action(), "auth.keepAlive");
    let data = assert_sent(&client, Page::M, "auth.keepAlive");
    assert_eq!(data["account"], ACCOUNT);
}

#[monoio::test]
async fn test_account_list() {
    let client = session(
        r#"{"EZMessage":{"action":"account.info","data":{"inactivityTimeout":"30","account":[
            {"accountId":"1001","accountName":"Main","isVirtual":false},
            {"accountId":"1002","accountName":"IRA","isVirtual":"true"}]}}}"#,
    );
    let reply = client.account_list().await.unwrap();
    assert_eq!(reply.account_ids(), vec!["1001", "1002"]);
    assert_eq!(reply.id_for_name("IRA"), Some("1002"));
    assert_eq!(reply.name_for_id("1001"), Some("Main"));
    assert_sent(&client, Page::M, "account.info");
}

#[monoio::test]
async fn test_account_details() {
    let client = session(
        r#"{"EZMessage":{"action":"account.cash","data":{"accountValue":"10500.25","cashBalance":500}}}"#,
    );
    let reply = client.account_details(ACCOUNT).await.unwrap();
    assert_eq!(reply.account_value(), fixed!(10500.25));
    assert_eq!(reply.cash_balance(), Fixed::from_i64(500));

    let data = assert_sent(&client, Page::M, "account.cash");
    assert_eq!(data["portfolio"], true);
    assert_eq!(data["historical"], true);
    assert_eq!(data["fastValues"], false);
}

#[monoio::test]
async fn test_account_activity() {
    let client = session(
        r#"{"EZMessage":{"action":"account.activity","data":{"total":"1","timeStamp":"1300000000000","activity":[
            {"symbol":"IBM","qty":"100","activityDateStr":"03/13/2011"}]}}}"#,
    );
    let reply = client.account_activity(ACCOUNT).await.unwrap();
    assert_eq!(reply.events.len(), 1);
    assert_eq!(reply.timestamp().as_millis(), 1_300_000_000_000);
    assert_sent(&client, Page::M, "account.activity");
}

#[monoio::test]
async fn test_account_positions_list() {
    let client = session(
        r#"{"EZMessage":{"action":"account.positions","data":{"unified":[
            {"securityKey":"IBM:::S","qty":100},{"securityKey":"MSFT:::S","qty":50}]}}}"#,
    );
    let positions = client.account_positions(ACCOUNT).await.unwrap();
    assert_eq!(positions.len(), 2);
    assert_eq!(positions.find("msft").map(|p| p.quantity), Some(50));
    assert_sent(&client, Page::M, "account.positions");
}

#[monoio::test]
async fn test_quotes() {
    let client = session(
        r#"{"EZMessage":{"action":"view.quote.list","data":{"quote":[{"key":"IBM:::S","last":"161.1"}]}}}"#,
    );
    let reply = client.quotes(["ibm", "ibm:20110716:1600000:c"]).await.unwrap();
    assert_eq!(reply.get("IBM").map(|q| q.last), Some(161.1));

    let data = assert_sent(&client, Page::J, "view.quote.list");
    assert_eq!(data["key"][0], "IBM:::S");
    assert_eq!(data["addGreeks"][0], "IBM:20110716:1600000:C");
}

#[monoio::test]
async fn test_view_series() {
    let client = session(
        r#"{"EZMessage":{"action":"view.series","data":{"q":"IBM","s":[{"e":"20110716","k":["IBM:20110716:1600000:C"]}]}}}"#,
    );
    let reply = client.view_series("ibm:20110716:1600000:c").await.unwrap();
    assert_eq!(reply.expiration_dates(), vec!["20110716"]);
    let data = assert_sent(&client, Page::M, "view.series");
    assert_eq!(data["symbol"], "IBM");
}

#[monoio::test]
async fn test_place_and_cancel_order() {
    let client = session(r#"{"EZMessage":{"action":"order.create.json","data":{"created":true,"id":"555"}}}"#);
    client.transport().push_reply(r#"{"EZMessage":{"action":"order.cancel.json","data":{"canceled":true,"id":"555"}}}"#);

    let created = client
        .place_simple_order(
            ACCOUNT,
            "IBM:20110716:1600000:C",
            Side::Sell,
            PositionType::Close,
            3,
            fixed!(2.45),
            TimeInForce::Ext,
        )
        .await
        .unwrap();
    assert!(created.created);

    let data = assert_sent(&client, Page::J, "order.create.json");
    assert_eq!(data["account"], ACCOUNT);
    assert_eq!(data["order"]["price"], "2.45");
    assert_eq!(data["order"]["time_in_force"], "ext_trading");
    assert_eq!(data["order"]["legs"][0]["side"], "sell");
    assert_eq!(data["order"]["legs"][0]["position_type"], "closing");
    assert_eq!(data["order"]["legs"][0]["security_type"], "option");

    let canceled = client.cancel_order(ACCOUNT, &created.id).await.unwrap();
    assert!(canceled.canceled);
    let data = assert_sent(&client, Page::J, "order.cancel.json");
    assert_eq!(data["order_id"], "555");
}

#[monoio::test]
async fn test_order_details_and_history() {
    let client = session(
        r#"{"EZMessage":{"action":"order.details","data":{"order_details":{"status":"Working","legs":[
            {"key":"IBM:::S","quantity":100,"quantity_filled":40}]}}}}"#,
    );
    client.transport().push_reply(
        r#"{"EZMessage":{"action":"order.history","data":{"order_history":[
            {"quantity":"40","price":"160.00"},{"quantity":"10","price":"161.00"}]}}}"#,
    );

    let details = client.order_details(ACCOUNT, "555").await.unwrap();
    assert!(!details.order_details.is_fully_filled());
    assert_eq!(details.order_details.total_fill_quantity(), 40);
    let data = assert_sent(&client, Page::J, "order.details");
    assert_eq!(data["account_id"], ACCOUNT);
    assert_eq!(data["order_details"]["master_order_id"], "555");

    let history = client.order_history(ACCOUNT, "555").await.unwrap();
    assert_eq!(history.total_quantity(), 50);
    assert_eq!(history.average_price(), fixed!(160.2));
    assert_sent(&client, Page::J, "order.history");
}

#[monoio::test]
async fn test_all_order_status() {
    let client = session(
        r#"{"EZMessage":{"action":"master.account.orders","data":{"master_account_orders":{"total_records":1,
            "records":[{"order_id":555,"status":"Open"}]}}}}"#,
    );
    let reply = client.all_order_status(ACCOUNT).await.unwrap();
    assert_eq!(reply.records()[0].status, "Open");
    let data = assert_sent(&client, Page::J, "master.account.orders");
    assert_eq!(data["master_order"]["page_size"], 50);
}

#[monoio::test]
async fn test_server_errors_surface() {
    let client = session(r#"{"EZMessage":{"action":"account.cash","errors":{"access":"Invalid account"}}}"#);
    let err = client.account_details("9999").await.unwrap_err();
    assert_eq!(err.to_string(), "account.cash rejected: access: Invalid account");
}

#[monoio::test]
async fn test_transport_failure_surfaces() {
    let client = OptionsHouseClient::with_transport(config(), CannedTransport::new());
    client.set_auth_token(TOKEN);
    assert!(matches!(
        client.account_list().await,
        Err(ClientError::NetworkError(_))
    ));
}

#[monoio::test]
async fn test_garbage_reply() {
    let client = session("<html>maintenance</html>");
    assert!(matches!(
        client.account_list().await,
        Err(ClientError::SerializationError(_))
    ));
}
