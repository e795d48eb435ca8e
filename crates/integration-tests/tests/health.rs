mod harness;

use axum::http::StatusCode;
use harness::config::{ConfigBuilder, client};
use harness::mock_upstream::{MockReply, MockUpstream};

#[tokio::test]
async fn connection_test_succeeds() {
    let mock = MockUpstream::start().await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url())
        .with_default_model("deepseek-reasoner")
        .build();

    assert!(client(&config).test_connection().await);

    let request = mock.last_request();
    assert_eq!(request["model"], "deepseek-reasoner");
    assert_eq!(request["max_tokens"], 10);
    assert_eq!(request["stream"], false);
}

#[tokio::test]
async fn connection_test_reports_rejection_as_false() {
    let mock = MockUpstream::start_failing(1, StatusCode::UNAUTHORIZED).await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    assert!(!client(&config).test_connection().await);
}

#[tokio::test]
async fn connection_test_reports_empty_answer_as_false() {
    let mock = MockUpstream::start_with(MockReply::NoChoices).await.unwrap();
    let config = ConfigBuilder::new(&mock.base_url()).build();

    assert!(!client(&config).test_connection().await);
}

#[tokio::test]
async fn connection_test_reports_unreachable_as_false() {
    let mock = MockUpstream::start().await.unwrap();
    let base_url = mock.base_url();
    drop(mock);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    let config = ConfigBuilder::new(&base_url).build();

    assert!(!client(&config).test_connection().await);
}
