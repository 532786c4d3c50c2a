use crate::modules::resources::adapters::inbound::client::GetOpts;
use crate::modules::resources::core::list::ListOpts;
use crate::modules::resources::core::test_type::{TestType, TestTypeRequest};
use crate::tests::fixtures::client::{TestClient, test_client};
use crate::tests::fixtures::test_type::TestTypeBuilder;
use rstest::rstest;
use std::time::Duration;
use tokio::time::timeout;

fn texts(documents: &[crate::modules::resources::core::resource::Document<TestType>]) -> Vec<&str> {
    documents.iter().map(|d| d.text.as_str()).collect()
}

#[rstest]
#[tokio::test]
async fn it_should_stream_a_document_until_it_is_deleted(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().text("foo").build())
        .await
        .unwrap();
    let mut stream = test_client
        .stream_get::<TestType>(created.id(), None)
        .await
        .unwrap();

    assert_eq!(stream.next().await.unwrap().text, "foo");

    test_client
        .update::<TestType, _>(
            created.id(),
            &TestTypeRequest {
                text: Some("bar".into()),
                num: None,
            },
            None,
        )
        .await
        .unwrap();
    let bar = stream.next().await.unwrap();
    assert_eq!(bar.text, "bar");
    assert_eq!(bar.metadata.generation, 2);

    test_client
        .delete::<TestType>(created.id(), None)
        .await
        .unwrap();
    assert!(stream.next().await.unwrap_err().is_not_found());
}

#[rstest]
#[tokio::test]
async fn it_should_start_a_document_stream_from_a_current_prev(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().text("foo").num(5).build())
        .await
        .unwrap();
    let mut stream = test_client
        .stream_get(created.id(), Some(GetOpts::prev(&created)))
        .await
        .unwrap();

    assert_eq!(stream.next().await.unwrap(), created);
}

#[rstest]
#[tokio::test]
async fn it_should_fail_to_stream_an_unknown_id(test_client: TestClient) {
    let result = test_client
        .stream_get::<TestType>("doesnotexist", None)
        .await;
    assert!(result.err().unwrap().is_not_found());
}

#[rstest]
#[tokio::test]
async fn it_should_stream_the_initial_list(test_client: TestClient) {
    for text in ["foo", "bar"] {
        test_client
            .create(&TestTypeBuilder::new().text(text).build())
            .await
            .unwrap();
    }
    let mut stream = test_client
        .stream_list::<TestType>(
            ListOpts {
                sorts: vec!["+text".parse().unwrap()],
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    assert_eq!(texts(&stream.next().await.unwrap()), vec!["bar", "foo"]);
}

#[rstest]
#[tokio::test]
async fn it_should_resend_the_list_on_create_replace_and_delete(test_client: TestClient) {
    let mut stream = test_client
        .stream_list::<TestType>(ListOpts::default(), None)
        .await
        .unwrap();
    assert!(stream.next().await.unwrap().is_empty());

    let created = test_client
        .create(&TestTypeBuilder::new().text("foo").build())
        .await
        .unwrap();
    assert_eq!(texts(&stream.next().await.unwrap()), vec!["foo"]);

    test_client
        .replace(created.id(), &TestTypeBuilder::new().text("bar").build(), None)
        .await
        .unwrap();
    assert_eq!(texts(&stream.next().await.unwrap()), vec!["bar"]);

    test_client
        .delete::<TestType>(created.id(), None)
        .await
        .unwrap();
    assert!(stream.next().await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn it_should_not_resend_the_list_for_irrelevant_writes(test_client: TestClient) {
    let foo = test_client
        .create(&TestTypeBuilder::new().text("foo").build())
        .await
        .unwrap();
    test_client
        .create(&TestTypeBuilder::new().text("bar").build())
        .await
        .unwrap();

    let mut stream = test_client
        .stream_list::<TestType>(
            ListOpts {
                sorts: vec!["+text".parse().unwrap()],
                limit: Some(1),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(texts(&stream.next().await.unwrap()), vec!["bar"]);

    test_client
        .replace(foo.id(), &TestTypeBuilder::new().text("zig").build(), None)
        .await
        .unwrap();
    assert!(
        timeout(Duration::from_millis(50), stream.next())
            .await
            .is_err()
    );

    test_client
        .replace(foo.id(), &TestTypeBuilder::new().text("aaa").build(), None)
        .await
        .unwrap();
    assert_eq!(texts(&stream.next().await.unwrap()), vec!["aaa"]);
}

#[rstest]
#[tokio::test]
async fn it_should_start_a_list_stream_from_a_current_prev(test_client: TestClient) {
    test_client
        .create(&TestTypeBuilder::new().text("foo").num(5).build())
        .await
        .unwrap();
    let mut first = test_client
        .stream_list::<TestType>(ListOpts::default(), None)
        .await
        .unwrap();
    let s1 = first.next().await.unwrap();

    let mut second = test_client
        .stream_list(ListOpts::default(), Some(s1.as_slice()))
        .await
        .unwrap();
    let s2 = second.next().await.unwrap();

    assert_eq!(s2, s1);
    assert_eq!(s2[0].num, 5);
}
