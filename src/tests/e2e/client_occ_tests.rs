use crate::modules::resources::adapters::inbound::client::{
    Client, ClientError, GetOpts, UpdateOpts,
};
use crate::modules::resources::application::handlers::ResourceHandlers;
use crate::modules::resources::core::list::ListOpts;
use crate::modules::resources::core::test_type::{TestType, TestTypeRequest};
use crate::shared::infrastructure::object_store::in_memory::InMemoryObjectStore;
use crate::tests::fixtures::client::{TestClient, test_client};
use crate::tests::fixtures::registry::test_registry;
use crate::tests::fixtures::test_type::TestTypeBuilder;
use rstest::{fixture, rstest};
use std::sync::Arc;
use tokio::join;

#[fixture]
fn slow_store_client() -> (Arc<InMemoryObjectStore>, TestClient) {
    let store = Arc::new(InMemoryObjectStore::new());
    store.set_delay_save_ms(10);
    let handlers = ResourceHandlers::new(test_registry(), store.clone(), 3);
    (store, Client::new(Arc::new(handlers)))
}

#[rstest]
#[tokio::test]
async fn it_should_reject_a_replace_based_on_a_stale_read(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().text("foo").num(5).build())
        .await
        .unwrap();

    let get1 = test_client
        .get::<TestType>(created.id(), None)
        .await
        .unwrap();

    test_client
        .replace(created.id(), &TestTypeBuilder::new().text("bar").build(), None)
        .await
        .unwrap();

    let result = test_client
        .replace(
            created.id(),
            &TestTypeBuilder::new().text("zig").build(),
            Some(UpdateOpts::prev(&get1)),
        )
        .await;
    assert!(result.unwrap_err().is_precondition_failed());

    let get2 = test_client
        .get::<TestType>(created.id(), None)
        .await
        .unwrap();
    assert_eq!(get2.text, "bar");
}

#[rstest]
#[tokio::test]
async fn it_should_accept_a_replace_based_on_the_latest_read(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().build())
        .await
        .unwrap();
    let bar = test_client
        .replace(created.id(), &TestTypeBuilder::new().text("bar").build(), None)
        .await
        .unwrap();

    let zig = test_client
        .replace(
            created.id(),
            &TestTypeBuilder::new().text("zig").build(),
            Some(UpdateOpts::prev(&bar)),
        )
        .await
        .unwrap();

    assert_eq!(zig.text, "zig");
    assert_eq!(zig.metadata.generation, 3);
}

#[rstest]
#[tokio::test]
async fn it_should_reject_a_stale_read_even_when_the_content_came_back(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().text("foo").num(5).build())
        .await
        .unwrap();
    test_client
        .replace(created.id(), &TestTypeBuilder::new().text("bar").build(), None)
        .await
        .unwrap();
    let restored = test_client
        .replace(
            created.id(),
            &TestTypeBuilder::new().text("foo").num(5).build(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(restored.metadata.etag, created.metadata.etag);

    let result = test_client
        .replace(
            created.id(),
            &TestTypeBuilder::new().text("zig").build(),
            Some(UpdateOpts::prev(&created)),
        )
        .await;

    assert!(result.unwrap_err().is_precondition_failed());
}

#[rstest]
#[tokio::test]
async fn it_should_refresh_a_stale_get(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().build())
        .await
        .unwrap();
    test_client
        .update::<TestType, _>(
            created.id(),
            &TestTypeRequest {
                num: Some(9),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();

    let fresh = test_client
        .get(created.id(), Some(GetOpts::prev(&created)))
        .await
        .unwrap();

    assert_eq!(fresh.num, 9);
    assert_eq!(fresh.metadata.generation, 2);
}

#[rstest]
#[tokio::test]
async fn it_should_keep_the_object_when_a_delete_is_stale(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().build())
        .await
        .unwrap();
    test_client
        .replace(created.id(), &TestTypeBuilder::new().text("bar").build(), None)
        .await
        .unwrap();

    let result = test_client
        .delete(created.id(), Some(UpdateOpts::prev(&created)))
        .await;
    assert!(result.unwrap_err().is_precondition_failed());

    let still_there = test_client
        .get::<TestType>(created.id(), None)
        .await
        .unwrap();
    assert_eq!(still_there.text, "bar");
}

#[rstest]
#[tokio::test]
async fn it_should_delete_once(test_client: TestClient) {
    let created = test_client
        .create(&TestTypeBuilder::new().build())
        .await
        .unwrap();

    test_client
        .delete(created.id(), Some(UpdateOpts::prev(&created)))
        .await
        .unwrap();
    let again = test_client.delete::<TestType>(created.id(), None).await;

    assert!(again.unwrap_err().is_not_found());
    assert!(
        test_client
            .get::<TestType>(created.id(), None)
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        test_client
            .list::<TestType>(&ListOpts::default())
            .await
            .unwrap()
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn it_should_let_exactly_one_of_two_racing_writes_win(
    slow_store_client: (Arc<InMemoryObjectStore>, TestClient),
) {
    let (_store, client) = slow_store_client;
    let created = client.create(&TestTypeBuilder::new().build()).await.unwrap();
    let bar = TestTypeBuilder::new().text("bar").build();
    let zig = TestTypeBuilder::new().text("zig").build();

    let (first, second) = join!(
        client.replace(created.id(), &bar, Some(UpdateOpts::prev(&created))),
        client.replace(created.id(), &zig, Some(UpdateOpts::prev(&created))),
    );

    let outcomes = [first, second];
    let winners: Vec<_> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1);
    assert!(
        outcomes
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(ClientError::is_precondition_failed)
    );

    let current = client
        .get::<TestType>(created.id(), None)
        .await
        .unwrap();
    assert_eq!(current.text, winners[0].text);
    assert_eq!(current.metadata.generation, 2);
}

#[rstest]
#[tokio::test]
async fn it_should_apply_both_racing_unconditional_updates(
    slow_store_client: (Arc<InMemoryObjectStore>, TestClient),
) {
    let (_store, client) = slow_store_client;
    let created = client
        .create(&TestTypeBuilder::new().text("foo").num(1).build())
        .await
        .unwrap();

    let text_patch = TestTypeRequest {
        text: Some("bar".into()),
        num: None,
    };
    let num_patch = TestTypeRequest {
        text: None,
        num: Some(7),
    };

    let (text, num) = join!(
        client.update::<TestType, _>(created.id(), &text_patch, None),
        client.update::<TestType, _>(created.id(), &num_patch, None),
    );
    text.unwrap();
    num.unwrap();

    let current = client
        .get::<TestType>(created.id(), None)
        .await
        .unwrap();
    assert_eq!(current.text, "bar");
    assert_eq!(current.num, 7);
    assert_eq!(current.metadata.generation, 3);
}
