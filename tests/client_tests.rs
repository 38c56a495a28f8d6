use std::sync::Arc;
use std::time::Duration;

use mobilestore::clients::{CatalogApi, ClientError, HttpCatalogClient};
use mobilestore::config::Config;
use mobilestore::controller::{Event, FormField, SearchController};
use mobilestore::models::NewListing;

async fn spawn_server() -> String {
    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();

    let state = mobilestore::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = mobilestore::api::router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn client(base_url: &str) -> HttpCatalogClient {
    HttpCatalogClient::new(base_url, Duration::from_secs(5)).unwrap()
}

fn phone(brand: &str, model: &str) -> NewListing {
    NewListing {
        brand: Some(brand.to_string()),
        model: Some(model.to_string()),
        ..NewListing::default()
    }
}

#[tokio::test]
async fn test_client_round_trips_through_server() {
    let base_url = spawn_server().await;
    let client = client(&base_url);

    let created = client.insert(phone("Apple", "iPhone 15")).await.unwrap();
    client.insert(phone("Google", "Pixel 8")).await.unwrap();

    let all = client.list().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0], created);

    let found = client.search("pixel").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].label(), "Google Pixel 8");

    let found = client.search("a&b").await.unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn test_client_reports_unreachable_server() {
    let base_url = spawn_server().await;
    let client = client(&format!("{base_url}/nowhere"));

    assert!(matches!(
        client.list().await,
        Err(ClientError::StorageUnavailable(_))
    ));
}

#[tokio::test]
async fn test_browse_session_against_server() {
    let base_url = spawn_server().await;
    let seed = client(&base_url);
    seed.insert(phone("Apple", "iPhone 15")).await.unwrap();
    seed.insert(phone("Samsung", "Galaxy S24")).await.unwrap();

    let mut controller = SearchController::new(Arc::new(client(&base_url)));
    controller.dispatch(Event::Mount);
    controller.settle().await;
    assert_eq!(controller.state().results().len(), 2);

    controller.dispatch(Event::InputFocused);
    controller.dispatch(Event::Keystroke("iphone".to_string()));
    controller.settle().await;
    assert!(controller.state().suggestions_visible());
    assert_eq!(controller.state().suggestions()[0].label(), "Apple iPhone 15");

    let pick = controller.state().suggestions()[0].clone();
    controller.dispatch(Event::SuggestionClick(pick));
    assert_eq!(controller.state().query(), "Apple iPhone 15");
    assert_eq!(controller.state().results().len(), 1);
    assert!(!controller.state().suggestions_visible());

    controller.dispatch(Event::FormFieldChanged(FormField::Brand, "Nothing".to_string()));
    controller.dispatch(Event::FormFieldChanged(FormField::Model, "Phone 2".to_string()));
    controller.dispatch(Event::FormFieldChanged(FormField::Storage, "256".to_string()));
    controller.dispatch(Event::FormSubmit);
    controller.settle().await;
    assert!(controller.state().form().is_empty());

    controller.dispatch(Event::ClearSearch);
    controller.settle().await;
    assert_eq!(controller.state().query(), "");
    assert_eq!(seed.list().await.unwrap().len(), 3);
    assert_eq!(controller.state().results().len(), 3);
}
