// Integration tests for the Webcal API
// Run with: cargo test -p webcal-control-plane --test integration_test -- --ignored --test-threads=1
// Requires: server running on localhost:5000 (e.g. DEV_MODE=true cargo run)

use serde_json::{json, Value};
use webcal_core::Event;

const API_BASE_URL: &str = "http://localhost:5000";

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_full_event_workflow() {
    let client = reqwest::Client::new();

    println!("Testing full event workflow...");

    // Step 1: Create an event
    println!("\nStep 1: Creating event...");
    let create_response = client
        .post(format!("{}/event", API_BASE_URL))
        .form(&[("date", "2031-07-14"), ("event", "Integration launch")])
        .send()
        .await
        .expect("Failed to create event");

    assert_eq!(
        create_response.status(),
        200,
        "Expected 200 OK, got {}",
        create_response.status()
    );

    let created: Value = create_response
        .json()
        .await
        .expect("Failed to parse create response");
    assert_eq!(created["message"], "The event has been added!");
    assert_eq!(created["event"], "Integration launch");
    assert_eq!(created["date"], "2031-07-14");

    // Step 2: Find it in the range listing
    println!("\nStep 2: Listing events on its date...");
    let list_response = client
        .get(format!("{}/event", API_BASE_URL))
        .query(&[("start_time", "2031-07-14"), ("end_time", "2031-07-14")])
        .send()
        .await
        .expect("Failed to list events");

    assert_eq!(list_response.status(), 200);

    let events: Vec<Event> = list_response.json().await.expect("Failed to parse events");
    let event = events
        .into_iter()
        .find(|e| e.event == "Integration launch")
        .expect("Created event missing from range listing");
    println!("Found event: {}", event.id);

    // Step 3: Fetch by id
    println!("\nStep 3: Getting event...");
    let get_response = client
        .get(format!("{}/event/{}", API_BASE_URL, event.id))
        .send()
        .await
        .expect("Failed to get event");

    assert_eq!(get_response.status(), 200);
    let fetched: Event = get_response.json().await.expect("Failed to parse event");
    assert_eq!(fetched, event);

    // Step 4: Delete, then delete again
    println!("\nStep 4: Deleting event...");
    let delete_response = client
        .delete(format!("{}/event/{}", API_BASE_URL, event.id))
        .send()
        .await
        .expect("Failed to delete event");

    assert_eq!(delete_response.status(), 200);
    let body: Value = delete_response.json().await.expect("Failed to parse");
    assert_eq!(body, json!({"message": "The event has been deleted!"}));

    let second_delete = client
        .delete(format!("{}/event/{}", API_BASE_URL, event.id))
        .send()
        .await
        .expect("Failed to delete event");

    assert_eq!(second_delete.status(), 404);
    let body: Value = second_delete.json().await.expect("Failed to parse");
    assert_eq!(body, json!({"message": "The event doesn't exist!"}));

    println!("\nEvent workflow completed");
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_create_rejects_bad_input() {
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/event", API_BASE_URL))
        .json(&json!({"date": "14/07/2031", "event": ""}))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);

    let body: Value = response.json().await.expect("Failed to parse");
    assert!(body["message"]["date"].is_string());
    assert_eq!(body["message"]["event"], "The event name is required!");
}

#[tokio::test]
#[ignore = "requires a running server"]
async fn test_health_check() {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", API_BASE_URL))
        .send()
        .await
        .expect("Failed to check health");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse");
    assert_eq!(body["status"], "ok");
}
