use projectflip_core::{ContactSubmission, EntityId, EntityStore, Project, StoreState};

#[test]
fn project_serializes_with_camel_case_fields() {
    let store = EntityStore::new();
    let json = serde_json::to_value(&store.projects()[0]).unwrap();

    assert_eq!(json["id"], "1");
    assert_eq!(json["name"], "Skyline Tower");
    assert_eq!(json["imageUrl"], "/images/project1.jpg");
    assert!(json.get("image_url").is_none());

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, store.projects()[0]);
}

#[test]
fn contact_submission_uses_ui_field_names() {
    let contact = ContactSubmission {
        id: EntityId::new("k3j9x0a1b"),
        full_name: "Ada".to_string(),
        email: "ada@x.com".to_string(),
        mobile: "555".to_string(),
        city: "NYC".to_string(),
        submitted_at: 1_700_000_000_000,
    };

    let json = serde_json::to_value(&contact).unwrap();
    assert_eq!(json["id"], "k3j9x0a1b");
    assert_eq!(json["fullName"], "Ada");
    assert_eq!(json["submittedAt"], 1_700_000_000_000_i64);
}

#[test]
fn store_state_exposes_all_four_collections() {
    let json = serde_json::to_value(StoreState::seeded()).unwrap();

    assert_eq!(json["projects"].as_array().unwrap().len(), 3);
    assert_eq!(json["clients"].as_array().unwrap().len(), 2);
    assert_eq!(json["contacts"].as_array().unwrap().len(), 0);
    assert_eq!(json["subscribers"].as_array().unwrap().len(), 0);
    assert_eq!(json["clients"][0]["designation"], "CEO, TechFlow");
    assert_eq!(json["retiredIds"]["projects"].as_array().unwrap().len(), 0);
}

#[test]
fn store_state_without_retired_ids_still_parses() {
    let json = serde_json::json!({
        "projects": [],
        "clients": [],
        "contacts": [],
        "subscribers": [],
    });

    let state: StoreState = serde_json::from_value(json).unwrap();
    assert!(state.retired_ids.is_empty());
}
