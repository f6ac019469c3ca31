//! Fixed seed content for a freshly started store.
//!
//! # Invariants
//! - Seed ids are the fixed strings `"1"`, `"2"`, ... in declaration order.
//! - Contacts and subscribers have no seed content.

use crate::model::client::Client;
use crate::model::id::EntityId;
use crate::model::project::Project;

const SEED_PROJECTS: &[(&str, &str, &str, &str)] = &[
    (
        "1",
        "Skyline Tower",
        "A modern 50-story residential complex in the heart of the city, featuring sustainable architecture and luxury amenities.",
        "/images/project1.jpg",
    ),
    (
        "2",
        "Eco Office Park",
        "State-of-the-art office spaces designed for the future of work, incorporating green spaces and energy-efficient systems.",
        "/images/project2.jpg",
    ),
    (
        "3",
        "Urban Innovation Hub",
        "A collaborative workspace and research center bringing together tech startups and established enterprises.",
        "/images/project3.jpg",
    ),
];

const SEED_CLIENTS: &[(&str, &str, &str, &str, &str)] = &[
    (
        "1",
        "Sarah Johnson",
        "CEO, TechFlow",
        "The team delivered beyond our expectations. Their attention to detail and commitment to quality is unmatched.",
        "/images/client1.jpg",
    ),
    (
        "2",
        "Michael Chen",
        "Director, GreenBuild",
        "Professional, timely, and innovative. They transformed our vision into a reality that stands out in the market.",
        "/images/client2.jpg",
    ),
];

/// Projects present before any mutation.
pub fn seed_projects() -> Vec<Project> {
    SEED_PROJECTS
        .iter()
        .map(|(id, name, description, image_url)| Project {
            id: EntityId::new(*id),
            name: (*name).to_string(),
            description: (*description).to_string(),
            image_url: (*image_url).to_string(),
        })
        .collect()
}

/// Client testimonials present before any mutation.
pub fn seed_clients() -> Vec<Client> {
    SEED_CLIENTS
        .iter()
        .map(|(id, name, designation, description, image_url)| Client {
            id: EntityId::new(*id),
            name: (*name).to_string(),
            description: (*description).to_string(),
            designation: (*designation).to_string(),
            image_url: (*image_url).to_string(),
        })
        .collect()
}
