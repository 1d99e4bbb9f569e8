//! Seed clients, products and deals.
//!
//! Backs the in-memory deals service (demo mode) and the test suites. One deal
//! per stage, newest first.

use crate::models::{Client, Deal, DealStage, Product};

fn client(id: &str, name: &str, email: &str, company: &str, phone: &str) -> Client {
    Client {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        company: Some(company.to_string()),
        phone: Some(phone.to_string()),
    }
}

fn product(id: &str, name: &str, description: &str, price: f64, category: &str) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: Some(description.to_string()),
        price: Some(price),
        category: Some(category.to_string()),
    }
}

fn deal(
    id: &str,
    client_id: &str,
    product_id: &str,
    stage: DealStage,
    created: &str,
    value: f64,
    notes: &str,
) -> Deal {
    Deal {
        id: id.to_string(),
        client_id: client_id.to_string(),
        product_id: product_id.to_string(),
        stage,
        created_date: created.to_string(),
        updated_date: Some(created.to_string()),
        value: Some(value),
        notes: Some(notes.to_string()),
    }
}

pub fn clients() -> Vec<Client> {
    vec![
        client("client-1", "Acme Corporation", "contact@acme.com", "Acme Corp", "+1 (555) 123-4567"),
        client("client-2", "TechStart Solutions", "hello@techstart.com", "TechStart Inc", "+1 (555) 234-5678"),
        client("client-3", "Global Enterprises", "info@global-ent.com", "Global Enterprises Ltd", "+1 (555) 345-6789"),
        client("client-4", "Innovation Labs", "contact@innovation.com", "Innovation Labs LLC", "+1 (555) 456-7890"),
        client("client-5", "Future Systems", "sales@future-sys.com", "Future Systems Corp", "+1 (555) 567-8901"),
    ]
}

pub fn products() -> Vec<Product> {
    vec![
        product("product-1", "Enterprise CRM Suite", "Comprehensive customer relationship management solution", 99999.0, "Software"),
        product("product-2", "Analytics Dashboard Pro", "Advanced business intelligence and analytics platform", 49999.0, "Analytics"),
        product("product-3", "Marketing Automation Hub", "Complete marketing automation and campaign management", 79999.0, "Marketing"),
        product("product-4", "Cloud Infrastructure Package", "Scalable cloud hosting and infrastructure services", 149999.0, "Infrastructure"),
        product("product-5", "Security & Compliance Suite", "Enterprise-grade security and compliance tools", 89999.0, "Security"),
    ]
}

pub fn deals() -> Vec<Deal> {
    vec![
        deal("deal-1", "client-1", "product-1", DealStage::LeadGenerated, "2024-03-13T10:00:00.000Z", 99999.0, "Initial contact made through website form"),
        deal("deal-2", "client-2", "product-2", DealStage::Contacted, "2024-03-10T10:00:00.000Z", 49999.0, "Follow-up call scheduled for next week"),
        deal("deal-3", "client-3", "product-3", DealStage::ApplicationSubmitted, "2024-03-05T10:00:00.000Z", 79999.0, "Application submitted with all required documentation"),
        deal("deal-4", "client-4", "product-4", DealStage::ApplicationUnderReview, "2024-02-29T10:00:00.000Z", 149999.0, "Technical review in progress, expecting feedback soon"),
        deal("deal-5", "client-5", "product-5", DealStage::DealFinalized, "2024-02-24T10:00:00.000Z", 89999.0, "Contract signed, awaiting payment processing"),
        deal("deal-6", "client-1", "product-2", DealStage::PaymentConfirmed, "2024-02-19T10:00:00.000Z", 49999.0, "Payment confirmed, implementation scheduled"),
        deal("deal-7", "client-2", "product-1", DealStage::Completed, "2024-02-14T10:00:00.000Z", 99999.0, "Successfully delivered and customer onboarded"),
        deal("deal-8", "client-3", "product-4", DealStage::Lost, "2024-02-09T10:00:00.000Z", 149999.0, "Customer chose competitor solution"),
    ]
}
