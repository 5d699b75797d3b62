//! A signup form validated field by field.
//!
//! Run with: `cargo run --example signup`

use serde_json::json;
use turnstile::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let chains = [
        body("username")
            .trim()
            .is_length(LengthRange::between(3, 20))
            .with_message("Username must be 3-20 characters")
            .custom(|value| async move {
                // Pretend this hits a uniqueness index.
                if value.render() == "admin" {
                    Err("That username is taken".into())
                } else {
                    Ok(())
                }
            }),
        body("email").is_email().normalize_email(),
        body("age")
            .optional()
            .is_int(IntRange::between(13, 130))
            .to_int(),
        body("address.street").not_empty(),
    ];

    let mut req = RequestParts::new().with_body(json!({
        "username": "  admin  ",
        "email": "Admin@Example.COM",
        "address": {"street": "Main St"},
    }));

    let report = run_chains(&chains, &mut req).await;

    if report.has_errors() {
        for (field, error) in report.by_field() {
            println!("{field}: {} (got '{}')", error.message, error.value);
        }
    } else {
        println!("passed: {}", report.passed_json());
    }
}
