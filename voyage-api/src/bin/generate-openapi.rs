//! OpenAPI document generator
//!
//! Prints the Voyage OpenAPI document as JSON to stdout.
//!
//! Usage:
//!   cargo run -p voyage-api --bin generate-openapi --features openapi > openapi.json

use voyage_api::ApiDoc;

fn main() {
    match ApiDoc::to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize OpenAPI document: {}", e);
            std::process::exit(1);
        }
    }
}
