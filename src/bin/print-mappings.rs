//! CLI tool to print the create-index bodies of the registry
//!
//! Usage:
//!   cargo run --bin print-mappings
//!   cargo run --bin print-mappings -- yookve_bookings

use std::env;
use yookve_provisioner::registry::{self, IndexName};

fn print_index(name: &str, body: &serde_json::Value) {
    println!("PUT /{}", name);
    match serde_json::to_string_pretty(body) {
        Ok(pretty) => println!("{}", pretty),
        Err(e) => eprintln!("Failed to render mapping for {}: {}", name, e),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() == 2 {
        let name = &args[1];
        match registry::manifest_for(name) {
            Ok(manifest) => print_index(name, &manifest.to_mapping_body()),
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("Known indices: {}", registry::index_names().join(", "));
                std::process::exit(2);
            }
        }
    } else if args.len() == 1 {
        for index in IndexName::ALL {
            print_index(index.as_str(), &index.manifest().to_mapping_body());
            println!();
        }
    } else {
        eprintln!("Usage:");
        eprintln!("  {}             - Print every index mapping", args[0]);
        eprintln!("  {} <index>     - Print one index mapping", args[0]);
        std::process::exit(1);
    }
}
