use catalog::{SubjectCatalog, load_subject_catalog};
use std::path::Path;

fn main() {
    let catalog = match std::env::args().nth(1) {
        Some(path) => load_subject_catalog(Path::new(&path)).expect("Failed to load catalog"),
        None => SubjectCatalog::default(),
    };

    println!("=== Subject Catalog ===");
    println!("Subjects: {}", catalog.len());
    for subject in catalog.subjects() {
        println!("  - {}", subject);
    }
}
