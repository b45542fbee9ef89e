#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use repolens::infrastructure::listing::parse_listing_json;
use repolens::TreeModel;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(nodes) = parse_listing_json(content, Path::new("fuzz.json")) {
            if let Ok(mut tree) = TreeModel::build(&nodes) {
                let paths: Vec<String> = tree.iter().map(|n| n.path.to_string()).collect();
                for path in &paths {
                    tree.select(path);
                }
                let _ = tree.visible().count();
            }
        }
    }
});
