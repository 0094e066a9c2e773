//! The `recall init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    for (path, content) in [("recall.toml", SAMPLE_CONFIG), ("pools.toml", SAMPLE_POOLS)] {
        if std::path::Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Edit recall.toml with your coefficient table");
    println!("  2. Run: recall generate --user 1 --discipline base10 --count 80 --memo-time 5 --recall-time 15");
    println!("  3. Run: recall submit --user 2 --memo m1 --cells answers.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# recall configuration

store_path = "./recall-store.json"
pools_path = "./pools.toml"

# Points are round(raw * 1000 / k) for the "memo_time,recall_time" class,
# and round(sqrt(raw) * k) for spoken numbers. Classes without an entry
# are left unscored.

[coefficients.base2]
"5,15" = 1160.0
"30,60" = 4140.0

[coefficients.base10]
"5,15" = 547.0
"15,30" = 1285.0
"60,120" = 3234.0

[coefficients.words]
"5,15" = 125.0
"15,40" = 312.0

[coefficients.dates]
"5,15" = 125.0

[coefficients.cards]
"5,15" = 52.0
"10,30" = 104.0
"60,120" = 1040.0

[coefficients.spoken]
"0,0" = 47.3
"#;

const SAMPLE_POOLS: &str = r#"# Word and story pools, keyed by language

[words]
english = [
    "anchor", "apple", "bicycle", "candle", "castle", "cloud", "desert",
    "dragon", "feather", "garden", "harbor", "island", "jacket", "kettle",
    "ladder", "lantern", "meadow", "mirror", "needle", "orchard", "pencil",
    "pillow", "rabbit", "river", "saddle", "shadow", "tiger", "tunnel",
    "violin", "window",
]

[stories]
english = [
    "Queen marries again",
    "Wimbledon cancelled",
    "Aircraft carrier sinks",
    "Bakery wins prize for largest cake",
    "Volcano erupts under frozen lake",
    "Pirates steal a lighthouse",
    "First snow falls in the desert",
    "Circus elephant learns to paint",
    "Bridge collapses during parade",
    "Scientists discover singing fish",
]
"#;
