//! Build script for the Gettify relay.
//!
//! Copies the `.env.example` template into the user's local data directory
//! (`gettify/.env.example`), next to the `.env` file that
//! `config::load_env` falls back to when the working directory has none.
//! A missing template only produces a cargo warning.

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("gettify");

    if env_example_path.is_file() {
        // a read-only home must not break the build
        if let Err(e) = fs::create_dir_all(&out_dir).and_then(|()| {
            let contents = fs::read_to_string(&env_example_path)?;
            fs::write(out_dir.join(".env.example"), contents)
        }) {
            println!("cargo:warning=could not copy .env.example: {e}");
        }
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
