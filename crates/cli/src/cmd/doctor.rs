use std::path::Path;

use vaultmerge_core::config::{ConfigLoader, default_config_path};

pub fn run(config: Option<&Path>, profile: Option<&str>, verbose: bool) {
    match ConfigLoader::load(config, profile) {
        Ok(rc) => {
            crate::logging::init(&rc, verbose);

            println!("OK   vaultmerge doctor");
            match &rc.source {
                Some(path) => println!("config: {}", path.display()),
                None => println!(
                    "config: (built-in defaults, no file at {})",
                    default_config_path().display()
                ),
            }
            println!("profile: {}", rc.active_profile);
            println!("vaults_dir: {}", rc.vaults_dir.display());
            let excluded: Vec<String> =
                rc.excluded_folders.iter().map(|p| p.display().to_string()).collect();
            println!("excluded_folders: [{}]", excluded.join(", "));
            match &rc.instructions_file {
                Some(p) => println!("instructions_file: {}", p.display()),
                None => println!("instructions_file: (none)"),
            }
            println!("merge.order: {}", rc.merge.order);
            println!("merge.table_of_contents: {}", rc.merge.table_of_contents);
            println!("merge.include_metadata: {}", rc.merge.include_metadata);
            println!("logging.level: {}", rc.logging.level);
            if let Some(file) = &rc.logging.file {
                println!("logging.file: {}", file.display());
            }
        }
        Err(e) => {
            println!("FAIL vaultmerge doctor");
            println!("{e}");
            if config.is_none() {
                println!("looked for: {}", default_config_path().display());
            }
            std::process::exit(1);
        }
    }
}
