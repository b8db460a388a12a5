//! `flowpack check-config` — validate a selector configuration file.

use std::path::Path;

use flowpack_scheduler::SelectorConfig;

pub fn run(config_path: &str) -> anyhow::Result<()> {
    let config = SelectorConfig::from_file(Path::new(config_path))?;

    match config.greediness {
        Some(g) => println!("greediness: {g}"),
        None => println!("greediness: unset (pre-filter disabled)"),
    }
    println!(
        "reward mode: {}",
        if config.omit_prioritize_by_temp_and_input {
            "priority only"
        } else {
            "priority + temp/input sizes"
        }
    );
    println!("configuration ok");

    Ok(())
}
