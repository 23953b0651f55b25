use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    // Copy resources and config to target directory
    copy_resources();
    copy_config();
}

/// Returns target/<profile> from OUT_DIR, or None if the layout is unexpected.
fn target_dir() -> Option<PathBuf> {
    let out_dir = env::var("OUT_DIR").ok()?;
    // OUT_DIR is something like target/release/build/uma-scores-xxx/out
    // We need to go up to target/release (or target/debug)
    Path::new(&out_dir).ancestors().nth(3).map(Path::to_path_buf)
}

/// Copies the resources folder (default roster) next to the executable.
fn copy_resources() {
    let Some(target_dir) = target_dir() else {
        return;
    };

    let resources_src = Path::new("resources");
    if resources_src.exists() {
        copy_dir_recursive(resources_src, &target_dir.join("resources"));
        // Tell Cargo to re-run if resources change
        println!("cargo:rerun-if-changed=resources/");
    }
}

/// Recursively copies a directory and its contents.
fn copy_dir_recursive(src: &Path, dst: &Path) {
    let _ = fs::create_dir_all(dst);

    if let Ok(entries) = fs::read_dir(src) {
        for entry in entries.flatten() {
            let src_path = entry.path();
            let dst_path = dst.join(entry.file_name());

            if src_path.is_dir() {
                copy_dir_recursive(&src_path, &dst_path);
            } else {
                let _ = fs::copy(&src_path, &dst_path);
            }
        }
    }
}

/// Copies config.json to the target directory.
fn copy_config() {
    let Some(target_dir) = target_dir() else {
        return;
    };

    let config_src = Path::new("config.json");
    if config_src.exists() {
        let _ = fs::copy(config_src, target_dir.join("config.json"));
        println!("cargo:rerun-if-changed=config.json");
    }
}
