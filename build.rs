//! Build script for movie-loader
//!
//! Sets `GIT_HASH` for the `--version` string and renders the
//! `movie-loader` CLI into `$OUT_DIR/completions` (bash, zsh, fish,
//! PowerShell, elvish) and `$OUT_DIR/man/movie-loader.1`.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{generate_to, Shell};

// GIT_HASH is not available while the build script itself compiles.
const VERSION: &str = env!("CARGO_PKG_VERSION");

const BIN_NAME: &str = "movie-loader";

// Same definition the binary parses with.
include!("src/cli/definition.rs");

fn git(args: &[&str]) -> Option<std::process::Output> {
    Command::new("git").args(args).output().ok()
}

/// Short commit hash, suffixed with `-dirty` when the tree has changes.
fn version_hash() -> String {
    let hash = git(&["rev-parse", "--short", "HEAD"])
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string());

    match hash {
        Some(hash) => {
            let dirty = git(&["diff", "--quiet", "HEAD"])
                .map(|out| !out.status.success())
                .unwrap_or(false);
            if dirty {
                format!("{}-dirty", hash)
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    }
}

fn write_completions(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut cmd = Cli::command();
    for shell in Shell::value_variants() {
        generate_to(*shell, &mut cmd, BIN_NAME, dir)?;
    }
    Ok(())
}

fn write_man_page(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut buffer = Vec::new();
    clap_mangen::Man::new(Cli::command()).render(&mut buffer)?;
    fs::write(dir.join(format!("{}.1", BIN_NAME)), buffer)
}

fn main() {
    println!("cargo:rustc-env=GIT_HASH={}", version_hash());
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
    println!("cargo:rerun-if-changed=src/cli/definition.rs");

    let Some(out_dir) = env::var_os("OUT_DIR").map(PathBuf::from) else {
        return;
    };

    let completions_dir = out_dir.join("completions");
    let man_dir = out_dir.join("man");

    if let Err(e) = write_completions(&completions_dir) {
        println!("cargo:warning=Shell completions not generated: {}", e);
    }
    if let Err(e) = write_man_page(&man_dir) {
        println!("cargo:warning=Man page not generated: {}", e);
    }
}
