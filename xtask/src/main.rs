// Juriste Virtuel - task runner (`cargo xtask <command>`)

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use xshell::{Shell, cmd};

const BINARY: &str = "juriste-virtuel";

fn main() -> Result<()> {
    let sh = Shell::new()?;
    sh.change_dir(project_root());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let flag = |name: &str| args.iter().any(|a| a == name);

    match args.first().map(String::as_str) {
        Some("build") => build(&sh, flag("--release")),
        Some("test") => test(&sh),
        Some("format") => format(&sh, flag("--check")),
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("ci") => ci(&sh),
        Some("dist") => dist(&sh),
        Some("clean") => clean(&sh),
        Some(other) => {
            print_help();
            bail!("unknown command: {}", other)
        },
        None => {
            print_help();
            Ok(())
        },
    }
}

fn print_help() {
    println!("Juriste Virtuel - build commands");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the backend");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  run [ARGS...]       Run the server, passing ARGS through");
    println!("  ci                  format --check, clippy, test");
    println!("  dist                Release build packaged as build/<name>.tar.gz");
    println!("  clean               Remove build artifacts");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🦀 Building backend{}...", if release { " (release)" } else { "" });
    let profile: &[&str] = if release { &["--release"] } else { &[] };
    cmd!(sh, "cargo build -p {BINARY} {profile...}").run().context("Failed to build backend")?;
    println!("✅ Build complete");
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    println!("🧪 Running tests...");
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;
    println!("✅ All tests passed");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run().context("Rust code is not formatted")?;
        println!("✅ Rust code is properly formatted");
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
        println!("✅ Rust code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- --deny warnings --allow clippy::uninlined-format-args")
        .run()
        .context("Clippy checks failed")?;
    Ok(())
}

fn run(sh: &Shell, args: &[String]) -> Result<()> {
    println!("▶️  Starting {}...", BINARY);
    cmd!(sh, "cargo run -p {BINARY} -- {args...}").run().context("Failed to run application")?;
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    let steps: [(&str, fn(&Shell) -> Result<()>); 3] = [
        ("Checking code format", |sh| format(sh, true)),
        ("Running clippy", clippy),
        ("Running tests", test),
    ];

    for (i, (label, step)) in steps.iter().enumerate() {
        println!("[{}/{}] {}...", i + 1, steps.len(), label);
        step(sh)?;
        println!();
    }

    println!("🎉 CI pipeline completed successfully!");
    Ok(())
}

/// Layout: bin/, conf/, content/, static/, logs/
fn dist(sh: &Shell) -> Result<()> {
    build(sh, true)?;

    let root = project_root();
    let stage = root.join("build").join(BINARY);
    if stage.exists() {
        sh.remove_path(&stage)?;
    }
    for dir in ["bin", "conf", "logs"] {
        sh.create_dir(stage.join(dir))?;
    }

    sh.copy_file(root.join("target/release").join(BINARY), stage.join("bin"))?;
    write_dist_config(&stage.join("conf/config.toml"))?;
    copy_tree(sh, &root.join("backend/content"), &stage.join("content"))?;
    copy_tree(sh, &root.join("backend/static"), &stage.join("static"))?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let package = format!("{}-{}.tar.gz", BINARY, timestamp);
    {
        let _dir = sh.push_dir(root.join("build"));
        cmd!(sh, "tar czf {package} {BINARY}").run().context("Failed to create tarball")?;
    }

    println!("✅ Package created: build/{}", package);
    Ok(())
}

// Packaged layout keeps content and static next to the binary's working dir
fn write_dist_config(path: &Path) -> Result<()> {
    let config = r#"[server]
host = "0.0.0.0"
port = 5000

[logging]
level = "info"
file = "logs/juriste-virtuel.log"

[content]
dir = "content"

[static_config]
enabled = true
web_root = "static"
"#;
    std::fs::write(path, config).context("Failed to write config file")
}

fn copy_tree(sh: &Shell, from: &Path, to: &Path) -> Result<()> {
    sh.create_dir(to)?;
    for entry in sh.read_dir(from)? {
        if entry.is_file() {
            sh.copy_file(&entry, to)?;
        }
    }
    Ok(())
}

fn clean(sh: &Shell) -> Result<()> {
    println!("🧹 Cleaning build artifacts...");
    cmd!(sh, "cargo clean").run()?;
    let build_dir = project_root().join("build");
    if build_dir.exists() {
        sh.remove_path(build_dir)?;
    }
    println!("✅ Clean complete");
    Ok(())
}

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
