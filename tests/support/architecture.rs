//! Source scanning for the layering contracts.

use std::fs;
use std::path::{Path, PathBuf};

/// A layer directory and the paths it must never mention.
pub struct LayerRule {
    pub dir: &'static str,
    pub forbidden: &'static [&'static str],
}

/// The import rules of the hexagon, innermost first.
pub const LAYER_RULES: &[LayerRule] = &[
    LayerRule {
        dir: "src/domain",
        forbidden: &[
            "crate::port",
            "crate::application",
            "crate::adapter",
            "crate::infrastructure",
            "tokio::",
            "tracing::",
        ],
    },
    LayerRule {
        dir: "src/port",
        forbidden: &["crate::application", "crate::adapter", "crate::infrastructure"],
    },
    LayerRule {
        dir: "src/application",
        forbidden: &["crate::adapter", "crate::infrastructure", "tokio::process"],
    },
];

/// A line that broke a contract, as `path:line: text`.
#[derive(Debug)]
pub struct Violation(pub String);

/// One Rust source file, path relative to the crate root.
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn is_mod_rs(&self) -> bool {
        self.path.ends_with("/mod.rs")
    }

    /// Lines containing any of `needles`, skipping `#[cfg(test)]` modules
    /// so test helpers may reach across layers.
    pub fn violations(&self, needles: &[&str]) -> Vec<Violation> {
        let production = self.text.split("#[cfg(test)]").next().unwrap_or_default();
        production
            .lines()
            .enumerate()
            .filter(|(_, line)| needles.iter().any(|n| line.contains(n)))
            .map(|(idx, line)| Violation(format!("{}:{}: {}", self.path, idx + 1, line.trim())))
            .collect()
    }
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn walk(dir: &Path, out: &mut Vec<PathBuf>) {
    let entries = fs::read_dir(dir).unwrap_or_else(|e| panic!("read {}: {e}", dir.display()));
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
}

/// Every `.rs` file under `dir` (relative to the crate root), sorted.
pub fn sources(dir: &str) -> Vec<SourceFile> {
    let root = crate_root();
    let mut paths = Vec::new();
    walk(&root.join(dir), &mut paths);
    paths.sort();
    paths
        .into_iter()
        .map(|path| SourceFile {
            text: fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display())),
            path: path
                .strip_prefix(&root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/"),
        })
        .collect()
}

/// Anything in a `mod.rs` besides module declarations, cfg attributes and comments.
pub fn mod_rs_declarations_only(file: &SourceFile) -> Vec<Violation> {
    file.text
        .lines()
        .enumerate()
        .filter(|(_, raw)| {
            let line = raw.trim();
            !(line.is_empty()
                || line.starts_with("//")
                || line.starts_with("pub mod ")
                || line.starts_with("mod ")
                || line.starts_with("#[cfg"))
        })
        .map(|(idx, raw)| Violation(format!("{}:{}: {}", file.path, idx + 1, raw.trim())))
        .collect()
}
