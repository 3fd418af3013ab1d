//! Bash stand-ins for the trainer and predictor scripts.

use std::fs;
use std::path::Path;

use simlife::application::similarity::config::ModelConfig;
use tempfile::TempDir;

/// Trainer that records the CSV header and drops both artifacts.
pub const TRAIN_OK: &str = r#"
set -e
cp "$1" "$2/seen.csv"
printf model > "$2/model.pkl"
printf matrix > "$2/matriz.pkl"
"#;

/// Trainer that fails after writing a partial model.
pub const TRAIN_FAIL: &str = r#"
printf partial > "$2/model.pkl"
echo "ValueError: not enough sales" >&2
exit 1
"#;

/// Trainer that never finishes on its own.
pub const TRAIN_HANG: &str = "sleep 30\n";

/// Predictor keyed on the product id.
pub const PREDICT: &str = r#"
if [ ! -f "$2" ] || [ ! -f "$3" ]; then
  echo "missing artifacts" >&2
  exit 1
fi
case "$1" in
  X) printf '["Z","Y","W"]' ;;
  lonely) printf '[]' ;;
  noisy) printf '["Y"]'; echo "DeprecationWarning: old pickle" >&2 ;;
  garbled) printf 'not json' ;;
  latin1) printf '["caf\351"]' ;;
  *) echo "unknown product $1" >&2; exit 3 ;;
esac
"#;

/// A model root plus scripts in a temporary directory, driven by `bash`.
pub struct BashModel {
    pub dir: TempDir,
    pub config: ModelConfig,
}

impl BashModel {
    pub fn new(train: &str, predict: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let train_script = write(dir.path(), "train.sh", train);
        let predict_script = write(dir.path(), "predict.sh", predict);

        let config = ModelConfig {
            interpreter: "bash".to_string(),
            probe_args: vec!["--version".to_string()],
            root: dir.path().join("models"),
            train_script,
            predict_script,
            train_timeout_secs: 20,
            predict_timeout_secs: 20,
            probe_timeout_secs: 20,
        };
        Self { dir, config }
    }

    /// Replace the trainer script in place.
    pub fn set_trainer(&self, body: &str) {
        write(self.dir.path(), "train.sh", body);
    }

    pub fn generation_dirs(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(&self.config.root) {
            Ok(entries) => entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write script");
    path
}
