//! TOML plan files.
//!
//! ```toml
//! [[rule]]
//! section = "extension icons"
//! path = "app/src/main/assets/icon/48.png"
//! width = 48
//! height = 48
//! required = true
//!
//! [[rule]]
//! path = "res/drawable/ic_wordmark_text_normal.png"
//! match_existing = true
//! ```
//!
//! Relative paths are resolved against the project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FanOutError, Result};
use crate::plan::{FanOutRule, TargetSize};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PlanFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleEntry {
    path: PathBuf,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    match_existing: bool,
    section: Option<String>,
}

pub fn load_plan(file: &Path, root: &Path) -> Result<Vec<FanOutRule>> {
    let text = fs::read_to_string(file).map_err(|e| FanOutError::io(file, e))?;
    parse_plan(&text, root, file)
}

/// `origin` 仅用于错误信息定位。
pub fn parse_plan(text: &str, root: &Path, origin: &Path) -> Result<Vec<FanOutRule>> {
    let parsed: PlanFile =
        toml::from_str(text).map_err(|e| FanOutError::format(origin, e.to_string()))?;

    parsed
        .rules
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| entry.into_rule(root, origin, idx))
        .collect()
}

impl RuleEntry {
    fn into_rule(self, root: &Path, origin: &Path, idx: usize) -> Result<FanOutRule> {
        let bad = |reason: String| FanOutError::format(origin, format!("rule #{}: {reason}", idx + 1));
        let size = match (self.match_existing, self.width, self.height) {
            (true, None, None) => TargetSize::MatchExisting,
            (true, _, _) => return Err(bad("match_existing excludes width/height".into())),
            (false, Some(w), Some(h)) if w > 0 && h > 0 => TargetSize::Fixed { width: w, height: h },
            (false, Some(w), Some(h)) => return Err(bad(format!("invalid size {w}x{h}"))),
            (false, _, _) => return Err(bad("width and height are both required".into())),
        };
        Ok(FanOutRule {
            output: root.join(self.path),
            size,
            required: self.required,
            section: self.section,
        })
    }
}
