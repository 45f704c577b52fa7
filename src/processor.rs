//! Sequential fan-out runner.
//!
//! Rules run strictly in order. Optional targets are only refreshed when the
//! file is already present; a failure on an optional rule is logged and the
//! run continues, a failure on a required rule aborts with the partial result.

use log::{debug, info, warn};

use crate::error::{FanOutError, Result, RunAborted};
use crate::master::MasterImage;
use crate::plan::{FanOutResult, FanOutRule, TargetSize};
use crate::resize::{check_destination, read_dimensions, resize_and_save};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// 只评估规则，不写文件
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Written { width: u32, height: u32 },
    Absent,
}

pub fn run_plan(master: &MasterImage, rules: &[FanOutRule]) -> std::result::Result<FanOutResult, RunAborted> {
    run_plan_with(master, rules, RunOptions::default())
}

pub fn run_plan_with(
    master: &MasterImage,
    rules: &[FanOutRule],
    options: RunOptions,
) -> std::result::Result<FanOutResult, RunAborted> {
    let mut result = FanOutResult::default();
    let mut current_section: Option<&str> = None;

    for rule in rules {
        if let Some(section) = rule.section.as_deref() {
            if current_section != Some(section) {
                info!("=== {section} ===");
            }
        }
        current_section = rule.section.as_deref();
        result.attempted += 1;

        match apply_rule(master, rule, options) {
            Ok(Outcome::Written { width, height }) => {
                let tag = if options.dry_run { "[DRY]" } else { "[OK]" };
                info!("  {tag} {} ({width}x{height})", rule.output.display());
                result.written += 1;
            }
            Ok(Outcome::Absent) => {
                debug!("  [SKIP] {} (absent)", rule.output.display());
                result.skipped.push(rule.output.clone());
            }
            Err(error) if !rule.required => {
                warn!("  [FAIL] {error}; skipping optional target");
                result.failed.push(rule.output.clone());
            }
            Err(error) => {
                return Err(RunAborted {
                    partial: result,
                    error,
                })
            }
        }
    }
    Ok(result)
}

fn apply_rule(master: &MasterImage, rule: &FanOutRule, options: RunOptions) -> Result<Outcome> {
    let present = rule.output.is_file();
    if !rule.required && !present {
        return Ok(Outcome::Absent);
    }

    let (width, height) = match rule.size {
        TargetSize::Fixed { width, height } => (width, height),
        TargetSize::MatchExisting => read_dimensions(&rule.output)?,
    };
    if width == 0 || height == 0 {
        return Err(FanOutError::format(
            &rule.output,
            format!("invalid target size {width}x{height}"),
        ));
    }

    if options.dry_run {
        check_destination(&rule.output)?;
    } else {
        resize_and_save(master, width, height, &rule.output)?;
    }
    Ok(Outcome::Written { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::Path;

    fn master() -> MasterImage {
        let img = RgbaImage::from_fn(64, 64, |x, y| Rgba([x as u8 * 4, y as u8 * 4, 90, 255]));
        MasterImage::from_rgba("master.png", img).unwrap()
    }

    fn seed(path: &Path, w: u32, h: u32) {
        RgbaImage::new(w, h).save(path).unwrap();
    }

    #[test]
    fn test_required_rule_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("48.png");
        let result = run_plan(&master(), &[FanOutRule::required(&out, 48, 48)]).unwrap();
        assert_eq!(result.written, 1);
        assert_eq!(result.attempted, 1);
        assert_eq!(read_dimensions(&out).unwrap(), (48, 48));
    }

    #[test]
    fn test_optional_absent_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ic_launcher.png");
        let result = run_plan(&master(), &[FanOutRule::optional(&out, 96, 96)]).unwrap();
        assert_eq!(result.written, 0);
        assert!(result.was_skipped(&out));
        assert!(!out.exists());
    }

    #[test]
    fn test_optional_present_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ic_launcher.png");
        seed(&out, 10, 10);
        let result = run_plan(&master(), &[FanOutRule::optional(&out, 72, 72)]).unwrap();
        assert_eq!(result.written, 1);
        assert_eq!(read_dimensions(&out).unwrap(), (72, 72));
    }

    #[test]
    fn test_match_existing_keeps_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ic_wordmark_text_normal.png");
        seed(&out, 33, 7);
        let result = run_plan(&master(), &[FanOutRule::match_existing(&out)]).unwrap();
        assert_eq!(result.written, 1);
        assert_eq!(read_dimensions(&out).unwrap(), (33, 7));
    }

    #[test]
    fn test_optional_failure_continues() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.png");
        fs::write(&broken, b"garbage").unwrap();
        let ok = dir.path().join("ok.png");
        let rules = [
            FanOutRule::match_existing(&broken),
            FanOutRule::required(&ok, 16, 16),
        ];
        let result = run_plan(&master(), &rules).unwrap();
        assert_eq!(result.failed, vec![broken]);
        assert_eq!(result.written, 1);
        assert!(ok.exists());
    }

    #[test]
    fn test_required_failure_aborts_with_partial() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.png");
        let missing_dir = dir.path().join("missing/icon.png");
        let never = dir.path().join("never.png");
        let rules = [
            FanOutRule::required(&first, 16, 16),
            FanOutRule::required(&missing_dir, 16, 16),
            FanOutRule::required(&never, 16, 16),
        ];
        let aborted = run_plan(&master(), &rules).unwrap_err();
        assert_eq!(aborted.partial.written, 1);
        assert_eq!(aborted.partial.attempted, 2);
        assert!(aborted.error.is_io());
        assert!(first.exists());
        assert!(!never.exists());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let required = dir.path().join("16.png");
        let present = dir.path().join("present.png");
        seed(&present, 5, 5);
        let rules = [
            FanOutRule::required(&required, 16, 16),
            FanOutRule::match_existing(&present),
        ];
        let result = run_plan_with(&master(), &rules, RunOptions { dry_run: true }).unwrap();
        assert_eq!(result.written, 2);
        assert!(!required.exists());
        assert_eq!(read_dimensions(&present).unwrap(), (5, 5));
    }

    #[test]
    fn test_dry_run_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nope/16.png");
        let rules = [FanOutRule::required(&out, 16, 16)];
        let aborted = run_plan_with(&master(), &rules, RunOptions { dry_run: true }).unwrap_err();
        assert!(aborted.error.is_io());
    }
}
