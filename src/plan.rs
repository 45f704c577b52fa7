use std::fmt;
use std::path::{Path, PathBuf};

/// 目标尺寸：固定值，或沿用目标文件当前的尺寸。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetSize {
    Fixed { width: u32, height: u32 },
    MatchExisting,
}

/// 一条扇出规则：输出路径 + 目标尺寸 + 是否必需。
///
/// 必需规则总是写入；可选规则只更新已存在的文件，不会新建。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanOutRule {
    pub output: PathBuf,
    pub size: TargetSize,
    pub required: bool,
    pub section: Option<String>,
}

impl FanOutRule {
    pub fn required(output: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            output: output.into(),
            size: TargetSize::Fixed { width, height },
            required: true,
            section: None,
        }
    }

    pub fn optional(output: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            required: false,
            ..Self::required(output, width, height)
        }
    }

    /// 可选规则，尺寸取自目标文件本身。
    pub fn match_existing(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
            size: TargetSize::MatchExisting,
            required: false,
            section: None,
        }
    }

    pub fn square(output: impl Into<PathBuf>, size: u32, required: bool) -> Self {
        Self {
            required,
            ..Self::required(output, size, size)
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// 一次运行的统计结果。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutResult {
    /// 处理过的规则数（含跳过）
    pub attempted: usize,
    pub written: usize,
    /// 可选且目标不存在而跳过的路径
    pub skipped: Vec<PathBuf>,
    /// 可选规则写入失败（已记录日志并继续）
    pub failed: Vec<PathBuf>,
}

impl FanOutResult {
    pub fn was_skipped(&self, path: &Path) -> bool {
        self.skipped.iter().any(|p| p == path)
    }
}

impl fmt::Display for FanOutResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Done! Replaced {} icon files total.", self.written)?;
        if !self.skipped.is_empty() || !self.failed.is_empty() {
            write!(
                f,
                " ({} skipped, {} failed, {} rules)",
                self.skipped.len(),
                self.failed.len(),
                self.attempted
            )?;
        }
        Ok(())
    }
}
