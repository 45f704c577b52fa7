use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::plan::FanOutResult;

/// 所有图标操作的错误：文件系统问题归 Io，图像内容问题归 Format。
#[derive(Debug, Error)]
pub enum FanOutError {
    #[error("io error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("format error at {}: {reason}", path.display())]
    Format { path: PathBuf, reason: String },
}

impl FanOutError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// 把 image crate 的错误映射到两类错误之一。
    /// 解码失败视为读取失败（Io），不支持的容器/参数视为 Format。
    pub fn from_image(path: &Path, err: image::ImageError) -> Self {
        use image::ImageError;
        match err {
            ImageError::IoError(e) => Self::io(path, e),
            ImageError::Decoding(e) => {
                Self::io(path, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
            }
            ImageError::Encoding(e) => {
                Self::io(path, io::Error::new(io::ErrorKind::Other, e.to_string()))
            }
            other => Self::format(path, other.to_string()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Format { path, .. } => path,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// 必需规则失败时中止整次运行，携带已完成部分的统计。
#[derive(Debug, Error)]
#[error("run aborted after {} written file(s): {error}", partial.written)]
pub struct RunAborted {
    pub partial: FanOutResult,
    #[source]
    pub error: FanOutError,
}

pub type Result<T> = std::result::Result<T, FanOutError>;
