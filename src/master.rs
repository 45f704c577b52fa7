use std::path::{Path, PathBuf};

use image::{ImageReader, RgbaImage};
use log::debug;

use crate::error::{FanOutError, Result};

/// 主图：解码一次、转换为 RGBA8，之后只读共享给所有输出。
#[derive(Debug, Clone)]
pub struct MasterImage {
    path: PathBuf,
    pixels: RgbaImage,
}

impl MasterImage {
    /// 直接由内存中的 RGBA 缓冲构造（测试和嵌入场景）。
    pub fn from_rgba(path: impl Into<PathBuf>, pixels: RgbaImage) -> Result<Self> {
        let path = path.into();
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(FanOutError::format(path, "master image has zero size"));
        }
        Ok(Self { path, pixels })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// 读取并解码主图。容器格式按文件内容猜测，不依赖扩展名。
pub fn load_master(path: impl AsRef<Path>) -> Result<MasterImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .map_err(|e| FanOutError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| FanOutError::io(path, e))?;
    let decoded = reader
        .decode()
        .map_err(|e| FanOutError::from_image(path, e))?;
    debug!(
        "decoded master {} as {:?} ({}x{})",
        path.display(),
        decoded.color(),
        decoded.width(),
        decoded.height()
    );
    MasterImage::from_rgba(path, decoded.to_rgba8())
}
