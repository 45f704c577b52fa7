// 单次 Lanczos3 重采样 + PNG 编码写盘
// 输出始终为 RGBA8 PNG，中间不经过任何有损/再压缩步骤

use std::fs;
use std::io::{self, Cursor};
use std::path::Path;

use image::{
    codecs::png::PngEncoder, imageops, ExtendedColorType, ImageEncoder, RgbaImage,
};

use crate::error::{FanOutError, Result};
use crate::master::MasterImage;

/// 将主图缩放到 `width x height` 并以 PNG 覆盖写入 `output`。
/// 目标目录必须已存在；不会自动创建。
pub fn resize_and_save(master: &MasterImage, width: u32, height: u32, output: &Path) -> Result<()> {
    check_destination(output)?;
    let png = render_png(master, width, height).map_err(|e| match e {
        FanOutError::Format { reason, .. } => FanOutError::format(output, reason),
        other => other,
    })?;
    fs::write(output, &png).map_err(|e| FanOutError::io(output, e))
}

/// 生成目标尺寸的 PNG 字节；相同输入总是得到相同字节。
pub fn render_png(master: &MasterImage, width: u32, height: u32) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(FanOutError::format(
            master.path(),
            format!("invalid target size {width}x{height}"),
        ));
    }
    let resized = resample(master.as_rgba(), width, height);
    encode_png(&resized).map_err(|e| FanOutError::from_image(master.path(), e))
}

/// 写入前检查：父目录必须存在，且目标不能是目录。
pub fn check_destination(output: &Path) -> Result<()> {
    if output.is_dir() {
        return Err(FanOutError::io(
            output,
            io::Error::new(io::ErrorKind::Other, "destination is a directory"),
        ));
    }
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(FanOutError::io(
                output,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                ),
            ))
        }
        _ => Ok(()),
    }
}

/// 读取已存在文件的像素尺寸（只解析头部）。
pub fn read_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|e| FanOutError::from_image(path, e))
}

fn resample(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    // 尺寸一致时直接复制，避免无意义的重采样
    if src.width() == width && src.height() == height {
        src.clone()
    } else {
        imageops::resize(src, width, height, imageops::Lanczos3)
    }
}

fn encode_png(img: &RgbaImage) -> image::ImageResult<Vec<u8>> {
    let mut data = Vec::new();
    let encoder = PngEncoder::new(Cursor::new(&mut data));
    encoder.write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn master(w: u32, h: u32) -> MasterImage {
        let img = RgbaImage::from_fn(w, h, |x, y| Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200]));
        MasterImage::from_rgba("master.png", img).unwrap()
    }

    #[test]
    fn test_png_signature_and_dimensions() {
        let png = render_png(&master(64, 64), 16, 12).unwrap();
        assert!(png.starts_with(&[137, 80, 78, 71, 13, 10, 26, 10]));
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
    }

    #[test]
    fn test_same_size_keeps_pixels() {
        let m = master(4, 4);
        let png = render_png(&m, 4, 4).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), m.as_rgba().as_raw());
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = render_png(&master(4, 4), 0, 4).unwrap_err();
        assert!(err.is_format());
    }

    #[test]
    fn test_missing_parent_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("no/such/dir/icon.png");
        let err = resize_and_save(&master(8, 8), 4, 4, &out).unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.path(), out.as_path());
        assert!(!out.exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("icon.png");
        std::fs::write(&out, b"stale").unwrap();
        resize_and_save(&master(32, 32), 8, 8, &out).unwrap();
        assert_eq!(read_dimensions(&out).unwrap(), (8, 8));
    }

    #[test]
    fn test_render_is_deterministic() {
        let m = master(50, 30);
        assert_eq!(render_png(&m, 17, 9).unwrap(), render_png(&m, 17, 9).unwrap());
    }
}
