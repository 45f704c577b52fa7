// 内置方案：LinguaSurf Android 工程里所有需要替换的图标位置
// 目录结构固定；根目录由调用方给出

use std::path::{Path, PathBuf};

use crate::plan::FanOutRule;

pub const DPI_LABEL: [&str; 5] = ["mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"];

/// 启动器图标尺寸，与 DPI_LABEL 一一对应
pub const MIPMAP_SIZE: [u32; 5] = [48, 72, 96, 144, 192];

/// 横向 wordmark 合成图尺寸，与 DPI_LABEL 一一对应
pub const WORDMARK_SIZE: [(u32, u32); 5] = [(434, 80), (651, 120), (868, 160), (1302, 240), (1736, 320)];

pub const EXTENSION_ICON_SIZES: [u32; 5] = [16, 32, 48, 64, 128];

const EXTENSION_LOGO: &str = "logo-BdLZH4Fn.png";
const STORE_ICON_SIZE: u32 = 512;

/// `<root>/Android-app/app/src`
pub fn app_src(root: &Path) -> PathBuf {
    root.join("Android-app").join("app").join("src")
}

/// 按固定顺序生成全部规则。
pub fn android_project_plan(root: &Path) -> Vec<FanOutRule> {
    let src = app_src(root);
    let fork_debug = src.join("forkDebug");
    let fork_release = src.join("forkRelease");
    let mut rules = Vec::new();

    // 1-2. 扩展图标与 logo（打包进 assets）
    let ext = src.join("main").join("assets").join("extensions").join("linguasurf");
    push_extension_icons(&mut rules, &ext, "extension icons");

    // 3. tmp_manifest 构建产物
    let tmp = root.join("tmp_manifest").join("out");
    push_extension_icons(&mut rules, &tmp, "tmp_manifest/out icons");

    // 4. forkDebug 启动器图标
    let section = "launcher icons - forkDebug";
    rules.push(FanOutRule::square(fork_debug.join("ic_launcher-web.png"), STORE_ICON_SIZE, true).with_section(section));
    push_mipmaps(&mut rules, &fork_debug, &["ic_launcher", "ic_launcher_round"], section);

    // 5. forkRelease 启动器图标（含 private 变体）
    push_mipmaps(
        &mut rules,
        &fork_release,
        &[
            "ic_launcher",
            "ic_launcher_round",
            "ic_launcher_private",
            "ic_launcher_private_round",
        ],
        "launcher icons - forkRelease",
    );

    // 6. Play Store / web
    for flavor in ["main", "debug"] {
        rules.push(
            FanOutRule::square(src.join(flavor).join("ic_launcher-playstore.png"), STORE_ICON_SIZE, false)
                .with_section("play store icons"),
        );
    }

    let res = fork_release.join("res");

    // 7. wordmark logo（原图 347x320）
    rules.push(
        FanOutRule::optional(res.join("drawable").join("ic_wordmark_logo.png"), 347, 320)
            .with_section("wordmark logo"),
    );

    // 8. wordmark 合成图
    for (label, (w, h)) in DPI_LABEL.iter().zip(WORDMARK_SIZE) {
        let dir = res.join(format!("drawable-{label}"));
        for name in ["ic_logo_wordmark_normal", "ic_logo_wordmark_private"] {
            rules.push(
                FanOutRule::optional(dir.join(format!("{name}.png")), w, h)
                    .with_section("logo wordmark composites"),
            );
        }
    }

    // 9. 搜索小部件（原图 1312x232）
    rules.push(
        FanOutRule::optional(res.join("drawable-hdpi").join("fenix_search_widget.png"), 1312, 232)
            .with_section("search widget"),
    );

    // 10. wordmark 文本：沿用现有尺寸
    for name in ["ic_wordmark_text_normal", "ic_wordmark_text_private"] {
        rules.push(
            FanOutRule::match_existing(res.join("drawable").join(format!("{name}.png")))
                .with_section("wordmark text"),
        );
    }

    rules
}

fn push_extension_icons(rules: &mut Vec<FanOutRule>, base: &Path, section: &str) {
    let icon_dir = base.join("icon");
    for size in EXTENSION_ICON_SIZES {
        rules.push(FanOutRule::square(icon_dir.join(format!("{size}.png")), size, true).with_section(section));
    }
    let logo = base.join("assets").join(EXTENSION_LOGO);
    rules.push(FanOutRule::square(logo, 128, true).with_section(section));
}

fn push_mipmaps(rules: &mut Vec<FanOutRule>, flavor: &Path, names: &[&str], section: &str) {
    for (label, size) in DPI_LABEL.iter().zip(MIPMAP_SIZE) {
        let dir = flavor.join("res").join(format!("mipmap-{label}"));
        for name in names {
            rules.push(FanOutRule::square(dir.join(format!("{name}.png")), size, false).with_section(section));
        }
    }
}
