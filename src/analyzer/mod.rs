//! AI出力の解析
//!
//! 画像ごとに取得済みのAI出力テキストを1回だけタグ抽出にかける。
//! 抽出は純粋関数なので、フォルダ単位では rayon で並列に実行する。

use crate::config::Config;
use crate::error::Result;
use crate::scanner::ImageInfo;
use garment_tagger_common::{extract_confidence, ExtractedTagSet, TagExtractor, TagLibrary};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::Path;

/// 1枚分の解析結果
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub tags: ExtractedTagSet,
    pub confidence: f64,
    /// AIの生出力（なければ None）
    pub raw: Option<String>,
}

/// タグライブラリを決定する
///
/// 優先順位: 引数で指定したファイル → 設定ファイルの `library_path` → 組み込み
pub fn load_library(config: &Config, path: Option<&Path>) -> Result<TagLibrary> {
    match path.or(config.library_path.as_deref()) {
        Some(path) => {
            let custom = TagLibrary::from_file(path)?;
            tracing::debug!(path = %path.display(), "カスタムタグライブラリを読み込み");
            Ok(TagLibrary::builtin_with(&custom))
        }
        None => Ok(TagLibrary::builtin().clone()),
    }
}

/// AI出力ファイルを読み込む（先頭のBOMは除去）
pub fn read_ai_output(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)?;
    Ok(content.trim_start_matches('\u{FEFF}').to_string())
}

/// AI出力を解析する
pub fn analyze(extractor: &TagExtractor, raw: Option<String>) -> Analysis {
    let Some(raw) = raw else {
        return Analysis::default();
    };

    let tags = extractor.extract(&raw);
    if tags.is_empty() {
        tracing::debug!("タグを認識できませんでした");
    }

    Analysis {
        tags,
        confidence: extract_confidence(&raw),
        raw: Some(raw),
    }
}

/// フォルダ内の画像を並列に解析する（入力順を保持）
pub fn analyze_images(
    images: &[ImageInfo],
    extractor: &TagExtractor,
    show_progress: bool,
) -> Vec<Analysis> {
    let progress = if show_progress {
        let pb = ProgressBar::new(images.len() as u64);
        pb.set_style(
            ProgressStyle::with_template("  [{bar:40}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let results = images
        .par_iter()
        .map(|image| {
            let raw = image.ai_output.as_deref().and_then(|path| match read_ai_output(path) {
                Ok(raw) => Some(raw),
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "AI出力を読み込めません");
                    None
                }
            });
            let analysis = analyze(extractor, raw);
            progress.inc(1);
            analysis
        })
        .collect();

    progress.finish_and_clear();
    results
}
