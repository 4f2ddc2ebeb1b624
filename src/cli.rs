use clap::{Args, Parser, Subcommand};
use garment_tagger_common::TagEdit;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "garment-tagger")]
#[command(about = "衣類写真のAIタグ抽出・カタログ管理ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// カスタムタグライブラリ（JSON）
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// AI出力テキストからタグを抽出してJSONで表示
    Extract {
        /// AI出力ファイル（省略時は標準入力）
        input: Option<PathBuf>,

        /// 1行のJSONで出力
        #[arg(long)]
        compact: bool,
    },

    /// 画像を1枚登録
    Ingest {
        /// 画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// AI出力ファイル（省略時は画像と同名の .txt を探す）
        #[arg(short, long)]
        ai_output: Option<PathBuf>,
    },

    /// フォルダ内の画像を一括登録（AI出力は画像と同名の .txt）
    IngestFolder {
        /// 画像フォルダのパス
        #[arg(required = true)]
        folder: PathBuf,
    },

    /// 登録済みレコードを一覧表示（新しい順）
    List,

    /// レコードの詳細を表示
    Show {
        /// レコードID
        id: u64,
    },

    /// キーワード・タグで検索
    Search {
        /// キーワード（ファイル名・タグ・AI出力に部分一致）
        #[arg(short, long)]
        query: Option<String>,

        /// タグ（カンマ区切り、すべて一致）
        #[arg(short, long)]
        tags: Option<String>,
    },

    /// タグを手動で修正（語彙照合なし）
    Edit {
        /// レコードID
        id: u64,

        #[command(flatten)]
        tags: EditArgs,
    },

    /// レコードと画像を削除
    Delete {
        /// レコードID
        id: u64,

        /// 確認なしで削除
        #[arg(short, long)]
        yes: bool,
    },

    /// 設定を表示/編集
    Config {
        /// カタログ保存先を設定
        #[arg(long)]
        set_catalog_dir: Option<PathBuf>,

        /// カスタムタグライブラリを設定
        #[arg(long)]
        set_library: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 手動編集する属性
#[derive(Args, Debug, Default)]
pub struct EditArgs {
    /// 样式
    #[arg(long)]
    pub style: Option<String>,
    /// 颜色
    #[arg(long)]
    pub color: Option<String>,
    /// 色调
    #[arg(long)]
    pub tone: Option<String>,
    /// 领型
    #[arg(long)]
    pub collar: Option<String>,
    /// 袖型
    #[arg(long)]
    pub sleeve: Option<String>,
    /// 版型
    #[arg(long)]
    pub shape: Option<String>,
    /// 长度
    #[arg(long)]
    pub length: Option<String>,
    /// 面料
    #[arg(long)]
    pub fabric: Option<String>,
    /// 图案
    #[arg(long)]
    pub pattern: Option<String>,
    /// 工艺
    #[arg(long)]
    pub craft: Option<String>,
    /// 场合
    #[arg(long)]
    pub occasion: Option<String>,
    /// 季节
    #[arg(long)]
    pub season: Option<String>,
    /// 服装风格
    #[arg(long)]
    pub style_type: Option<String>,
}

impl From<EditArgs> for TagEdit {
    fn from(args: EditArgs) -> Self {
        TagEdit {
            style: args.style,
            color: args.color,
            tone: args.tone,
            collar: args.collar,
            sleeve: args.sleeve,
            shape: args.shape,
            length: args.length,
            fabric: args.fabric,
            pattern: args.pattern,
            craft: args.craft,
            occasion: args.occasion,
            season: args.season,
            style_type: args.style_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_edit_args() {
        let cli = Cli::parse_from(["garment-tagger", "edit", "3", "--color", "藏青色", "--style-type", "复古"]);
        match cli.command {
            Commands::Edit { id, tags } => {
                assert_eq!(id, 3);
                let edit = TagEdit::from(tags);
                assert_eq!(edit.color.as_deref(), Some("藏青色"));
                assert_eq!(edit.style_type.as_deref(), Some("复古"));
                assert!(edit.style.is_none());
            }
            _ => panic!("Expected Edit command"),
        }
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::parse_from(["garment-tagger", "search", "-t", "红色,冬季"]);
        assert!(matches!(cli.command, Commands::Search { query: None, tags: Some(_) }));
    }
}
