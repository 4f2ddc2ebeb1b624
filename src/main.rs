use clap::Parser;
use dialoguer::Confirm;
use garment_tagger::{analyzer, catalog, cli, config, error, ingest, scanner};
use garment_tagger_common::{GarmentRecord, TagEdit, TagExtractor};
use catalog::Catalog;
use cli::{Cli, Commands};
use config::Config;
use error::{GarmentError, Result};
use scanner::ImageStore;
use std::io::Read;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load()?;

    match cli.command {
        Commands::Extract { input, compact } => {
            let library = analyzer::load_library(&config, cli.library.as_deref())?;
            let extractor = TagExtractor::new(&library);

            let raw = match input {
                Some(path) => analyzer::read_ai_output(&path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            let tags = extractor.extract(&raw);
            let json = if compact {
                serde_json::to_string(&tags)?
            } else {
                serde_json::to_string_pretty(&tags)?
            };
            println!("{}", json);
        }

        Commands::Ingest { image, ai_output } => {
            println!("👕 garment-tagger - 登録\n");

            let library = analyzer::load_library(&config, cli.library.as_deref())?;
            let extractor = TagExtractor::new(&library);
            let catalog_dir = config.catalog_dir()?;
            let mut catalog = Catalog::load(&catalog_dir)?;
            let store = ImageStore::in_catalog(&catalog_dir);

            // AI出力の指定がなければ画像と同名の .txt を使う
            let ai_output = ai_output.or_else(|| {
                let sidecar = image.with_extension("txt");
                sidecar.is_file().then_some(sidecar)
            });
            let raw = match ai_output {
                Some(path) => Some(analyzer::read_ai_output(&path)?),
                None => {
                    println!("- AI出力がないためタグは unknown になります");
                    None
                }
            };

            let analysis = analyzer::analyze(&extractor, raw);
            println!("✔ {}件のタグを認識", analysis.tags.len());

            let id = ingest::ingest_image(&mut catalog, &store, &image, analysis)?;
            catalog.save(&catalog_dir)?;

            if let Some(record) = catalog.get(id) {
                print_record(record);
            }
            println!("\n✅ 登録完了 (ID: {})", id);
        }

        Commands::IngestFolder { folder } => {
            println!("👕 garment-tagger - 一括登録\n");

            // 1. 画像スキャン
            println!("[1/3] 写真をスキャン中...");
            let images = scanner::scan_folder(&folder)?;
            let with_output = images.iter().filter(|i| i.ai_output.is_some()).count();
            println!("✔ {}枚の写真を検出（AI出力あり: {}枚）\n", images.len(), with_output);

            if images.is_empty() {
                println!("登録する写真がありません");
                return Ok(());
            }

            // 2. タグ抽出
            println!("[2/3] タグ抽出中...");
            let library = analyzer::load_library(&config, cli.library.as_deref())?;
            let extractor = TagExtractor::new(&library);
            let analyses = analyzer::analyze_images(&images, &extractor, !cli.verbose);
            let recognized = analyses.iter().filter(|a| !a.tags.is_empty()).count();
            println!("✔ タグ抽出完了（認識: {}/{}枚）\n", recognized, images.len());

            // 3. 登録
            println!("[3/3] カタログに登録中...");
            let catalog_dir = config.catalog_dir()?;
            let mut catalog = Catalog::load(&catalog_dir)?;
            let store = ImageStore::in_catalog(&catalog_dir);

            let mut registered = 0;
            for (image, analysis) in images.iter().zip(analyses) {
                match ingest::ingest_image(&mut catalog, &store, &image.path, analysis) {
                    Ok(id) => {
                        registered += 1;
                        if cli.verbose {
                            println!("  {} → ID {}", image.file_name, id);
                        }
                    }
                    Err(e) => println!("  ⚠ {}: {}", image.file_name, e),
                }
            }
            catalog.save(&catalog_dir)?;

            println!("✔ {}枚を登録: {}", registered, catalog_dir.display());
            println!("\n✅ 一括登録完了");
        }

        Commands::List => {
            let catalog = Catalog::load(&config.catalog_dir()?)?;
            print_summary(&catalog.list());
        }

        Commands::Show { id } => {
            let catalog = Catalog::load(&config.catalog_dir()?)?;
            let record = catalog.get(id).ok_or(GarmentError::RecordNotFound(id))?;
            print_record(record);
        }

        Commands::Search { query, tags } => {
            let catalog = Catalog::load(&config.catalog_dir()?)?;
            let tags = tags
                .as_deref()
                .map(catalog::parse_tag_list)
                .unwrap_or_default();
            let hits = catalog.search(query.as_deref(), &tags);
            print_summary(&hits);
        }

        Commands::Edit { id, tags } => {
            let edit = TagEdit::from(tags);
            if edit.is_empty() {
                println!("変更するタグが指定されていません（--color など）");
                return Ok(());
            }

            let catalog_dir = config.catalog_dir()?;
            let mut catalog = Catalog::load(&catalog_dir)?;
            catalog.apply_edit(id, &edit)?;
            catalog.save(&catalog_dir)?;

            println!("✔ タグを更新しました (ID: {})", id);
            if let Some(record) = catalog.get(id) {
                print_record(record);
            }
        }

        Commands::Delete { id, yes } => {
            let catalog_dir = config.catalog_dir()?;
            let mut catalog = Catalog::load(&catalog_dir)?;
            let record = catalog.get(id).ok_or(GarmentError::RecordNotFound(id))?;

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("ID {} ({}) を削除しますか?", id, record.filename))
                    .default(false)
                    .interact()
                    .map_err(|e| GarmentError::Prompt(e.to_string()))?;
                if !confirmed {
                    println!("キャンセルしました");
                    return Ok(());
                }
            }

            let store = ImageStore::in_catalog(&catalog_dir);
            let removed = ingest::delete_record(&mut catalog, &store, id)?;
            catalog.save(&catalog_dir)?;
            println!("✔ 削除しました: {} (ID: {})", removed.filename, id);
        }

        Commands::Config { set_catalog_dir, set_library, show } => {
            let mut config = config;

            if let Some(dir) = set_catalog_dir {
                config.set_catalog_dir(dir)?;
                println!("✔ カタログ保存先を設定しました");
            }

            if let Some(path) = set_library {
                config.set_library_path(path)?;
                println!("✔ タグライブラリを設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  カタログ保存先: {}", config.catalog_dir()?.display());
                println!(
                    "  タグライブラリ: {}",
                    config
                        .library_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "組み込み".into())
                );
            }
        }
    }

    Ok(())
}

/// ログ初期化（RUST_LOG があれば優先）
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_summary(records: &[&GarmentRecord]) {
    if records.is_empty() {
        println!("該当するレコードがありません");
        return;
    }

    for record in records {
        println!(
            "{:>5}  {}  {}  {} / {} / {} / {}",
            record.id,
            record.upload_time,
            record.filename,
            record.style,
            record.color,
            record.sleeve,
            record.season
        );
    }
    println!("\n{}件", records.len());
}

fn print_record(record: &GarmentRecord) {
    println!("ID: {}", record.id);
    println!("  ファイル: {}", record.filename);
    println!("  登録日時: {}", record.upload_time);
    for (attribute, value) in record.tags() {
        println!("  {:<10} {}", attribute.as_str(), value);
    }
    println!("  信頼度: {:.2}", record.confidence);
    println!("  AI出力: {}", record.ai_tags);
}
