use clap::Parser;
use small_table::core::engine::header_label;
use small_table::utils::{logger, validation::Validate};
use small_table::{
    CliConfig, JsonFileStore, KeyValueStore, LocalStorage, SortDirection, TableEngine,
    TableError, View,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting small-table CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.table_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }
    let options = match config.engine_options() {
        Ok(options) => options,
        Err(e) => exit_with(&e),
    };

    let store = JsonFileStore::new(config.state_path());
    let mut engine = TableEngine::new(options, store);

    if let Some(path) = &cli.import {
        let storage = LocalStorage::new(".");
        match engine.import_file(&storage, path).await {
            Ok(count) => println!("✅ Imported {} records from {}", count, path),
            // 匯入失敗不影響現有資料，繼續執行
            Err(e) => report(&e),
        }
    }

    for column in &cli.toggle_columns {
        match engine.toggle_column(column) {
            Ok(visible) => tracing::info!(
                "Column '{}' is now {}",
                column,
                if visible { "visible" } else { "hidden" }
            ),
            Err(e) => report(&e),
        }
    }

    engine.search(&cli.search);
    if let Some(key) = &cli.sort {
        let direction = if cli.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        engine.sort_by(key, direction);
    }
    engine.set_page(cli.page);

    let view = engine.view();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&engine, &view);
    }

    if cli.export {
        let storage = LocalStorage::new(&cli.output_path);
        match engine.export_file(&storage).await {
            Ok(filename) => {
                tracing::info!("✅ Export completed");
                println!("📁 Export saved to: {}", storage.resolve(&filename).display());
            }
            Err(e) => exit_with(&e),
        }
    }

    Ok(())
}

fn print_view<K: KeyValueStore>(engine: &TableEngine<K>, view: &View) {
    let header: Vec<String> = view
        .columns
        .iter()
        .map(|c| format!("{} {}", header_label(c), engine.sort_indicator(c)))
        .collect();
    println!("{}", header.join("\t"));

    for row in &view.rows {
        let cells: Vec<String> = view
            .columns
            .iter()
            .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        println!("{}", cells.join("\t"));
    }

    println!(
        "Page {} of {} ({} matching records)",
        view.page, view.total_pages, view.total_matches
    );
}

fn report(e: &TableError) {
    tracing::warn!("{}", e);
    eprintln!("⚠️  {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn exit_with(e: &TableError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}
