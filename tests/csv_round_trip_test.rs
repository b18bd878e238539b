use anyhow::Result;
use small_table::core::csv_io::{parse_csv, write_csv, CsvOptions};
use small_table::domain::seed::seed_records;
use small_table::{EngineOptions, FieldValue, MemoryStore, Record, TableEngine};

/// 所有欄位可見時，export 再 import 應還原相同資料
#[test]
fn test_export_then_import_restores_seed_dataset() -> Result<()> {
    let engine = TableEngine::new(EngineOptions::default(), MemoryStore::new());
    let exported = engine.export_csv()?;

    let reimported = parse_csv(&exported, &CsvOptions::default())?;
    assert_eq!(reimported, seed_records());
    Ok(())
}

#[test]
fn test_round_trip_with_awkward_text() -> Result<()> {
    let records = vec![
        Record::from_pairs([
            ("name", FieldValue::from("O'Brien, \"Pat\"")),
            ("note", FieldValue::from("line one\nline two")),
            ("code", FieldValue::from("007")),
            ("score", FieldValue::from(-12)),
        ]),
        Record::from_pairs([
            ("name", FieldValue::from("Ünal")),
            ("note", FieldValue::from("  padded  ")),
            ("code", FieldValue::from("")),
            ("score", FieldValue::from(0)),
        ]),
    ];
    let columns: Vec<String> = ["name", "note", "code", "score"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let text = write_csv(&records, &columns, b',')?;
    let parsed = parse_csv(&text, &CsvOptions::default())?;
    assert_eq!(parsed, records);
    Ok(())
}

/// 全部欄位都是空字串的一筆會寫成 `,`，重新匯入時不能被丟掉
#[test]
fn test_round_trip_keeps_record_of_empty_values() -> Result<()> {
    let records = vec![
        Record::from_pairs([("name", "A"), ("note", "x")]),
        Record::from_pairs([("name", ""), ("note", "")]),
    ];
    let columns = vec!["name".to_string(), "note".to_string()];

    let text = write_csv(&records, &columns, b',')?;
    assert_eq!(text, "name,note\nA,x\n,\n");

    let parsed = parse_csv(&text, &CsvOptions::default())?;
    assert_eq!(parsed, records);
    Ok(())
}

#[test]
fn test_round_trip_as_text_without_inference() -> Result<()> {
    let engine = TableEngine::new(EngineOptions::default(), MemoryStore::new());
    let exported = engine.export_csv()?;

    let options = CsvOptions {
        infer_integers: false,
        ..CsvOptions::default()
    };
    let reimported = parse_csv(&exported, &options)?;

    for (original, restored) in seed_records().iter().zip(&reimported) {
        for (key, value) in original.iter() {
            assert_eq!(
                restored.get(key).map(|v| v.to_string()),
                Some(value.to_string())
            );
        }
    }
    Ok(())
}

/// 隱藏 age 後匯出：標頭與每列都沒有 age，但資料本身仍保留
#[test]
fn test_hidden_age_is_dropped_from_export() -> Result<()> {
    let mut engine = TableEngine::new(EngineOptions::default(), MemoryStore::new());
    assert!(!engine.toggle_column("age")?);

    let exported = engine.export_csv()?;
    let lines: Vec<&str> = exported.lines().collect();

    assert_eq!(lines.len(), 26);
    assert_eq!(lines[0], "name,email,role,department,location");
    assert_eq!(lines[1], "Alice,alice@example.com,Developer,IT,Hyderabad");
    assert!(lines.iter().skip(1).all(|line| line.split(',').count() == 5));

    assert!(engine
        .dataset()
        .current()
        .iter()
        .all(|r| r.contains_key("age")));
    Ok(())
}

#[test]
fn test_export_header_follows_registry_order() -> Result<()> {
    let store = MemoryStore::new();
    small_table::KeyValueStore::save(
        &store,
        "visibleColumns",
        r#"{"location":true,"age":true,"name":true,"email":false}"#,
    )?;

    let engine = TableEngine::new(EngineOptions::default(), store);
    let exported = engine.export_csv()?;
    let header = exported.lines().next().unwrap_or_default();

    assert_eq!(header, "location,age,name");
    assert_eq!(
        header.split(',').map(|s| s.to_string()).collect::<Vec<_>>(),
        engine.columns().visible_names()
    );
    Ok(())
}

#[test]
fn test_export_ignores_search_and_paging() -> Result<()> {
    let mut engine = TableEngine::new(EngineOptions::default(), MemoryStore::new());
    engine.search("delhi");
    engine.set_page(1);

    let exported = engine.export_csv()?;
    assert_eq!(exported.lines().count(), 26);
    Ok(())
}

#[test]
fn test_semicolon_delimited_engine() -> Result<()> {
    let options = EngineOptions {
        csv: CsvOptions {
            delimiter: b';',
            ..CsvOptions::default()
        },
        ..EngineOptions::default()
    };
    let mut engine = TableEngine::new(options, MemoryStore::new());
    engine.import_csv("name;city\nAlice;Pune, MH\n")?;

    assert_eq!(
        engine.dataset().current()[0].get("city"),
        Some(&FieldValue::from("Pune, MH"))
    );
    Ok(())
}
