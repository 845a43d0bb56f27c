#![cfg(feature = "test-utils")]

use sql_assister::prelude::*;
use sql_assister::test_utils::{setup_postgres_embedded, stop_postgres_embedded};

const DDL: &str = "
    CREATE TABLE t (
        id BIGINT PRIMARY KEY,
        x INT4 NOT NULL DEFAULT 0,
        small INT2,
        ratio REAL,
        label TEXT
    );
    INSERT INTO t (id, label) VALUES (1, 'one'), (2, 'two'), (3, 'three');
";

#[tokio::test]
async fn postgres_update_and_scan() -> Result<(), Box<dyn std::error::Error>> {
    let server = setup_postgres_embedded("assister_test").await?;
    let client = server.options.connect().await?;
    client.batch_execute(DDL).await?;
    let assister = Assister::new(client);
    assert_eq!(assister.handle().database_type(), DatabaseType::Postgres);

    // one row has id = 1, none has id = 42
    assister
        .update_single_row("UPDATE t SET x=$1 WHERE id=$2", &args![5, 1])
        .await?;
    let err = assister
        .update_single_row("UPDATE t SET x=$1 WHERE id=$2", &args![5, 42])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SqlAssisterError::RowsAffectedMismatch {
            actual: 0,
            expected: 1
        }
    ));
    assister
        .update_rows("UPDATE t SET ratio = $1, small = $2", &args![0.25, 12], 3)
        .await?;

    // INT2 column rejects a value that does not fit
    let err = assister
        .update_single_row("UPDATE t SET small = $1 WHERE id = $2", &args![70_000, 1])
        .await
        .unwrap_err();
    assert!(matches!(err, SqlAssisterError::PostgresError(_)), "{err}");

    // scan-one keeps only the first row of a multi-row result
    let single = assister
        .scan_single_row("SELECT id, x, small, ratio, label FROM t ORDER BY id", &[])
        .await?;
    let (id, x, small, ratio, label): (i64, i32, i64, f64, String) = single.scan()?;
    assert_eq!((id, x, small, ratio, label.as_str()), (1, 5, 12, 0.25, "one"));

    let none = assister
        .scan_single_row_with_args("SELECT id FROM t WHERE id = $1", &args![42])
        .await?;
    assert!(matches!(none.row(), Err(SqlAssisterError::NoRows)));

    let rows = assister
        .scan_multiple_rows_with_args("SELECT id FROM t WHERE id > $1 ORDER BY id", &args![1])
        .await?;
    assert_eq!(rows.column_names(), ["id"]);
    let ids: Vec<(i64,)> = rows.scan_all()?;
    assert_eq!(ids, vec![(2,), (3,)]);

    let err = assister
        .scan_multiple_rows_with_args("SELECT id FROM t", &[])
        .await
        .unwrap_err();
    assert!(err.is_missing_args());

    stop_postgres_embedded(server).await;
    Ok(())
}

#[tokio::test]
async fn postgres_scans_types_without_a_direct_mapping() -> Result<(), Box<dyn std::error::Error>>
{
    let server = setup_postgres_embedded("assister_types").await?;
    let client = server.options.connect().await?;

    let row = ephemeral::scan_single_row(
        &client,
        "SELECT now() AS now_ts, DATE '2024-01-03' AS d, 1.5::numeric AS amount, \
         gen_random_uuid() AS id, 'abc'::varchar AS v",
        &[],
    )
    .await?
    .into_row()?;

    assert!(row.get("now_ts").and_then(RowValues::as_timestamp).is_some());
    assert_eq!(
        row.get("d").and_then(RowValues::as_timestamp).map(|ts| ts.to_string()),
        Some("2024-01-03 00:00:00".to_string())
    );
    assert!(row.get("amount").and_then(RowValues::as_blob).is_some());
    assert_eq!(row.get("id").and_then(RowValues::as_blob).map(<[u8]>::len), Some(16));
    assert_eq!(row.get("v").and_then(RowValues::as_text), Some("abc"));

    stop_postgres_embedded(server).await;
    Ok(())
}
