#![cfg(feature = "sqlite")]

use chrono::NaiveDateTime;
use serde_json::json;
use sql_assister::prelude::*;

#[derive(Debug, PartialEq)]
struct Device {
    id: String,
    cpu_temp: Option<f64>,
    fan_speed: i32,
    online: bool,
    last_logged_in: NaiveDateTime,
    settings: serde_json::Value,
    firmware: Vec<u8>,
}

from_row!(Device {
    id = "ID",
    cpu_temp,
    fan_speed,
    online,
    last_logged_in,
    settings,
    firmware,
});

const DDL: &str = r#"
    CREATE TABLE device (
        "ID" TEXT PRIMARY KEY,
        cpu_temp REAL,
        fan_speed INTEGER NOT NULL,
        online BOOLEAN NOT NULL,
        last_logged_in DATETIME NOT NULL,
        settings JSON NOT NULL,
        firmware BLOB NOT NULL
    );
"#;

const INSERT: &str = r#"
    INSERT INTO device ("ID", cpu_temp, fan_speed, online, last_logged_in, settings, firmware)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
"#;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

#[tokio::test]
async fn structs_round_trip_through_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let db = SqliteHandle::open_in_memory().await?;
    db.execute_batch(DDL).await?;
    let assister = Assister::new(db);

    assister
        .update_single_row(
            INSERT,
            &args![
                "dev-1",
                42.5,
                1200,
                true,
                ts("2024-01-01 08:00:01"),
                json!({"mode": "eco"}),
                b"fw1".to_vec()
            ],
        )
        .await?;
    assister
        .update_single_row(
            INSERT,
            &args![
                "dev-2",
                None::<f64>,
                800,
                false,
                ts("2024-01-03 10:30:00"),
                json!({"mode": "max"}),
                b"fw2".to_vec()
            ],
        )
        .await?;

    let device: Device = assister
        .scan_struct(
            r#"SELECT "ID", cpu_temp, fan_speed, online, last_logged_in, settings, firmware
               FROM device WHERE "ID" = ?1"#,
            &args!["dev-2"],
        )
        .await?;
    assert_eq!(
        device,
        Device {
            id: "dev-2".into(),
            cpu_temp: None,
            fan_speed: 800,
            online: false,
            last_logged_in: ts("2024-01-03 10:30:00"),
            settings: json!({"mode": "max"}),
            firmware: b"fw2".to_vec(),
        }
    );

    let devices: Vec<Device> = assister
        .scan_structs(r#"SELECT * FROM device ORDER BY "ID""#, &[])
        .await?;
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].cpu_temp, Some(42.5));
    assert!(devices[0].online);
    assert_eq!(devices[0].settings["mode"], "eco");
    Ok(())
}

#[tokio::test]
async fn scanning_into_the_wrong_shape_is_a_conversion_error()
-> Result<(), Box<dyn std::error::Error>> {
    let db = SqliteHandle::open_in_memory().await?;
    db.execute_batch("CREATE TABLE n (v TEXT); INSERT INTO n (v) VALUES ('abc');")
        .await?;

    let err = ephemeral::scan_struct::<(i64,), _>(&db, "SELECT v FROM n", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, SqlAssisterError::Conversion(_)));

    let err = ephemeral::scan_struct::<Device, _>(&db, "SELECT v FROM n", &[])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("ID"), "{err}");

    let err = ephemeral::scan_struct::<(String,), _>(&db, "SELECT v FROM n WHERE v = ?1", &args!["zzz"])
        .await
        .unwrap_err();
    assert!(matches!(err, SqlAssisterError::NoRows));
    Ok(())
}

#[tokio::test]
async fn rows_can_be_scanned_one_at_a_time() -> Result<(), Box<dyn std::error::Error>> {
    let db = SqliteHandle::open_in_memory().await?;
    db.execute_batch(
        "CREATE TABLE s (n INTEGER); INSERT INTO s (n) VALUES (1), (2), (3);",
    )
    .await?;

    let mut rows = ephemeral::scan_multiple_rows(&db, "SELECT n FROM s ORDER BY n", &[]).await?;
    let mut seen = Vec::new();
    while let Some(next) = rows.scan_next::<(i64,)>() {
        seen.push(next?.0);
    }
    assert_eq!(seen, vec![1, 2, 3]);
    Ok(())
}
