#![cfg(any(feature = "sqlite", feature = "postgres"))]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sql_assister::prelude::*;

/// Handle that reports a fixed affected-row count and counts driver calls.
struct FixedHandle {
    affected: usize,
    calls: AtomicUsize,
}

impl FixedHandle {
    fn new(affected: usize) -> Self {
        Self {
            affected,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatementExecutor for FixedHandle {
    fn database_type(&self) -> DatabaseType {
        #[cfg(feature = "sqlite")]
        {
            DatabaseType::Sqlite
        }
        #[cfg(all(not(feature = "sqlite"), feature = "postgres"))]
        {
            DatabaseType::Postgres
        }
    }

    async fn execute_dml(
        &self,
        _query: &str,
        _params: &[RowValues],
    ) -> Result<usize, SqlAssisterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.affected)
    }

    async fn execute_select(
        &self,
        _query: &str,
        params: &[RowValues],
        limit: Option<usize>,
    ) -> Result<ResultSet, SqlAssisterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // echo each parameter back as its own row
        let mut rs = ResultSet::with_columns(vec!["value".to_string()], params.len());
        for p in params.iter().take(limit.unwrap_or(usize::MAX)) {
            rs.add_row_values(vec![p.clone()]);
        }
        Ok(rs)
    }
}

#[tokio::test]
async fn update_succeeds_only_for_exactly_one_row() {
    for (affected, ok) in [(0, false), (1, true), (2, false), (10, false)] {
        let handle = FixedHandle::new(affected);
        let res = ephemeral::update_single_row(&handle, "UPDATE t SET x = $1 WHERE id = $2", &args![5, 1]).await;
        assert_eq!(res.is_ok(), ok, "affected = {affected}");
        if let Err(err) = res {
            assert!(err.is_rows_affected_mismatch());
        }
        assert_eq!(handle.calls(), 1);
    }
}

#[tokio::test]
async fn update_rows_compares_against_expected() {
    let handle = FixedHandle::new(4);
    assert!(ephemeral::update_rows(&handle, "DELETE FROM t", &[], 4).await.is_ok());
    let err = ephemeral::update_rows(&handle, "DELETE FROM t", &[], 3)
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "number of rows affected does not match the expected number of rows affected: 4 / 3"
    );
}

#[tokio::test]
async fn empty_query_never_reaches_the_handle() {
    let handle = FixedHandle::new(1);
    let some = args![1];

    assert!(ephemeral::update_single_row(&handle, "", &some).await.unwrap_err().is_missing_query());
    assert!(ephemeral::update_rows(&handle, "", &some, 1).await.unwrap_err().is_missing_query());
    assert!(ephemeral::scan_single_row(&handle, "", &some).await.unwrap_err().is_missing_query());
    assert!(
        ephemeral::scan_single_row_with_args(&handle, "", &some)
            .await
            .unwrap_err()
            .is_missing_query()
    );
    assert!(ephemeral::scan_multiple_rows(&handle, "", &some).await.unwrap_err().is_missing_query());
    assert!(
        ephemeral::scan_multiple_rows_with_args(&handle, "", &[])
            .await
            .unwrap_err()
            .is_missing_query()
    );
    assert!(
        ephemeral::scan_struct::<(i64,), _>(&handle, "", &some)
            .await
            .unwrap_err()
            .is_missing_query()
    );

    assert_eq!(handle.calls(), 0);
}

#[tokio::test]
async fn with_args_variants_require_arguments() {
    let handle = FixedHandle::new(1);

    assert!(
        ephemeral::scan_single_row_with_args(&handle, "SELECT 1", &[])
            .await
            .unwrap_err()
            .is_missing_args()
    );
    assert!(
        ephemeral::scan_multiple_rows_with_args(&handle, "SELECT 1", &[])
            .await
            .unwrap_err()
            .is_missing_args()
    );
    assert_eq!(handle.calls(), 0);

    // the plain variants run without arguments
    let single = ephemeral::scan_single_row(&handle, "SELECT 1", &[]).await.unwrap();
    assert!(single.is_empty());
    let rows = ephemeral::scan_multiple_rows(&handle, "SELECT 1", &[]).await.unwrap();
    assert_eq!(rows.remaining(), 0);
    assert_eq!(handle.calls(), 2);
}

#[tokio::test]
async fn single_row_asks_for_one_row_only() {
    let handle = FixedHandle::new(1);
    let single = ephemeral::scan_single_row_with_args(&handle, "SELECT ?", &args![3, 4, 5])
        .await
        .unwrap();
    assert_eq!(single.into_row().unwrap().get("value"), Some(&RowValues::Int(3)));

    let all: Vec<(i64,)> = ephemeral::scan_structs(&handle, "SELECT ?", &args![3, 4, 5])
        .await
        .unwrap();
    assert_eq!(all, vec![(3,), (4,), (5,)]);
}

#[tokio::test]
async fn assister_and_ephemeral_agree() {
    let handle = FixedHandle::new(1);
    let assister = Assister::new(&handle);

    assister
        .update_single_row("UPDATE t SET x = $1 WHERE id = $2", &args![5, 1])
        .await
        .unwrap();
    ephemeral::update_single_row(&handle, "UPDATE t SET x = $1 WHERE id = $2", &args![5, 1])
        .await
        .unwrap();

    let a = assister
        .scan_multiple_rows_with_args("SELECT ?", &args!["x", "y"])
        .await
        .unwrap();
    let b = ephemeral::scan_multiple_rows_with_args(&handle, "SELECT ?", &args!["x", "y"])
        .await
        .unwrap();
    let a: Vec<(String,)> = a.scan_all().unwrap();
    let b: Vec<(String,)> = b.scan_all().unwrap();
    assert_eq!(a, b);
    assert_eq!(handle.calls(), 4);
}
