// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneylens::analytics::{spending_by_category, SpendingArgs};
use moneylens::commands::doctor;
use moneylens::ledger::{Ledger, LedgerSource, MemoryLedger, SqliteLedger, TransactionQuery};
use moneylens::AnalyticsError;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn seed(conn: &rusqlite::Connection) {
    moneylens::db::init_schema(conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO accounts(id,name,sort_order) VALUES ('b','Second',2);
        INSERT INTO accounts(id,name,offbudget,closed,sort_order) VALUES ('a','First',1,1,1);
        INSERT INTO category_groups(id,name,sort_order) VALUES ('g2','Later',2);
        INSERT INTO category_groups(id,name,is_income,sort_order) VALUES ('g1','Income',1,1);
        INSERT INTO categories(id,name,group_id) VALUES ('c2','Rent','g2');
        INSERT INTO categories(id,name,group_id) VALUES ('c1','Wages','g1');
        INSERT INTO categories(id,name,group_id) VALUES ('c3','Utilities','g2');
        INSERT INTO payees(id,name) VALUES ('p1','Landlord');
        INSERT INTO transactions(id,account_id,date,amount,category_id,payee_id,cleared) VALUES ('t1','b','2024-04-01',-120000,'c2','p1',1);
        INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t2','b','2024-04-15',250000,'c1');
        INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t3','b','15/04/2024',-10,'c9');
        INSERT INTO rules(id,stage,conditions,actions) VALUES ('r1',NULL,
            '[{"field":"payee","op":"is","value":"p1"}]',
            '[{"field":"category","op":"set","value":"c2"}]');
        "#,
    )
    .unwrap();
}

#[test]
fn sqlite_ledger_reads_accounts_in_sort_order() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    seed(&conn);
    let ledger = SqliteLedger::from_connection(conn);
    let accounts = ledger.fetch_all_accounts().unwrap();
    assert_eq!(accounts[0].id, "a");
    assert!(accounts[0].off_budget && accounts[0].closed);
    assert_eq!(accounts[0].balance, 0);
    assert_eq!(accounts[1].balance, -120000 + 250000 - 10);
}

#[test]
fn sqlite_ledger_groups_categories_and_joins_payees() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    seed(&conn);
    let ledger = SqliteLedger::from_connection(conn);

    let groups = ledger.fetch_grouped_categories().unwrap();
    assert_eq!(groups[0].name, "Income");
    assert!(groups[0].is_income);
    let later: Vec<&str> = groups[1].categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(later, vec!["Rent", "Utilities"]);

    let txs = ledger
        .fetch_transactions(&TransactionQuery::for_account("b"))
        .unwrap();
    assert_eq!(txs.len(), 3);
    let rent = txs.iter().find(|t| t.id == "t1").unwrap();
    assert_eq!(rent.payee_name.as_deref(), Some("Landlord"));
    assert_eq!(rent.cleared, Some(true));
    let bad = txs.iter().find(|t| t.id == "t3").unwrap();
    assert_eq!(bad.date, None);

    let bounded = ledger
        .fetch_transactions(
            &TransactionQuery::for_account("b")
                .between(NaiveDate::from_ymd_opt(2024, 4, 2), None),
        )
        .unwrap();
    let ids: Vec<&str> = bounded.iter().map(|t| t.id.as_str()).collect();
    assert!(ids.contains(&"t2") && ids.contains(&"t3") && !ids.contains(&"t1"));
}

#[test]
fn doctor_reports_bad_records() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    seed(&conn);
    let ledger = SqliteLedger::from_connection(conn);
    let issues = doctor::check(&ledger).unwrap();
    let kinds: Vec<&str> = issues.iter().map(|r| r[0].as_str()).collect();
    assert_eq!(kinds, vec!["unreadable_date", "unknown_category"]);
}

#[test]
fn file_backed_session_opens_read_only() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.sqlite");
    {
        let conn = moneylens::db::open_or_init(&path).unwrap();
        seed(&conn);
    }
    let source = LedgerSource::Sqlite(path);
    let groups = source
        .with_ledger(|l| spending_by_category(l, &SpendingArgs::default()))
        .unwrap();
    assert_eq!(groups[0].name, "Later");
    assert_eq!(groups[0].total, 120000);

    let missing = LedgerSource::Sqlite(dir.path().join("absent.sqlite"));
    let err = missing
        .with_ledger(|l| l.fetch_all_accounts())
        .unwrap_err();
    assert!(matches!(err, AnalyticsError::Upstream(_)));
}

#[test]
fn snapshot_source_loads_json() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"accounts":[{{"id":"x","name":"Wallet","balance":4200}}],
            "transactions":[{{"id":"t","accountId":"x","date":"2024-05-01","amount":-300}}]}}"#
    )
    .unwrap();
    file.flush().unwrap();

    let source = LedgerSource::Snapshot(file.path().to_path_buf());
    let accounts = source.with_ledger(|l| l.fetch_all_accounts()).unwrap();
    assert_eq!(accounts[0].balance, 4200);
    assert!(!accounts[0].off_budget);

    let ledger = MemoryLedger::from_path(file.path()).unwrap();
    let txs = ledger
        .fetch_transactions(&TransactionQuery::for_account("x"))
        .unwrap();
    assert_eq!(txs[0].amount, -300);
}

#[test]
fn broken_snapshot_is_an_upstream_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{ not json").unwrap();
    let err = MemoryLedger::from_path(file.path()).unwrap_err();
    assert!(matches!(err, AnalyticsError::Upstream(_)));
}

#[test]
fn sqlite_ledger_decodes_rules() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    seed(&conn);
    conn.execute(
        "INSERT INTO rules(id,conditions) VALUES ('r2','not json')",
        [],
    )
    .unwrap();
    let ledger = SqliteLedger::from_connection(conn);
    let err = ledger.fetch_rules().unwrap_err();
    assert!(matches!(err, AnalyticsError::Upstream(ref m) if m.contains("r2")));

    ledger.connection().execute("DELETE FROM rules WHERE id='r2'", []).unwrap();
    let rules = ledger.fetch_rules().unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].conditions_op, "and");
    assert_eq!(rules[0].stage, None);
    assert_eq!(rules[0].conditions[0].field, "payee");
    assert_eq!(rules[0].actions[0].field.as_deref(), Some("category"));
}
