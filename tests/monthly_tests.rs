// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneylens::analytics::{monthly_summary, MonthlySummaryArgs};
use moneylens::ledger::SqliteLedger;
use moneylens::AnalyticsError;
use rusqlite::Connection;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn setup() -> SqliteLedger {
    let conn = Connection::open_in_memory().unwrap();
    moneylens::db::init_schema(&conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO accounts(id,name) VALUES ('a1','Checking');
        INSERT INTO accounts(id,name,offbudget) VALUES ('brk','Brokerage',1);
        INSERT INTO category_groups(id,name) VALUES ('g_food','Food');
        INSERT INTO category_groups(id,name,is_income) VALUES ('g_inc','Income',1);
        INSERT INTO category_groups(id,name,is_savings_or_investment) VALUES ('g_inv','Investments',1);
        INSERT INTO categories(id,name,group_id) VALUES ('food','Groceries','g_food');
        INSERT INTO categories(id,name,group_id) VALUES ('pay','Paycheck','g_inc');
        INSERT INTO categories(id,name,group_id) VALUES ('etf','ETF','g_inv');
        "#,
    )
    .unwrap();
    SqliteLedger::from_connection(conn)
}

#[test]
fn zero_fills_every_month_in_window() {
    let ledger = setup();
    let rows = monthly_summary(&ledger, &MonthlySummaryArgs::default(), today()).unwrap();
    assert_eq!(rows.len(), 3);
    let months: Vec<(i32, u32)> = rows.iter().map(|r| (r.year, r.month)).collect();
    assert_eq!(months, vec![(2024, 1), (2024, 2), (2024, 3)]);
    assert!(rows
        .iter()
        .all(|r| r.income == 0 && r.expenses == 0 && r.investments == 0 && r.transactions == 0));
}

#[test]
fn sums_income_expenses_and_investments_per_month() {
    let ledger = setup();
    ledger
        .connection()
        .execute_batch(
            r#"
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t1','a1','2024-01-05',300000,'pay');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t2','a1','2024-01-09',-4500,'food');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t3','a1','2024-03-02',-2500,'food');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t4','a1','2024-03-03',50000,'etf');
            INSERT INTO transactions(id,account_id,date,amount,transfer_account_id) VALUES ('t5','a1','2024-03-04',-20000,'brk');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t6','a1','2024-03-05',0,'food');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t7','a1','2023-12-31',-99999,'food');
            "#,
        )
        .unwrap();
    let rows = monthly_summary(&ledger, &MonthlySummaryArgs::default(), today()).unwrap();

    assert_eq!(rows[0].income, 300000);
    assert_eq!(rows[0].expenses, 4500);
    assert_eq!(rows[0].transactions, 2);

    assert_eq!(rows[1].transactions, 0);

    assert_eq!(rows[2].expenses, 2500);
    assert_eq!(rows[2].investments, 70000);
    assert_eq!(rows[2].income, 0);
    assert_eq!(rows[2].transactions, 4);
}

#[test]
fn undated_rows_are_skipped_not_fatal() {
    let ledger = setup();
    ledger
        .connection()
        .execute_batch(
            r#"
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t1','a1','2024-02-10',-100,'food');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t2','a1',NULL,-100,'food');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t3','a1','2024-13-45',-100,'food');
            "#,
        )
        .unwrap();
    let rows = monthly_summary(&ledger, &MonthlySummaryArgs::default(), today()).unwrap();
    let total: usize = rows.iter().map(|r| r.transactions).sum();
    assert_eq!(total, 1);
    assert_eq!(rows[1].expenses, 100);
}

#[test]
fn account_filter_and_default_scope() {
    let ledger = setup();
    ledger
        .connection()
        .execute_batch(
            r#"
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t1','a1','2024-03-01',-100,'food');
            INSERT INTO transactions(id,account_id,date,amount) VALUES ('t2','brk','2024-03-01',20000);
            "#,
        )
        .unwrap();
    // off-budget accounts are outside the default scope
    let rows = monthly_summary(&ledger, &MonthlySummaryArgs::default(), today()).unwrap();
    assert_eq!(rows[2].transactions, 1);

    let args = MonthlySummaryArgs {
        months: 1,
        account_id: Some("brk".into()),
    };
    let rows = monthly_summary(&ledger, &args, today()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].income, 20000);

    let args = MonthlySummaryArgs {
        months: 6,
        account_id: Some("missing".into()),
    };
    let err = monthly_summary(&ledger, &args, today()).unwrap_err();
    assert!(matches!(err, AnalyticsError::NotFound { .. }));
}

#[test]
fn window_length_follows_months() {
    let ledger = setup();
    let args = MonthlySummaryArgs {
        months: 14,
        account_id: None,
    };
    let rows = monthly_summary(&ledger, &args, today()).unwrap();
    assert_eq!(rows.len(), 14);
    assert_eq!((rows[0].year, rows[0].month), (2023, 2));

    let args = MonthlySummaryArgs {
        months: 0,
        account_id: None,
    };
    assert!(monthly_summary(&ledger, &args, today()).unwrap().is_empty());
}

#[test]
fn repeated_calls_give_identical_rows() {
    let ledger = setup();
    ledger
        .connection()
        .execute_batch(
            r#"
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t1','a1','2024-01-05',300000,'pay');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t2','a1','2024-02-09',-4500,'food');
            INSERT INTO transactions(id,account_id,date,amount,category_id) VALUES ('t3','a1','2024-03-03',50000,'etf');
            "#,
        )
        .unwrap();
    let args = MonthlySummaryArgs::default();
    let first = monthly_summary(&ledger, &args, today()).unwrap();
    let second = monthly_summary(&ledger, &args, today()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first[1].expenses, 4500);
}
